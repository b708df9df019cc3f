use anyhow::{Context, Result};
use serde_json::Value;

use super::RenderContext;
use crate::config::Config;
use crate::models::{Notice, NoticesResponse};
use crate::render::{Node, RenderMap};

pub fn url(config: &Config, _ctx: &RenderContext) -> String {
    config.endpoints.notices.clone()
}

pub fn render(value: &Value, _ctx: &RenderContext) -> Result<RenderMap> {
    let response: NoticesResponse =
        serde_json::from_value(value.clone()).context("Failed to decode notices response")?;
    Ok(notices_map(&response.notices))
}

/// Lightbox cards for the notice board; notices without an image URL are skipped.
pub fn notices_map(notices: &[Notice]) -> RenderMap {
    let cards: String = notices
        .iter()
        .filter_map(|n| n.url.as_deref().filter(|u| !u.is_empty()))
        .map(|url| {
            Node::new("div")
                .class("col-md-6 col-lg-4 mx-auto fadeIn")
                .child(
                    Node::new("a").class("lightbox").attr("href", url).child(
                        Node::new("img")
                            .class("img-fluid image scale-on-hover pb-4")
                            .attr("src", url)
                            .attr("alt", "Notice"),
                    ),
                )
                .build()
        })
        .collect();

    RenderMap::new().html("noticeContainer", cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Patch;
    use crate::widgets::test_support::context_at;
    use serde_json::json;

    fn container_html(map: &RenderMap) -> String {
        match map.for_target("noticeContainer").next() {
            Some(Patch::Html { html }) => html.clone(),
            other => panic!("unexpected patch: {:?}", other),
        }
    }

    #[test]
    fn test_renders_one_card_per_notice_with_url() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let body = json!({"notices": [
            {"url": "https://cdn.example/a.jpg"},
            {"url": ""},
            {},
            {"url": "https://cdn.example/b.jpg"}
        ]});

        let html = container_html(&render(&body, &ctx).unwrap());
        assert_eq!(html.matches("<div class=").count(), 2);
        assert!(html.contains("href=\"https://cdn.example/a.jpg\""));
        assert!(html.contains("src=\"https://cdn.example/b.jpg\""));
    }

    #[test]
    fn test_missing_list_clears_container() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let html = container_html(&render(&json!({}), &ctx).unwrap());
        assert!(html.is_empty());
    }
}
