//! Weekly programme table and programme cards on the activities page.

use anyhow::{Context, Result};
use serde_json::Value;

use super::RenderContext;
use crate::config::Config;
use crate::models::{Programme, ProgrammesResponse};
use crate::render::{Node, RenderMap};

const TABLE_BODY: &str = "weekly-programmes-tbody";
const CARDS_SECTION: &str = "weekly-programmes-section";
const CARDS_CONTAINER: &str = "weekly-programmes";

const FALLBACK_ROWS: [(&str, &str); 2] = [
    ("Children's Youth Programme", "Check Events or Masjid Notice Board"),
    ("Adult's Monthly Programme", "Check Events or Masjid Notice Board"),
];

pub fn url(config: &Config, _ctx: &RenderContext) -> String {
    config.endpoints.programmes.clone()
}

pub fn render(value: &Value, _ctx: &RenderContext) -> Result<RenderMap> {
    let response: ProgrammesResponse =
        serde_json::from_value(value.clone()).context("Failed to decode programmes response")?;
    Ok(programmes_map(&response.programmes))
}

pub fn fallback(_ctx: &RenderContext) -> RenderMap {
    programmes_map(&[])
}

fn row(name: &str, time: &str) -> String {
    Node::new("tr")
        .child(Node::new("td").text(name))
        .child(Node::new("td").text(time))
        .build()
}

fn table_rows(programmes: &[Programme]) -> String {
    if programmes.is_empty() {
        return FALLBACK_ROWS.iter().map(|(name, time)| row(name, time)).collect();
    }
    programmes
        .iter()
        .map(|p| row(p.name().unwrap_or_default(), &p.time_display()))
        .collect()
}

fn labelled(label: &str, value: &str) -> Node {
    Node::new("p")
        .child(Node::new("strong").text(&format!("{}:", label)))
        .text(&format!(" {}", value))
}

fn card(programme: &Programme, image: &str) -> String {
    let mut body = Node::new("div").class("weekly-programme-body");

    if let Some(name) = programme.name() {
        body = body.child(Node::new("h3").class("weekly-programme-title").text(name));
    }

    let meta = programme.time_display();
    if !meta.is_empty() {
        body = body.child(Node::new("p").class("weekly-programme-meta").text(&meta));
    }

    if let Some(description) = programme.description() {
        body = body.child(
            Node::new("div")
                .class("weekly-programme-description")
                .raw(description),
        );
    }

    let mut footer = Node::new("div").class("weekly-programme-footer");
    if let Some(topic) = programme.topic() {
        footer = footer.child(labelled("Topic", topic));
    }
    if let Some(speaker) = programme.speaker() {
        footer = footer.child(labelled("Speaker", speaker));
    }
    if let Some(location) = programme.location() {
        footer = footer.child(labelled("Location", location));
    }
    if let Some(listen) = programme.listen_url() {
        footer = footer.child(
            Node::new("a")
                .attr("href", listen)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class("weekly-programme-link")
                .text("Listen / Watch live"),
        );
    }
    if footer.has_children() {
        body = body.child(footer);
    }

    Node::new("div")
        .class("col-md-4 mb-4")
        .child(
            Node::new("article")
                .class("weekly-programme-card shadow-sm h-100 border-0 rounded-3 overflow-hidden")
                .child(
                    Node::new("div").class("weekly-programme-image-wrapper").child(
                        Node::new("img")
                            .attr("src", image)
                            .attr("alt", programme.name().unwrap_or("Masjid programme"))
                            .class("weekly-programme-image"),
                    ),
                )
                .child(body),
        )
        .build()
}

/// Table rows for every programme; cards only for programmes with an image.
pub fn programmes_map(programmes: &[Programme]) -> RenderMap {
    let map = RenderMap::new().html(TABLE_BODY, table_rows(programmes));

    let cards: Vec<String> = programmes
        .iter()
        .filter_map(|p| p.image().map(|image| card(p, image)))
        .collect();

    if cards.is_empty() {
        return map.hide(CARDS_SECTION).html(CARDS_CONTAINER, "");
    }

    let grid = Node::new("div").class("row g-4").raw(&cards.concat()).build();
    map.show(CARDS_SECTION).html(CARDS_CONTAINER, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Patch;
    use crate::widgets::test_support::context_at;
    use serde_json::json;

    fn html_of(map: &RenderMap, target: &str) -> String {
        map.for_target(target)
            .find_map(|p| match p {
                Patch::Html { html } => Some(html.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_fallback_rows_and_hidden_cards() {
        let ctx = context_at("/activities.html", 2026, 10, 19, 9, 0);
        let map = fallback(&ctx);

        let rows = html_of(&map, TABLE_BODY);
        assert_eq!(rows.matches("<tr>").count(), 2);
        assert!(rows.contains("Children&#39;s Youth Programme"));
        assert!(map.for_target(CARDS_SECTION).any(|p| *p == Patch::Hide));
        assert!(html_of(&map, CARDS_CONTAINER).is_empty());
    }

    #[test]
    fn test_rows_and_cards() {
        let ctx = context_at("/activities.html", 2026, 10, 19, 9, 0);
        let body = json!({"programmes": [
            {"name": "Tafsir Circle", "clockTime": "19:30", "imageUrl": "https://cdn.example/t.jpg",
             "description": "<blockquote>Surah al-Kahf</blockquote>", "speaker": "Imam", "listenUrl": "https://mixlr.example"},
            {"name": "Youth Club", "timeDescription": "Saturdays after Asr"}
        ]});

        let map = render(&body, &ctx).unwrap();

        let rows = html_of(&map, TABLE_BODY);
        assert_eq!(rows.matches("<tr>").count(), 2);
        assert!(rows.contains("<td>At 19:30</td>"));
        assert!(rows.contains("<td>Saturdays after Asr</td>"));

        let cards = html_of(&map, CARDS_CONTAINER);
        assert_eq!(cards.matches("<article").count(), 1);
        assert!(cards.contains("<blockquote>Surah al-Kahf</blockquote>"));
        assert!(cards.contains("<strong>Speaker:</strong> Imam"));
        assert!(cards.contains("Listen / Watch live"));
        assert!(!cards.contains("Topic:"));
        assert!(map.for_target(CARDS_SECTION).any(|p| *p == Patch::Show));
    }

    #[test]
    fn test_missing_programmes_list_is_error() {
        let ctx = context_at("/activities.html", 2026, 10, 19, 9, 0);
        assert!(render(&json!({"status": "ok"}), &ctx).is_err());
    }
}
