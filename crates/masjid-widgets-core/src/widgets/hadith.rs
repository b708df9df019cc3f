use anyhow::{Context, Result};
use serde_json::Value;

use super::RenderContext;
use crate::config::Config;
use crate::models::RandomHadith;
use crate::render::RenderMap;

const FALLBACK_BODY: &str = "<p>Abu Hurairah (May Allah be pleased with him) reported: Messenger of Allah (\u{fdfa}) said, \"The five (daily) Salat (prayers), and from one Jumu'ah prayer to the (next) Jumu'ah prayer, and from Ramadan to Ramadan are expiations for the (sins) committed in between (their intervals); provided the major sins are not committed\".<br/><br/><b>[Muslim]</b>.<br/><br/></p>";
const FALLBACK_CITE: &str = "Riyad as-Salihin 189:1059";
const FALLBACK_LINK: &str = "https://sunnah.com/riyadussalihin:1059";

pub fn url(config: &Config, _ctx: &RenderContext) -> String {
    config.endpoints.hadith.clone()
}

pub fn render(value: &Value, ctx: &RenderContext) -> Result<RenderMap> {
    let hadith: RandomHadith =
        serde_json::from_value(value.clone()).context("Failed to decode hadith response")?;

    // A response without a body still counts as delivered; show the fixed hadith.
    let Some(body) = hadith.body() else {
        return Ok(fallback(ctx));
    };

    Ok(RenderMap::new()
        .html("hadith-body", body)
        .text("hadith-cite", hadith.citation())
        .attr("hadith-link", "href", hadith.link()))
}

pub fn fallback(_ctx: &RenderContext) -> RenderMap {
    RenderMap::new()
        .html("hadith-body", FALLBACK_BODY)
        .text("hadith-cite", FALLBACK_CITE)
        .attr("hadith-link", "href", FALLBACK_LINK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::context_at;
    use serde_json::json;

    #[test]
    fn test_render_hadith() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let body = json!({
            "collection": "bukhari",
            "hadithNumber": "1",
            "hadith": {"body": "<p>Actions are by intentions</p>", "chapterNumber": 1}
        });

        let map = render(&body, &ctx).unwrap();
        assert_eq!(map.text_of("hadith-cite"), Some("Sahih al-Bukhari 1:1"));
        assert!(map.bindings.iter().any(|b| b.target == "hadith-body"));
    }

    #[test]
    fn test_missing_body_renders_fallback() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let map = render(&json!({"collection": "muslim"}), &ctx).unwrap();
        assert_eq!(map, fallback(&ctx));
        assert_eq!(map.text_of("hadith-cite"), Some(FALLBACK_CITE));
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        assert!(render(&json!("nope"), &ctx).is_err());
    }
}
