//! Announcement bar and the Jumuah schedule list.

use anyhow::{Context, Result};
use chrono::Datelike;
use serde_json::Value;

use super::RenderContext;
use crate::config::Config;
use crate::models::{select_announcement, Announcement, AnnouncementKind, JummahSlot};
use crate::render::{Node, RenderMap};
use crate::utils::format_time_to_am_pm;

const DEFAULT_NOTICE: &str =
    "<p>Please check the masjid <a href=\"#notice-board\">notice board.</a></p>";

const SCHEDULE_LIST: &str = "jummah-schedule";
const SCHEDULE_HEADER: &str = "Jumuah";

const SCHEDULE_HEADER_CLASS: &str = "list-group-item list-group-item-dark h5";
const SCHEDULE_ITEM_CLASS: &str = "list-group-item d-flex justify-content-between align-items-center h5";
const SCHEDULE_BADGE_CLASS: &str = "badge badge-primary badge-pill badge-danger";

pub fn url(config: &Config, _ctx: &RenderContext) -> String {
    config.endpoints.announcements.clone()
}

pub fn render(value: &Value, ctx: &RenderContext) -> Result<RenderMap> {
    let announcements: Vec<Announcement> =
        serde_json::from_value(value.clone()).context("Failed to decode announcements")?;
    Ok(announcements_map(&announcements, ctx))
}

pub fn fallback(_ctx: &RenderContext) -> RenderMap {
    RenderMap::new()
        .html("announcement", DEFAULT_NOTICE)
        .html(SCHEDULE_LIST, schedule_list(&[]))
}

pub fn announcements_map(announcements: &[Announcement], ctx: &RenderContext) -> RenderMap {
    let Some(selected) = select_announcement(announcements, ctx.now.weekday()) else {
        return fallback(ctx);
    };

    // The schedule always comes from the first jumuah record, whichever message is shown.
    let slots = announcements
        .iter()
        .find(|a| a.kind == AnnouncementKind::Jumuah)
        .map(|a| a.jummah_times.as_slice())
        .unwrap_or_default();

    let mut map = RenderMap::new()
        .html(SCHEDULE_LIST, schedule_list(slots))
        .html("announcement", selected.message.clone());

    if selected.active {
        map = map
            .add_class("announcement-bar", &["bigEntrance", "stretchLeft"])
            .remove_class("announcement-bar", &["d-none"]);
    }
    map
}

fn schedule_item(label: &str, time: &str) -> String {
    Node::new("li")
        .class(SCHEDULE_ITEM_CLASS)
        .child(Node::new("span").text(label))
        .child(Node::new("span").class(SCHEDULE_BADGE_CLASS).text(time))
        .build()
}

/// The whole schedule list: header item, then the slot rows.
/// Rendered in full on every paint so earlier rows never survive a repaint.
pub fn schedule_list(slots: &[JummahSlot]) -> String {
    let header = Node::new("li").class(SCHEDULE_HEADER_CLASS).text(SCHEDULE_HEADER).build();
    let mut html = header;
    for item in schedule_items(slots) {
        html.push_str(&item);
    }
    html
}

/// One speech and one khutbah row per slot; numbered when there are several slots.
pub fn schedule_items(slots: &[JummahSlot]) -> Vec<String> {
    let numbered = slots.len() > 1;
    let mut items = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        let suffix = if numbered {
            format!(" {}", index + 1)
        } else {
            String::new()
        };

        let speech = format_time_to_am_pm(&slot.speech);
        if !speech.is_empty() {
            items.push(schedule_item(&format!("Speech{}", suffix), &speech));
        }

        let khutbah = format_time_to_am_pm(&slot.khutbah);
        if !khutbah.is_empty() {
            items.push(schedule_item(&format!("Khutbah{}", suffix), &khutbah));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Patch;
    use crate::widgets::test_support::context_at;
    use serde_json::json;

    // 2026-10-23 is a Friday, 2026-10-20 a Tuesday.
    fn friday() -> RenderContext {
        context_at("/", 2026, 10, 23, 12, 0)
    }

    fn tuesday() -> RenderContext {
        context_at("/", 2026, 10, 20, 12, 0)
    }

    /// Rows of the schedule list after its header item.
    fn schedule_nodes(map: &RenderMap) -> Vec<String> {
        let html = match map.for_target(SCHEDULE_LIST).next() {
            Some(Patch::Html { html }) => html.clone(),
            other => panic!("unexpected schedule patch: {:?}", other),
        };
        let rows: Vec<String> = html
            .split("</li>")
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}</li>", s))
            .collect();
        assert!(rows[0].contains(SCHEDULE_HEADER), "missing header: {}", html);
        rows[1..].to_vec()
    }

    fn message_of(map: &RenderMap) -> Option<String> {
        map.for_target("announcement").find_map(|p| match p {
            Patch::Html { html } => Some(html.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_friday_shows_jumuah_with_schedule() {
        let body = json!([
            {"type": "jumuah", "active": true, "message": "Jumuah today",
             "jummahTimes": [{"speech": "13:15", "khutbah": "13:30"}]},
            {"type": "breaking", "active": true, "message": "Car park closed"}
        ]);

        let map = render(&body, &friday()).unwrap();
        assert_eq!(message_of(&map).as_deref(), Some("Jumuah today"));

        let nodes = schedule_nodes(&map);
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].contains("<span>Speech</span>"));
        assert!(nodes[0].contains("1:15 pm"));
        assert!(nodes[1].contains("<span>Khutbah</span>"));
    }

    #[test]
    fn test_tuesday_shows_breaking_but_keeps_schedule() {
        let body = json!([
            {"type": "jumuah", "active": true, "message": "Jumuah",
             "jummahTimes": [{"speech": "13:15", "khutbah": "13:30"}, {"speech": "", "khutbah": "14:30"}]},
            {"type": "breaking", "active": true, "message": "Car park closed"}
        ]);

        let map = render(&body, &tuesday()).unwrap();
        assert_eq!(message_of(&map).as_deref(), Some("Car park closed"));

        let nodes = schedule_nodes(&map);
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].contains("Speech 1"));
        assert!(nodes[2].contains("Khutbah 2"));
        assert!(nodes[2].contains("2:30 pm"));
    }

    #[test]
    fn test_active_selection_reveals_bar() {
        let body = json!([{"type": "general", "active": true, "message": "Welcome"}]);
        let map = render(&body, &tuesday()).unwrap();
        assert!(map.for_target("announcement-bar").any(|p| matches!(p, Patch::RemoveClass { .. })));

        let body = json!([{"type": "general", "active": false, "message": "Welcome"}]);
        let map = render(&body, &tuesday()).unwrap();
        assert_eq!(map.for_target("announcement-bar").count(), 0);
    }

    #[test]
    fn test_empty_list_shows_default_notice() {
        let map = render(&json!([]), &tuesday()).unwrap();
        assert_eq!(message_of(&map).as_deref(), Some(DEFAULT_NOTICE));
        assert!(schedule_nodes(&map).is_empty());
    }

    #[test]
    fn test_non_list_is_error() {
        assert!(render(&json!({"announcements": []}), &tuesday()).is_err());
    }
}
