//! Live-radio badge and the next scheduled broadcast.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;
use serde_json::Value;

use super::RenderContext;
use crate::config::Config;
use crate::models::{LiveEvent, LiveStatus};
use crate::render::RenderMap;
use crate::utils::format::format_clock;

const LIVE_BADGE: &str = "<span style=\"border-style: solid; font-size: 0.8em; padding: 5px; color: #B80000\">LIVE NOW</span>";
const OFF_AIR_BADGE: &str = "<span style=\"border-style: solid; font-size: 0.8em; padding: 5px; color: #808080\">Off Air</span>";

const FALLBACK_TITLE: &str = "Check back for upcoming events";

pub fn url(config: &Config, _ctx: &RenderContext) -> String {
    config.endpoints.live_status.clone()
}

/// Placeholder event starting a day from now.
fn placeholder_event(now: DateTime<Tz>) -> LiveEvent {
    let starts = now + Duration::days(1);
    LiveEvent {
        title: FALLBACK_TITLE.to_string(),
        starts_at_timestamp: starts.timestamp(),
        ends_at_timestamp: (starts + Duration::hours(1)).timestamp(),
    }
}

pub fn render(value: &Value, ctx: &RenderContext) -> Result<RenderMap> {
    let status: LiveStatus =
        serde_json::from_value(value.clone()).context("Failed to decode live status")?;

    let event = status
        .next_event()
        .cloned()
        .unwrap_or_else(|| placeholder_event(ctx.now));
    let starts = ctx
        .now
        .timezone()
        .timestamp_opt(event.starts_at_timestamp, 0)
        .single()
        .ok_or_else(|| anyhow!("Invalid event start: {}", event.starts_at_timestamp))?;

    let day = if starts.date_naive() == ctx.now.date_naive() {
        "Today".to_string()
    } else {
        starts.format("%a").to_string()
    };

    Ok(RenderMap::new()
        .html("live-now", if status.is_live { LIVE_BADGE } else { OFF_AIR_BADGE })
        .text("event-name", event.title)
        .text("starts-at", format_clock(&starts))
        .text("event-day", day)
        .text("event-date", starts.format("%d").to_string())
        .text("event-month", starts.format("%b").to_string())
        .text("event-year", starts.format("%Y").to_string()))
}
