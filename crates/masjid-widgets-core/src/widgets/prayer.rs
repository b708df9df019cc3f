//! Daily prayer times and the monthly timetable link.

use anyhow::{anyhow, Context, Result};
use chrono::Datelike;
use serde_json::Value;

use super::{with_query, RenderContext};
use crate::config::Config;
use crate::models::{IqamahResponse, PrayerTimeDay, SalahTimetableResponse};
use crate::render::RenderMap;
use crate::utils::calendar::timetable_date;
use crate::utils::display_month;

pub fn iqamah_url(config: &Config, ctx: &RenderContext) -> String {
    let today = ctx.now.date_naive();
    with_query(
        &config.endpoints.iqamah,
        &[
            ("year", today.year().to_string()),
            ("month", today.format("%B").to_string()),
            ("day", today.day().to_string()),
        ],
    )
}

pub fn render_iqamah(value: &Value, ctx: &RenderContext) -> Result<RenderMap> {
    let response: IqamahResponse =
        serde_json::from_value(value.clone()).context("Failed to decode iqamah response")?;
    let day = response
        .today()
        .ok_or_else(|| anyhow!("No prayer times for today in iqamah response"))?;
    Ok(prayer_times_map(day, ctx))
}

/// Bindings for the home page prayer cards and the navigation timetable.
pub fn prayer_times_map(day: &PrayerTimeDay, ctx: &RenderContext) -> RenderMap {
    let month = display_month(ctx.now.naive_local(), ctx.ramadan);
    let lower = |s: &str| s.to_lowercase();

    let mut map = RenderMap::new();
    if ctx.is_home() {
        map = map
            .text("fajr", lower(&day.fajr_begins))
            .text("sunrise", lower(&day.sunrise))
            .text("dhuhr", lower(&day.dhuhr_begins))
            .text("asr", lower(&day.asr_begins))
            .text("maghrib", lower(&day.maghrib_begins))
            .text("isha", lower(&day.isha_begins))
            .text("cur-month", month.clone());
    }

    map.text("nav-hijri", day.hijri_display())
        .text("nav-cur-month", month.clone())
        .text("footer-cur-month", month)
        .text("nav-fajr-begins", lower(&day.fajr_begins))
        .text("nav-fajr-jamaat", lower(&day.fajr_jamaat))
        .text("nav-sunrise", lower(&day.sunrise))
        .text("nav-zohr-begins", lower(&day.dhuhr_begins))
        .text("nav-zohr-jamaat", lower(&day.dhuhr_jamaat))
        .text("nav-asar-begins", lower(&day.asr_begins))
        .text("nav-asar-jamaat", lower(&day.asr_jamaat))
        .text("nav-magrib-begins", lower(&day.maghrib_begins))
        .text("nav-magrib-jamaat", lower(&day.maghrib_jamaat))
        .text("nav-isha-begins", lower(&day.isha_begins))
        .text("nav-isha-jamaat", lower(&day.isha_jamaat))
}

pub fn timetable_url(config: &Config, ctx: &RenderContext) -> String {
    let target = timetable_date(ctx.now.naive_local());
    with_query(
        &config.endpoints.salah_timetable,
        &[
            ("month", target.format("%B").to_string()),
            ("year", target.year().to_string()),
            ("isRamadan", ctx.ramadan.to_string()),
        ],
    )
}

pub fn render_timetable(value: &Value, ctx: &RenderContext) -> Result<RenderMap> {
    let response: SalahTimetableResponse =
        serde_json::from_value(value.clone()).context("Failed to decode salah times response")?;
    let asset = response
        .asset_url()
        .ok_or_else(|| anyhow!("No salah times asset in response"))?;

    let mut map = RenderMap::new()
        .attr("salah-times", "href", asset)
        .attr("salah-times-footer", "href", asset);
    if ctx.path == "/" {
        map = map.attr("salah-times-body", "href", asset);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Patch;
    use crate::widgets::test_support::context_at;
    use serde_json::json;

    #[test]
    fn test_iqamah_lowercases_times_on_home() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let body = json!({"data": [{"fajarTime": "05:30 AM", "ishaJamahTime": "08:40 PM"}]});

        let map = render_iqamah(&body, &ctx).unwrap();
        assert_eq!(map.text_of("fajr"), Some("05:30 am"));
        assert_eq!(map.text_of("nav-fajr-begins"), Some("05:30 am"));
        assert_eq!(map.text_of("nav-isha-jamaat"), Some("08:40 pm"));
        assert_eq!(map.text_of("cur-month"), Some("October"));
    }

    #[test]
    fn test_iqamah_skips_home_cards_elsewhere() {
        let ctx = context_at("/activities.html", 2026, 10, 19, 9, 0);
        let body = json!({"data": [{"fajarTime": "05:30"}]});

        let map = render_iqamah(&body, &ctx).unwrap();
        assert_eq!(map.text_of("fajr"), None);
        assert_eq!(map.text_of("nav-fajr-begins"), Some("05:30"));
    }

    #[test]
    fn test_iqamah_without_today_is_error() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        assert!(render_iqamah(&json!({"data": []}), &ctx).is_err());
        assert!(render_iqamah(&json!("nope"), &ctx).is_err());
    }

    #[test]
    fn test_iqamah_url_uses_today() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        let url = iqamah_url(&Config::default(), &ctx);
        assert!(url.ends_with("?year=2026&month=October&day=19"), "{}", url);
    }

    #[test]
    fn test_iqamah_day_follows_configured_timezone() {
        use chrono::{TimeZone, Utc};

        // 23:30 UTC is already the next day in Dublin during Irish summer time.
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap();
        let config = Config::default();
        let url = iqamah_url(&config, &RenderContext::new(now, "/", &config));
        assert!(url.ends_with("?year=2026&month=October&day=20"), "{}", url);

        let utc_config = Config {
            timezone: chrono_tz::UTC,
            ..Config::default()
        };
        let url = iqamah_url(&utc_config, &RenderContext::new(now, "/", &utc_config));
        assert!(url.ends_with("day=19"), "{}", url);
    }

    #[test]
    fn test_timetable_url_looks_ahead_three_days() {
        let ctx = context_at("/", 2026, 12, 30, 9, 0);
        let url = timetable_url(&Config::default(), &ctx);
        assert!(url.ends_with("?month=January&year=2027&isRamadan=false"), "{}", url);
    }

    #[test]
    fn test_timetable_body_link_only_on_root() {
        let body = json!({"data": [{"url": "https://cdn.example/oct.pdf"}]});

        let map = render_timetable(&body, &context_at("/", 2026, 10, 19, 9, 0)).unwrap();
        assert_eq!(map.for_target("salah-times-body").count(), 1);

        let map = render_timetable(&body, &context_at("/activities.html", 2026, 10, 19, 9, 0)).unwrap();
        assert_eq!(map.for_target("salah-times-body").count(), 0);
        assert!(matches!(
            map.for_target("salah-times").next(),
            Some(Patch::Attr { name, value }) if name == "href" && value == "https://cdn.example/oct.pdf"
        ));
    }

    #[test]
    fn test_timetable_without_url_is_error() {
        let ctx = context_at("/", 2026, 10, 19, 9, 0);
        assert!(render_timetable(&json!({"data": []}), &ctx).is_err());
    }
}
