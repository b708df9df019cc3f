//! Widget adapters.
//!
//! Each widget is one row in a static table: the cache key it persists under,
//! how to build its request URL, how to decode a response into a render map,
//! and an optional static fallback. The cache-then-refresh driver in
//! `crate::app` is the only code that walks this table.

pub mod announcements;
pub mod hadith;
pub mod live;
pub mod notices;
pub mod prayer;
pub mod programmes;

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use reqwest::Url;
use serde_json::Value;

use crate::cache::keys;
use crate::config::Config;
use crate::render::RenderMap;
use crate::utils::is_ramadan;

/// Everything a widget may consult besides its data.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Current time in the configured timezone.
    pub now: DateTime<Tz>,
    /// Path of the page being rendered, e.g. "/" or "/activities.html".
    pub path: String,
    pub ramadan: bool,
}

impl RenderContext {
    pub fn new<Z: TimeZone>(now: DateTime<Z>, path: &str, config: &Config) -> Self {
        let now = now.with_timezone(&config.timezone);
        Self {
            now,
            path: path.to_string(),
            ramadan: is_ramadan(now.naive_local(), config.ramadan_start),
        }
    }

    pub fn is_home(&self) -> bool {
        self.path.ends_with('/')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    SalahTimetable,
    Iqamah,
    Hadith,
    Announcements,
    Notices,
    Programmes,
    LiveEvent,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 7] = [
        WidgetKind::SalahTimetable,
        WidgetKind::Iqamah,
        WidgetKind::Hadith,
        WidgetKind::Announcements,
        WidgetKind::Notices,
        WidgetKind::Programmes,
        WidgetKind::LiveEvent,
    ];

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn spec(&self) -> &'static WidgetSpec {
        match self {
            WidgetKind::SalahTimetable => &WIDGETS[0],
            WidgetKind::Iqamah => &WIDGETS[1],
            WidgetKind::Hadith => &WIDGETS[2],
            WidgetKind::Announcements => &WIDGETS[3],
            WidgetKind::Notices => &WIDGETS[4],
            WidgetKind::Programmes => &WIDGETS[5],
            WidgetKind::LiveEvent => &WIDGETS[6],
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub name: &'static str,
    /// `None` for widgets that must never paint stale data.
    pub cache_key: Option<&'static str>,
    pub url: fn(&Config, &RenderContext) -> String,
    /// Decode a response body and describe the resulting paint.
    pub render: fn(&Value, &RenderContext) -> Result<RenderMap>,
    pub fallback: Option<fn(&RenderContext) -> RenderMap>,
    /// Paint the fallback at start when there is no cached value.
    pub fallback_upfront: bool,
}

pub static WIDGETS: [WidgetSpec; 7] = [
    WidgetSpec {
        kind: WidgetKind::SalahTimetable,
        name: "salah-timetable",
        cache_key: Some(keys::SALAH_TIMETABLE),
        url: prayer::timetable_url,
        render: prayer::render_timetable,
        fallback: None,
        fallback_upfront: false,
    },
    WidgetSpec {
        kind: WidgetKind::Iqamah,
        name: "iqamah",
        cache_key: Some(keys::IQAMAH),
        url: prayer::iqamah_url,
        render: prayer::render_iqamah,
        fallback: None,
        fallback_upfront: false,
    },
    WidgetSpec {
        kind: WidgetKind::Hadith,
        name: "hadith",
        cache_key: Some(keys::HADITH),
        url: hadith::url,
        render: hadith::render,
        fallback: Some(hadith::fallback),
        fallback_upfront: false,
    },
    WidgetSpec {
        kind: WidgetKind::Announcements,
        name: "announcements",
        cache_key: Some(keys::ANNOUNCEMENTS),
        url: announcements::url,
        render: announcements::render,
        fallback: Some(announcements::fallback),
        fallback_upfront: false,
    },
    WidgetSpec {
        kind: WidgetKind::Notices,
        name: "notices",
        cache_key: Some(keys::NOTICES),
        url: notices::url,
        render: notices::render,
        fallback: None,
        fallback_upfront: false,
    },
    WidgetSpec {
        kind: WidgetKind::Programmes,
        name: "programmes",
        cache_key: Some(keys::PROGRAMMES),
        url: programmes::url,
        render: programmes::render,
        fallback: Some(programmes::fallback),
        fallback_upfront: true,
    },
    WidgetSpec {
        kind: WidgetKind::LiveEvent,
        name: "live-event",
        cache_key: None,
        url: live::url,
        render: live::render,
        fallback: None,
        fallback_upfront: false,
    },
];

/// Append query parameters to an endpoint URL.
pub(crate) fn with_query(base: &str, params: &[(&str, String)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in params {
                    pairs.append_pair(key, value);
                }
            }
            url.to_string()
        }
        Err(_) => {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let sep = if base.contains('?') { '&' } else { '?' };
            format!("{}{}{}", base, sep, query.join("&"))
        }
    }
}
