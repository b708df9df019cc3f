//! Data models for the masjid endpoints.
//!
//! This module contains the response shapes decoded by the widgets:
//!
//! - `PrayerTimeDay`, `IqamahResponse`, `SalahTimetableResponse`: prayer times
//! - `Announcement`, `AnnouncementKind`, `JummahSlot`: announcement bar and
//!   Jumuah schedule, plus the selection policy
//! - `Notice`, `Programme`, `RandomHadith`: content lists
//! - `LiveStatus`, `LiveEvent`: Mixlr live-radio status

pub mod announcement;
pub mod content;
pub mod live;
pub mod prayer;

pub use announcement::{select_announcement, Announcement, AnnouncementKind, JummahSlot};
pub use content::{Hadith, Notice, NoticesResponse, Programme, ProgrammesResponse, RandomHadith};
pub use live::{LiveEvent, LiveStatus};
pub use prayer::{IqamahResponse, PrayerTimeDay, SalahTimetableAsset, SalahTimetableResponse};

/// Serde helpers for loosely typed endpoint fields.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept a string, a number or null and keep it as a string.
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    /// Accept an integer or a numeric string.
    pub fn timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
            other => Err(serde::de::Error::custom(format!("invalid timestamp: {}", other))),
        }
    }

    /// Treat null like an absent field.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
