use serde::{Deserialize, Serialize};

use super::de;

/// Mixlr user status: whether the station is on air and its scheduled events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveStatus {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub is_live: bool,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub events: Vec<LiveEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEvent {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub starts_at_timestamp: i64,
    #[serde(deserialize_with = "de::timestamp")]
    pub ends_at_timestamp: i64,
}

impl LiveStatus {
    /// The earliest scheduled event.
    pub fn next_event(&self) -> Option<&LiveEvent> {
        self.events.iter().min_by_key(|e| e.starts_at_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_event_is_earliest() {
        let json = r#"{"is_live":false,"events":[
            {"title":"Tafsir","starts_at_timestamp":1760900000,"ends_at_timestamp":1760903600},
            {"title":"Khutbah","starts_at_timestamp":"1760800000","ends_at_timestamp":"1760803600"}
        ]}"#;
        let status: LiveStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.next_event().unwrap().title, "Khutbah");
    }

    #[test]
    fn test_missing_events_is_empty() {
        let status: LiveStatus = serde_json::from_str(r#"{"is_live":true}"#).unwrap();
        assert!(status.is_live);
        assert!(status.next_event().is_none());
    }
}
