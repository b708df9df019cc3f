use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Jumuah,
    Breaking,
    General,
    #[default]
    #[serde(other)]
    Other,
}

/// One Jumuah speech/khutbah pair, as 24h clock strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JummahSlot {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub speech: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub khutbah: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "type", default)]
    pub kind: AnnouncementKind,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub active: bool,
    #[serde(rename = "jummahTimes", default, deserialize_with = "de::null_as_default")]
    pub jummah_times: Vec<JummahSlot>,
}

impl Announcement {
    fn first_of(announcements: &[Announcement], kind: AnnouncementKind) -> Option<&Announcement> {
        announcements.iter().find(|a| a.kind == kind)
    }
}

/// Pick the announcement to show on `weekday`.
///
/// Only the first record of each kind takes part. Friday prefers an active
/// jumuah record; other days prefer an active breaking record, and fall back
/// to general only while neither breaking nor jumuah is active. The first
/// record is the last resort.
pub fn select_announcement(announcements: &[Announcement], weekday: Weekday) -> Option<&Announcement> {
    let first = announcements.first()?;

    let jumuah = Announcement::first_of(announcements, AnnouncementKind::Jumuah);
    let breaking = Announcement::first_of(announcements, AnnouncementKind::Breaking);
    let general = Announcement::first_of(announcements, AnnouncementKind::General);

    let jumuah_active = jumuah.is_some_and(|a| a.active);
    let breaking_active = breaking.is_some_and(|a| a.active);

    if weekday == Weekday::Fri {
        if jumuah_active {
            return jumuah;
        }
        return general.or(Some(first));
    }

    if breaking_active {
        return breaking;
    }
    if !jumuah_active {
        if let Some(general) = general {
            return Some(general);
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(kind: AnnouncementKind, active: bool, message: &str) -> Announcement {
        Announcement {
            kind,
            message: message.to_string(),
            active,
            jummah_times: Vec::new(),
        }
    }

    #[test]
    fn test_friday_prefers_active_jumuah() {
        let list = vec![
            announcement(AnnouncementKind::Jumuah, true, "jumuah"),
            announcement(AnnouncementKind::Breaking, true, "breaking"),
        ];
        let selected = select_announcement(&list, Weekday::Fri).unwrap();
        assert_eq!(selected.message, "jumuah");
    }

    #[test]
    fn test_tuesday_prefers_active_breaking() {
        let list = vec![
            announcement(AnnouncementKind::Jumuah, true, "jumuah"),
            announcement(AnnouncementKind::Breaking, true, "breaking"),
        ];
        let selected = select_announcement(&list, Weekday::Tue).unwrap();
        assert_eq!(selected.message, "breaking");
    }

    #[test]
    fn test_lone_inactive_general_selected_every_day() {
        let list = vec![announcement(AnnouncementKind::General, false, "general")];
        for day in [Weekday::Mon, Weekday::Fri, Weekday::Sun] {
            assert_eq!(select_announcement(&list, day).unwrap().message, "general");
        }
    }

    #[test]
    fn test_friday_inactive_jumuah_falls_back_to_general() {
        let list = vec![
            announcement(AnnouncementKind::Jumuah, false, "jumuah"),
            announcement(AnnouncementKind::General, true, "general"),
        ];
        assert_eq!(select_announcement(&list, Weekday::Fri).unwrap().message, "general");
    }

    #[test]
    fn test_weekday_active_jumuah_blocks_general() {
        // Active jumuah outside Friday suppresses the general fallback.
        let list = vec![
            announcement(AnnouncementKind::Jumuah, true, "jumuah"),
            announcement(AnnouncementKind::General, true, "general"),
        ];
        assert_eq!(select_announcement(&list, Weekday::Wed).unwrap().message, "jumuah");
    }

    #[test]
    fn test_only_first_record_of_a_kind_counts() {
        let list = vec![
            announcement(AnnouncementKind::Breaking, false, "old breaking"),
            announcement(AnnouncementKind::Breaking, true, "new breaking"),
            announcement(AnnouncementKind::General, false, "general"),
        ];
        assert_eq!(select_announcement(&list, Weekday::Mon).unwrap().message, "general");
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert!(select_announcement(&[], Weekday::Fri).is_none());
    }

    #[test]
    fn test_parse_announcements() {
        let json = r#"[
            {"type":"jumuah","message":"Jumuah at 1:30","active":true,"jummahTimes":[{"speech":"13:15","khutbah":"13:30"}]},
            {"type":"eid","message":null,"active":null}
        ]"#;
        let list: Vec<Announcement> = serde_json::from_str(json).unwrap();
        assert_eq!(list[0].kind, AnnouncementKind::Jumuah);
        assert_eq!(list[0].jummah_times[0].khutbah, "13:30");
        assert_eq!(list[1].kind, AnnouncementKind::Other);
        assert_eq!(list[1].message, "");
        assert!(!list[1].active);
    }
}
