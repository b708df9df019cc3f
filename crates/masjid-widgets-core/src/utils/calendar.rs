use chrono::{Duration, NaiveDateTime};

/// Days before the start at which the site already switches to Ramadan mode.
const RAMADAN_LEAD_DAYS: i64 = 4;

/// Days after the start during which Ramadan mode stays on.
const RAMADAN_LENGTH_DAYS: i64 = 27;

/// Timetables roll over to next month this many days early.
pub const TIMETABLE_LOOKAHEAD_DAYS: i64 = 3;

pub fn is_ramadan(now: NaiveDateTime, start: NaiveDateTime) -> bool {
    now + Duration::days(RAMADAN_LEAD_DAYS) >= start
        && now < start + Duration::days(RAMADAN_LENGTH_DAYS)
}

/// The date whose month the timetable widgets show.
pub fn timetable_date(now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::days(TIMETABLE_LOOKAHEAD_DAYS)
}

/// Month label for the timetable headings: "Ramadan" or a month name.
pub fn display_month(now: NaiveDateTime, ramadan: bool) -> String {
    if ramadan {
        "Ramadan".to_string()
    } else {
        timetable_date(now).format("%B").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_is_ramadan_window() {
        let start = at(2026, 2, 17, 17, 56);
        assert!(!is_ramadan(at(2026, 2, 13, 12, 0), start));
        assert!(is_ramadan(at(2026, 2, 13, 18, 0), start));
        assert!(is_ramadan(at(2026, 3, 1, 0, 0), start));
        assert!(is_ramadan(at(2026, 3, 16, 17, 55), start));
        assert!(!is_ramadan(at(2026, 3, 16, 17, 56), start));
    }

    #[test]
    fn test_display_month_looks_ahead() {
        let start = at(2026, 2, 17, 17, 56);
        let now = at(2026, 10, 29, 9, 0);
        assert_eq!(display_month(now, is_ramadan(now, start)), "November");
        assert_eq!(display_month(at(2026, 10, 19, 9, 0), false), "October");
        assert_eq!(display_month(now, true), "Ramadan");
    }
}
