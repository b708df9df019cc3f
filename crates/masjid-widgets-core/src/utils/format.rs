use chrono::{DateTime, TimeZone};

/// Escape text for safe inclusion in element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Leading integer of a clock component, like `parseInt` ("05" -> 5, "30pm" -> 30)
fn leading_number(part: &str) -> Option<u32> {
    let digits: String = part
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Convert a 24h "HH:MM" string into "h:mm am|pm".
/// Returns an empty string when the input cannot be read as a time.
pub fn format_time_to_am_pm(time24: &str) -> String {
    let mut parts = time24.split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return String::new();
    };
    let (Some(hour), Some(minute)) = (leading_number(hour), leading_number(minute)) else {
        return String::new();
    };

    let period = if hour >= 12 { "pm" } else { "am" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, minute, period)
}

/// Clock time as shown on the live event card, e.g. "7:05 pm"
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%-I:%M %P").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & \"Jerry\" <b>"), "Tom &amp; &quot;Jerry&quot; &lt;b&gt;");
        assert_eq!(escape_html("05:30"), "05:30");
    }

    #[test]
    fn test_format_time_to_am_pm() {
        assert_eq!(format_time_to_am_pm("13:30"), "1:30 pm");
        assert_eq!(format_time_to_am_pm("00:05"), "12:05 am");
        assert_eq!(format_time_to_am_pm("12:00"), "12:00 pm");
        assert_eq!(format_time_to_am_pm("9:7"), "9:07 am");
    }

    #[test]
    fn test_format_time_to_am_pm_rejects_garbage() {
        assert_eq!(format_time_to_am_pm(""), "");
        assert_eq!(format_time_to_am_pm("1330"), "");
        assert_eq!(format_time_to_am_pm("ab:cd"), "");
    }

    #[test]
    fn test_format_clock() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let t = tz.with_ymd_and_hms(2026, 10, 19, 19, 5, 0).unwrap();
        assert_eq!(format_clock(&t), "7:05 pm");
        let t = tz.with_ymd_and_hms(2026, 10, 19, 0, 30, 0).unwrap();
        assert_eq!(format_clock(&t), "12:30 am");
    }
}
