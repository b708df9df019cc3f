use serde::{Deserialize, Serialize};

use super::de;

/// Begin and jamaat times for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimeDay {
    #[serde(rename = "fajarTime", default, deserialize_with = "de::string_or_number")]
    pub fajr_begins: String,
    #[serde(rename = "fajarJamahTime", default, deserialize_with = "de::string_or_number")]
    pub fajr_jamaat: String,
    #[serde(rename = "sunriseTime", default, deserialize_with = "de::string_or_number")]
    pub sunrise: String,
    #[serde(rename = "dhuharTime", default, deserialize_with = "de::string_or_number")]
    pub dhuhr_begins: String,
    #[serde(rename = "zohrJamahTime", default, deserialize_with = "de::string_or_number")]
    pub dhuhr_jamaat: String,
    #[serde(rename = "asrTime", default, deserialize_with = "de::string_or_number")]
    pub asr_begins: String,
    #[serde(rename = "asarJamahTime", default, deserialize_with = "de::string_or_number")]
    pub asr_jamaat: String,
    #[serde(rename = "maghribTime", default, deserialize_with = "de::string_or_number")]
    pub maghrib_begins: String,
    #[serde(rename = "maghribJamahTime", default, deserialize_with = "de::string_or_number")]
    pub maghrib_jamaat: String,
    #[serde(rename = "ishaTime", default, deserialize_with = "de::string_or_number")]
    pub isha_begins: String,
    #[serde(rename = "ishaJamahTime", default, deserialize_with = "de::string_or_number")]
    pub isha_jamaat: String,
    #[serde(rename = "hijriDay", default, deserialize_with = "de::string_or_number")]
    pub hijri_day: String,
    #[serde(rename = "hijriMonthName", default, deserialize_with = "de::string_or_number")]
    pub hijri_month_name: String,
    #[serde(rename = "hijriYear", default, deserialize_with = "de::string_or_number")]
    pub hijri_year: String,
}

impl PrayerTimeDay {
    /// Hijri date as shown in the navigation bar, e.g. "12 Rabi al-Thani 1448".
    pub fn hijri_display(&self) -> String {
        format!("{} {} {}", self.hijri_day, self.hijri_month_name, self.hijri_year)
    }
}

/// `getiqamahtimes` response: `{ scope, year, month, day, data: [day] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct IqamahResponse {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub data: Vec<PrayerTimeDay>,
}

impl IqamahResponse {
    pub fn today(&self) -> Option<&PrayerTimeDay> {
        self.data.first()
    }
}

/// Link to the month's printable timetable.
#[derive(Debug, Clone, Deserialize)]
pub struct SalahTimetableAsset {
    #[serde(default)]
    pub url: Option<String>,
}

/// `getsalahtimes` response: `{ data: [{ url }] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalahTimetableResponse {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub data: Vec<SalahTimetableAsset>,
}

impl SalahTimetableResponse {
    pub fn asset_url(&self) -> Option<&str> {
        self.data
            .first()
            .and_then(|a| a.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}
