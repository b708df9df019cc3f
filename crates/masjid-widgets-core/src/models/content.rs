//! Notice board, weekly programmes and the random hadith.

use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticesResponse {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time_description: Option<String>,
    #[serde(default)]
    pub clock_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// May contain markup (blockquotes etc.); rendered as HTML.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub listen_url: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl Programme {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// "Every Saturday after Maghrib", else "At 19:30", else empty.
    pub fn time_display(&self) -> String {
        if let Some(desc) = non_empty(&self.time_description) {
            return desc.to_string();
        }
        match non_empty(&self.clock_time) {
            Some(clock) => format!("At {}", clock),
            None => String::new(),
        }
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn topic(&self) -> Option<&str> {
        non_empty(&self.topic)
    }

    pub fn speaker(&self) -> Option<&str> {
        non_empty(&self.speaker)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    pub fn listen_url(&self) -> Option<&str> {
        non_empty(&self.listen_url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgrammesResponse {
    pub programmes: Vec<Programme>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hadith {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "chapterNumber", default, deserialize_with = "de::string_or_number")]
    pub chapter_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomHadith {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub collection: String,
    #[serde(rename = "hadithNumber", default, deserialize_with = "de::string_or_number")]
    pub hadith_number: String,
    #[serde(default)]
    pub hadith: Option<Hadith>,
}

/// Display titles of the sunnah.com collections.
const COLLECTION_TITLES: &[(&str, &str)] = &[
    ("bukhari", "Sahih al-Bukhari"),
    ("muslim", "Sahih Muslim"),
    ("nasai", "Sunan an-Nasa'i"),
    ("abudawud", "Sunan Abi Dawud"),
    ("tirmidhi", "Jami` at-Tirmidhi"),
    ("ibnmajah", "Sunan Ibn Majah"),
    ("riyadussalihin", "Riyad as-Salihin"),
];

impl RandomHadith {
    pub fn body(&self) -> Option<&str> {
        self.hadith
            .as_ref()
            .and_then(|h| h.body.as_deref())
            .filter(|b| !b.is_empty())
    }

    pub fn collection_title(&self) -> &str {
        COLLECTION_TITLES
            .iter()
            .find(|(key, _)| *key == self.collection)
            .map(|(_, title)| *title)
            .unwrap_or(self.collection.as_str())
    }

    /// e.g. "Sahih Muslim 4:233"
    pub fn citation(&self) -> String {
        let chapter = self
            .hadith
            .as_ref()
            .map(|h| h.chapter_number.as_str())
            .unwrap_or_default();
        format!("{} {}:{}", self.collection_title(), chapter, self.hadith_number)
    }

    pub fn link(&self) -> String {
        format!("https://sunnah.com/{}:{}", self.collection, self.hadith_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programme_time_display() {
        let mut p = Programme {
            time_description: Some("Every Saturday after Maghrib".to_string()),
            clock_time: Some("19:30".to_string()),
            ..Default::default()
        };
        assert_eq!(p.time_display(), "Every Saturday after Maghrib");

        p.time_description = Some("  ".to_string());
        assert_eq!(p.time_display(), "At 19:30");

        p.clock_time = None;
        assert_eq!(p.time_display(), "");
    }

    #[test]
    fn test_parse_programmes_camel_case() {
        let json = r#"{"programmes":[{"name":"Tafsir Circle","imageUrl":"https://cdn.example/t.jpg","listenUrl":"https://mixlr.example"}]}"#;
        let resp: ProgrammesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.programmes[0].image(), Some("https://cdn.example/t.jpg"));
        assert_eq!(resp.programmes[0].listen_url(), Some("https://mixlr.example"));
        assert!(resp.programmes[0].speaker().is_none());
    }

    #[test]
    fn test_programmes_response_requires_list() {
        assert!(serde_json::from_str::<ProgrammesResponse>(r#"{"error":"nope"}"#).is_err());
    }

    #[test]
    fn test_hadith_citation_and_link() {
        let json = r#"{"collection":"muslim","hadithNumber":233,"hadith":{"body":"<p>text</p>","chapterNumber":"2"}}"#;
        let hadith: RandomHadith = serde_json::from_str(json).unwrap();
        assert_eq!(hadith.body(), Some("<p>text</p>"));
        assert_eq!(hadith.citation(), "Sahih Muslim 2:233");
        assert_eq!(hadith.link(), "https://sunnah.com/muslim:233");
    }

    #[test]
    fn test_unknown_collection_title_is_verbatim() {
        let hadith = RandomHadith {
            collection: "malik".to_string(),
            hadith_number: "1".to_string(),
            hadith: None,
        };
        assert_eq!(hadith.collection_title(), "malik");
        assert!(hadith.body().is_none());
    }
}
