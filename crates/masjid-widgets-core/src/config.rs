//! Application configuration management.
//!
//! This module handles loading the endpoint URLs, the Ramadan start date and
//! the chat-widget script location. Every field has a default, so a missing
//! or partial config file is fine.
//!
//! Configuration is stored at `~/.config/masjid-widgets/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "masjid-widgets";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the cache directory
pub const CACHE_DIR_ENV: &str = "MASJID_WIDGETS_CACHE_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub salah_timetable: String,
    pub iqamah: String,
    pub hadith: String,
    pub announcements: String,
    pub notices: String,
    pub programmes: String,
    pub live_status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            salah_timetable: "https://getsalahtimes-rds3nxm6za-ew.a.run.app".to_string(),
            iqamah: "https://getiqamahtimes-rds3nxm6za-ew.a.run.app".to_string(),
            hadith: "https://randomhadith-rds3nxm6za-ew.a.run.app".to_string(),
            announcements: "https://getannouncements-rds3nxm6za-ew.a.run.app".to_string(),
            notices: "https://getnotices-rds3nxm6za-ew.a.run.app".to_string(),
            programmes:
                "https://getmasjidprogrammes-rds3nxm6za-ew.a.run.app?type=programme&active=true"
                    .to_string(),
            live_status: "https://api.mixlr.com/users/7752720".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    /// Timezone the masjid's calendar runs in; picks "today" for prayer times.
    pub timezone: Tz,
    /// Date and time Ramadan begins, in `timezone`.
    pub ramadan_start: NaiveDateTime,
    pub chat_widget_script: String,
    /// Target of the floating WhatsApp link.
    pub whatsapp_url: String,
    /// Request timeout in seconds; unset means requests wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timezone: chrono_tz::Europe::Dublin,
            ramadan_start: NaiveDate::from_ymd_opt(2026, 2, 17)
                .and_then(|d| d.and_hms_opt(17, 56, 0))
                .unwrap_or_default(),
            chat_widget_script:
                "https://wati-integration-service.clare.ai/ShopifyWidget/shopifyWidget.js?69866"
                    .to_string(),
            whatsapp_url: "https://wa.me/353862440556".to_string(),
            request_timeout_secs: None,
            cache_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Cache directory: environment override, then config, then the user cache dir.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
