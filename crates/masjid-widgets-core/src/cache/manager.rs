use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::store::KeyValueStore;

/// Well-known cache keys, one per cached widget.
pub mod keys {
    pub const SALAH_TIMETABLE: &str = "salahTimesAssetUrl";
    pub const IQAMAH: &str = "iqamah-today";
    pub const HADITH: &str = "kicc-random-hadith";
    pub const ANNOUNCEMENTS: &str = "kicc-announcements";
    pub const NOTICES: &str = "notices";
    pub const PROGRAMMES: &str = "masjidProgrammes_programme_active_true_v1";

    /// Flags written by the host page (cookie consent, sign-up modal).
    pub const COOKIE_ACCEPTED: &str = "kicc-accept-cookie";
    pub const MODAL_SNOOZED: &str = "kicc-modal-tmw";
    pub const MODAL_REGISTERED: &str = "kicc-modal-registered";
}

/// JSON blobs stored under named keys.
///
/// Entries have no expiry: a blob is replaced only when a newer successful
/// response is saved under the same key.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn KeyValueStore>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, key: &str) -> Result<Option<Value>> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };

        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse cache entry: {}", key))?;
        Ok(Some(value))
    }

    pub fn save(&self, key: &str, value: &Value) -> Result<()> {
        let contents = serde_json::to_string(value)?;
        self.store.set_item(key, &contents)?;
        debug!(cache = key, bytes = contents.len(), "Cache entry saved");
        Ok(())
    }

    /// Raw string entry, as written by the host page. Read errors count as absent.
    pub fn entry(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(cache = key, error = %e, "Failed to read entry");
                None
            }
        }
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.store.keys()
    }
}
