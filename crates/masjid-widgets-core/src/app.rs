//! Cache-then-refresh driver.
//!
//! `App` owns the page document and the cache. Starting a widget paints its
//! cached value (if any) straight away, then spawns a fetch task. Fetch
//! tasks never touch the page or the cache; they send their outcome back over
//! a channel and the owner applies results in arrival order. A later
//! response for the same widget simply overwrites an earlier one.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, JsonSource};
use crate::cache::{CacheManager, FileStore};
use crate::config::Config;
use crate::document::Page;
use crate::routing::Activation;
use crate::widgets::{RenderContext, WidgetKind, WidgetSpec};

/// Buffer size for the fetch result channel
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Outcome of one background fetch.
#[derive(Debug)]
pub struct RefreshResult {
    pub widget: WidgetKind,
    pub url: String,
    pub outcome: Result<Value, ApiError>,
}

pub struct App {
    config: Config,
    cache: CacheManager,
    source: Arc<dyn JsonSource>,
    page: Page,
    ctx: RenderContext,

    /// Widgets that have painted something in this run (cache, fresh data or fallback).
    painted: HashSet<WidgetKind>,
    pending: usize,

    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    /// When true, only cached data is painted and no requests are made.
    offline: bool,
}

impl App {
    pub fn new(config: Config, cache: CacheManager, source: Arc<dyn JsonSource>, page: Page) -> Self {
        let ctx = RenderContext::new(Utc::now(), &page.path(), &config);
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            cache,
            source,
            page,
            ctx,
            painted: HashSet::new(),
            pending: 0,
            refresh_rx: rx,
            refresh_tx: tx,
            offline: false,
        }
    }

    /// Build an app backed by the on-disk cache and the real endpoints.
    pub fn from_config(config: Config, page: Page) -> Result<Self> {
        let cache_dir = config.cache_dir()?;
        debug!(?cache_dir, "Cache directory configured");

        let store = FileStore::new(cache_dir)?;
        let client = ApiClient::new(config.request_timeout())?;

        Ok(Self::new(
            config,
            CacheManager::new(Arc::new(store)),
            Arc::new(client),
            page,
        ))
    }

    /// Render as of `now` instead of the current time.
    pub fn with_now<Z: TimeZone>(mut self, now: DateTime<Z>) -> Self {
        self.ctx = RenderContext::new(now, &self.page.path(), &self.config);
        self
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Number of fetches whose result has not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn has_painted(&self, widget: WidgetKind) -> bool {
        self.painted.contains(&widget)
    }

    // =========================================================================
    // Start
    // =========================================================================

    /// Activate the given widgets and page features, in order.
    pub fn start(&mut self, activations: &[Activation]) {
        info!(url = %self.page.url, activations = activations.len(), "Starting page");
        for activation in activations {
            match activation {
                Activation::Feature(feature) => {
                    feature.apply(&mut self.page, &self.ctx, &self.config, &self.cache);
                }
                Activation::Widget(kind) => self.activate(*kind),
            }
        }
    }

    fn activate(&mut self, kind: WidgetKind) {
        let spec = kind.spec();

        self.paint_from_cache(spec);

        if spec.fallback_upfront && !self.painted.contains(&kind) {
            self.apply_fallback(spec);
        }

        if self.offline {
            debug!(widget = %kind, "Offline, skipping fetch");
            return;
        }
        self.spawn_fetch(spec);
    }

    fn paint_from_cache(&mut self, spec: &WidgetSpec) {
        let Some(key) = spec.cache_key else {
            return;
        };

        let value = match self.cache.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(widget = spec.name, cache = key, "Nothing cached");
                return;
            }
            Err(e) => {
                warn!(widget = spec.name, cache = key, error = %e, "Failed to load cached value");
                return;
            }
        };

        match (spec.render)(&value, &self.ctx) {
            Ok(map) => {
                self.page.apply(&map);
                self.painted.insert(spec.kind);
                debug!(widget = spec.name, "Painted from cache");
            }
            Err(e) => warn!(widget = spec.name, error = %e, "Cached value does not render"),
        }
    }

    fn spawn_fetch(&mut self, spec: &WidgetSpec) {
        let url = (spec.url)(&self.config, &self.ctx);
        let widget = spec.kind;
        let source = Arc::clone(&self.source);
        let tx = self.refresh_tx.clone();

        debug!(widget = spec.name, url = %url, "Fetching");
        self.pending += 1;

        tokio::spawn(async move {
            let outcome = source.get_json(&url).await;
            Self::send_result(&tx, RefreshResult { widget, url, outcome }).await;
        });
    }

    /// Helper to send fetch results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<RefreshResult>, result: RefreshResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send fetch result - channel closed");
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Apply every result that has already arrived, without waiting.
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.refresh_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_refresh_result(result);
        }
    }

    /// Wait for every outstanding fetch and apply its result.
    pub async fn run_until_settled(&mut self) {
        while self.pending > 0 {
            match self.refresh_rx.recv().await {
                Some(result) => self.process_refresh_result(result),
                None => break,
            }
        }
        info!("All widget fetches settled");
    }

    fn process_refresh_result(&mut self, result: RefreshResult) {
        self.pending = self.pending.saturating_sub(1);
        let spec = result.widget.spec();

        let value = match result.outcome {
            Ok(value) => value,
            Err(e) => {
                warn!(widget = spec.name, url = %result.url, error = %e, "Fetch failed, keeping previous paint");
                self.apply_failure_fallback(spec);
                return;
            }
        };

        let map = match (spec.render)(&value, &self.ctx) {
            Ok(map) => map,
            Err(e) => {
                warn!(widget = spec.name, url = %result.url, error = %e, "Response does not render, keeping previous paint");
                self.apply_failure_fallback(spec);
                return;
            }
        };

        if let Some(key) = spec.cache_key {
            if let Err(e) = self.cache.save(key, &value) {
                warn!(widget = spec.name, error = %e, "Failed to cache response");
            }
        }

        let applied = self.page.apply(&map);
        self.painted.insert(spec.kind);
        debug!(widget = spec.name, applied, "Painted fresh data");
    }

    fn apply_failure_fallback(&mut self, spec: &WidgetSpec) {
        if !self.painted.contains(&spec.kind) {
            self.apply_fallback(spec);
        }
    }

    fn apply_fallback(&mut self, spec: &WidgetSpec) {
        if let Some(fallback) = spec.fallback {
            self.page.apply(&fallback(&self.ctx));
            self.painted.insert(spec.kind);
            debug!(widget = spec.name, "Painted fallback");
        }
    }
}
