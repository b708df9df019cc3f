//! Masjid Widgets Core - cache-then-refresh widgets for the masjid website.
//!
//! Every widget paints its last stored response immediately, then fetches
//! fresh data from its endpoint and repaints once the response is stored.
//! Pages are modelled as a set of addressable elements so the engine can run
//! headless; `routing` decides which widgets each page activates.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod document;
pub mod models;
pub mod render;
pub mod routing;
pub mod utils;
pub mod widgets;

pub use app::{App, RefreshResult};
pub use cache::{CacheManager, FileStore, KeyValueStore, MemoryStore};
pub use config::Config;
pub use document::Page;
pub use render::RenderMap;
pub use routing::{activations_for, Activation, PageFeature, PageRoute};
pub use widgets::{RenderContext, WidgetKind};
