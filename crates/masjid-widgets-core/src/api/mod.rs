//! Client module for the masjid JSON endpoints.
//!
//! This module provides the `ApiClient` for fetching prayer times,
//! announcements, notices, programmes, hadith and live-radio status, and the
//! `JsonSource` trait the widget engine fetches through.

pub mod client;
pub mod error;

pub use client::{ApiClient, JsonSource};
pub use error::ApiError;
