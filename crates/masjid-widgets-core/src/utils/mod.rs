//! Utility functions for text formatting and calendar arithmetic.

pub mod calendar;
pub mod format;

// Re-export commonly used functions at module level
pub use calendar::{display_month, is_ramadan};
pub use format::{escape_html, format_time_to_am_pm};
