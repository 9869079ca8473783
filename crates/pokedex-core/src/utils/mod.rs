//! Utility functions for string formatting and manipulation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    capitalize, format_dex_number, format_height, format_weight, stat_percent, truncate_string,
    MAX_BASE_STAT,
};
