//! Application constants for the delimited reader
//!
//! This module contains default values and fixed limits used throughout
//! the library and the command-line tool.

use chrono::{NaiveDate, NaiveDateTime};

// =============================================================================
// Reader Defaults
// =============================================================================

/// Encoding label used when none is configured
pub const DEFAULT_ENCODING_LABEL: &str = "utf-8";

/// Number of bytes pulled from the underlying source per read
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Zero value returned by best-effort integer coercion
pub const ZERO_INT: i64 = 0;

/// Zero value returned by best-effort float coercion
pub const ZERO_FLOAT: f64 = 0.0;

/// Zero value returned by best-effort date/time coercion (0001-01-01 00:00:00)
pub fn zero_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

// =============================================================================
// CLI Defaults
// =============================================================================

/// Crate name used as the default tracing filter target
pub const LOG_TARGET: &str = "delimited_reader";

/// Separator used by the CLI when none is given
pub const DEFAULT_CLI_SEPARATORS: &str = ",";
