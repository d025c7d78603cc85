//! Delimited Reader Library
//!
//! A small Rust library for reading simple delimited text records (CSV-like
//! files without quoting) one line at a time and retrieving field values by
//! column name.
//!
//! This library provides:
//! - A forward-only cursor over a file path or an in-memory byte buffer
//! - Column names taken from the first line or injected by the caller
//! - Strict field-count checking against the established column names
//! - Trimmed string access with optional empty-to-null conversion
//! - Best-effort boolean, number and date/time coercion
//! - Configurable separators and text encoding
//!
//! ## Usage
//!
//! ```rust
//! use delimited_reader::DelimitedReader;
//!
//! # fn example() -> delimited_reader::Result<()> {
//! let data = b"Name;IsMarried\nJohn;true\n".to_vec();
//! let mut reader = DelimitedReader::from_bytes_with_separators(data, &[';'])?;
//! reader.load()?;
//!
//! while reader.read_line()? {
//!     let name = reader.get_string_value("Name")?;
//!     let married = reader.get_bool_value("IsMarried")?;
//!     println!("{:?} married: {}", name, married);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod reader;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ReaderConfig;
pub use reader::{DelimitedReader, Source};

/// Result type alias for delimited reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for delimited reader operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Reader configuration is unusable
    #[error("Configuration error: {message}")]
    InvalidConfiguration { message: String },

    /// Load found no header line to take the keys from
    #[error("Cannot read field names; is the source empty?")]
    SourceEmpty,

    /// A data line split into a different number of fields than there are keys
    #[error(
        "Field count does not match key count at line {line_number}: expected {expected}, found {found}"
    )]
    FieldCountMismatch {
        line_number: usize,
        expected: usize,
        found: usize,
    },

    /// ReadLine was called before any Load
    #[error("Reader not initialized; call load first")]
    NotInitialized,

    /// Load was called on a reader that has already been loaded
    #[error("Reader already loaded; create a new reader to read the source again")]
    AlreadyLoaded,

    /// The reader was closed or disposed
    #[error("Reader is closed")]
    Closed,

    /// A value accessor was called before the keys were established
    #[error("Keys not read; call load first")]
    KeysNotRead,

    /// A value accessor was called before any line was read
    #[error("Values not read; call read_line first")]
    ValuesNotRead,

    /// The requested column name is not one of the keys
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// Strict value parsing failed
    #[error("Cannot parse value '{value}' of key '{key}': {message}")]
    ValueParse {
        key: String,
        value: String,
        message: String,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a field count mismatch error
    pub fn field_count_mismatch(line_number: usize, expected: usize, found: usize) -> Self {
        Self::FieldCountMismatch {
            line_number,
            expected,
            found,
        }
    }

    /// Create a key not found error
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create a value parse error
    pub fn value_parse(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ValueParse {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
