//! Reader configuration and validation.
//!
//! Holds the separator set, text encoding and empty-value policy used by a
//! [`DelimitedReader`](crate::DelimitedReader). The configuration is plain
//! data so it can be built in code or deserialized from a settings file.

use crate::constants::DEFAULT_ENCODING_LABEL;
use crate::{Error, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/// Configuration for a delimited reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Field separator characters; a line is split on any of them
    pub separators: Vec<char>,

    /// Return `None` instead of `""` for values that are empty after trimming
    #[serde(default)]
    pub convert_empty_string_to_null: bool,

    /// WHATWG encoding label of the source text
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING_LABEL.to_string()
}

impl ReaderConfig {
    /// Create a configuration splitting on the given separators
    pub fn new(separators: &[char]) -> Self {
        Self {
            separators: separators.to_vec(),
            convert_empty_string_to_null: false,
            encoding: default_encoding(),
        }
    }

    /// Enable or disable empty-to-null conversion
    pub fn with_convert_empty_string_to_null(mut self, enabled: bool) -> Self {
        self.convert_empty_string_to_null = enabled;
        self
    }

    /// Set the source text encoding by label (e.g. "utf-8", "windows-1252")
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Add one more separator character
    pub fn with_separator(mut self, separator: char) -> Self {
        if !self.separators.contains(&separator) {
            self.separators.push(separator);
        }
        self
    }

    /// Resolve the configured encoding label
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            Error::invalid_configuration(format!("Unknown encoding label '{}'", self.encoding))
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.separators.is_empty() {
            return Err(Error::invalid_configuration(
                "At least one separator character is required",
            ));
        }

        self.resolve_encoding()?;

        Ok(())
    }
}
