//! Forward-only reader over delimited text records
//!
//! This module holds the reader itself: it owns the open line source, the
//! established keys and the values of the most recently read line.

use chrono::NaiveDateTime;
use encoding_rs::Encoding;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

use super::field_parsers::{
    is_blank, parse_bool, parse_date_time, parse_f64, parse_i64, split_fields,
};
use super::line_source::LineSource;
use super::source::Source;
use crate::config::ReaderConfig;
use crate::constants::{ZERO_FLOAT, ZERO_INT, zero_date_time};
use crate::{Error, Result};

/// Lifecycle of the underlying stream
#[derive(Debug)]
enum ReaderState {
    /// Constructed, nothing opened yet
    Configured,
    /// Loaded and reading
    Open(LineSource),
    /// Stream released by close
    Closed,
    /// Stream and buffer released by dispose
    Disposed,
}

/// Sequential cursor over delimited text records with named-column access
///
/// Construction only stores the configuration. [`load`](Self::load) or
/// [`load_with_keys`](Self::load_with_keys) opens the source and establishes
/// the keys, after which [`read_line`](Self::read_line) advances one record at
/// a time. The stream is released on [`close`](Self::close),
/// [`dispose`](Self::dispose) or when the reader is dropped.
///
/// # Value access
///
/// [`get_string_value`](Self::get_string_value) is strict: every misuse is an
/// error. The typed accessors built on it ([`get_bool_value`](Self::get_bool_value),
/// [`get_date_time_value`](Self::get_date_time_value), [`get_i64_value`](Self::get_i64_value),
/// [`get_f64_value`](Self::get_f64_value)) only inherit those errors; text that
/// does not parse coerces to the type's zero value instead. Use
/// [`parse_value`](Self::parse_value) when a parse failure must be reported.
#[derive(Debug)]
pub struct DelimitedReader {
    source: Source,
    config: ReaderConfig,
    encoding: &'static Encoding,
    state: ReaderState,
    keys: Option<Vec<String>>,
    current_line: Option<String>,
    current_values: Option<Vec<String>>,
    line_number: usize,
}

impl DelimitedReader {
    /// Create a reader over a source; the source is not opened yet
    pub fn new(source: Source, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        let encoding = config.resolve_encoding()?;

        Ok(Self {
            source,
            config,
            encoding,
            state: ReaderState::Configured,
            keys: None,
            current_line: None,
            current_values: None,
            line_number: 0,
        })
    }

    /// Create a reader over a file
    pub fn from_path(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        Self::new(Source::path(path), config)
    }

    /// Create a reader over an in-memory buffer
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>, config: ReaderConfig) -> Result<Self> {
        Self::new(Source::buffer(bytes), config)
    }

    /// Create a file reader with default settings and the given separators
    pub fn from_path_with_separators(path: impl AsRef<Path>, separators: &[char]) -> Result<Self> {
        Self::from_path(path, ReaderConfig::new(separators))
    }

    /// Create a buffer reader with default settings and the given separators
    pub fn from_bytes_with_separators(
        bytes: impl Into<Arc<[u8]>>,
        separators: &[char],
    ) -> Result<Self> {
        Self::from_bytes(bytes, ReaderConfig::new(separators))
    }

    /// Open the source and take the keys from its first line
    pub fn load(&mut self) -> Result<()> {
        let mut lines = self.open()?;

        let header = match lines.next_line()? {
            Some(line) if !is_blank(&line) => line,
            _ => {
                debug!("No header line in {}", self.source);
                self.state = ReaderState::Closed;
                return Err(Error::SourceEmpty);
            }
        };

        let keys = split_fields(&header, &self.config.separators);
        debug!("Loaded {} keys from {}", keys.len(), self.source);

        self.line_number = lines.line_number();
        self.keys = Some(keys);
        self.current_line = Some(header);
        self.state = ReaderState::Open(lines);
        Ok(())
    }

    /// Open the source and use the given keys; no line is consumed
    pub fn load_with_keys<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = self.open()?;
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        debug!("Injected {} keys for {}", keys.len(), self.source);

        self.keys = Some(keys);
        self.state = ReaderState::Open(lines);
        Ok(())
    }

    fn open(&self) -> Result<LineSource> {
        match self.state {
            ReaderState::Configured => Ok(LineSource::new(self.source.open()?, self.encoding)),
            ReaderState::Open(_) => Err(Error::AlreadyLoaded),
            ReaderState::Closed | ReaderState::Disposed => Err(Error::Closed),
        }
    }

    /// Advance to the next record
    ///
    /// Returns `false` at end of source or on a blank line, leaving the
    /// current line and values as they were.
    pub fn read_line(&mut self) -> Result<bool> {
        let lines = match &mut self.state {
            ReaderState::Open(lines) => lines,
            ReaderState::Configured => return Err(Error::NotInitialized),
            ReaderState::Closed | ReaderState::Disposed => return Err(Error::Closed),
        };

        let Some(line) = lines.next_line()? else {
            trace!("End of source after line {}", lines.line_number());
            return Ok(false);
        };
        let line_number = lines.line_number();

        if is_blank(&line) {
            trace!("Blank line {} ends the records", line_number);
            return Ok(false);
        }

        let values = split_fields(&line, &self.config.separators);
        if let Some(keys) = &self.keys {
            if values.len() != keys.len() {
                return Err(Error::field_count_mismatch(
                    line_number,
                    keys.len(),
                    values.len(),
                ));
            }
        }

        trace!("Read line {} with {} fields", line_number, values.len());
        self.line_number = line_number;
        self.current_values = Some(values);
        self.current_line = Some(line);
        Ok(true)
    }

    /// Trimmed value of `key` in the current record
    ///
    /// Returns `None` for empty values when empty-to-null conversion is on.
    pub fn get_string_value(&self, key: &str) -> Result<Option<&str>> {
        let keys = self.keys.as_ref().ok_or(Error::KeysNotRead)?;
        let values = self.current_values.as_ref().ok_or(Error::ValuesNotRead)?;

        let index = keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| Error::key_not_found(key))?;

        let raw = values.get(index).map(String::as_str).unwrap_or_default();
        Ok(self.normalize(raw))
    }

    fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() && self.config.convert_empty_string_to_null {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Boolean value of `key`; `false` when the text is not "true"/"false"
    pub fn get_bool_value(&self, key: &str) -> Result<bool> {
        let value = self.get_string_value(key)?;
        Ok(value.and_then(parse_bool).unwrap_or_else(|| {
            trace!("Value {:?} of '{}' is not a boolean; using false", value, key);
            false
        }))
    }

    /// Date/time value of `key` parsed with a .NET-style format such as
    /// `yyyy-MM-dd`; 0001-01-01 00:00:00 when the text does not match
    pub fn get_date_time_value(&self, key: &str, format: &str) -> Result<NaiveDateTime> {
        let value = self.get_string_value(key)?;
        Ok(value
            .and_then(|v| parse_date_time(v, format))
            .unwrap_or_else(|| {
                trace!(
                    "Value {:?} of '{}' does not match '{}'; using zero date",
                    value, key, format
                );
                zero_date_time()
            }))
    }

    /// Integer value of `key`; 0 when the text is not an integer
    pub fn get_i64_value(&self, key: &str) -> Result<i64> {
        let value = self.get_string_value(key)?;
        Ok(value.and_then(parse_i64).unwrap_or_else(|| {
            trace!("Value {:?} of '{}' is not an integer; using 0", value, key);
            ZERO_INT
        }))
    }

    /// Floating point value of `key`; 0.0 when the text is not a number
    pub fn get_f64_value(&self, key: &str) -> Result<f64> {
        let value = self.get_string_value(key)?;
        Ok(value.and_then(parse_f64).unwrap_or_else(|| {
            trace!("Value {:?} of '{}' is not a number; using 0.0", value, key);
            ZERO_FLOAT
        }))
    }

    /// Strictly parse the value of `key`, reporting text that does not parse
    pub fn parse_value<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get_string_value(key)? {
            None => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|e| Error::value_parse(key, value, e.to_string())),
        }
    }

    /// Snapshot of the current record as (key, trimmed value) pairs in key order
    pub fn record(&self) -> Result<Vec<(&str, Option<&str>)>> {
        let keys = self.keys.as_ref().ok_or(Error::KeysNotRead)?;
        let values = self.current_values.as_ref().ok_or(Error::ValuesNotRead)?;

        Ok(keys
            .iter()
            .zip(values.iter())
            .map(|(key, raw)| (key.as_str(), self.normalize(raw)))
            .collect())
    }

    /// Release the underlying stream; keys and the last record stay readable
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("Closing {} after {} lines", self.source, self.line_number);
        }
        if !matches!(self.state, ReaderState::Disposed) {
            self.state = ReaderState::Closed;
        }
    }

    /// Release the stream and any buffer backing the source
    pub fn dispose(&mut self) {
        if matches!(self.state, ReaderState::Disposed) {
            return;
        }

        self.close();
        self.source.release();
        self.state = ReaderState::Disposed;
        trace!("Disposed reader");
    }

    /// Keys, once established by a load
    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    /// Raw text of the most recently consumed line
    pub fn line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    /// Untrimmed field values of the current record
    pub fn values(&self) -> Option<&[String]> {
        self.current_values.as_deref()
    }

    /// Physical line number of the current line (1-based, 0 before any)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether a stream is currently open
    pub fn is_open(&self) -> bool {
        matches!(self.state, ReaderState::Open(_))
    }

    /// Configuration the reader was built with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Source the reader reads from
    pub fn source(&self) -> &Source {
        &self.source
    }
}

impl Drop for DelimitedReader {
    fn drop(&mut self) {
        self.dispose();
    }
}
