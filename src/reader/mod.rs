//! Delimited text reader with named-column access
//!
//! This module provides a forward-only reader for simple delimited records:
//! one record per line, fields separated by any of a set of characters, no
//! quoting. Column names come from the first line or from the caller.
//!
//! ## Architecture
//!
//! - [`delimited_reader`] - The reader: lifecycle, cursor state and value access
//! - [`source`] - File and in-memory byte sources
//! - [`line_source`] - Chunked decoding and CR/LF/CRLF line splitting
//! - [`field_parsers`] - Field splitting and value coercion helpers
//!
//! ## Usage
//!
//! ```rust
//! use delimited_reader::{DelimitedReader, ReaderConfig};
//!
//! # fn example() -> delimited_reader::Result<()> {
//! let config = ReaderConfig::new(&[';']).with_convert_empty_string_to_null(true);
//! let mut reader = DelimitedReader::from_path("people.csv", config)?;
//! reader.load()?;
//!
//! while reader.read_line()? {
//!     let born = reader.get_date_time_value("BirthDate", "yyyy-MM-dd")?;
//!     println!("{:?} born {}", reader.get_string_value("Name")?, born.date());
//! }
//! reader.close();
//! # Ok(())
//! # }
//! ```

pub mod delimited_reader;
pub mod field_parsers;
pub mod line_source;
pub mod source;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use delimited_reader::DelimitedReader;
pub use source::Source;
