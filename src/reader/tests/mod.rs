//! Test utilities for delimited reader testing
//!
//! This module provides common fixtures and helper functions used across
//! the reader test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::ReaderConfig;
use crate::reader::DelimitedReader;

mod line_source_tests;
mod value_tests;

/// Header plus two records, separated by ';'
pub const PEOPLE: &str = "Name;BirthDate;IsMarried\nJohn;1975-01-23;true\nJane;1985-07-07;false\n";

/// One record exercising trimming, empty values and coercion failures
pub const TYPED: &str = "String;Empty;Bool;Date;Int;Float;Junk\n This is a test ;   ;TRUE;1975-01-23;42;2.5;abc\n";

/// Build a buffer reader over `content` with ';' as separator
pub fn buffer_reader(content: &str) -> DelimitedReader {
    DelimitedReader::from_bytes_with_separators(content.as_bytes().to_vec(), &[';']).unwrap()
}

/// Build a buffer reader over `content` with a custom configuration
pub fn configured_reader(content: &str, config: ReaderConfig) -> DelimitedReader {
    DelimitedReader::from_bytes(content.as_bytes().to_vec(), config).unwrap()
}

/// Build a reader over `content`, load the header and read the first record
pub fn reader_at_first_record(content: &str, config: ReaderConfig) -> DelimitedReader {
    let mut reader = configured_reader(content, config);
    reader.load().unwrap();
    assert!(reader.read_line().unwrap());
    reader
}

/// Helper to create a temporary file with given content (written verbatim)
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
