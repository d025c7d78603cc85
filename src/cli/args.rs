//! Command-line argument definitions for the delimited reader
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ReaderConfig;
use crate::constants::DEFAULT_CLI_SEPARATORS;
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the delimited record reader
///
/// Reads a simple delimited text file (no quoting) record by record and
/// prints the values by column name.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delimited-reader",
    version,
    about = "Read simple delimited text records and print them by column name"
)]
pub struct Args {
    /// File to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator characters; any of them splits a line
    #[arg(
        short = 's',
        long = "separators",
        value_name = "CHARS",
        default_value = DEFAULT_CLI_SEPARATORS,
        help = "Field separator characters (e.g. ';' or ';,' or '\\t')"
    )]
    pub separators: String,

    /// Column names to use instead of the first line (comma-separated)
    ///
    /// When given, the first line of the file is read as a record.
    #[arg(
        short = 'k',
        long = "keys",
        value_name = "LIST",
        value_delimiter = ',',
        help = "Comma-separated column names; the first line is then data"
    )]
    pub keys: Option<Vec<String>>,

    /// Columns to print, in order (comma-separated; default all)
    #[arg(
        short = 'c',
        long = "columns",
        value_name = "LIST",
        value_delimiter = ',',
        help = "Comma-separated columns to print"
    )]
    pub columns: Option<Vec<String>>,

    /// Report empty values as null
    #[arg(long = "null-empty", help = "Report empty values as null")]
    pub null_empty: bool,

    /// Text encoding label of the file
    #[arg(
        short = 'e',
        long = "encoding",
        value_name = "LABEL",
        default_value = "utf-8",
        help = "Text encoding of the file (e.g. utf-8, windows-1252, utf-16le)"
    )]
    pub encoding: String,

    /// Stop after this many records
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", help = "Only log errors")]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `key = value` blocks
    Human,
    /// Records re-joined with the first separator
    Csv,
}

impl Args {
    /// Separator characters, with `\t` accepted for tab
    pub fn separator_chars(&self) -> Vec<char> {
        self.separators.replace("\\t", "\t").chars().collect()
    }

    /// Build the reader configuration from the arguments
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        let config = ReaderConfig::new(&self.separator_chars())
            .with_convert_empty_string_to_null(self.null_empty)
            .with_encoding(self.encoding.clone());
        config.validate()?;
        Ok(config)
    }

    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::invalid_configuration(format!(
                "File does not exist: {}",
                self.file.display()
            )));
        }

        if self.limit == Some(0) {
            return Err(Error::invalid_configuration(
                "Limit must be greater than 0",
            ));
        }

        if let Some(columns) = &self.columns {
            if columns.iter().any(|c| c.is_empty()) {
                return Err(Error::invalid_configuration(
                    "Column names cannot be empty",
                ));
            }
        }

        self.reader_config()?;
        Ok(())
    }

    /// Get the log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
