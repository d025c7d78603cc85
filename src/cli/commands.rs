//! Command implementation for the delimited reader CLI
//!
//! Sets up logging, opens the reader described by the arguments and prints
//! each record in the requested output format.

use crate::cli::args::{Args, OutputFormat};
use crate::reader::DelimitedReader;
use crate::{Error, Result};
use colored::*;
use std::io::Write;
use tracing::{debug, info};

/// Reading statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct ReadStats {
    /// Number of records printed
    pub records_read: usize,
    /// Number of keys the reader used
    pub key_count: usize,
    /// Whether reading stopped at the record limit
    pub limit_reached: bool,
}

/// Main command runner
///
/// Reads records from the file named in `args` and writes them to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<ReadStats> {
    args.validate()?;
    debug!("Command line arguments: {:?}", args);

    let config = args.reader_config()?;
    let separator = config.separators[0];
    let mut reader = DelimitedReader::from_path(&args.file, config)?;

    match &args.keys {
        Some(keys) => reader.load_with_keys(keys.iter().cloned())?,
        None => reader.load()?,
    }

    let keys: Vec<String> = reader.keys().map(<[String]>::to_vec).unwrap_or_default();
    let columns = match &args.columns {
        Some(columns) => {
            if let Some(missing) = columns.iter().find(|c| !keys.contains(c)) {
                return Err(Error::key_not_found(missing.as_str()));
            }
            columns.clone()
        }
        None => keys.clone(),
    };
    info!(
        "Reading {} with {} keys: {}",
        args.file.display(),
        keys.len(),
        keys.join(", ")
    );

    let mut stats = ReadStats {
        key_count: keys.len(),
        ..Default::default()
    };

    if args.output_format == OutputFormat::Csv {
        writeln!(out, "{}", columns.join(&separator.to_string()))?;
    }

    while reader.read_line()? {
        stats.records_read += 1;

        let mut values = Vec::with_capacity(columns.len());
        for column in &columns {
            values.push(reader.get_string_value(column)?);
        }

        match args.output_format {
            OutputFormat::Human => {
                write_human_record(out, stats.records_read, reader.line_number(), &columns, &values)?
            }
            OutputFormat::Csv => {
                let row: Vec<&str> = values.iter().map(|v| v.unwrap_or_default()).collect();
                writeln!(out, "{}", row.join(&separator.to_string()))?;
            }
        }

        if args.limit.is_some_and(|limit| stats.records_read >= limit) {
            stats.limit_reached = true;
            break;
        }
    }

    reader.close();
    info!(
        "Read {} records{}",
        stats.records_read,
        if stats.limit_reached {
            " (limit reached)"
        } else {
            ""
        }
    );

    Ok(stats)
}

/// Write one record as a titled block of `key = value` lines
fn write_human_record(
    out: &mut impl Write,
    record_number: usize,
    line_number: usize,
    columns: &[String],
    values: &[Option<&str>],
) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!("Record {} (line {})", record_number, line_number)
            .bright_green()
            .bold()
    )?;

    let width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    for (column, value) in columns.iter().zip(values) {
        let shown = match value {
            Some(text) => text.to_string(),
            None => "null".bright_black().to_string(),
        };
        let padded = format!("{:width$}", column, width = width);
        writeln!(out, "  {} = {}", padded.bright_cyan(), shown)?;
    }
    writeln!(out)?;

    Ok(())
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use crate::constants::LOG_TARGET;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::invalid_configuration(format!("Failed to set up logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
