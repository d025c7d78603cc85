use anyhow::Context;
use clap::Parser;
use delimited_reader::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(error) = run(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    commands::setup_logging(args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    commands::run(args, &mut out)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    Ok(())
}
