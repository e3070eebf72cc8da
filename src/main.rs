use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use userstore::{Arguments, perform};

mod cli;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args: Arguments = cli::Cli::parse().into();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    perform(&args, &mut out)?;
    out.flush()?;
    Ok(())
}
