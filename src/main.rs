//! ynab-discover - convert a Discover CSV export for import into YNAB
//!
//! Reads from a file or stdin and writes to a file or stdout. Ctrl+C stops the
//! conversion after the row in progress; rows already written are kept.

use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use ynab_discover::{
    core::{cancel::CancellationToken, step::StepExecution},
    discover::convert,
};

#[derive(Parser, Debug)]
#[command(name = "ynab-discover")]
#[command(about = "Convert a Discover CSV export into a file YNAB can import")]
#[command(version)]
struct Cli {
    /// Where to read the file downloaded from Discover, '-' for stdin
    #[arg(long, default_value = "-")]
    src: String,
    /// Where to write the file to import to YNAB, omit or leave empty for stdout
    #[arg(long)]
    dst: Option<String>,
}

impl Cli {
    /// Destination file, `None` meaning stdout.
    fn destination(&self) -> Option<&Path> {
        self.dst
            .as_deref()
            .filter(|dst| !dst.is_empty())
            .map(Path::new)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let cancellation = CancellationToken::new();

    let interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current row");
            interrupt.cancel();
        }
    });

    // The conversion is blocking I/O; keep it off the thread polling the signal.
    let outcome = tokio::task::spawn_blocking(move || run(&cli, &cancellation)).await;

    match outcome {
        Ok(Ok(execution)) => {
            info!(
                "Converted {} rows ({:?})",
                execution.write_count, execution.status
            );
            ExitCode::SUCCESS
        }
        Ok(Err(err)) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("conversion task failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, cancellation: &CancellationToken) -> Result<StepExecution> {
    let reader: Box<dyn Read> = if cli.src == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.src)
            .with_context(|| format!("failed to read source {}", cli.src))?;
        Box::new(file)
    };

    let writer: Box<dyn Write> = match cli.destination() {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("failed to open destination {}", path.display())
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    let execution = convert(cancellation, reader, writer)?;
    Ok(execution)
}
