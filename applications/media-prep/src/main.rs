/// Bentley Media Prep - Extract and resize FLAC cover art to JPEG files
use bentley_media_prep::{
    LogReporter, Pipeline, PrepOptions, RunOutcome, DEFAULT_JPEG_NAME, EXIT_FAILURE,
};
use bentley_scan::ScanError;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EXAMPLES: &str = "Examples:
  bentley-media-prep /path/to/music
  bentley-media-prep /path/to/music album_art.jpg
  bentley-media-prep ~/Music/FLAC folder.jpg

Exit status:
  0    run completed
  1    root missing or not a directory, or another fatal error
  2    invalid arguments (usage error)
  130  interrupted with Ctrl+C";

#[derive(Parser)]
#[command(name = "bentley-media-prep")]
#[command(about = "Extract and resize FLAC cover art to JPEG files", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Root directory to process (will recurse through all subdirectories)
    directory: PathBuf,

    /// Output JPEG filename
    #[arg(default_value = DEFAULT_JPEG_NAME)]
    jpeg_name: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bentley_media_prep=info,bentley_scan=info,bentley_artwork=info".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_target(false)
                .with_ansi(std::io::stdout().is_terminal()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            if let Some(scan_error) = e.downcast_ref::<ScanError>() {
                tracing::error!("{}", scan_error);
            } else {
                tracing::error!("FATAL ERROR: {:#}", e);
            }
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Ctrl+C listener, installed before any work starts so an early interrupt
/// is never lost to the default handler
struct Interrupt {
    #[cfg(unix)]
    sigint: signal::unix::Signal,
}

impl Interrupt {
    fn listen() -> std::io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            sigint: signal::unix::signal(signal::unix::SignalKind::interrupt())?,
        })
    }

    #[cfg(unix)]
    async fn recv(&mut self) -> std::io::Result<()> {
        self.sigint.recv().await;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> std::io::Result<()> {
        signal::ctrl_c().await
    }
}

/// Run the pipeline on the blocking pool while listening for Ctrl+C
///
/// On interrupt the cancel flag is raised. A cover being written is finished
/// first, and the walk stops before the next directory.
async fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let options = PrepOptions::new(cli.directory, cli.jpeg_name);
    let cancel = Arc::new(AtomicBool::new(false));
    let mut interrupt = Interrupt::listen()?;

    let mut worker = tokio::task::spawn_blocking({
        let cancel = Arc::clone(&cancel);
        move || Pipeline::new(options, LogReporter::new()).run(&cancel)
    });

    let outcome = tokio::select! {
        joined = &mut worker => joined?,
        received = interrupt.recv() => {
            received?;
            cancel.store(true, Ordering::SeqCst);
            worker.await?
        }
    }?;

    Ok(outcome)
}
