//! `lc-batch` binary: submit synthetic or CSV-sourced LC drafts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lc_batch::{
    BatchConfig, BatchDriver, BatchError, CsvRecords, HttpSubmitter, SyntheticRecords,
    DEFAULT_COUNT, DEFAULT_ENDPOINT, DEFAULT_INPUT_CSV, DEFAULT_OUTPUT_DIR,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lc-batch", version, about = "Submit LC drafts to the renderer in bulk")]
struct Cli {
    #[command(subcommand)]
    source: Source,

    /// Renderer endpoint.
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory the PDFs are written to.
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Attempts per record before it is skipped.
    #[arg(long, global = true, default_value_t = 5)]
    max_attempts: u32,

    /// Seconds to wait after a failed attempt.
    #[arg(long, global = true, default_value_t = 3.0)]
    retry_delay: f64,

    /// Seconds to wait between records.
    #[arg(long, global = true, default_value_t = 2.0)]
    item_delay: f64,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Source {
    /// Generate random drafts.
    Synthetic {
        /// Number of drafts.
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// RNG seed for a reproducible batch.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// One draft per row of a CSV file with field-name headers.
    Csv {
        #[arg(default_value = DEFAULT_INPUT_CSV)]
        path: PathBuf,
    },
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("invalid --{flag} {value}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BatchConfig::default()
        .with_endpoint(cli.endpoint)
        .with_output_dir(cli.output_dir)
        .with_max_attempts(cli.max_attempts)
        .with_retry_delay(seconds(cli.retry_delay, "retry-delay")?)
        .with_item_delay(seconds(cli.item_delay, "item-delay")?)
        .with_request_timeout(cli.timeout.map(|t| seconds(t, "timeout")).transpose()?);

    info!(endpoint = %config.endpoint, output_dir = %config.output_dir.display(), "starting batch");

    let submitter = HttpSubmitter::new(&config).context("failed to build HTTP client")?;
    let mut driver = BatchDriver::new(config, submitter);

    match cli.source {
        Source::Synthetic { count, seed } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let today = chrono::Local::now().date_naive();
            let records = SyntheticRecords::new(rng, today, count)
                .map(|record| serde_json::to_value(record).map_err(BatchError::from));
            driver.run(records)?;
        }
        Source::Csv { path } => {
            let records = CsvRecords::from_path(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            driver.run(records)?;
        }
    }

    Ok(())
}
