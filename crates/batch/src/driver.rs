//! Batch driver: submit records one by one, retrying failed attempts

use crate::config::BatchConfig;
use crate::error::Result;
use crate::submit::Submitter;
use crate::telemetry::{ResourceMonitor, ResourceSample};
use chrono::Local;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// How one item's attempts went
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptRecord {
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// Time from the first attempt until the item resolved
    pub elapsed: Duration,
    pub succeeded: bool,
}

/// Final state of one item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Done {
        index: usize,
        path: PathBuf,
        record: AttemptRecord,
        resources: ResourceSample,
    },
    Skipped {
        index: usize,
        record: AttemptRecord,
    },
}

impl ItemOutcome {
    /// 1-based position of the item in the input
    pub fn index(&self) -> usize {
        match self {
            ItemOutcome::Done { index, .. } | ItemOutcome::Skipped { index, .. } => *index,
        }
    }

    pub fn attempts(&self) -> &AttemptRecord {
        match self {
            ItemOutcome::Done { record, .. } | ItemOutcome::Skipped { record, .. } => record,
        }
    }
}

/// Result of a whole batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub items: Vec<ItemOutcome>,
}

impl BatchSummary {
    pub fn completed(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, ItemOutcome::Done { .. }))
            .count()
    }

    /// Indices of the items that were given up on
    pub fn skipped(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| matches!(item, ItemOutcome::Skipped { .. }))
            .map(ItemOutcome::index)
            .collect()
    }

    /// Files written, in input order
    pub fn files(&self) -> Vec<&Path> {
        self.items
            .iter()
            .filter_map(|item| match item {
                ItemOutcome::Done { path, .. } => Some(path.as_path()),
                ItemOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}

/// Output file name for an item rendered at `timestamp`
pub fn output_filename(index: usize, timestamp: &str) -> String {
    format!("lc_draft_{index}_{timestamp}.pdf")
}

/// Drives records through a [`Submitter`]
pub struct BatchDriver<S> {
    config: BatchConfig,
    submitter: S,
    monitor: ResourceMonitor,
    sleep: Box<dyn FnMut(Duration)>,
}

impl<S: Submitter> BatchDriver<S> {
    pub fn new(config: BatchConfig, submitter: S) -> Self {
        Self {
            config,
            submitter,
            monitor: ResourceMonitor::new(),
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// Replace how the driver waits between attempts and items
    pub fn with_sleeper(mut self, sleep: impl FnMut(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Submit every record in order
    ///
    /// Items that exhaust their attempts are skipped and the batch moves on.
    /// A record source error or a failure to write an output file stops the
    /// batch.
    pub fn run<I>(&mut self, records: I) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = Result<Value>>,
    {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let mut summary = BatchSummary::default();
        let mut records = records.into_iter().enumerate().peekable();

        while let Some((position, payload)) = records.next() {
            let outcome = self.process_item(position + 1, &payload?)?;
            summary.items.push(outcome);

            if records.peek().is_some() {
                (self.sleep)(self.config.item_delay);
            }
        }

        info!(
            completed = summary.completed(),
            skipped = summary.skipped().len(),
            skipped_items = ?summary.skipped(),
            "batch finished"
        );
        Ok(summary)
    }

    fn process_item(&mut self, index: usize, payload: &Value) -> Result<ItemOutcome> {
        let start = Instant::now();
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.submitter.submit(payload) {
                Ok(bytes) => {
                    let path = self.write_output(index, &bytes)?;
                    let resources = self.monitor.sample();
                    let record = AttemptRecord {
                        attempts: attempt,
                        elapsed: start.elapsed(),
                        succeeded: true,
                    };

                    info!(
                        index,
                        file = %path.display(),
                        resources = %resources,
                        elapsed_secs = record.elapsed.as_secs_f64(),
                        "PDF generated"
                    );
                    return Ok(ItemOutcome::Done {
                        index,
                        path,
                        record,
                        resources,
                    });
                }
                Err(e) if e.is_retryable() => {
                    warn!(index, attempt, error = %e, "attempt failed");
                    if attempt < max_attempts {
                        (self.sleep)(self.config.retry_delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        error!(index, attempts = max_attempts, "skipped after exhausting attempts");
        Ok(ItemOutcome::Skipped {
            index,
            record: AttemptRecord {
                attempts: max_attempts,
                elapsed: start.elapsed(),
                succeeded: false,
            },
        })
    }

    fn write_output(&self, index: usize, bytes: &[u8]) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let path = self
            .config
            .output_dir
            .join(output_filename(index, &timestamp));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}
