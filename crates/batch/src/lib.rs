//! LC Batch - feed LC drafts to the renderer and collect the PDFs
//!
//! Records come from a [`CsvRecords`] file or the [`SyntheticRecords`]
//! generator. The [`BatchDriver`] submits them one at a time, retries failed
//! attempts, writes each PDF to the output directory and logs host resource
//! usage after every success.

pub mod config;
pub mod csv_source;
pub mod driver;
pub mod error;
pub mod submit;
pub mod synthetic;
pub mod telemetry;

pub use config::{BatchConfig, DEFAULT_ENDPOINT, DEFAULT_OUTPUT_DIR};
pub use csv_source::{CsvRecords, DEFAULT_INPUT_CSV};
pub use driver::{output_filename, AttemptRecord, BatchDriver, BatchSummary, ItemOutcome};
pub use error::{BatchError, Result};
pub use submit::{HttpSubmitter, Submitter};
pub use synthetic::{generate_record, SyntheticRecords, DEFAULT_COUNT};
pub use telemetry::{ResourceMonitor, ResourceSample};
