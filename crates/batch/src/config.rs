//! Batch configuration

use std::path::PathBuf;
use std::time::Duration;

/// Endpoint the drafts are submitted to by default
pub const DEFAULT_ENDPOINT: &str = "https://lc-draft.onrender.com/generate-lc-draft-pdf/";

/// Directory rendered PDFs are written to by default
pub const DEFAULT_OUTPUT_DIR: &str = "rendered_lc_draft_pdfs";

/// Settings for one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Renderer URL
    pub endpoint: String,
    /// Attempts per item before it is skipped
    pub max_attempts: u32,
    /// Pause after a failed attempt that will be retried
    pub retry_delay: Duration,
    /// Pause between consecutive items
    pub item_delay: Duration,
    pub output_dir: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_attempts: 5,
            retry_delay: Duration::from_secs(3),
            item_delay: Duration::from_secs(2),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout: None,
        }
    }
}

impl BatchConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the attempt limit (at least one attempt is always made)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
