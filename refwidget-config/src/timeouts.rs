use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeoutsConfig {
    /// Overall timeout (in seconds) for the widget request. `0` leaves the
    /// request bounded only by the platform defaults.
    #[serde(default = "TimeoutsConfig::default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: Self::default_request_timeout_seconds(),
        }
    }
}

impl TimeoutsConfig {
    const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 600;

    const fn default_request_timeout_seconds() -> u64 {
        0
    }

    /// Normalize the configured timeout into an optional duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_seconds))
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.request_timeout_seconds <= Self::MAX_REQUEST_TIMEOUT_SECONDS,
            "timeouts.request_timeout_seconds must be at most {} seconds (or 0 to disable)",
            Self::MAX_REQUEST_TIMEOUT_SECONDS
        );
        Ok(())
    }
}
