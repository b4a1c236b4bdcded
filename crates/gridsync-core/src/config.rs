//! TOML configuration.
//!
//! ```toml
//! [quota]
//! read_quota = 90
//! write_quota = 90
//! ignore_quota = false
//! window_secs = 100
//! slack_secs = 1
//! poll_interval_ms = 1000
//!
//! [retry]
//! base_secs = 10
//! increment_secs = 5
//! limit_secs = 50
//!
//! [auth]
//! sheets_token_env = "GRIDSYNC_SHEETS_TOKEN"
//! drive_token_env = "GRIDSYNC_DRIVE_TOKEN"
//! ```
//!
//! Every key is optional. Unknown keys are rejected.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::dispatch::RetryPolicy;
use crate::error::{GridsyncError, Result};
use crate::quota::QuotaConfig;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub quota: QuotaSection,
    pub retry: RetrySection,
    pub auth: AuthSection,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuotaSection {
    pub read_quota: usize,
    pub write_quota: usize,
    pub ignore_quota: bool,
    pub window_secs: u64,
    pub slack_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for QuotaSection {
    fn default() -> Self {
        QuotaSection {
            read_quota: 90,
            write_quota: 90,
            ignore_quota: false,
            window_secs: 100,
            slack_secs: 1,
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySection {
    pub base_secs: u64,
    pub increment_secs: u64,
    pub limit_secs: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        RetrySection {
            base_secs: 10,
            increment_secs: 5,
            limit_secs: 50,
        }
    }
}

/// Names of the environment variables holding the two bearer tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthSection {
    pub sheets_token_env: String,
    pub drive_token_env: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        AuthSection {
            sheets_token_env: "GRIDSYNC_SHEETS_TOKEN".to_string(),
            drive_token_env: "GRIDSYNC_DRIVE_TOKEN".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config> {
        Self::parse(content, "<inline>")
    }

    /// Read and validate a config file (at most 1 MiB).
    pub fn load(path: &Path) -> Result<Config> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(GridsyncError::Config {
                path: path.display().to_string(),
                message: format!(
                    "file too large ({} bytes, max {})",
                    meta.len(),
                    MAX_CONFIG_FILE_BYTES
                ),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, origin: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| GridsyncError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| GridsyncError::Config {
            path: origin.to_string(),
            message,
        })?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.quota.read_quota == 0 || self.quota.write_quota == 0 {
            return Err("quotas must be at least 1".to_string());
        }
        if self.quota.window_secs == 0 {
            return Err("window_secs must be at least 1".to_string());
        }
        if self.quota.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn quota_config(&self) -> QuotaConfig {
        QuotaConfig {
            read_quota: self.quota.read_quota,
            write_quota: self.quota.write_quota,
            ignore_quota: self.quota.ignore_quota,
            window: Duration::from_secs(self.quota.window_secs),
            slack: Duration::from_secs(self.quota.slack_secs),
            poll_interval: Duration::from_millis(self.quota.poll_interval_ms),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            base: Duration::from_secs(self.retry.base_secs),
            increment: Duration::from_secs(self.retry.increment_secs),
            limit: Duration::from_secs(self.retry.limit_secs),
        }
    }
}
