//! Configuration types for wiki-harvest

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Main configuration for [`WikiHarvester`](crate::WikiHarvester)
///
/// Everything the harvester and the argument assembler need is passed in
/// explicitly here; nothing is discovered through process-wide globals.
/// All fields have sensible defaults, so `HarvestConfig::default()` works
/// out of the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Path to the downloader executable the assembled arguments target
    #[serde(default = "default_downloader_path")]
    pub downloader_path: PathBuf,

    /// Local address the downloader should bind outbound connections to
    #[serde(default)]
    pub bind_address: Option<String>,

    /// User agent sent with API requests and passed to the downloader
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Records requested per API page (default: 500)
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Per-request timeout for API calls (default: 30 s)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Retry behavior for connection-level failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Version string reported in the WARC metadata headers
    #[serde(default = "default_pipeline_version")]
    pub pipeline_version: String,

    /// Operator name reported in the WARC metadata headers
    #[serde(default = "default_warc_operator")]
    pub warc_operator: String,

    /// Where the downloader writes its log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Base name (without extension) for the WARC output file
    #[serde(default = "default_warc_file_base")]
    pub warc_file_base: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            downloader_path: default_downloader_path(),
            bind_address: None,
            user_agent: default_user_agent(),
            page_limit: default_page_limit(),
            request_timeout: default_request_timeout(),
            retry: RetryConfig::default(),
            pipeline_version: default_pipeline_version(),
            warc_operator: default_warc_operator(),
            log_path: default_log_path(),
            warc_file_base: default_warc_file_base(),
        }
    }
}

/// Retry behavior for connection-level failures
///
/// Connection failures are retried with a fixed delay between attempts;
/// HTTP error statuses are never retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts before giving up (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed sleep between attempts (default: 2 s)
    #[serde(default = "default_retry_delay")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay: default_retry_delay(),
        }
    }
}

fn default_downloader_path() -> PathBuf {
    PathBuf::from("./wget-lua")
}

fn default_user_agent() -> String {
    "ArchiveTeam".to_string()
}

fn default_page_limit() -> usize {
    500
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_pipeline_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_warc_operator() -> String {
    "Archive Team".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("wget.log")
}

fn default_warc_file_base() -> String {
    "wiki-harvest".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(2)
}
