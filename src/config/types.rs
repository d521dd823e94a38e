//! Configuration type definitions.

use crate::constants::{DEFAULT_DATA_DIR, http, nextstrain};
use crate::source::CollectMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Metadata source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Materialization settings.
    #[serde(default)]
    pub collect: CollectConfig,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the Parquet file.
    pub data_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Where and how sequence metadata is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the S3 bucket hosting the metadata.
    pub bucket_url: String,

    /// Object key of the metadata file within the bucket.
    pub metadata_key: String,

    /// Directory for downloaded metadata (default: platform cache dir).
    pub cache_dir: Option<PathBuf>,

    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            bucket_url: nextstrain::BUCKET_URL.to_string(),
            metadata_key: nextstrain::METADATA_KEY.to_string(),
            cache_dir: None,
            connect_timeout_secs: http::CONNECT_TIMEOUT_SECS,
            timeout_secs: http::TIMEOUT_SECS,
        }
    }
}

/// Materialization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    /// Aggregate record by record instead of loading all rows first.
    pub streaming: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self { streaming: true }
    }
}

impl CollectConfig {
    /// Collection mode selected by this configuration.
    pub const fn mode(&self) -> CollectMode {
        if self.streaming {
            CollectMode::Streaming
        } else {
            CollectMode::InMemory
        }
    }
}
