//! Error types for clade-counts.

use chrono::{DateTime, NaiveDate, Utc};

/// Result type alias for clade-counts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clade-counts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Cache directory could not be determined.
    #[error("could not determine cache directory for this platform")]
    CacheDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// The requested as-of date is after the current UTC date.
    #[error("as-of date is in the future: {as_of} (today is {today} UTC)")]
    AsOfInFuture {
        /// Requested as-of date.
        as_of: NaiveDate,
        /// Current UTC date at run start.
        today: NaiveDate,
    },

    /// Failed to create the HTTP client or async runtime.
    #[error("failed to initialize metadata source: {reason}")]
    SourceInitialization {
        /// Description of the initialization failure.
        reason: String,
    },

    /// Listing object versions failed.
    #[error("failed to list object versions from '{url}'")]
    VersionListFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Object version listing could not be parsed.
    #[error("failed to parse object version listing from '{url}'")]
    VersionListParse {
        /// URL the listing came from.
        url: String,
        /// Underlying XML error.
        #[source]
        source: quick_xml::DeError,
    },

    /// No metadata version exists at or before the as-of timestamp.
    #[error("no version of '{key}' was published on or before {as_of}")]
    NoMetadataVersion {
        /// Object key that was listed.
        key: String,
        /// Requested as-of timestamp.
        as_of: DateTime<Utc>,
    },

    /// Download failed.
    #[error("failed to download from '{url}'")]
    DownloadFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to open sequence metadata.
    #[error("failed to open sequence metadata '{path}'")]
    MetadataOpen {
        /// Path to the metadata file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a sequence metadata record.
    #[error("failed to read sequence metadata '{path}'")]
    MetadataRead {
        /// Path to the metadata file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create Parquet file.
    #[error("failed to create Parquet file '{path}'")]
    ParquetFileCreate {
        /// Path to the Parquet file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Parquet write failed.
    #[error("{context}")]
    ParquetWrite {
        /// What was being written.
        context: String,
        /// Underlying Parquet error.
        #[source]
        source: parquet::errors::ParquetError,
    },

    /// Unknown output column.
    #[error("invalid column name: {name}")]
    InvalidColumnName {
        /// Column name.
        name: String,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
