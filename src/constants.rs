//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "clade-counts";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "CLADE_COUNTS_CONFIG";

/// Default directory for output files, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Suffix appended to the as-of date to form the output file name.
pub const OUTPUT_FILE_SUFFIX: &str = "_covid_clade_counts.parquet";

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Nextstrain data locations.
pub mod nextstrain {
    /// Public S3 bucket hosting Nextstrain open data.
    pub const BUCKET_URL: &str = "https://nextstrain-data.s3.amazonaws.com";

    /// Object key of the SARS-CoV-2 open (GenBank) sequence metadata.
    pub const METADATA_KEY: &str = "files/ncov/open/metadata.tsv.zst";

    /// Sub-directory of the cache directory holding downloaded metadata.
    pub const CACHE_SUBDIR: &str = "metadata";
}

/// HTTP client settings.
pub mod http {
    /// Default connect timeout in seconds.
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;

    /// Default total request timeout in seconds.
    ///
    /// The compressed metadata is several hundred megabytes, so this is
    /// generous.
    pub const TIMEOUT_SECS: u64 = 3600;
}

/// Sequence metadata filter values.
pub mod filter {
    /// Country retained by the metadata filter.
    pub const COUNTRY: &str = "USA";

    /// Host retained by the metadata filter.
    pub const HOST: &str = "Homo sapiens";

    /// Date format of complete sequence collection dates.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Parquet output settings.
pub mod parquet {
    /// Number of rows buffered before a record batch is written.
    pub const BATCH_SIZE: usize = 8192;
}
