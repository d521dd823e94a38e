//! Nextstrain-backed clade source.
//!
//! Resolves the SARS-CoV-2 open metadata file as it stood at the as-of
//! timestamp, downloads it once into the cache, and counts clades with a
//! streaming scan over the compressed TSV.

mod download;
#[cfg(test)]
mod test_server;
mod versions;

pub use download::{cache_file_name, fetch_cached};
pub use versions::{
    ListVersionsResult, ObjectVersion, list_versions, listing_url, object_version_url,
    parse_listing, select_version,
};

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::SourceConfig;
use crate::constants::nextstrain::CACHE_SUBDIR;
use crate::error::{Error, Result};
use crate::metadata::{LazyCladeCounts, LazyMetadata, MetadataFilter};
use crate::output::CladeCountTable;
use crate::source::{CladeContext, CladeSource, CollectMode, GroupColumn};

/// Clade source reading Nextstrain open SARS-CoV-2 metadata.
pub struct NextstrainSource {
    runtime: Runtime,
    client: Client,
    bucket_url: String,
    metadata_key: String,
    cache_dir: PathBuf,
}

impl NextstrainSource {
    /// Create a source from configuration.
    ///
    /// Builds the HTTP client and a current-thread runtime; no network
    /// requests are made until [`CladeSource::context`] is called.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let cache_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => crate::config::cache_dir()?,
        }
        .join(CACHE_SUBDIR);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::SourceInitialization {
                reason: format!("failed to create async runtime: {e}"),
            })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::SourceInitialization {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            runtime,
            client,
            bucket_url: config.bucket_url.clone(),
            metadata_key: config.metadata_key.clone(),
            cache_dir,
        })
    }

    /// Directory holding downloaded metadata files.
    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }
}

impl CladeSource for NextstrainSource {
    type Metadata = LazyMetadata;
    type Counts = LazyCladeCounts;

    fn context(&self, as_of: DateTime<Utc>) -> Result<CladeContext> {
        let versions = self.runtime.block_on(list_versions(
            &self.client,
            &self.bucket_url,
            &self.metadata_key,
        ))?;
        debug!(
            key = %self.metadata_key,
            versions = versions.len(),
            "Resolving metadata version"
        );

        let version = select_version(&versions, &self.metadata_key, as_of).ok_or_else(|| {
            Error::NoMetadataVersion {
                key: self.metadata_key.clone(),
                as_of,
            }
        })?;
        debug!(
            version_id = %version.version_id,
            last_modified = %version.last_modified,
            "Selected metadata version"
        );

        let url = object_version_url(&self.bucket_url, &self.metadata_key, &version.version_id)?;

        Ok(CladeContext {
            sequence_as_of: as_of,
            url_sequence_metadata: url.to_string(),
            metadata_version: version.version_id.clone(),
        })
    }

    fn sequence_metadata(&self, context: &CladeContext) -> Result<LazyMetadata> {
        let url = Url::parse(&context.url_sequence_metadata).map_err(|e| Error::DownloadFailed {
            url: context.url_sequence_metadata.clone(),
            source: Box::new(e),
        })?;

        let dest = self
            .cache_dir
            .join(cache_file_name(&context.metadata_version, &self.metadata_key));
        let path = self
            .runtime
            .block_on(fetch_cached(&self.client, &url, &dest))?;

        Ok(LazyMetadata::scan_tsv(path))
    }

    fn filter_metadata(&self, metadata: LazyMetadata) -> LazyMetadata {
        metadata.filter(MetadataFilter::default())
    }

    fn summarize_clades(&self, metadata: LazyMetadata, group_by: &[GroupColumn]) -> LazyCladeCounts {
        metadata.summarize(group_by)
    }

    fn collect(&self, counts: LazyCladeCounts, mode: CollectMode) -> Result<CladeCountTable> {
        counts.collect(mode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::CLADE_DATE_LOCATION;
    use std::io::Write;

    fn source_with_cache(dir: &std::path::Path) -> NextstrainSource {
        let config = SourceConfig {
            cache_dir: Some(dir.to_path_buf()),
            ..SourceConfig::default()
        };
        NextstrainSource::new(&config).unwrap()
    }

    #[test]
    fn test_new_makes_no_requests() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_with_cache(dir.path());
        assert_eq!(source.cache_dir(), dir.path().join("metadata"));
        assert!(!source.cache_dir().exists());
    }

    #[test]
    fn test_sequence_metadata_uses_cached_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_with_cache(dir.path());

        let cached = source
            .cache_dir()
            .join(cache_file_name("v-jan-01", "files/ncov/open/metadata.tsv.zst"));
        std::fs::create_dir_all(source.cache_dir()).unwrap();
        let tsv = "strain\tdate\tcountry\tdivision\thost\tclade_nextstrain\n\
                   USA/MA-1/2024\t2024-01-01\tUSA\tMassachusetts\tHomo sapiens\t24A\n";
        let mut file = std::fs::File::create(&cached).unwrap();
        file.write_all(&zstd::encode_all(tsv.as_bytes(), 3).unwrap())
            .unwrap();

        // The host is unreachable; a cache hit must not touch the network.
        let context = CladeContext {
            sequence_as_of: Utc::now(),
            url_sequence_metadata:
                "http://127.0.0.1:9/files/ncov/open/metadata.tsv.zst?versionId=v-jan-01"
                    .to_string(),
            metadata_version: "v-jan-01".to_string(),
        };

        let metadata = source.sequence_metadata(&context).unwrap();
        assert_eq!(metadata.path(), cached);

        let filtered = source.filter_metadata(metadata);
        assert!(filtered.is_filtered());
        let counts = source.summarize_clades(filtered, &CLADE_DATE_LOCATION);
        let table = source.collect(counts, CollectMode::Streaming).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].location.as_deref(), Some("MA"));
        assert_eq!(table.rows[0].count, 1);
    }
}
