//! S3 object version lookup.
//!
//! Nextstrain overwrites `metadata.tsv.zst` in a versioned bucket, so the file
//! as it stood on a given date is the newest object version published at or
//! before that date.

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// One page of an S3 `ListObjectVersions` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVersionsResult {
    /// Whether another page follows.
    #[serde(default)]
    pub is_truncated: bool,
    /// Key marker for the next page.
    pub next_key_marker: Option<String>,
    /// Version id marker for the next page.
    pub next_version_id_marker: Option<String>,
    /// Object versions on this page. Delete markers are not included.
    #[serde(rename = "Version", default)]
    pub versions: Vec<ObjectVersion>,
}

/// A single version of an S3 object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectVersion {
    /// Object key.
    pub key: String,
    /// Version id.
    pub version_id: String,
    /// When this version was written.
    pub last_modified: DateTime<Utc>,
    /// Whether this is the current version.
    #[serde(default)]
    pub is_latest: bool,
    /// Object size in bytes.
    pub size: Option<u64>,
}

/// Parse one page of a version listing.
pub fn parse_listing(xml: &str, url: &str) -> Result<ListVersionsResult> {
    quick_xml::de::from_str(xml).map_err(|e| Error::VersionListParse {
        url: url.to_string(),
        source: e,
    })
}

/// Newest version of `key` written at or before `as_of`.
pub fn select_version<'a>(
    versions: &'a [ObjectVersion],
    key: &str,
    as_of: DateTime<Utc>,
) -> Option<&'a ObjectVersion> {
    versions
        .iter()
        .filter(|v| v.key == key && v.last_modified <= as_of)
        .max_by_key(|v| v.last_modified)
}

/// URL of one listing page.
pub fn listing_url(bucket_url: &str, key: &str, markers: Option<&(String, String)>) -> Result<Url> {
    let base = format!("{}/?versions", bucket_url.trim_end_matches('/'));
    let mut params = vec![("prefix", key)];
    if let Some((key_marker, version_marker)) = markers {
        params.push(("key-marker", key_marker.as_str()));
        params.push(("version-id-marker", version_marker.as_str()));
    }

    Url::parse_with_params(&base, &params).map_err(|e| Error::VersionListFailed {
        url: base.clone(),
        source: Box::new(e),
    })
}

/// URL of a specific object version.
pub fn object_version_url(bucket_url: &str, key: &str, version_id: &str) -> Result<Url> {
    let base = format!(
        "{}/{}",
        bucket_url.trim_end_matches('/'),
        key.trim_start_matches('/')
    );

    Url::parse_with_params(&base, &[("versionId", version_id)]).map_err(|e| {
        Error::DownloadFailed {
            url: base.clone(),
            source: Box::new(e),
        }
    })
}

/// List every version of `key`, following pagination.
pub async fn list_versions(
    client: &Client,
    bucket_url: &str,
    key: &str,
) -> Result<Vec<ObjectVersion>> {
    collect_versions(bucket_url, key, |url| fetch_page(client, url)).await
}

/// Fetch one listing page body.
async fn fetch_page(client: &Client, url: Url) -> Result<String> {
    let list_failed = |e: reqwest::Error| Error::VersionListFailed {
        url: url.to_string(),
        source: Box::new(e),
    };

    client
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(list_failed)?
        .text()
        .await
        .map_err(list_failed)
}

/// Walk listing pages with `fetch`, accumulating versions.
///
/// Stops at the first page that is not truncated or lacks either marker.
async fn collect_versions<F, Fut>(
    bucket_url: &str,
    key: &str,
    mut fetch: F,
) -> Result<Vec<ObjectVersion>>
where
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let mut versions = Vec::new();
    let mut markers: Option<(String, String)> = None;

    loop {
        let url = listing_url(bucket_url, key, markers.as_ref())?;
        let body = fetch(url.clone()).await?;

        let page = parse_listing(&body, url.as_str())?;
        debug!(
            url = %url,
            versions = page.versions.len(),
            truncated = page.is_truncated,
            "Listed object versions"
        );
        versions.extend(page.versions);

        match (
            page.is_truncated,
            page.next_key_marker,
            page.next_version_id_marker,
        ) {
            (true, Some(key_marker), Some(version_marker)) => {
                markers = Some((key_marker, version_marker));
            }
            _ => break,
        }
    }

    Ok(versions)
}
