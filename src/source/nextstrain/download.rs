//! Metadata download with local caching.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::{Client, Url};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::output::progress;

/// Cache file name for a metadata object version.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced so any version id maps to
/// a single path component.
pub fn cache_file_name(version_id: &str, key: &str) -> String {
    let suffix = Path::new(key)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("metadata.tsv.zst");
    let version: String = version_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{version}_{suffix}")
}

/// Path used while a download is in progress.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Download `url` to `dest` unless `dest` already exists.
///
/// The body is streamed to a `.part` file that is renamed into place once
/// complete, so an interrupted download is never mistaken for a cached file.
pub async fn fetch_cached(client: &Client, url: &Url, dest: &Path) -> Result<PathBuf> {
    if dest.exists() {
        info!(path = %dest.display(), "Using cached sequence metadata");
        return Ok(dest.to_path_buf());
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(Error::Io)?;
    }

    let partial = partial_path(dest);
    download_file(client, url, &partial).await?;
    tokio::fs::rename(&partial, dest).await.map_err(Error::Io)?;

    info!(path = %dest.display(), "Downloaded sequence metadata");
    Ok(dest.to_path_buf())
}

/// Download a file with progress bar.
async fn download_file(client: &Client, url: &Url, dest: &Path) -> Result<()> {
    let download_failed = |e: reqwest::Error| Error::DownloadFailed {
        url: url.to_string(),
        source: Box::new(e),
    };

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(download_failed)?;

    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            source: format!("HTTP {}", response.status()).into(),
        });
    }

    let total_size = response.content_length().unwrap_or(0);
    debug!(url = %url, bytes = total_size, "Starting download");

    let file_name = dest.file_name().map_or_else(
        || std::borrow::Cow::Borrowed("metadata"),
        |n| n.to_string_lossy(),
    );
    let pb = progress::create_download_progress(total_size, &file_name);

    let mut file = File::create(dest).await.map_err(Error::Io)?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(download_failed)?;

        file.write_all(&chunk).await.map_err(Error::Io)?;

        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush().await.map_err(Error::Io)?;
    progress::finish_progress(&pb, "Download complete");

    Ok(())
}
