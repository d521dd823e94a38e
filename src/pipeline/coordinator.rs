//! Output location handling.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::OUTPUT_FILE_SUFFIX;
use crate::error::{Error, Result};

/// File name of the clade counts for an as-of date.
pub fn output_file_name(as_of: NaiveDate) -> String {
    format!("{}{OUTPUT_FILE_SUFFIX}", as_of.format("%Y-%m-%d"))
}

/// Full output path for an as-of date.
pub fn output_path_for(data_dir: &Path, as_of: NaiveDate) -> PathBuf {
    data_dir.join(output_file_name(as_of))
}

/// Create the output directory if it does not exist.
pub fn ensure_output_dir(data_dir: &Path) -> Result<()> {
    if data_dir.is_dir() {
        return Ok(());
    }

    debug!(path = %data_dir.display(), "Creating output directory");
    std::fs::create_dir_all(data_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: data_dir.to_path_buf(),
        source: e,
    })
}
