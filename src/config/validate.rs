//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_output(config)?;
    validate_source(config)?;
    Ok(())
}

/// Validate output settings.
fn validate_output(config: &Config) -> Result<()> {
    if config.output.data_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output.data_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate metadata source settings.
fn validate_source(config: &Config) -> Result<()> {
    let source = &config.source;

    if !(source.bucket_url.starts_with("https://") || source.bucket_url.starts_with("http://")) {
        return Err(Error::ConfigValidation {
            message: format!(
                "source.bucket_url must be an http(s) URL, got '{}'",
                source.bucket_url
            ),
        });
    }

    if source.metadata_key.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "source.metadata_key must not be empty".to_string(),
        });
    }

    if source.connect_timeout_secs == 0 || source.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "source timeouts must be at least 1 second".to_string(),
        });
    }

    Ok(())
}
