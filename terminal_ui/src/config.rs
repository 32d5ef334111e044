use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;

const API_URL_ENV_VAR: &str = "TODO_API_URL";
const LOG_FILE_ENV_VAR: &str = "TODO_LOG_FILE";
const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOG_FILE_NAME: &str = "todo-board.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base of the REST collection, always ending in `/`.
    pub api_url: Url,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(API_URL_ENV_VAR).ok(),
            std::env::var(LOG_FILE_ENV_VAR).ok(),
        )
    }

    pub fn from_vars(api_url: Option<String>, log_file: Option<String>) -> Result<Self, ConfigError> {
        let api_url = non_blank(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let log_file = non_blank(log_file)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME));

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            log_file,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedUrl(raw.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
