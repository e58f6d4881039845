use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::SessionStore;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the environment and an optional `.env` file
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("LISTING_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("LISTING_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid LISTING_API_TIMEOUT_SECS: {:?}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = lookup("LISTING_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(SessionStore::default_path);

        Ok(Self {
            api_url: normalize_url(&api_url),
            timeout: Duration::from_secs(timeout_secs),
            session_file,
        })
    }

    /// Command-line override for the backend URL
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = normalize_url(&url);
        }
        self
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
