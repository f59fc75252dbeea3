use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_SETTINGS_FILE: &str = "news_search.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".into(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Base URL with a trailing slash so endpoint joins keep any path prefix.
    pub fn base_url(&self) -> Result<Url, ClientError> {
        let raw = self.server_url.trim();
        if raw.is_empty() {
            return Err(ClientError::Config("server_url must not be empty".into()));
        }

        let mut url = Url::parse(raw)
            .map_err(|err| ClientError::Config(format!("invalid server_url '{raw}': {err}")))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "server_url '{raw}' must be an http(s) URL"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    fn merge_file(&mut self, raw: &str) -> Result<(), ClientError> {
        let file_cfg: FileSettings = toml::from_str(raw)
            .map_err(|err| ClientError::Config(format!("invalid settings file: {err}")))?;
        if let Some(v) = file_cfg.server_url {
            self.server_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        Ok(())
    }

    /// Applies environment overrides; `APP__*` names win over the short ones.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("NEWS_SEARCH_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(err) => tracing::warn!(
                    value = %v,
                    "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"
                ),
            }
        }
    }
}

/// Defaults, then `news_search.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    match load_settings_from(Path::new(DEFAULT_SETTINGS_FILE)) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("falling back to default settings: {err}");
            let mut settings = Settings::default();
            settings.apply_env_overrides(|name| std::env::var(name).ok());
            settings
        }
    }
}

/// A missing file is not an error; an unreadable or invalid one is.
pub fn load_settings_from(path: &Path) -> Result<Settings, ClientError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => settings.merge_file(&raw)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(ClientError::Config(format!(
                "failed to read '{}': {err}",
                path.display()
            )))
        }
    }

    settings.apply_env_overrides(|name| std::env::var(name).ok());
    Ok(settings)
}
