//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{GrowPodError, GrowPodResult};

static DEFAULT_SERVER_URL: &str = "http://localhost:8080/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REDIRECT_PORT: u16 = 8085;

/// Overrides `server_url` from the config file.
pub const SERVER_URL_ENV: &str = "GROWPOD_SERVER_URL";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_redirect_port() -> u16 {
    DEFAULT_REDIRECT_PORT
}

/// Configuration at ~/.config/growpod/config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct GrowPodConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// OAuth client used to sign in and to reach the calendar.
    pub google: Option<GoogleClientConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClientConfig {
    pub client_id: String,
    pub client_secret: String,

    #[serde(default = "default_redirect_port")]
    pub redirect_port: u16,
}

impl Default for GrowPodConfig {
    fn default() -> Self {
        GrowPodConfig {
            server_url: default_server_url(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            google: None,
        }
    }
}

impl GrowPodConfig {
    pub fn config_dir() -> GrowPodResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| GrowPodError::Config("Could not determine config directory".into()))?
            .join("growpod"))
    }

    pub fn config_path() -> GrowPodResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory for the user cache and provider sessions.
    pub fn data_dir() -> GrowPodResult<PathBuf> {
        Ok(dirs::data_dir()
            .ok_or_else(|| GrowPodError::Config("Could not determine data directory".into()))?
            .join("growpod"))
    }

    /// Load the config file, creating a commented default on first run,
    /// then apply environment overrides.
    pub fn load() -> GrowPodResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        let mut config = Self::load_from(&path)?;
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            config.server_url = url;
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> GrowPodResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GrowPodError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::parse(&contents)
            .map_err(|e| GrowPodError::Config(format!("{}: {e}", path.display())))
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The server url, normalized so relative paths join below it.
    pub fn server_url(&self) -> GrowPodResult<Url> {
        let mut raw = self.server_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        Url::parse(&raw)
            .map_err(|e| GrowPodError::Config(format!("Invalid server_url '{}': {e}", self.server_url)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn google(&self) -> GrowPodResult<&GoogleClientConfig> {
        self.google.as_ref().ok_or_else(|| {
            let path = Self::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".into());
            GrowPodError::Config(format!(
                "Google credentials not found.\n\n\
                Add to {path}:\n\n\
                [google]\n\
                client_id = \"your-client-id.apps.googleusercontent.com\"\n\
                client_secret = \"your-client-secret\"\n\n\
                See https://console.cloud.google.com/apis/credentials for setup."
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GrowPodResult<()> {
        let contents = format!(
            "\
# GrowPod configuration

# GrowPod server:
# server_url = \"{DEFAULT_SERVER_URL}\"
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Google OAuth client (sign-in and calendar):
# [google]
# client_id = \"your-client-id.apps.googleusercontent.com\"
# client_secret = \"your-client-secret\"
# redirect_port = {DEFAULT_REDIRECT_PORT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GrowPodError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GrowPodError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = GrowPodConfig::parse("").unwrap();
        assert_eq!(config.server_url().unwrap().as_str(), DEFAULT_SERVER_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.google.is_none());
    }

    #[test]
    fn parses_google_section() {
        let config = GrowPodConfig::parse(
            r#"
server_url = "https://growpod.example.com/api"

[google]
client_id = "id"
client_secret = "secret"
"#,
        )
        .unwrap();

        assert_eq!(
            config.server_url().unwrap().as_str(),
            "https://growpod.example.com/api/"
        );
        let google = config.google().unwrap();
        assert_eq!(google.client_id, "id");
        assert_eq!(google.redirect_port, DEFAULT_REDIRECT_PORT);
    }

    #[test]
    fn default_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growpod").join("config.toml");

        GrowPodConfig::create_default_config(&path).unwrap();
        let config = GrowPodConfig::load_from(&path).unwrap();

        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }
}
