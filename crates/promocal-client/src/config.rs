//! Client configuration.
//!
//! All settings live in an optional `config.toml` at
//! `~/.config/promocal/config.toml` by default. Command-line flags take
//! precedence over the file, which takes precedence over built-in defaults.
//!
//! ```toml
//! [google]
//! credentials_file = "cre.json"
//! calendar_id = "primary"
//! time_zone = "Asia/Kolkata"
//! loopback_port = 0
//! timeout_secs = 30
//!
//! [event]
//! title = "Dream University Pitch 2024"
//! ```

use std::path::{Path, PathBuf};

use promocal_core::summary::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use promocal_core::{DEFAULT_TIME_ZONE, DescriptionGenerator, TitleGenerator};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Relative path of the client secrets file when nothing else is configured.
pub const DEFAULT_CREDENTIALS_FILE: &str = "cre.json";

/// Configuration for the promocal client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Google Calendar settings.
    pub google: GoogleSettings,

    /// Event text overrides.
    pub event: EventSettings,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parses configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promocal")
    }
}

/// Google Calendar settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// Path to the client secrets JSON.
    pub credentials_file: Option<PathBuf>,

    /// Calendar to insert into.
    pub calendar_id: Option<String>,

    /// Timezone name attached to submitted times.
    pub time_zone: Option<String>,

    /// Loopback port for the OAuth redirect (0 picks a free one).
    pub loopback_port: Option<u16>,

    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Calendar API base URL.
    pub api_base: Option<String>,
}

impl GoogleSettings {
    /// Resolves the client secrets path, preferring `cli` over the file.
    pub fn credentials_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.credentials_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
    }

    /// Returns the configured timezone name or the default.
    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or(DEFAULT_TIME_ZONE)
    }

    /// Builds the provider configuration.
    ///
    /// Reads the client secrets from [`Self::credentials_path`]; `calendar_id`
    /// overrides the configured calendar.
    #[cfg(feature = "google")]
    pub fn to_provider_config(
        &self,
        credentials_file: Option<&Path>,
        calendar_id: Option<&str>,
    ) -> ClientResult<promocal_providers::google::GoogleConfig> {
        use promocal_providers::google::{GoogleConfig, OAuthCredentials};

        let path = self.credentials_path(credentials_file);
        let credentials = OAuthCredentials::from_file(&path).map_err(ClientError::ProviderConfig)?;

        let mut config = GoogleConfig::new(credentials).with_time_zone(self.time_zone());

        if let Some(id) = calendar_id.or(self.calendar_id.as_deref()) {
            config = config.with_calendar_id(id);
        }
        if let Some(port) = self.loopback_port {
            config = config.with_loopback_port(port);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(std::time::Duration::from_secs(secs));
        }
        if let Some(ref base) = self.api_base {
            config = config.with_api_base(base);
        }

        config.validate().map_err(ClientError::Config)?;
        Ok(config)
    }
}

/// Overrides for the generated event text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Fixed event title.
    pub title: Option<String>,

    /// Fixed event description.
    pub description: Option<String>,
}

impl EventSettings {
    /// Returns the title generator for these settings.
    pub fn title_generator(&self) -> TitleGenerator {
        TitleGenerator::fixed(self.title.as_deref().unwrap_or(DEFAULT_TITLE))
    }

    /// Returns the description generator for these settings.
    pub fn description_generator(&self) -> DescriptionGenerator {
        DescriptionGenerator::fixed(self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod loading {
        use super::*;
        use std::io::Write as _;

        #[test]
        fn empty_file_is_defaults() {
            let config = ClientConfig::parse("").unwrap();
            assert_eq!(config, ClientConfig::default());
        }

        #[test]
        fn full_file() {
            let config = ClientConfig::parse(
                r#"
[google]
credentials_file = "/etc/promocal/cre.json"
calendar_id = "team@group.calendar.google.com"
time_zone = "Europe/Paris"
loopback_port = 8085
timeout_secs = 10
api_base = "http://127.0.0.1:9000"

[event]
title = "Hackathon"
description = "Build something"
"#,
            )
            .unwrap();
            assert_eq!(
                config.google.credentials_file,
                Some(PathBuf::from("/etc/promocal/cre.json"))
            );
            assert_eq!(
                config.google.calendar_id.as_deref(),
                Some("team@group.calendar.google.com")
            );
            assert_eq!(config.google.time_zone(), "Europe/Paris");
            assert_eq!(config.google.loopback_port, Some(8085));
            assert_eq!(config.google.timeout_secs, Some(10));
            assert_eq!(config.event.title.as_deref(), Some("Hackathon"));
        }

        #[test]
        fn malformed_file() {
            let err = ClientConfig::parse("[google]\nloopback_port = \"eighty\"").unwrap_err();
            assert!(err.starts_with("failed to parse config"));
        }

        #[test]
        fn load_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[event]\ntitle = \"From file\"").unwrap();
            let config = ClientConfig::load_from(file.path()).unwrap();
            assert_eq!(config.event.title.as_deref(), Some("From file"));
        }

        #[test]
        fn explicit_missing_file_is_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
            assert!(matches!(err, ClientError::Config(_)));
        }

        #[test]
        fn default_path_ends_with_promocal() {
            assert!(ClientConfig::default_path().ends_with("promocal/config.toml"));
        }
    }

    mod precedence {
        use super::*;

        #[test]
        fn credentials_path() {
            let none = GoogleSettings::default();
            assert_eq!(none.credentials_path(None), PathBuf::from("cre.json"));

            let file = GoogleSettings {
                credentials_file: Some(PathBuf::from("from-file.json")),
                ..Default::default()
            };
            assert_eq!(file.credentials_path(None), PathBuf::from("from-file.json"));
            assert_eq!(
                file.credentials_path(Some(Path::new("from-cli.json"))),
                PathBuf::from("from-cli.json")
            );
        }

        #[test]
        fn time_zone_default() {
            assert_eq!(GoogleSettings::default().time_zone(), "Asia/Kolkata");
        }

        #[test]
        fn event_generators() {
            let defaults = EventSettings::default();
            assert_eq!(defaults.title_generator().generate("x"), DEFAULT_TITLE);
            assert_eq!(
                defaults.description_generator().generate("x"),
                DEFAULT_DESCRIPTION
            );

            let custom = EventSettings {
                title: Some("Custom".to_string()),
                description: None,
            };
            assert_eq!(custom.title_generator().generate("x"), "Custom");
        }
    }

    #[cfg(feature = "google")]
    mod provider_config {
        use super::*;
        use std::io::Write as _;

        fn secrets_file() -> tempfile::NamedTempFile {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"{{"installed": {{"client_id": "id.apps.googleusercontent.com", "client_secret": "s"}}}}"#
            )
            .unwrap();
            file
        }

        #[test]
        fn cli_overrides_file() {
            let secrets = secrets_file();
            let settings = GoogleSettings {
                calendar_id: Some("from-file".to_string()),
                loopback_port: Some(8085),
                timeout_secs: Some(7),
                ..Default::default()
            };
            let config = settings
                .to_provider_config(Some(secrets.path()), Some("from-cli"))
                .unwrap();
            assert_eq!(config.calendar_id, "from-cli");
            assert_eq!(config.loopback_port, 8085);
            assert_eq!(config.timeout, std::time::Duration::from_secs(7));
            assert_eq!(config.time_zone, "Asia/Kolkata");
            assert_eq!(config.credentials.client_id, "id.apps.googleusercontent.com");
        }

        #[test]
        fn file_values_used_without_cli() {
            let secrets = secrets_file();
            let settings = GoogleSettings {
                credentials_file: Some(secrets.path().to_path_buf()),
                calendar_id: Some("from-file".to_string()),
                ..Default::default()
            };
            let config = settings.to_provider_config(None, None).unwrap();
            assert_eq!(config.calendar_id, "from-file");
            assert_eq!(config.loopback_port, 0);
        }

        #[test]
        fn missing_secrets_is_config_error() {
            use std::error::Error as _;

            let dir = tempfile::tempdir().unwrap();
            let settings = GoogleSettings::default();
            let err = settings
                .to_provider_config(Some(&dir.path().join("cre.json")), None)
                .unwrap_err();
            assert!(matches!(err, ClientError::ProviderConfig(_)));
            assert!(err.to_string().starts_with("configuration error: "));
            assert!(err.to_string().contains("cre.json"));

            let io = err
                .source()
                .and_then(|provider| provider.source())
                .and_then(|io| io.downcast_ref::<std::io::Error>())
                .unwrap();
            assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        }
    }
}
