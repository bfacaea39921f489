//! Google Calendar provider configuration.

use std::path::Path;
use std::time::Duration;

use promocal_core::DEFAULT_TIME_ZONE;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};

/// Google's OAuth consent endpoint.
pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's OAuth token endpoint.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Base URL of the Calendar v3 API.
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// OAuth 2.0 client secrets for Google API access.
///
/// Users must provide their own OAuth client ID and secret, as Google
/// requires registered applications for API access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
    /// Consent page URL.
    pub auth_uri: String,
    /// Token exchange URL.
    pub token_uri: String,
}

/// Structure of Google's client secrets JSON file.
///
/// Supports an "installed" or "web" section as downloaded from the Cloud
/// Console, or `client_id`/`client_secret` at the root level.
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<NestedSecrets>,
    web: Option<NestedSecrets>,
    client_id: Option<String>,
    client_secret: Option<String>,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedSecrets {
    client_id: String,
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

impl OAuthCredentials {
    /// Creates credentials that use Google's default endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_uri: GOOGLE_AUTH_URI.to_string(),
            token_uri: GOOGLE_TOKEN_URI.to_string(),
        }
    }

    /// Overrides the consent and token endpoints.
    pub fn with_endpoints(mut self, auth_uri: impl Into<String>, token_uri: impl Into<String>) -> Self {
        self.auth_uri = auth_uri.into();
        self.token_uri = token_uri.into();
        self
    }

    /// Loads client secrets from a Google Cloud Console JSON file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::configuration(format!(
                "failed to read client secrets {}: {}",
                path.display(),
                e
            ))
            .with_source(e)
        })?;
        Self::from_json(&content)
    }

    /// Parses client secrets from a JSON string.
    ///
    /// Endpoint overrides found in the file replace Google's defaults.
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let file: ClientSecretsFile = serde_json::from_str(json).map_err(|e| {
            ProviderError::configuration(format!("failed to parse client secrets JSON: {}", e))
                .with_source(e)
        })?;

        let (client_id, client_secret, auth_uri, token_uri) =
            match file.installed.or(file.web) {
                Some(nested) => (
                    nested.client_id,
                    nested.client_secret,
                    nested.auth_uri,
                    nested.token_uri,
                ),
                None => match (file.client_id, file.client_secret) {
                    (Some(id), Some(secret)) => (id, secret, file.auth_uri, file.token_uri),
                    _ => {
                        return Err(ProviderError::configuration(
                            "client secrets must contain an 'installed'/'web' section or 'client_id'/'client_secret' at root level",
                        ));
                    }
                },
            };

        let mut credentials = Self::new(client_id, client_secret);
        if let Some(uri) = auth_uri {
            credentials.auth_uri = uri;
        }
        if let Some(uri) = token_uri {
            credentials.token_uri = uri;
        }
        Ok(credentials)
    }

    /// Validates that the credentials appear to be correctly formatted.
    ///
    /// This checks that:
    /// - Client ID ends with `.apps.googleusercontent.com`
    /// - Client secret is non-empty
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.is_empty() {
            return Err("client_id is required");
        }
        if !self.client_id.ends_with(".apps.googleusercontent.com") {
            return Err("client_id should end with .apps.googleusercontent.com");
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required");
        }
        Ok(())
    }
}

/// Configuration for the Google Calendar provider.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth client secrets.
    pub credentials: OAuthCredentials,

    /// Calendar to insert into. Defaults to `"primary"`.
    pub calendar_id: String,

    /// IANA name attached to every submitted timestamp.
    pub time_zone: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,

    /// Port for the loopback OAuth server. 0 lets the OS choose.
    pub loopback_port: u16,

    /// How long to wait for the browser to come back.
    pub callback_timeout: Duration,

    /// OAuth scopes to request.
    pub scopes: Vec<String>,

    /// Base URL of the Calendar API.
    pub api_base: String,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default wait for the OAuth callback, in seconds.
    pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 300;

    /// Scope for creating and editing events.
    pub const DEFAULT_SCOPE: &'static str = "https://www.googleapis.com/auth/calendar.events";

    /// Relative path of the client secrets file.
    pub const DEFAULT_CREDENTIALS_FILE: &'static str = "cre.json";

    /// Creates a new Google configuration with the given credentials.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            calendar_id: "primary".to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("promocal/{}", env!("CARGO_PKG_VERSION")),
            loopback_port: 0,
            callback_timeout: Duration::from_secs(Self::DEFAULT_CALLBACK_TIMEOUT_SECS),
            scopes: vec![Self::DEFAULT_SCOPE.to_string()],
            api_base: GOOGLE_CALENDAR_API.to_string(),
        }
    }

    /// Sets the target calendar.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Sets the timezone label.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the loopback port.
    pub fn with_loopback_port(mut self, port: u16) -> Self {
        self.loopback_port = port;
        self
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.credentials.validate().map_err(|e| e.to_string())?;

        if self.calendar_id.is_empty() {
            return Err("calendar_id must not be empty".to_string());
        }
        if self.time_zone.is_empty() {
            return Err("time_zone must not be empty".to_string());
        }
        if self.scopes.is_empty() {
            return Err("at least one scope is required".to_string());
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod client_secrets {
        use super::*;
        use std::io::Write as _;

        #[test]
        fn installed_section() {
            let json = r#"{
                "installed": {
                    "client_id": "123.apps.googleusercontent.com",
                    "project_id": "promo",
                    "client_secret": "GOCSPX-abc",
                    "redirect_uris": ["http://localhost"]
                }
            }"#;
            let creds = OAuthCredentials::from_json(json).unwrap();
            assert_eq!(creds.client_id, "123.apps.googleusercontent.com");
            assert_eq!(creds.client_secret, "GOCSPX-abc");
            assert_eq!(creds.auth_uri, GOOGLE_AUTH_URI);
            assert_eq!(creds.token_uri, GOOGLE_TOKEN_URI);
        }

        #[test]
        fn web_section_with_endpoints() {
            let json = r#"{
                "web": {
                    "client_id": "456.apps.googleusercontent.com",
                    "client_secret": "secret",
                    "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                    "token_uri": "https://oauth2.googleapis.com/token"
                }
            }"#;
            let creds = OAuthCredentials::from_json(json).unwrap();
            assert_eq!(creds.client_id, "456.apps.googleusercontent.com");
            assert_eq!(creds.auth_uri, "https://accounts.google.com/o/oauth2/auth");
        }

        #[test]
        fn flat_form() {
            let json = r#"{"client_id": "789.apps.googleusercontent.com", "client_secret": "s", "token_uri": "http://127.0.0.1:9/token"}"#;
            let creds = OAuthCredentials::from_json(json).unwrap();
            assert_eq!(creds.client_id, "789.apps.googleusercontent.com");
            assert_eq!(creds.token_uri, "http://127.0.0.1:9/token");
            assert_eq!(creds.auth_uri, GOOGLE_AUTH_URI);
        }

        #[test]
        fn missing_fields_rejected() {
            let err = OAuthCredentials::from_json(r#"{"client_id": "only-id"}"#).unwrap_err();
            assert_eq!(err.code(), crate::ProviderErrorCode::ConfigurationError);
        }

        #[test]
        fn malformed_json_rejected() {
            let err = OAuthCredentials::from_json("{ not json").unwrap_err();
            assert!(err.message().contains("failed to parse client secrets JSON"));
        }

        #[test]
        fn from_file_reads_json() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"{{"installed": {{"client_id": "a.apps.googleusercontent.com", "client_secret": "b"}}}}"#
            )
            .unwrap();
            let creds = OAuthCredentials::from_file(file.path()).unwrap();
            assert_eq!(creds.client_id, "a.apps.googleusercontent.com");
        }

        #[test]
        fn from_file_missing() {
            let dir = tempfile::tempdir().unwrap();
            let err = OAuthCredentials::from_file(dir.path().join("cre.json")).unwrap_err();
            assert_eq!(err.code(), crate::ProviderErrorCode::ConfigurationError);
            assert!(err.message().contains("cre.json"));
        }

        #[test]
        fn validation() {
            assert!(OAuthCredentials::new("x.apps.googleusercontent.com", "s").validate().is_ok());
            assert_eq!(
                OAuthCredentials::new("", "s").validate(),
                Err("client_id is required")
            );
            assert!(OAuthCredentials::new("bad-id", "s").validate().is_err());
            assert_eq!(
                OAuthCredentials::new("x.apps.googleusercontent.com", "").validate(),
                Err("client_secret is required")
            );
        }
    }

    mod google_config {
        use super::*;

        fn config() -> GoogleConfig {
            GoogleConfig::new(OAuthCredentials::new("x.apps.googleusercontent.com", "s"))
        }

        #[test]
        fn defaults() {
            let config = config();
            assert_eq!(config.calendar_id, "primary");
            assert_eq!(config.time_zone, "Asia/Kolkata");
            assert_eq!(config.loopback_port, 0);
            assert_eq!(config.callback_timeout, Duration::from_secs(300));
            assert_eq!(
                config.scopes,
                vec!["https://www.googleapis.com/auth/calendar.events".to_string()]
            );
            assert_eq!(config.api_base, GOOGLE_CALENDAR_API);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn builders() {
            let config = config()
                .with_calendar_id("team@group.calendar.google.com")
                .with_time_zone("Europe/Paris")
                .with_loopback_port(8085)
                .with_timeout(Duration::from_secs(5))
                .with_api_base("http://127.0.0.1:1234");
            assert_eq!(config.calendar_id, "team@group.calendar.google.com");
            assert_eq!(config.time_zone, "Europe/Paris");
            assert_eq!(config.loopback_port, 8085);
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.api_base, "http://127.0.0.1:1234");
        }

        #[test]
        fn validation_rejects_empty_fields() {
            assert!(config().with_calendar_id("").validate().is_err());
            assert!(config().with_time_zone("").validate().is_err());
            assert!(config().with_timeout(Duration::ZERO).validate().is_err());
            let mut no_scopes = config();
            no_scopes.scopes.clear();
            assert!(no_scopes.validate().is_err());
        }
    }
}
