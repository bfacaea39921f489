//! Provider trait definitions.
//!
//! A calendar backend supplies two pieces:
//! - a [`CredentialProvider`] that walks the user through consent and hands
//!   back a [`Credential`]
//! - an [`EventPublisher`] that submits an [`EventDraft`] with that credential
//!
//! Both traits return boxed futures so they stay object-safe and the
//! pipeline can hold them as `&dyn`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, TimeDelta, Utc};
use promocal_core::EventDraft;

use crate::error::ProviderResult;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Access granted by the user for one run.
///
/// Nothing is persisted; the credential lives only as long as the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Refresh token, if the server issued one. Never used.
    pub refresh_token: Option<String>,
    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// The scopes that were granted.
    pub scopes: Vec<String>,
}

impl Credential {
    /// Creates a credential from token-endpoint data.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
        scopes: Vec<String>,
    ) -> Self {
        let expires_at = expires_in_secs.map(|secs| Utc::now() + TimeDelta::seconds(secs));
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at,
            scopes,
        }
    }

    /// Returns true if the access token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }

    /// Returns true if every scope in `required` was granted.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// The result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    /// Link to the event in the calendar's web UI.
    pub html_link: String,
    /// Provider-assigned event ID.
    pub id: Option<String>,
}

/// Obtains a [`Credential`] from the user.
pub trait CredentialProvider: Send + Sync {
    /// Returns the provider name (e.g. "google").
    fn name(&self) -> &str;

    /// Runs the interactive authorization flow.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the user denies consent, the
    /// callback never arrives, or the token exchange fails.
    fn authorize(&self) -> BoxFuture<'_, ProviderResult<Credential>>;
}

/// Submits events to a calendar.
pub trait EventPublisher: Send + Sync {
    /// Returns the provider name (e.g. "google").
    fn name(&self) -> &str;

    /// Publishes `draft` using `credential`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or its response cannot be read.
    fn publish<'a>(
        &'a self,
        credential: &'a Credential,
        draft: &'a EventDraft,
    ) -> BoxFuture<'a, ProviderResult<PublishedEvent>>;
}
