//! Google implementations of [`CredentialProvider`] and [`EventPublisher`].

use chrono::FixedOffset;
use promocal_core::{EventDraft, current_local_offset};
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, Credential, CredentialProvider, EventPublisher, PublishedEvent};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use super::oauth::OAuthClient;

const PROVIDER_NAME: &str = "google";

/// Obtains a Google credential through the browser consent flow.
pub struct GoogleCredentialProvider {
    config: GoogleConfig,
    oauth_client: OAuthClient,
}

impl GoogleCredentialProvider {
    /// Creates a credential provider from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(PROVIDER_NAME))?;
        let oauth_client = OAuthClient::new(config.credentials.clone(), config.timeout)
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self {
            config,
            oauth_client,
        })
    }
}

impl CredentialProvider for GoogleCredentialProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn authorize(&self) -> BoxFuture<'_, ProviderResult<Credential>> {
        Box::pin(async move {
            info!("starting Google authorization");
            let credential = self
                .oauth_client
                .authorize(
                    &self.config.scopes,
                    self.config.loopback_port,
                    self.config.callback_timeout,
                )
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))?;
            info!("authorization successful");
            Ok(credential)
        })
    }
}

/// Inserts events into a Google calendar.
///
/// Naive draft times get the machine's UTC offset as of construction and the
/// configured timezone name.
pub struct GooglePublisher {
    client: GoogleCalendarClient,
    calendar_id: String,
    time_zone: String,
    local_offset: FixedOffset,
}

impl GooglePublisher {
    /// Creates a publisher from `config`, using the current local offset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        let client = GoogleCalendarClient::new(&config.api_base, config.timeout, &config.user_agent)
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self {
            client,
            calendar_id: config.calendar_id.clone(),
            time_zone: config.time_zone.clone(),
            local_offset: current_local_offset(),
        })
    }

    /// Overrides the offset attached to draft times.
    pub fn with_local_offset(mut self, offset: FixedOffset) -> Self {
        self.local_offset = offset;
        self
    }

    /// Returns the offset attached to draft times.
    pub fn local_offset(&self) -> FixedOffset {
        self.local_offset
    }
}

impl EventPublisher for GooglePublisher {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn publish<'a>(
        &'a self,
        credential: &'a Credential,
        draft: &'a EventDraft,
    ) -> BoxFuture<'a, ProviderResult<PublishedEvent>> {
        Box::pin(async move {
            if credential.is_expired() {
                warn!("publishing with an expired access token");
            }
            let event = draft.label(self.local_offset, &self.time_zone);
            debug!(
                start = %event.start.to_rfc3339(),
                end = %event.end.to_rfc3339(),
                time_zone = %self.time_zone,
                "labeled event"
            );
            self.client
                .insert_event(&credential.access_token, &self.calendar_id, &event)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}
