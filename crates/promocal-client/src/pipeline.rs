//! Text-to-event pipeline.
//!
//! [`Pipeline::draft_at`] turns source text into an [`EventDraft`];
//! [`Pipeline::submit`] authorizes and publishes it. A draft only exists once
//! parsing succeeded, so no credential is requested for unreadable text.

use chrono::NaiveDateTime;
use promocal_core::{
    DateTimeRangeExtractor, DescriptionGenerator, EventDraft, LinkExtractor, ParseResult,
    TitleGenerator,
};
use promocal_providers::{CredentialProvider, EventPublisher, PublishedEvent};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Assembles and submits events.
#[derive(Debug, Default)]
pub struct Pipeline {
    extractor: DateTimeRangeExtractor,
    links: LinkExtractor,
    title: TitleGenerator,
    description: DescriptionGenerator,
}

impl Pipeline {
    /// Creates a pipeline with the given generators.
    pub fn new(title: TitleGenerator, description: DescriptionGenerator) -> Self {
        Self {
            extractor: DateTimeRangeExtractor::default(),
            links: LinkExtractor::new(),
            title,
            description,
        }
    }

    /// Builds the draft for `text`, resolving relative days against `now`.
    pub fn draft_at(&self, text: &str, now: NaiveDateTime) -> ParseResult<EventDraft> {
        let range = self.extractor.extract_at(text, now)?;
        let location = self.links.first(text);
        let draft = EventDraft::new(
            self.title.generate(text),
            self.description.generate(text),
            range,
            location,
        );
        debug!(
            start = %draft.range.start,
            end = %draft.range.end,
            minutes = draft.range.duration().num_minutes(),
            source = ?draft.range.source,
            location = ?draft.location,
            "event drafted"
        );
        if draft.range.is_inverted() {
            warn!(
                start = %draft.range.start,
                end = %draft.range.end,
                "event ends before it starts"
            );
        }
        Ok(draft)
    }

    /// Authorizes with `credentials`, then publishes `draft` with `publisher`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] if authorization fails (the publisher is not
    /// called), [`ClientError::Publish`] if the publish call fails.
    pub async fn submit(
        &self,
        draft: &EventDraft,
        credentials: &dyn CredentialProvider,
        publisher: &dyn EventPublisher,
    ) -> ClientResult<PublishedEvent> {
        info!(provider = credentials.name(), "requesting authorization");
        let credential = credentials.authorize().await.map_err(ClientError::Auth)?;

        info!(provider = publisher.name(), "publishing event");
        let published = publisher
            .publish(&credential, draft)
            .await
            .map_err(ClientError::Publish)?;

        info!(link = %published.html_link, "event published");
        Ok(published)
    }
}
