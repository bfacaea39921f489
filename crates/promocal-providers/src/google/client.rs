//! Google Calendar API client.
//!
//! A thin HTTP client for the one call this tool makes:
//! `POST {api_base}/calendars/{calendarId}/events`.

use std::time::Duration;

use promocal_core::{CalendarEvent, LabeledTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::PublishedEvent;

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl GoogleCalendarClient {
    /// Creates a client rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(
        api_base: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            api_base: api_base.into(),
        })
    }

    /// Returns the insert URL for `calendar_id`.
    pub fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(calendar_id)
        )
    }

    /// Inserts `event` into `calendar_id`.
    ///
    /// # Errors
    ///
    /// Maps HTTP failures onto provider error codes:
    /// 401 authentication, 403 authorization, 429 rate limited,
    /// 400 bad request, anything else non-2xx a server error.
    pub async fn insert_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> ProviderResult<PublishedEvent> {
        let url = self.events_url(calendar_id);
        debug!(%url, "inserting event");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .json(&InsertEventRequest::from(event))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication(
                "access token expired or invalid",
            ));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::authorization(format!(
                "access denied to calendar {:?}",
                calendar_id
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST {
                return Err(ProviderError::bad_request(format!(
                    "event rejected: {}",
                    body
                )));
            }
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let inserted: InsertedEvent = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        let html_link = inserted
            .html_link
            .ok_or_else(|| ProviderError::invalid_response("response has no htmlLink"))?;

        debug!(id = ?inserted.id, "event inserted");
        Ok(PublishedEvent {
            html_link,
            id: inserted.id,
        })
    }
}

/// Body of an events.insert request.
#[derive(Debug, Serialize)]
struct InsertEventRequest<'a> {
    summary: &'a str,
    description: &'a str,
    start: &'a LabeledTime,
    end: &'a LabeledTime,
    location: &'a str,
}

impl<'a> From<&'a CalendarEvent> for InsertEventRequest<'a> {
    fn from(event: &'a CalendarEvent) -> Self {
        Self {
            summary: &event.title,
            description: &event.description,
            start: &event.start,
            end: &event.end,
            location: event.location.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    html_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use promocal_core::{DEFAULT_TIME_ZONE, DateTimeRange, EventDraft, RangeSource};

    fn event(location: Option<&str>) -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = start + chrono::TimeDelta::days(1);
        EventDraft::new(
            "Dream University Pitch 2024",
            "Participate in the Dream University Pitch for a chance to win exciting prizes!",
            DateTimeRange::new(start, end, RangeSource::Date),
            location.map(String::from),
        )
        .label(FixedOffset::east_opt(19800).unwrap(), DEFAULT_TIME_ZONE)
    }

    fn client(api_base: &str) -> GoogleCalendarClient {
        GoogleCalendarClient::new(api_base, Duration::from_secs(5), "promocal-test").unwrap()
    }

    mod request_body {
        use super::*;

        #[test]
        fn wire_format() {
            let event = event(None);
            insta::assert_json_snapshot!(InsertEventRequest::from(&event), @r#"
            {
              "summary": "Dream University Pitch 2024",
              "description": "Participate in the Dream University Pitch for a chance to win exciting prizes!",
              "start": {
                "dateTime": "2026-10-16T00:00:00+05:30",
                "timeZone": "Asia/Kolkata"
              },
              "end": {
                "dateTime": "2026-10-17T00:00:00+05:30",
                "timeZone": "Asia/Kolkata"
              },
              "location": ""
            }
            "#);
        }

        #[test]
        fn location_from_link() {
            let event = event(Some("https://example.com/pitch"));
            let body = serde_json::to_value(InsertEventRequest::from(&event)).unwrap();
            assert_eq!(body["location"], "https://example.com/pitch");
        }

        #[test]
        fn events_url_encodes_calendar_id() {
            let client = client("https://www.googleapis.com/calendar/v3/");
            assert_eq!(
                client.events_url("primary"),
                "https://www.googleapis.com/calendar/v3/calendars/primary/events"
            );
            assert_eq!(
                client.events_url("team@group.calendar.google.com"),
                "https://www.googleapis.com/calendar/v3/calendars/team%40group.calendar.google.com/events"
            );
        }
    }

    mod insert {
        use super::*;
        use crate::ProviderErrorCode;
        use wiremock::matchers::{body_json, header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn posts_event_and_returns_link() {
            let server = MockServer::start().await;
            let event = event(None);
            Mock::given(method("POST"))
                .and(path("/calendars/primary/events"))
                .and(header("authorization", "Bearer ya29.token"))
                .and(body_json(serde_json::json!({
                    "summary": "Dream University Pitch 2024",
                    "description": "Participate in the Dream University Pitch for a chance to win exciting prizes!",
                    "start": {"dateTime": "2026-10-16T00:00:00+05:30", "timeZone": "Asia/Kolkata"},
                    "end": {"dateTime": "2026-10-17T00:00:00+05:30", "timeZone": "Asia/Kolkata"},
                    "location": ""
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "kind": "calendar#event",
                    "id": "evt123",
                    "status": "confirmed",
                    "htmlLink": "https://www.google.com/calendar/event?eid=evt123"
                })))
                .expect(1)
                .mount(&server)
                .await;

            let published = client(&server.uri())
                .insert_event("ya29.token", "primary", &event)
                .await
                .unwrap();
            assert_eq!(
                published.html_link,
                "https://www.google.com/calendar/event?eid=evt123"
            );
            assert_eq!(published.id.as_deref(), Some("evt123"));
        }

        async fn status_error(status: u16) -> ProviderError {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/calendars/primary/events"))
                .respond_with(
                    ResponseTemplate::new(status).set_body_string(r#"{"error":{"code":0}}"#),
                )
                .expect(1)
                .mount(&server)
                .await;
            client(&server.uri())
                .insert_event("token", "primary", &event(None))
                .await
                .unwrap_err()
        }

        #[tokio::test]
        async fn status_mapping() {
            assert_eq!(
                status_error(401).await.code(),
                ProviderErrorCode::AuthenticationFailed
            );
            assert_eq!(
                status_error(403).await.code(),
                ProviderErrorCode::AuthorizationFailed
            );
            assert_eq!(status_error(429).await.code(), ProviderErrorCode::RateLimited);
            assert_eq!(status_error(400).await.code(), ProviderErrorCode::BadRequest);
            assert_eq!(status_error(404).await.code(), ProviderErrorCode::ServerError);
            assert_eq!(status_error(503).await.code(), ProviderErrorCode::ServerError);
        }

        #[tokio::test]
        async fn retry_after_is_reported() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
                .mount(&server)
                .await;
            let err = client(&server.uri())
                .insert_event("token", "primary", &event(None))
                .await
                .unwrap_err();
            assert_eq!(err.message(), "rate limit exceeded, retry after 30 seconds");
        }

        #[tokio::test]
        async fn missing_link_is_invalid_response() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})),
                )
                .mount(&server)
                .await;
            let err = client(&server.uri())
                .insert_event("token", "primary", &event(None))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        }

        #[tokio::test]
        async fn unparsable_body_is_invalid_response() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
                .mount(&server)
                .await;
            let err = client(&server.uri())
                .insert_event("token", "primary", &event(None))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        }

        #[tokio::test]
        async fn unreachable_server_is_network_error() {
            // Port 9 (discard) on loopback is closed in test environments
            let err = client("http://127.0.0.1:9")
                .insert_event("token", "primary", &event(None))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        }
    }
}
