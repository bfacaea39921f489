//! Google Calendar backend.
//!
//! - [`GoogleCredentialProvider`]: OAuth 2.0 PKCE consent with a loopback
//!   redirect, requesting only the `calendar.events` scope
//! - [`GooglePublisher`]: inserts one event through the Calendar v3 API
//!
//! Client secrets come from the JSON file downloaded from the Google Cloud
//! Console. Tokens are kept in memory for a single run.
//!
//! # Example
//!
//! ```ignore
//! use promocal_providers::google::{GoogleConfig, GoogleCredentialProvider, GooglePublisher, OAuthCredentials};
//! use promocal_providers::{CredentialProvider, EventPublisher};
//!
//! let config = GoogleConfig::new(OAuthCredentials::from_file("cre.json")?);
//! let credential = GoogleCredentialProvider::new(config.clone())?.authorize().await?;
//! let published = GooglePublisher::new(&config)?.publish(&credential, &draft).await?;
//! println!("Event created: {}", published.html_link);
//! ```

mod client;
mod config;
mod oauth;
mod provider;

pub use client::GoogleCalendarClient;
pub use config::{
    GOOGLE_AUTH_URI, GOOGLE_CALENDAR_API, GOOGLE_TOKEN_URI, GoogleConfig, OAuthCredentials,
};
pub use oauth::{OAuthClient, PkceFlow};
pub use provider::{GoogleCredentialProvider, GooglePublisher};
