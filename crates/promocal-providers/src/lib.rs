//! Calendar provider traits and implementations.
//!
//! - [`CredentialProvider`] - obtains a [`Credential`] from the user
//! - [`EventPublisher`] - submits an event draft to a calendar
//! - [`ProviderError`] - error type shared by both
//!
//! The Google Calendar backend lives behind the `google` feature.

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod provider;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{BoxFuture, Credential, CredentialProvider, EventPublisher, PublishedEvent};
