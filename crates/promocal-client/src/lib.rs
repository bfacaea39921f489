//! CLI, configuration, and the text-to-calendar pipeline
//!
//! This crate provides the `promocal` command-line interface.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use pipeline::Pipeline;
