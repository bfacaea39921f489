//! promocal CLI entry point.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tokio::io::AsyncReadExt as _;

use promocal_client::{Cli, ClientConfig, ClientError, ClientResult, Pipeline};
use promocal_core::{
    SAMPLE_TEXT, TracingConfig, TracingOutputFormat, current_local_offset, init_tracing,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    let format = if cli.log_json {
        TracingOutputFormat::Json
    } else {
        TracingOutputFormat::Compact
    };
    if let Err(e) = init_tracing(tracing_config.with_format(format)) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    let text = read_text(&cli).await?;

    let pipeline = Pipeline::new(
        config.event.title_generator(),
        config.event.description_generator(),
    );
    let draft = pipeline.draft_at(&text, Local::now().naive_local())?;

    if cli.dry_run {
        let event = draft.label(current_local_offset(), config.google.time_zone());
        let json = serde_json::to_string_pretty(&event).map_err(std::io::Error::from)?;
        println!("{}", json);
        return Ok(());
    }

    publish(&cli, &config, &pipeline, &draft).await
}

async fn read_text(cli: &Cli) -> ClientResult<String> {
    match cli.input {
        None => Ok(SAMPLE_TEXT.to_string()),
        Some(_) if cli.reads_stdin() => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
        Some(ref path) => Ok(std::fs::read_to_string(path)?),
    }
}

#[cfg(feature = "google")]
async fn publish(
    cli: &Cli,
    config: &ClientConfig,
    pipeline: &Pipeline,
    draft: &promocal_core::EventDraft,
) -> ClientResult<()> {
    use promocal_providers::google::{GoogleCredentialProvider, GooglePublisher};

    let google = config
        .google
        .to_provider_config(cli.credentials_file.as_deref(), cli.calendar_id.as_deref())?;
    let credentials =
        GoogleCredentialProvider::new(google.clone()).map_err(ClientError::ProviderConfig)?;
    let publisher = GooglePublisher::new(&google).map_err(ClientError::ProviderConfig)?;

    let published = pipeline.submit(draft, &credentials, &publisher).await?;
    println!("Event created: {}", published.html_link);
    Ok(())
}

#[cfg(not(feature = "google"))]
async fn publish(
    _cli: &Cli,
    _config: &ClientConfig,
    _pipeline: &Pipeline,
    _draft: &promocal_core::EventDraft,
) -> ClientResult<()> {
    Err(ClientError::Config(
        "built without a calendar provider; rerun with --dry-run".to_string(),
    ))
}
