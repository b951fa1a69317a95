//! Route Suggester Worker - suggests daily truck routes for 2GoStorage
//!
//! This worker reads jobs, trucks and drivers from Airtable and answers
//! route suggestion requests over NATS.

mod cli;
mod config;
mod defaults;
mod handlers;
mod services;
mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::services::planner::suggest_routes;
use crate::services::records::{AirtableClient, InMemorySource, RecordSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ../logs (relative to worker)
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "worker.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the JSON output of `suggest`, so console logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,route_suggester_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))  // file
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Configuration loaded");

    let command = cli.command.unwrap_or(Command::Serve);
    match &command {
        Command::Serve => serve(config).await,
        Command::Suggest { fixture, .. } => {
            let params = command.suggest_request().unwrap_or_default();
            let source = match fixture {
                Some(path) => fixture_source(path)?,
                None => airtable_source(&config)?,
            };

            let response = suggest_routes(source.as_ref(), &config.tables, &params, &config.planner)
                .await
                .context("Failed to suggest routes")?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

fn airtable_source(config: &Config) -> Result<Arc<dyn RecordSource>> {
    let client = AirtableClient::new(config.airtable()?.clone())?;
    Ok(Arc::new(client))
}

fn fixture_source(path: &Path) -> Result<Arc<dyn RecordSource>> {
    let source = InMemorySource::from_json_file(path)?;
    info!("Reading tables from fixture {}", path.display());
    Ok(Arc::new(source))
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Route Suggester Worker...");

    let source = airtable_source(&config)?;

    // Connect to NATS (supports optional NATS_USER/NATS_PASSWORD auth).
    let nats_client = match &config.nats_credentials {
        Some((user, password)) => {
            async_nats::ConnectOptions::new()
                .user_and_password(user.clone(), password.clone())
                .connect(&config.nats_url)
                .await?
        }
        None => async_nats::connect(&config.nats_url).await?,
    };
    info!("Connected to NATS at {}", config.nats_url);

    // Start message handlers
    let handler_result = handlers::start_handlers(nats_client, source, &config).await;

    if let Err(e) = handler_result {
        error!("Handler error: {}", e);
        return Err(e);
    }

    Ok(())
}
