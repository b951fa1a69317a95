//! NATS message handlers

pub mod ping;
pub mod suggest;

use std::sync::Arc;

use anyhow::Result;
use async_nats::Client;
use tokio::select;
use tracing::{error, info};

use crate::config::Config;
use crate::services::records::RecordSource;
use suggest::SuggestContext;

/// Start all message handlers
pub async fn start_handlers(
    client: Client,
    source: Arc<dyn RecordSource>,
    config: &Config,
) -> Result<()> {
    info!("Starting message handlers...");
    info!("Record source initialized: {}", source.name());

    let ping_subject = config.subject("ping");
    let suggest_subject = config.subject("suggest");

    let ping_sub = client.subscribe(ping_subject.clone()).await?;
    let suggest_sub = client.subscribe(suggest_subject.clone()).await?;

    info!("Subscribed to {}, {}", ping_subject, suggest_subject);

    let ctx = Arc::new(SuggestContext {
        source,
        tables: config.tables.clone(),
        planner: config.planner.clone(),
    });

    let client_ping = client.clone();
    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let client_suggest = client.clone();
    let suggest_handle = tokio::spawn(async move {
        suggest::handle_suggest(client_suggest, suggest_sub, ctx).await
    });

    info!("All handlers started, waiting for messages...");

    // Wait for any handler to finish (which shouldn't happen normally)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = suggest_handle => {
            error!("Suggest handler finished: {:?}", result);
        }
    }

    Ok(())
}
