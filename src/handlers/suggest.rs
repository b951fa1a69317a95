//! Route suggestion handler

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::services::planner::{suggest_routes, PlannerConfig};
use crate::services::records::{RecordSource, TableNames};
use crate::types::{ErrorCode, ErrorResponse, Request, SuccessResponse, SuggestRoutesRequest};

/// Everything a suggestion request needs besides its parameters
pub struct SuggestContext {
    pub source: Arc<dyn RecordSource>,
    pub tables: TableNames,
    pub planner: PlannerConfig,
}

/// Reject parameters the planner cannot work with
fn validate(params: &SuggestRoutesRequest) -> Result<(), String> {
    if params.max_jobs_per_truck == 0 {
        return Err("maxJobsPerTruck must be at least 1".to_string());
    }
    Ok(())
}

/// Build the serialized reply for one request payload
async fn respond(ctx: &SuggestContext, payload: &[u8]) -> Result<Vec<u8>> {
    let request: Request<SuggestRoutesRequest> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse suggest request: {}", e);
            let response = ErrorResponse::new(Uuid::nil(), ErrorCode::InvalidRequest, e.to_string());
            return Ok(serde_json::to_vec(&response)?);
        }
    };

    if let Err(message) = validate(&request.payload) {
        warn!("Rejected suggest request {}: {}", request.id, message);
        let response = ErrorResponse::new(request.id, ErrorCode::InvalidRequest, message);
        return Ok(serde_json::to_vec(&response)?);
    }

    match suggest_routes(ctx.source.as_ref(), &ctx.tables, &request.payload, &ctx.planner).await {
        Ok(result) => {
            info!(
                "Suggest request {}: {} suggestions",
                request.id,
                result.suggestions.len()
            );
            Ok(serde_json::to_vec(&SuccessResponse::new(request.id, result))?)
        }
        Err(e) => {
            error!("Suggest request {} failed: {}", request.id, e);
            let response = ErrorResponse::new(request.id, ErrorCode::UpstreamError, e.to_string());
            Ok(serde_json::to_vec(&response)?)
        }
    }
}

/// Handle route suggestion requests
pub async fn handle_suggest(
    client: Client,
    mut subscriber: Subscriber,
    ctx: Arc<SuggestContext>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received suggest message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let body = respond(&ctx, &msg.payload).await?;
        if let Err(e) = client.publish(reply, body.into()).await {
            error!("Failed to publish suggest reply: {}", e);
        }
    }

    Ok(())
}
