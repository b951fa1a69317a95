//! Ping handler for health checks

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::types::{ErrorCode, ErrorResponse};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PingRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PongResponse {
    message: String,
    worker: String,
    timestamp: String,
}

/// Build the pong for a ping payload. An empty payload counts as a bare ping.
fn pong(payload: &[u8]) -> Result<PongResponse, serde_json::Error> {
    let request: PingRequest = if payload.is_empty() {
        PingRequest::default()
    } else {
        serde_json::from_slice(payload)?
    };

    Ok(PongResponse {
        message: request.message.map(|m| format!("Pong: {}", m)).unwrap_or_else(|| "Pong".to_string()),
        worker: env!("CARGO_PKG_NAME").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handle ping messages
pub async fn handle_ping(client: Client, mut subscriber: Subscriber) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received ping message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                error!("Ping message without reply subject");
                continue;
            }
        };

        let body = match pong(&msg.payload) {
            Ok(response) => serde_json::to_vec(&response)?,
            Err(e) => {
                error!("Failed to parse ping request: {}", e);
                let response = ErrorResponse::new(
                    Uuid::nil(),
                    ErrorCode::InvalidRequest,
                    format!("Failed to parse request: {}", e),
                );
                serde_json::to_vec(&response)?
            }
        };

        client.publish(reply, body.into()).await?;
        debug!("Sent pong response");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pong_echoes_message() {
        let response = pong(br#"{"message": "hello"}"#).unwrap();
        assert_eq!(response.message, "Pong: hello");
        assert_eq!(response.worker, "route-suggester-worker");
    }

    #[test]
    fn test_pong_accepts_empty_payload() {
        assert_eq!(pong(b"").unwrap().message, "Pong");
        assert_eq!(pong(b"{}").unwrap().message, "Pong");
    }

    #[test]
    fn test_pong_rejects_garbage() {
        assert!(pong(b"ping?").is_err());
    }
}
