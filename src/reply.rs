use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::RequestFailed;

/// External collaborator that turns a user's text into a reply.
#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, RequestFailed>;
}

#[derive(Serialize)]
struct ReplyRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ReplyResponse {
    reply: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// POSTs `{"message": ...}` as JSON and expects `{"reply": ...}` back.
#[derive(Clone)]
pub struct HttpReplyService {
    client: Client,
    endpoint: Url,
}

impl HttpReplyService {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn reply(&self, message: &str) -> Result<String, RequestFailed> {
        debug!(endpoint = %self.endpoint, chars = message.chars().count(), "sending message");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ReplyRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .ok();
            return Err(RequestFailed::Status { status, detail });
        }

        let reply: ReplyResponse = serde_json::from_str(&body)?;
        debug!(timestamp = reply.timestamp.as_deref().unwrap_or("-"), "reply received");
        Ok(reply.reply)
    }
}
