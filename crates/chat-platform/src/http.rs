//! HTTP adapter for the chat backend.
//!
//! Uses browser `fetch()` via gloo-net. One POST per user message and one
//! per feedback form. Non-2xx replies surface the backend's `detail` text.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde_json::Value;

use chat_core::ports::ChatHttpPort;
use chat_types::{
    ChatError, Result,
    config::ClientConfig,
    wire::{BotReply, ChatRequest, FeedbackRequest, HttpChatResponse, error_detail},
};

pub struct HttpChatAdapter {
    chat_url: String,
    feedback_url: String,
}

impl HttpChatAdapter {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            chat_url: config.chat_url(),
            feedback_url: config.feedback_url(),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn feedback_url(&self) -> &str {
        &self.feedback_url
    }

    async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<Response> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("POST {} failed with status {}", url, status);
            return Err(ChatError::Network(error_detail(status, &body)));
        }

        Ok(response)
    }
}

#[async_trait(?Send)]
impl ChatHttpPort for HttpChatAdapter {
    async fn post_chat(&self, req: ChatRequest) -> Result<BotReply> {
        let response = self.post(&self.chat_url, &req).await?;
        let data: HttpChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Protocol(e.to_string()))?;
        Ok(data.into())
    }

    async fn post_feedback(&self, req: FeedbackRequest) -> Result<Value> {
        let response = self.post(&self.feedback_url, &req).await?;
        // The confirmation body is informational only
        Ok(response.json().await.unwrap_or(Value::Null))
    }
}
