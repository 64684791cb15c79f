#[cfg(test)]
#[path = "chat_api_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::reply_text;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;

/// Question answering API that takes one question per `POST /api/chat` and
/// answers with a single JSON document.
pub struct ChatApi {
    url: String,
    client: reqwest::Client,
}

impl Default for ChatApi {
    fn default() -> ChatApi {
        return ChatApi::with_url(Config::get(ConfigKey::ApiBaseUrl));
    }
}

impl ChatApi {
    pub fn with_url(url: String) -> ChatApi {
        return ChatApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl Backend for ChatApi {
    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, request: &ChatRequest) -> Result<String> {
        let res = self
            .client
            .post(format!("{url}/api/chat", url = self.url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make chat request"
            );
            bail!(format!(
                "Chat request failed with status {}",
                res.status().as_u16()
            ));
        }

        let body = res.json::<Value>().await?;
        tracing::debug!(body = ?body, "chat response");
        if body.is_null() {
            bail!("Chat response body was null");
        }

        return Ok(reply_text(&body));
    }
}
