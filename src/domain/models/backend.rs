use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::ChatRequest;

pub type BackendBox = Arc<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    /// Posts one question and resolves to the text to show as the assistant's
    /// reply. Transport errors, non-success statuses and undecodable bodies
    /// all surface as `Err`.
    async fn get_completion(&self, request: &ChatRequest) -> Result<String>;
}
