use crate::error::Result;
use crate::types::{CompletionRequest, CompletionResponse, ModelInfo};
use async_trait::async_trait;
use hawkins_core::capability::Capabilities;

/// A chat-completion backend. The agent treats it as an opaque model call.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    async fn health_check(&self) -> Result<()> {
        let _ = self.list_models().await?;
        Ok(())
    }

    fn default_model(&self) -> &str;
}
