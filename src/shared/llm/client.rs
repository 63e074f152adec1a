use async_trait::async_trait;
use balungpisah_tensorzero::{InferenceRequestBuilder, InputMessage, TensorZeroClient};

use crate::core::config::LlmConfig;
use crate::core::error::{AppError, Result};

/// One system instruction plus one user prompt
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// External text-completion service.
///
/// A call is a single non-streaming exchange with no retry. Transport failures
/// surface as `AppError::ExternalServiceError`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Completion client backed by a TensorZero gateway
pub struct TensorZeroCompletionClient {
    client: TensorZeroClient,
    openai_api_key: String,
    model_name: String,
}

impl TensorZeroCompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = TensorZeroClient::new(&config.tensorzero_url).map_err(|e| {
            tracing::error!("Failed to create TensorZero client: {:?}", e);
            AppError::Internal(format!("Failed to create TensorZero client: {}", e))
        })?;

        Ok(Self {
            client,
            openai_api_key: config.openai_api_key.clone(),
            model_name: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for TensorZeroCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let inference = InferenceRequestBuilder::new()
            .model(self.model_name.clone())
            .system(request.system)
            .message(InputMessage::user(request.user))
            .credentials(serde_json::json!({
                "system_api_key": self.openai_api_key
            }))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build inference request: {:?}", e);
                AppError::Internal(format!("Failed to build inference request: {}", e))
            })?;

        let response = self.client.inference(inference).await.map_err(|e| {
            tracing::error!("TensorZero inference failed: {:?}", e);
            AppError::ExternalServiceError(format!("Completion request failed: {}", e))
        })?;

        let text = response.text();

        tracing::debug!(
            "Raw completion (first 500 chars): {}",
            text.chars().take(500).collect::<String>()
        );

        Ok(text)
    }
}
