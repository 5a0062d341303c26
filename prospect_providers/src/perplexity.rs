use async_trait::async_trait;
use prospect_core::{ChatMessage, ChatResponse, ProviderError, SearchProvider, Usage};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::info;

/// Chat-completions client for the Perplexity search API.
///
/// The provider holds the credential; a 429 from upstream is surfaced as
/// `ProviderError::RateLimited` so the resolver can apply its cooldown,
/// every other failure is terminal for the request.
pub struct PerplexityProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PerplexityProvider {
    pub const DEFAULT_MODEL: &'static str = "llama-3.1-sonar-large-128k-online";

    pub fn new(api_key: String) -> Self {
        info!("Creating PerplexityProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.perplexity.ai".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing completion content".to_string())
            })?
            .to_string();

        let usage = body["usage"].as_object().map(|u| Usage {
            prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
            completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
                .unwrap_or(0),
            total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        });

        Ok(ChatResponse { content, usage })
    }
}

#[async_trait]
impl SearchProvider for PerplexityProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> Result<ChatResponse, ProviderError> {
        let request = json!({
            "model": model,
            "messages": messages,
        });

        info!("Sending request to Perplexity API: model={}", model);

        let response = self.try_send(&request).await?;

        info!("Received response from Perplexity API");
        Ok(response)
    }

    fn default_model(&self) -> &'static str {
        Self::DEFAULT_MODEL
    }
}
