use super::error::ClientError;
use crate::utils::environment::ClientEnvironment;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use texta_primitives::schemas::api_schemas::{
    APIError, AnalyzeRequest, HealthResponse, ModelsResponse,
};
use texta_primitives::schemas::sentiment::AnalysisResult;
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};

/// Anything that can check its own availability and analyze one text.
/// The batch runner, comparison and session work against this seam.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn check_health(&self) -> Result<HealthResponse, ClientError>;

    async fn analyze(&self, text: &str, model_name: &str) -> Result<AnalysisResult, ClientError>;
}

/// HTTP client for a running relay.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_secs: u64,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::Connection {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    pub fn from_environment(env: &ClientEnvironment) -> Result<Self, ClientError> {
        Self::new(&env.api_url, env.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Connection {
                url: self.base_url.clone(),
                message: err.to_string(),
            }
        }
    }

    /// Decodes a 2xx body as `T`; otherwise surfaces the relay's error message.
    async fn read_response<T: DeserializeOwned>(&self, res: Response) -> Result<T, ClientError> {
        let status = res.status();
        let body = res.text().await.map_err(|e| self.send_error(e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<APIError>(&body) {
                Ok(api_error) => api_error.message,
                Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("Unknown error").to_string(),
                Err(_) => body,
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let res = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        self.read_response(res).await
    }

    pub async fn list_models(&self) -> Result<ModelsResponse, ClientError> {
        let res = self
            .client
            .get(self.url("/models"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        self.read_response(res).await
    }

    pub async fn analyze_text(&self, text: &str, model_name: &str) -> Result<AnalysisResult, ClientError> {
        texta_log(
            TextaLogOption::Client,
            TextaLogLevel::Debug,
            format!("POST {}/analyze with {}", self.base_url, model_name).as_str(),
        );
        let res = self
            .client
            .post(self.url("/analyze"))
            .json(&AnalyzeRequest::new(text, model_name))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        self.read_response(res).await
    }
}

#[async_trait]
impl SentimentAnalyzer for ApiClient {
    async fn check_health(&self) -> Result<HealthResponse, ClientError> {
        self.health_check().await
    }

    async fn analyze(&self, text: &str, model_name: &str) -> Result<AnalysisResult, ClientError> {
        self.analyze_text(text, model_name).await
    }
}
