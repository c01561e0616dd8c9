use super::error::AnalyzerError;
use super::label_normalizer::normalize_scores;
use super::providers::{HuggingFaceInference, InferenceProvider};
use crate::utils::environment::RelayEnvironment;
use reqwest::Client;
use std::time::Duration;
use texta_primitives::schemas::api_schemas::{HealthResponse, ModelsResponse, RootResponse};
use texta_primitives::schemas::batch::{BatchOutcome, FailedAnalysis};
use texta_primitives::schemas::model_descriptor::{
    find_model, supported_model_ids, supported_models, ModelDescriptor, DEFAULT_MODEL_ID,
};
use texta_primitives::schemas::sentiment::AnalysisResult;
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};
use texta_primitives::texta_utils::tone_analysis::analyze_tone;

pub const RELAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stateless relay between the HTTP API and the inference provider. Shared
/// by every request handler behind an `Arc`.
pub struct SentimentRelay {
    client: Client,
    provider: Box<dyn InferenceProvider>,
    env: RelayEnvironment,
}

impl SentimentRelay {
    pub fn new(env: RelayEnvironment) -> Result<Self, AnalyzerError> {
        let provider = HuggingFaceInference::new(&env.hf_api_url, env.hf_api_token.clone());
        Self::with_provider(env, Box::new(provider))
    }

    pub fn with_provider(env: RelayEnvironment, provider: Box<dyn InferenceProvider>) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(env.request_timeout_secs))
            .build()?;
        Ok(Self { client, provider, env })
    }

    pub fn environment(&self) -> &RelayEnvironment {
        &self.env
    }

    pub fn root(&self) -> RootResponse {
        RootResponse {
            message: "Sentiment Analysis API".to_string(),
            status: "running".to_string(),
        }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            models_loaded: supported_models().len(),
            available_models: supported_model_ids(),
            version: RELAY_VERSION.to_string(),
        }
    }

    pub fn models(&self) -> ModelsResponse {
        ModelsResponse {
            available_models: supported_model_ids(),
            default_model: DEFAULT_MODEL_ID.to_string(),
            models: supported_models().to_vec(),
        }
    }

    fn resolve_model(model_name: &str) -> Result<&'static ModelDescriptor, AnalyzerError> {
        find_model(model_name.trim()).ok_or_else(|| AnalyzerError::InvalidModel(model_name.to_string()))
    }

    /// Analyzes one text. Nothing is retried; provider failures surface as
    /// errors with a readable message.
    pub async fn analyze(&self, text: &str, model_name: &str) -> Result<AnalysisResult, AnalyzerError> {
        let model = Self::resolve_model(model_name)?;
        self.analyze_with(model, text).await
    }

    async fn analyze_with(&self, model: &ModelDescriptor, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyText);
        }

        let scores = self.provider.call_api(&self.client, model, text).await?;
        let mut result = normalize_scores(model, text, &scores)?;

        if self.env.tone_analysis {
            result.tone.fill_missing_from(&analyze_tone(text));
        }

        texta_log(
            TextaLogOption::Relay,
            TextaLogLevel::Info,
            format!(
                "Analyzed {} chars with {}: {} ({:.3})",
                text.chars().count(),
                model.id,
                result.sentiment,
                result.confidence
            )
            .as_str(),
        );

        Ok(result)
    }

    /// Analyzes every text in order with the same model. Request-level
    /// problems reject the whole batch; per-item failures become
    /// `FailedAnalysis` entries at the item's position.
    pub async fn analyze_batch(&self, texts: &[String], model_name: &str) -> Result<Vec<BatchOutcome>, AnalyzerError> {
        if texts.is_empty() {
            return Err(AnalyzerError::EmptyBatch);
        }
        if texts.len() > self.env.max_batch_size {
            return Err(AnalyzerError::BatchTooLarge {
                size: texts.len(),
                max: self.env.max_batch_size,
            });
        }
        let model = Self::resolve_model(model_name)?;

        let mut outcomes = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            match self.analyze_with(model, text).await {
                Ok(result) => outcomes.push(BatchOutcome::Analyzed(result)),
                Err(e) => {
                    texta_log(
                        TextaLogOption::Relay,
                        TextaLogLevel::Error,
                        format!("Batch item {} failed: {}", index, e).as_str(),
                    );
                    outcomes.push(BatchOutcome::Failed(FailedAnalysis::new(text, &model.id, &e.to_string())));
                }
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use texta_primitives::schemas::sentiment::{LabelScore, SentimentLabel};

    /// Answers POSITIVE unless the text contains "fail".
    struct ScriptedProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl InferenceProvider for ScriptedProvider {
        async fn call_api(
            &self,
            _client: &Client,
            _model: &ModelDescriptor,
            text: &str,
        ) -> Result<Vec<LabelScore>, AnalyzerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("fail") {
                return Err(AnalyzerError::RateLimited("too many requests".to_string()));
            }
            Ok(vec![LabelScore::new("POSITIVE", 0.9), LabelScore::new("NEGATIVE", 0.1)])
        }
    }

    fn relay(env: RelayEnvironment) -> (SentimentRelay, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ScriptedProvider { calls: calls.clone() };
        (SentimentRelay::with_provider(env, Box::new(provider)).unwrap(), calls)
    }

    #[tokio::test]
    async fn test_validation_happens_before_provider_call() {
        let (relay, calls) = relay(RelayEnvironment::default());
        assert!(matches!(
            relay.analyze("   ", DEFAULT_MODEL_ID).await,
            Err(AnalyzerError::EmptyText)
        ));
        assert!(matches!(
            relay.analyze("hello", "microsoft/DialoGPT-medium").await,
            Err(AnalyzerError::InvalidModel(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let (relay, calls) = relay(RelayEnvironment::default());
        let texts = vec!["good".to_string(), "fail here".to_string(), "".to_string(), "fine".to_string()];
        let outcomes = relay.analyze_batch(&texts, DEFAULT_MODEL_ID).await.unwrap();

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].sentiment(), "POSITIVE");
        assert!(outcomes[1].is_error());
        assert!(outcomes[2].is_error());
        assert_eq!(outcomes[2].error(), Some("Text cannot be empty"));
        assert_eq!(outcomes[3].text(), "fine");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_batch_limits() {
        let env = RelayEnvironment {
            max_batch_size: 2,
            ..RelayEnvironment::default()
        };
        let (relay, _) = relay(env);
        assert!(matches!(
            relay.analyze_batch(&[], DEFAULT_MODEL_ID).await,
            Err(AnalyzerError::EmptyBatch)
        ));
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(matches!(
            relay.analyze_batch(&texts, DEFAULT_MODEL_ID).await,
            Err(AnalyzerError::BatchTooLarge { size: 3, max: 2 })
        ));
    }

    #[tokio::test]
    async fn test_tone_analysis_is_opt_in() {
        let (relay_plain, _) = relay(RelayEnvironment::default());
        let result = relay_plain.analyze("I am so happy", DEFAULT_MODEL_ID).await.unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert!(result.tone.is_empty());

        let (relay_tone, _) = relay(RelayEnvironment {
            tone_analysis: true,
            ..RelayEnvironment::default()
        });
        let result = relay_tone.analyze("I am so happy", DEFAULT_MODEL_ID).await.unwrap();
        assert!(result.tone.joy_score > 0.0);
    }

    #[test]
    fn test_health_lists_catalogue() {
        let (relay, _) = relay(RelayEnvironment::default());
        let health = relay.health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.models_loaded, supported_models().len());
        assert_eq!(relay.models().default_model, DEFAULT_MODEL_ID);
    }
}
