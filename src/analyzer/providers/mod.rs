use super::error::AnalyzerError;
use async_trait::async_trait;
use reqwest::Client;
use texta_primitives::schemas::model_descriptor::ModelDescriptor;
use texta_primitives::schemas::sentiment::LabelScore;

pub mod huggingface;

pub use huggingface::HuggingFaceInference;

/// A hosted text-classification backend.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Classifies `text` with `model` and returns the raw label distribution.
    async fn call_api(
        &self,
        client: &Client,
        model: &ModelDescriptor,
        text: &str,
    ) -> Result<Vec<LabelScore>, AnalyzerError>;
}
