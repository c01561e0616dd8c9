use super::super::error::AnalyzerError;
use super::InferenceProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use texta_primitives::schemas::model_descriptor::{ModelDescriptor, ModelKind};
use texta_primitives::schemas::sentiment::LabelScore;
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};

pub const ZERO_SHOT_CANDIDATE_LABELS: [&str; 3] = ["positive", "negative", "neutral"];

const DEFAULT_LOADING_SECS: u64 = 20;
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HuggingFaceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    ZeroShot { labels: Vec<String>, scores: Vec<f64> },
    Error(HuggingFaceError),
}

#[derive(Debug, Deserialize)]
struct HuggingFaceError {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// Hugging Face Inference API: `POST {api_url}/models/{model_id}`.
#[derive(Debug, Clone)]
pub struct HuggingFaceInference {
    pub api_url: String,
    pub api_token: Option<String>,
}

impl HuggingFaceInference {
    pub fn new(api_url: &str, api_token: Option<String>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.api_url, model_id)
    }
}

pub fn build_payload(model: &ModelDescriptor, text: &str) -> serde_json::Value {
    match model.kind {
        ModelKind::ZeroShot => json!({
            "inputs": text,
            "parameters": { "candidate_labels": ZERO_SHOT_CANDIDATE_LABELS },
        }),
        _ => json!({ "inputs": text }),
    }
}

fn loading_error(model: &ModelDescriptor, estimated_time: Option<f64>) -> AnalyzerError {
    AnalyzerError::ModelLoading {
        model: model.id.clone(),
        estimated_secs: estimated_time
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(|t| t.ceil() as u64)
            .unwrap_or(DEFAULT_LOADING_SECS),
    }
}

/// Maps a non-2xx provider response onto an error.
fn status_error(model: &ModelDescriptor, status: StatusCode, body: &str) -> AnalyzerError {
    let parsed: Option<HuggingFaceError> = serde_json::from_str(body).ok();
    let message = match &parsed {
        Some(error) => error.error.clone(),
        None => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    };

    match status {
        StatusCode::SERVICE_UNAVAILABLE => loading_error(model, parsed.and_then(|e| e.estimated_time)),
        StatusCode::TOO_MANY_REQUESTS => AnalyzerError::RateLimited(message),
        _ => AnalyzerError::ProviderStatus {
            status: status.as_u16(),
            message,
        },
    }
}

/// Flattens any of the accepted response shapes into label/score pairs.
pub fn parse_response(model: &ModelDescriptor, body: &str) -> Result<Vec<LabelScore>, AnalyzerError> {
    let response: HuggingFaceResponse =
        serde_json::from_str(body).map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

    match response {
        HuggingFaceResponse::Nested(mut outer) => {
            if outer.is_empty() {
                return Err(AnalyzerError::MalformedResponse("empty response list".to_string()));
            }
            Ok(outer.swap_remove(0))
        }
        HuggingFaceResponse::Flat(scores) => Ok(scores),
        HuggingFaceResponse::ZeroShot { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(AnalyzerError::MalformedResponse(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            Ok(labels
                .iter()
                .zip(scores)
                .map(|(label, score)| LabelScore::new(label, score))
                .collect())
        }
        HuggingFaceResponse::Error(error) => match error.estimated_time {
            Some(estimated) => Err(loading_error(model, Some(estimated))),
            None => Err(AnalyzerError::ProviderError(error.error)),
        },
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceInference {
    async fn call_api(
        &self,
        client: &Client,
        model: &ModelDescriptor,
        text: &str,
    ) -> Result<Vec<LabelScore>, AnalyzerError> {
        let url = self.model_url(&model.id);
        let payload = build_payload(model, text);

        texta_log(
            TextaLogOption::Provider,
            TextaLogLevel::Debug,
            format!("Call API: {} ({} chars)", url, text.chars().count()).as_str(),
        );

        let mut request = client.post(&url).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;

        texta_log(
            TextaLogOption::Provider,
            TextaLogLevel::Debug,
            format!("Call API Status: {:?}", status).as_str(),
        );

        if !status.is_success() {
            let error = status_error(model, status, &body);
            texta_log(
                TextaLogOption::Provider,
                TextaLogLevel::Error,
                format!("Provider call for {} failed: {}", model.id, error).as_str(),
            );
            return Err(error);
        }

        parse_response(model, &body)
    }
}
