use super::model_descriptor::{ModelDescriptor, DEFAULT_MODEL_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_model_name() -> String {
    DEFAULT_MODEL_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl AnalyzeRequest {
    pub fn new(text: &str, model_name: &str) -> Self {
        Self {
            text: text.to_string(),
            model_name: model_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub texts: Vec<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: usize,
    pub available_models: Vec<String>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub available_models: Vec<String>,
    pub default_model: String,
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// Error body returned by every relay endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct APIError {
    pub code: u16,
    pub error: String,
    pub message: String,
}

impl APIError {
    pub fn new(code: u16, error: &str, message: &str) -> Self {
        Self {
            code,
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.code, self.message)
    }
}

impl std::error::Error for APIError {}
