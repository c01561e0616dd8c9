use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Informal output shape of a hosted model, used to normalize its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// POSITIVE / NEGATIVE
    Binary,
    /// positive / neutral / negative
    ThreeClass,
    /// 1 to 5 stars
    Rating,
    /// NLI model queried with candidate labels
    ZeroShot,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Binary => "binary",
            ModelKind::ThreeClass => "three_class",
            ModelKind::Rating => "rating",
            ModelKind::ZeroShot => "zero_shot",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub label: String,
    pub kind: ModelKind,
}

impl ModelDescriptor {
    pub fn new(id: &str, label: &str, kind: ModelKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

lazy_static! {
    pub static ref SUPPORTED_MODELS: Vec<ModelDescriptor> = vec![
        ModelDescriptor::new(DEFAULT_MODEL_ID, "DistilBERT SST-2", ModelKind::Binary),
        ModelDescriptor::new(
            "cardiffnlp/twitter-roberta-base-sentiment-latest",
            "Twitter RoBERTa",
            ModelKind::ThreeClass,
        ),
        ModelDescriptor::new(
            "nlptown/bert-base-multilingual-uncased-sentiment",
            "Multilingual BERT (5 stars)",
            ModelKind::Rating,
        ),
        ModelDescriptor::new(
            "finiteautomata/bertweet-base-sentiment-analysis",
            "BERTweet",
            ModelKind::ThreeClass,
        ),
        ModelDescriptor::new("ProsusAI/finbert", "FinBERT (financial)", ModelKind::ThreeClass),
        ModelDescriptor::new("facebook/bart-large-mnli", "BART MNLI (zero-shot)", ModelKind::ZeroShot),
    ];
}

pub fn supported_models() -> &'static [ModelDescriptor] {
    &SUPPORTED_MODELS
}

pub fn supported_model_ids() -> Vec<String> {
    SUPPORTED_MODELS.iter().map(|m| m.id.clone()).collect()
}

pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    SUPPORTED_MODELS.iter().find(|m| m.id == id)
}

pub fn is_supported_model(id: &str) -> bool {
    find_model(id).is_some()
}
