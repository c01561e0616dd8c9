use super::sentiment::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Sentiment marker carried by a row that could not be analyzed.
pub const ERROR_SENTIMENT: &str = "ERROR";

/// Placeholder for an item whose analysis failed. Serializes with the same
/// leading fields as `AnalysisResult` so both can share one result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAnalysis {
    pub text: String,
    pub sentiment: String,
    pub confidence: f64,
    pub model_name: String,
    pub error: String,
}

impl FailedAnalysis {
    pub fn new(text: &str, model_name: &str, error: &str) -> Self {
        Self {
            text: text.to_string(),
            sentiment: ERROR_SENTIMENT.to_string(),
            confidence: 0.0,
            model_name: model_name.to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Analyzed(AnalysisResult),
    Failed(FailedAnalysis),
}

impl BatchOutcome {
    pub fn text(&self) -> &str {
        match self {
            BatchOutcome::Analyzed(result) => &result.text,
            BatchOutcome::Failed(failed) => &failed.text,
        }
    }

    pub fn sentiment(&self) -> &str {
        match self {
            BatchOutcome::Analyzed(result) => result.sentiment.as_str(),
            BatchOutcome::Failed(_) => ERROR_SENTIMENT,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            BatchOutcome::Analyzed(result) => result.confidence,
            BatchOutcome::Failed(_) => 0.0,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            BatchOutcome::Analyzed(result) => &result.model_name,
            BatchOutcome::Failed(failed) => &failed.model_name,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BatchOutcome::Analyzed(_) => None,
            BatchOutcome::Failed(failed) => Some(&failed.error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BatchOutcome::Failed(_))
    }

    pub fn as_result(&self) -> Option<&AnalysisResult> {
        match self {
            BatchOutcome::Analyzed(result) => Some(result),
            BatchOutcome::Failed(_) => None,
        }
    }
}

impl From<AnalysisResult> for BatchOutcome {
    fn from(result: AnalysisResult) -> Self {
        BatchOutcome::Analyzed(result)
    }
}

impl From<FailedAnalysis> for BatchOutcome {
    fn from(failed: FailedAnalysis) -> Self {
        BatchOutcome::Failed(failed)
    }
}

/// `{current, total}` counter updated after every batch item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.current.min(self.total) * 100) / self.total) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::sentiment::SentimentLabel;

    #[test]
    fn test_outcomes_deserialize_to_the_right_variant() {
        let ok = serde_json::to_string(&BatchOutcome::from(AnalysisResult::new(
            "good",
            SentimentLabel::Positive,
            0.8,
            "m",
        )))
        .unwrap();
        let failed = serde_json::to_string(&BatchOutcome::from(FailedAnalysis::new("bad", "m", "boom"))).unwrap();

        let ok: BatchOutcome = serde_json::from_str(&ok).unwrap();
        let failed: BatchOutcome = serde_json::from_str(&failed).unwrap();

        assert!(!ok.is_error());
        assert_eq!(ok.sentiment(), "POSITIVE");
        assert!(failed.is_error());
        assert_eq!(failed.sentiment(), ERROR_SENTIMENT);
        assert_eq!(failed.confidence(), 0.0);
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn test_progress_percent() {
        let mut progress = Progress::new(4);
        assert_eq!(progress.percent(), 0);
        progress.current = 3;
        assert_eq!(progress.percent(), 75);
        assert!(!progress.is_complete());
        progress.current = 4;
        assert!(progress.is_complete());
        assert_eq!(Progress::new(0).percent(), 100);
    }
}
