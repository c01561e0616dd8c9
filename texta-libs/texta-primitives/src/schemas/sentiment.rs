use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall polarity of a text. Every model kind is collapsed into these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            "NEUTRAL" => Ok(SentimentLabel::Neutral),
            other => Err(format!("Unknown sentiment label: {}", other)),
        }
    }
}

/// A single `{label, score}` pair as returned by a text-classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

/// Emotion and tone subscores. All values live in [0, 1]; zero means "not reported".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneScores {
    #[serde(default)]
    pub joy_score: f64,
    #[serde(default)]
    pub sadness_score: f64,
    #[serde(default)]
    pub anger_score: f64,
    #[serde(default)]
    pub fear_score: f64,
    #[serde(default)]
    pub formal_score: f64,
    #[serde(default)]
    pub casual_score: f64,
    #[serde(default)]
    pub emotional_score: f64,
    #[serde(default)]
    pub objective_score: f64,
}

impl ToneScores {
    /// Sets the subscore whose name matches `name` (case-insensitive).
    /// Returns false when the name is not one of the known subscores.
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        let value = clamp_unit(value);
        let slot = match name.trim().to_lowercase().as_str() {
            "joy" => &mut self.joy_score,
            "sadness" => &mut self.sadness_score,
            "anger" => &mut self.anger_score,
            "fear" => &mut self.fear_score,
            "formal" => &mut self.formal_score,
            "casual" => &mut self.casual_score,
            "emotional" => &mut self.emotional_score,
            "objective" => &mut self.objective_score,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn values(&self) -> [f64; 8] {
        [
            self.joy_score,
            self.sadness_score,
            self.anger_score,
            self.fear_score,
            self.formal_score,
            self.casual_score,
            self.emotional_score,
            self.objective_score,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| *v == 0.0)
    }

    /// Fills every zero subscore with the corresponding value from `other`.
    pub fn fill_missing_from(&mut self, other: &ToneScores) {
        let fill = |slot: &mut f64, value: f64| {
            if *slot == 0.0 {
                *slot = value;
            }
        };
        fill(&mut self.joy_score, other.joy_score);
        fill(&mut self.sadness_score, other.sadness_score);
        fill(&mut self.anger_score, other.anger_score);
        fill(&mut self.fear_score, other.fear_score);
        fill(&mut self.formal_score, other.formal_score);
        fill(&mut self.casual_score, other.casual_score);
        fill(&mut self.emotional_score, other.emotional_score);
        fill(&mut self.objective_score, other.objective_score);
    }
}

/// Normalized outcome of analyzing one text with one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub model_name: String,
    #[serde(default)]
    pub positive_score: f64,
    #[serde(default)]
    pub negative_score: f64,
    #[serde(default)]
    pub neutral_score: f64,
    #[serde(flatten)]
    pub tone: ToneScores,
}

impl AnalysisResult {
    pub fn new(text: &str, sentiment: SentimentLabel, confidence: f64, model_name: &str) -> Self {
        Self {
            text: text.to_string(),
            sentiment,
            confidence: clamp_unit(confidence),
            model_name: model_name.to_string(),
            positive_score: 0.0,
            negative_score: 0.0,
            neutral_score: 0.0,
            tone: ToneScores::default(),
        }
    }

    pub fn with_polarity_scores(mut self, positive: f64, negative: f64, neutral: f64) -> Self {
        self.positive_score = clamp_unit(positive);
        self.negative_score = clamp_unit(negative);
        self.neutral_score = clamp_unit(neutral);
        self
    }

    pub fn with_tone(mut self, tone: ToneScores) -> Self {
        self.tone = tone;
        self
    }

    pub fn confidence_percent(&self) -> f64 {
        (self.confidence * 1000.0).round() / 10.0
    }
}

/// Clamps a score into [0, 1]. NaN becomes 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
