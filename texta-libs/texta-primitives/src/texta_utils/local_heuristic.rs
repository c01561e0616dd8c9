use crate::schemas::sentiment::{AnalysisResult, SentimentLabel};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const LOCAL_MODEL_NAME: &str = "rule-based";

pub const POSITIVE_WORDS: [&str; 20] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "awesome",
    "love",
    "like",
    "happy",
    "pleased",
    "satisfied",
    "perfect",
    "brilliant",
    "outstanding",
    "superb",
    "marvelous",
    "terrific",
    "fabulous",
    "incredible",
];

pub const NEGATIVE_WORDS: [&str; 20] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "dislike",
    "sad",
    "angry",
    "frustrated",
    "disappointed",
    "disgusted",
    "annoyed",
    "furious",
    "upset",
    "depressed",
    "miserable",
    "pathetic",
    "useless",
    "worthless",
    "dreadful",
];

const NEUTRAL_CONFIDENCE: u8 = 50;
const MIN_MAJORITY_CONFIDENCE: u8 = 60;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("static regex");
}

/// Outcome of the keyword heuristic. `confidence` is a percentage in 50..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicResult {
    pub sentiment: SentimentLabel,
    pub confidence: u8,
    pub positive_matches: usize,
    pub negative_matches: usize,
}

impl HeuristicResult {
    /// Converts into the same shape the relay returns, so callers can render
    /// a local fallback the same way as a remote result.
    pub fn into_analysis_result(self, text: &str) -> AnalysisResult {
        let total = self.positive_matches + self.negative_matches;
        let result = AnalysisResult::new(text, self.sentiment, self.confidence as f64 / 100.0, LOCAL_MODEL_NAME);
        if total == 0 {
            return result.with_polarity_scores(0.33, 0.33, 0.34);
        }
        let positive = self.positive_matches as f64 / total as f64;
        let negative = self.negative_matches as f64 / total as f64;
        result.with_polarity_scores(positive, negative, 0.0)
    }
}

/// Classifies `text` by counting positive and negative keywords. No network.
pub fn analyze_locally(text: &str) -> HeuristicResult {
    let lowered = text.to_lowercase();
    let (positive_matches, negative_matches) = NON_WORD
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .fold((0usize, 0usize), |(pos, neg), token| {
            if POSITIVE_WORDS.contains(&token) {
                (pos + 1, neg)
            } else if NEGATIVE_WORDS.contains(&token) {
                (pos, neg + 1)
            } else {
                (pos, neg)
            }
        });

    let neutral = HeuristicResult {
        sentiment: SentimentLabel::Neutral,
        confidence: NEUTRAL_CONFIDENCE,
        positive_matches,
        negative_matches,
    };

    if positive_matches == negative_matches {
        return neutral;
    }

    let (sentiment, majority) = if positive_matches > negative_matches {
        (SentimentLabel::Positive, positive_matches)
    } else {
        (SentimentLabel::Negative, negative_matches)
    };
    let total = positive_matches + negative_matches;
    let ratio = (100.0 * majority as f64 / total as f64).round() as u8;

    HeuristicResult {
        sentiment,
        confidence: ratio.max(MIN_MAJORITY_CONFIDENCE),
        positive_matches,
        negative_matches,
    }
}
