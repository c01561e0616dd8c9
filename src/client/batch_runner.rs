use super::api_client::SentimentAnalyzer;
use texta_primitives::schemas::batch::{BatchOutcome, FailedAnalysis, Progress};
use texta_primitives::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};

/// Analyzes `texts` one after another, in order, calling `on_progress` after
/// each item. A failing item is recorded as a `FailedAnalysis` and the run
/// continues with the next one.
pub async fn run_batch<A, F>(analyzer: &A, texts: &[String], model_name: &str, mut on_progress: F) -> Vec<BatchOutcome>
where
    A: SentimentAnalyzer + ?Sized,
    F: FnMut(Progress),
{
    let mut progress = Progress::new(texts.len());
    let mut outcomes = Vec::with_capacity(texts.len());

    for text in texts {
        let outcome = match analyzer.analyze(text, model_name).await {
            Ok(result) => BatchOutcome::Analyzed(result),
            Err(e) => {
                texta_log(
                    TextaLogOption::Batch,
                    TextaLogLevel::Error,
                    format!("Row {} of {} failed: {}", progress.current + 1, progress.total, e).as_str(),
                );
                BatchOutcome::Failed(FailedAnalysis::new(text, model_name, &e.to_string()))
            }
        };
        outcomes.push(outcome);

        progress.current += 1;
        on_progress(progress);
    }

    texta_log(
        TextaLogOption::Batch,
        TextaLogLevel::Info,
        format!(
            "Batch finished: {} rows, {} failed",
            outcomes.len(),
            outcomes.iter().filter(|o| o.is_error()).count()
        )
        .as_str(),
    );

    outcomes
}

/// Counts of each label in a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        outcomes.iter().fold(BatchSummary::default(), |mut summary, outcome| {
            match outcome.sentiment() {
                "POSITIVE" => summary.positive += 1,
                "NEGATIVE" => summary.negative += 1,
                "NEUTRAL" => summary.neutral += 1,
                _ => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral + self.failed
    }
}
