use super::api_client::SentimentAnalyzer;
use std::collections::HashMap;
use texta_primitives::schemas::model_descriptor::ModelDescriptor;
use texta_primitives::schemas::sentiment::{AnalysisResult, SentimentLabel};

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub model: ModelDescriptor,
    pub outcome: Result<AnalysisResult, String>,
}

/// Results of one text across several models, in the order the models were given.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub text: String,
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonTable {
    pub fn get(&self, model_id: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.model.id == model_id)
    }

    pub fn successes(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    /// The label most models agreed on, or `None` when nothing succeeded or
    /// the top labels are tied.
    pub fn consensus(&self) -> Option<SentimentLabel> {
        let mut counts: HashMap<SentimentLabel, usize> = HashMap::new();
        for result in self.successes() {
            *counts.entry(result.sentiment).or_insert(0) += 1;
        }
        let max = *counts.values().max()?;
        let mut leaders = counts.into_iter().filter(|(_, c)| *c == max);
        let (label, _) = leaders.next()?;
        match leaders.next() {
            Some(_) => None,
            None => Some(label),
        }
    }
}

/// Runs one analysis per model, sequentially. A failing model does not
/// affect the others.
pub async fn compare_models<A>(analyzer: &A, text: &str, models: &[ModelDescriptor]) -> ComparisonTable
where
    A: SentimentAnalyzer + ?Sized,
{
    let mut entries = Vec::with_capacity(models.len());
    for model in models {
        let outcome = analyzer.analyze(text, &model.id).await.map_err(|e| e.to_string());
        entries.push(ComparisonEntry {
            model: model.clone(),
            outcome,
        });
    }

    ComparisonTable {
        text: text.to_string(),
        entries,
    }
}
