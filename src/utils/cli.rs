use crate::client::batch_runner::BatchSummary;
use crate::client::comparison::ComparisonTable;
use chrono::{DateTime, Local};
use colored::*;
use texta_primitives::schemas::api_schemas::{HealthResponse, ModelsResponse};
use texta_primitives::schemas::batch::{BatchOutcome, Progress};
use texta_primitives::schemas::sentiment::{AnalysisResult, SentimentLabel};
use texta_primitives::texta_utils::local_heuristic::HeuristicResult;
use texta_primitives::texta_utils::text_stats::TextStats;

const PREVIEW_CHARS: usize = 60;

fn colored_label(label: &str) -> ColoredString {
    match label {
        "POSITIVE" => label.green().bold(),
        "NEGATIVE" => label.red().bold(),
        "NEUTRAL" => label.yellow().bold(),
        _ => label.magenta().bold(),
    }
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

pub fn sentiment_emoji(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "😊",
        SentimentLabel::Negative => "😞",
        SentimentLabel::Neutral => "😐",
    }
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = format!(
        "{} {}  confidence {:.1}%  ({})\n",
        sentiment_emoji(result.sentiment),
        colored_label(result.sentiment.as_str()),
        result.confidence_percent(),
        result.model_name.dimmed()
    );
    out.push_str(&format!(
        "  positive {:.3}  negative {:.3}  neutral {:.3}\n",
        result.positive_score, result.negative_score, result.neutral_score
    ));

    if !result.tone.is_empty() {
        let t = &result.tone;
        out.push_str(&format!(
            "  joy {:.2}  sadness {:.2}  anger {:.2}  fear {:.2}\n  formal {:.2}  casual {:.2}  emotional {:.2}  objective {:.2}\n",
            t.joy_score,
            t.sadness_score,
            t.anger_score,
            t.fear_score,
            t.formal_score,
            t.casual_score,
            t.emotional_score,
            t.objective_score
        ));
    }
    out
}

pub fn render_text_stats(stats: &TextStats) -> String {
    format!(
        "{}\n  characters {} ({} without spaces)\n  words {}  sentences {}  paragraphs {}\n  average word length {:.1}  reading time ~{} min\n",
        "Text statistics".bold(),
        stats.characters,
        stats.characters_no_spaces,
        stats.words,
        stats.sentences,
        stats.paragraphs,
        stats.average_word_length,
        stats.reading_time_minutes
    )
}

pub fn render_heuristic(result: &HeuristicResult) -> String {
    format!(
        "{} {}  confidence {}%  ({} positive / {} negative keywords, local heuristic)\n",
        sentiment_emoji(result.sentiment),
        colored_label(result.sentiment.as_str()),
        result.confidence,
        result.positive_matches,
        result.negative_matches
    )
}

pub fn render_progress(progress: &Progress) -> String {
    format!("[{:>3}%] {}/{}", progress.percent(), progress.current, progress.total)
}

pub fn render_batch(outcomes: &[BatchOutcome]) -> String {
    let mut out = String::new();
    for (index, outcome) in outcomes.iter().enumerate() {
        let detail = match outcome.error() {
            Some(error) => error.red().to_string(),
            None => format!("{:.1}%", outcome.confidence() * 100.0),
        };
        out.push_str(&format!(
            "{:>4}. {:<8} {:>8}  {}\n",
            index + 1,
            colored_label(outcome.sentiment()),
            detail,
            preview(outcome.text())
        ));
    }

    let summary = BatchSummary::from_outcomes(outcomes);
    out.push_str(&format!(
        "{} {} analyzed: {} positive, {} negative, {} neutral, {} failed\n",
        "Summary".bold(),
        summary.total(),
        summary.positive,
        summary.negative,
        summary.neutral,
        summary.failed
    ));
    out
}

pub fn render_comparison(table: &ComparisonTable) -> String {
    let mut out = format!("Comparing models for: {}\n", preview(&table.text).italic());
    for entry in &table.entries {
        let line = match &entry.outcome {
            Ok(result) => format!(
                "  {:<32} {:<8} {:.1}%",
                entry.model.label,
                colored_label(result.sentiment.as_str()),
                result.confidence_percent()
            ),
            Err(error) => format!("  {:<32} {}", entry.model.label, error.red()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    match table.consensus() {
        Some(label) => out.push_str(&format!("Consensus: {}\n", colored_label(label.as_str()))),
        None => out.push_str("Consensus: none\n"),
    }
    out
}

pub fn render_health(url: &str, health: &HealthResponse) -> String {
    format!(
        "{} {} is {} (version {}, {} models)\n",
        "✓".green(),
        url,
        health.status.green(),
        health.version,
        health.models_loaded
    )
}

pub fn render_models(models: &ModelsResponse) -> String {
    let mut out = String::new();
    if models.models.is_empty() {
        for id in &models.available_models {
            out.push_str(&format!("  {}\n", id));
        }
    } else {
        for model in &models.models {
            let marker = if model.id == models.default_model { "*" } else { " " };
            out.push_str(&format!("{} {:<52} {:<30} {}\n", marker, model.id, model.label, model.kind));
        }
    }
    out
}

/// Default export name, e.g. `sentiment_results_20240131_154500.csv`.
pub fn default_export_file_name(now: DateTime<Local>) -> String {
    format!("sentiment_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
