use crate::schemas::batch::BatchOutcome;
use thiserror::Error;

pub const EXPORT_HEADERS: [&str; 8] = [
    "text",
    "sentiment",
    "confidence",
    "model_name",
    "positive_score",
    "negative_score",
    "neutral_score",
    "error",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Exported data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders batch outcomes as CSV, one row per item in input order. Failed
/// items keep their text and carry the error message in the last column.
pub fn export_results_csv(outcomes: &[BatchOutcome]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for outcome in outcomes {
        let (positive, negative, neutral) = match outcome.as_result() {
            Some(result) => (result.positive_score, result.negative_score, result.neutral_score),
            None => (0.0, 0.0, 0.0),
        };
        writer.write_record([
            outcome.text().to_string(),
            outcome.sentiment().to_string(),
            format!("{:.4}", outcome.confidence()),
            outcome.model_name().to_string(),
            format!("{:.4}", positive),
            format!("{:.4}", negative),
            format!("{:.4}", neutral),
            outcome.error().unwrap_or_default().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::batch::FailedAnalysis;
    use crate::schemas::sentiment::{AnalysisResult, SentimentLabel};
    use crate::texta_utils::csv_sniffer::sniff_csv;

    fn outcomes() -> Vec<BatchOutcome> {
        vec![
            AnalysisResult::new("I love it, truly", SentimentLabel::Positive, 0.98, "m")
                .with_polarity_scores(0.98, 0.02, 0.0)
                .into(),
            FailedAnalysis::new("second", "m", "Model is loading").into(),
        ]
    }

    #[test]
    fn test_export_rows_and_header() {
        let csv = export_results_csv(&outcomes()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADERS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("\"I love it, truly\",POSITIVE,0.9800,m,0.9800,0.0200,0.0000,")
        );
        assert_eq!(lines.next(), Some("second,ERROR,0.0000,m,0.0000,0.0000,0.0000,Model is loading"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_can_be_read_back_by_the_sniffer() {
        let csv = export_results_csv(&outcomes()).unwrap();
        let batch = sniff_csv(&csv).unwrap();
        assert!(batch.has_headers);
        assert_eq!(batch.text_column_name(), Some("text"));
        assert_eq!(batch.texts, vec!["I love it, truly", "second"]);
    }

    #[test]
    fn test_multi_line_texts_survive_the_round_trip() {
        let outcomes: Vec<BatchOutcome> = vec![
            AnalysisResult::new("first line\nsecond line", SentimentLabel::Neutral, 0.5, "m").into(),
            AnalysisResult::new("plain", SentimentLabel::Positive, 0.9, "m").into(),
        ];
        let csv = export_results_csv(&outcomes).unwrap();
        let batch = sniff_csv(&csv).unwrap();
        assert_eq!(batch.texts, vec!["first line\nsecond line", "plain"]);
        assert_eq!(batch.total_rows, 2);
    }

    #[test]
    fn test_empty_export_has_only_header() {
        let csv = export_results_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), EXPORT_HEADERS.join(","));
    }
}
