use super::error::AnalyzerError;
use texta_primitives::schemas::model_descriptor::{ModelDescriptor, ModelKind};
use texta_primitives::schemas::sentiment::{AnalysisResult, LabelScore, SentimentLabel, ToneScores};

/// Maps one provider label onto the three sentiment labels, taking the
/// model's output shape into account. `None` means the label is unknown.
pub fn normalize_label(kind: ModelKind, raw: &str) -> Option<SentimentLabel> {
    let label = raw.trim().to_uppercase();

    match label.as_str() {
        "POSITIVE" | "POS" => return Some(SentimentLabel::Positive),
        "NEGATIVE" | "NEG" => return Some(SentimentLabel::Negative),
        "NEUTRAL" | "NEU" => return Some(SentimentLabel::Neutral),
        _ => {}
    }

    if let Some(index) = label.strip_prefix("LABEL_") {
        return match (kind, index) {
            (ModelKind::Binary, "0") => Some(SentimentLabel::Negative),
            (ModelKind::Binary, "1") => Some(SentimentLabel::Positive),
            (ModelKind::Binary, _) => None,
            (_, "0") => Some(SentimentLabel::Negative),
            (_, "1") => Some(SentimentLabel::Neutral),
            (_, "2") => Some(SentimentLabel::Positive),
            _ => None,
        };
    }

    if kind == ModelKind::Rating {
        let stars = label.strip_suffix(" STARS").or_else(|| label.strip_suffix(" STAR"))?;
        return match stars.trim().parse::<u8>().ok()? {
            1 | 2 => Some(SentimentLabel::Negative),
            3 => Some(SentimentLabel::Neutral),
            4 | 5 => Some(SentimentLabel::Positive),
            _ => None,
        };
    }

    None
}

/// Turns a provider label distribution into an `AnalysisResult`.
///
/// Entries named after a tone subscore (`joy`, `fear`, ...) are copied into
/// the tone fields. Every other entry must normalize to a sentiment label or
/// the whole response is rejected. The top scoring sentiment entry decides
/// the label and confidence; per-label scores are summed.
pub fn normalize_scores(
    model: &ModelDescriptor,
    text: &str,
    scores: &[LabelScore],
) -> Result<AnalysisResult, AnalyzerError> {
    let mut tone = ToneScores::default();
    let mut best: Option<(SentimentLabel, f64)> = None;
    let (mut positive, mut negative, mut neutral) = (0.0, 0.0, 0.0);

    for entry in scores {
        if tone.set_by_name(&entry.label, entry.score) {
            continue;
        }

        let label = normalize_label(model.kind, &entry.label).ok_or_else(|| AnalyzerError::UnknownLabel {
            model: model.id.clone(),
            label: entry.label.clone(),
        })?;

        match label {
            SentimentLabel::Positive => positive += entry.score,
            SentimentLabel::Negative => negative += entry.score,
            SentimentLabel::Neutral => neutral += entry.score,
        }

        if best.map(|(_, score)| entry.score > score).unwrap_or(true) {
            best = Some((label, entry.score));
        }
    }

    let (sentiment, confidence) = best.ok_or_else(|| {
        AnalyzerError::MalformedResponse(format!("no sentiment labels in response from {}", model.id))
    })?;

    Ok(AnalysisResult::new(text, sentiment, confidence, &model.id)
        .with_polarity_scores(positive, negative, neutral)
        .with_tone(tone))
}
