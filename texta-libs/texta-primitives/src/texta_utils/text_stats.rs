use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").expect("static regex");
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").expect("static regex");
}

/// Simple counts shown next to an analysis result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub average_word_length: f64,
    pub reading_time_minutes: usize,
}

pub fn compute_text_stats(text: &str) -> TextStats {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_letters: usize = words
        .iter()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).count())
        .sum();

    let sentences = SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraphs = PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();

    let average_word_length = if words.is_empty() {
        0.0
    } else {
        ((word_letters as f64 / words.len() as f64) * 10.0).round() / 10.0
    };

    TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        words: words.len(),
        sentences,
        paragraphs,
        average_word_length,
        reading_time_minutes: (words.len() + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE,
    }
}
