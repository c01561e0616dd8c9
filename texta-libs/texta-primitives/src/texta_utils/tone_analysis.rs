use crate::schemas::sentiment::ToneScores;
use lazy_static::lazy_static;
use regex::Regex;

const JOY_WORDS: &[&str] = &[
    "happy", "joy", "excited", "delighted", "pleased", "thrilled", "ecstatic", "elated", "cheerful", "jubilant",
    "wonderful", "fantastic", "amazing", "great", "good", "excellent", "superb", "marvelous", "terrific", "fabulous",
    "incredible", "love", "like", "enjoy", "fun", "laugh", "smile", "bright", "sunny", "positive", "optimistic",
    "hopeful", "inspired",
];

const SADNESS_WORDS: &[&str] = &[
    "sad", "depressed", "melancholy", "sorrowful", "grief", "despair", "hopeless", "miserable", "gloomy", "unhappy",
    "disappointed", "heartbroken", "devastated", "crushed", "defeated", "lonely", "isolated", "abandoned", "rejected",
    "hurt", "pain", "suffering", "tears", "crying", "weep", "mourn", "grieve", "terrible", "awful", "dreadful",
    "horrible",
];

const ANGER_WORDS: &[&str] = &[
    "angry", "furious", "enraged", "irritated", "annoyed", "frustrated", "outraged", "livid", "fuming", "mad", "rage",
    "wrath", "hostile", "aggressive", "violent", "hate", "despise", "loathe", "abhor", "detest", "resent", "bitter",
    "fierce", "savage", "brutal", "terrible", "awful", "horrible", "dreadful",
];

const FEAR_WORDS: &[&str] = &[
    "afraid", "scared", "terrified", "anxious", "worried", "nervous", "fearful", "panicked", "horrified", "frightened",
    "alarmed", "startled", "shocked", "dread", "terror", "panic", "hysteria", "paranoia", "suspicious", "cautious",
    "hesitant", "timid", "shy", "cowardly", "weak", "vulnerable",
];

const FORMAL_WORDS: &[&str] = &[
    "therefore", "consequently", "furthermore", "moreover", "thus", "hence", "accordingly", "subsequently",
    "nevertheless", "nonetheless", "however", "whereas", "although", "despite", "notwithstanding", "in addition",
    "further", "additionally", "as a result", "for this reason", "in conclusion", "to summarize",
];

const CASUAL_WORDS: &[&str] = &[
    "hey", "cool", "awesome", "great", "nice", "okay", "yeah", "yep", "nope", "wow", "omg", "lol", "haha", "fun",
    "amazing", "incredible", "fantastic", "super", "rad", "sweet", "neat", "wonderful", "lovely", "beautiful",
    "gorgeous", "stunning", "breathtaking", "mind-blowing", "epic", "legendary",
];

const EMOTIONAL_WORDS: &[&str] = &[
    "love", "hate", "feel", "emotion", "passion", "heart", "soul", "crying", "laughing", "happy", "sad", "angry",
    "scared", "excited", "worried", "nervous", "confident", "proud", "ashamed", "guilty", "jealous", "envious",
    "grateful", "thankful", "blessed", "fortunate", "lucky", "unlucky", "miserable", "ecstatic", "thrilled",
    "devastated", "heartbroken",
];

const OBJECTIVE_WORDS: &[&str] = &[
    "data", "evidence", "research", "study", "analysis", "statistics", "facts", "objective", "empirical",
    "scientific", "measured", "quantified", "verified", "confirmed", "validated", "proven", "demonstrated",
    "established", "documented", "recorded", "observed", "witnessed", "reported", "stated", "declared", "announced",
    "published", "released",
];

lazy_static! {
    // Keeps hyphens so entries like "mind-blowing" survive tokenizing.
    static ref TOKEN_BOUNDARY: Regex = Regex::new(r"[^\w-]+").expect("static regex");
}

/// Rule-based emotion and tone estimate. Each subscore is stepped by the
/// number of keyword hits: 0, 0.3, 0.6, 0.8, then 1.0 for four or more.
pub fn analyze_tone(text: &str) -> ToneScores {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_BOUNDARY.split(&lowered).filter(|t| !t.is_empty()).collect();

    ToneScores {
        joy_score: score_for(&lowered, &tokens, JOY_WORDS),
        sadness_score: score_for(&lowered, &tokens, SADNESS_WORDS),
        anger_score: score_for(&lowered, &tokens, ANGER_WORDS),
        fear_score: score_for(&lowered, &tokens, FEAR_WORDS),
        formal_score: score_for(&lowered, &tokens, FORMAL_WORDS),
        casual_score: score_for(&lowered, &tokens, CASUAL_WORDS),
        emotional_score: score_for(&lowered, &tokens, EMOTIONAL_WORDS),
        objective_score: score_for(&lowered, &tokens, OBJECTIVE_WORDS),
    }
}

fn score_for(lowered: &str, tokens: &[&str], words: &[&str]) -> f64 {
    let (phrases, single): (Vec<&str>, Vec<&str>) = words.iter().copied().partition(|w| w.contains(' '));

    let word_hits = tokens.iter().filter(|t| single.contains(*t)).count();
    let phrase_hits = phrases.iter().filter(|p| lowered.contains(**p)).count();

    match word_hits + phrase_hits {
        0 => 0.0,
        1 => 0.3,
        2 => 0.6,
        3 => 0.8,
        _ => 1.0,
    }
}
