//! Text cleaning and simple count variables for assembled speeches.
//!
//! Cleaning casefolds the speech, keeps only ASCII letters and drops
//! English stop words. Topic variables count keyword occurrences among the
//! cleaned tokens.

use crate::models::{ProcessedSpeech, SpeechRecord};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{info, instrument};

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z]+").unwrap());

/// English stop words, plus a few words that are frequent in speeches but
/// carry no topic.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
    // speech filler
    "would", "also", "one", "new",
];

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Keyword sets behind each topic count.
pub const GROWTH_KEYWORDS: &[&str] = &["growth", "economic"];
pub const INFLATION_KEYWORDS: &[&str] = &["inflation", "price", "prices"];
pub const INEQUALITY_KEYWORDS: &[&str] = &["inequality", "distribution", "distributions"];
pub const CLIMATE_KEYWORDS: &[&str] =
    &["environment", "environments", "climate", "climates", "green", "greens"];

/// Casefold, strip everything but letters and remove stop words.
pub fn clean_text(text: &str) -> String {
    let folded = text.to_lowercase();
    let letters = NON_LETTERS.replace_all(&folded, " ");
    letters
        .split_whitespace()
        .filter(|word| !STOP_SET.contains(*word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of tokens that appear in `keywords`.
pub fn count_keywords(tokens: &[&str], keywords: &[&str]) -> usize {
    tokens.iter().filter(|token| keywords.contains(*token)).count()
}

/// Derive the cleaned text and count variables for one speech.
pub fn process_speech(speech: SpeechRecord) -> ProcessedSpeech {
    let year = NaiveDate::parse_from_str(&speech.metadata.date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year());
    let speech_clean = clean_text(&speech.speech_text);
    let num_words = speech.speech_text.split_whitespace().count();

    let tokens: Vec<&str> = speech_clean.split(' ').filter(|t| !t.is_empty()).collect();
    let growth_count = count_keywords(&tokens, GROWTH_KEYWORDS);
    let inflation_count = count_keywords(&tokens, INFLATION_KEYWORDS);
    let inequality_count = count_keywords(&tokens, INEQUALITY_KEYWORDS);
    let climate_count = count_keywords(&tokens, CLIMATE_KEYWORDS);

    ProcessedSpeech {
        speech,
        year,
        speech_clean,
        num_words,
        growth_count,
        inflation_count,
        inequality_count,
        climate_count,
    }
}

/// Process every row of an assembled dataset.
#[instrument(level = "info", skip_all, fields(rows = speeches.len()))]
pub fn process_all(speeches: Vec<SpeechRecord>) -> Vec<ProcessedSpeech> {
    let processed: Vec<ProcessedSpeech> = speeches.into_iter().map(process_speech).collect();
    let empty = processed.iter().filter(|row| row.num_words == 0).count();
    info!(rows = processed.len(), empty_speeches = empty, "Processed speeches");
    processed
}
