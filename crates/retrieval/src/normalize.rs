use once_cell::sync::Lazy;
use std::collections::HashSet;

/// English stop words (the NLTK list). Contraction fragments like "t" and
/// "don" are listed separately because the tokenizer splits on apostrophes.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
        "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y",
        "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't",
        "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
        "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
        "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Grammatical category a lemmatizer reduces under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adjective,
    Noun,
    Verb,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adverb,
    ];
}

/// Maps a token to its canonical form under one grammatical category.
///
/// The capability seam for morphological normalization; [`preprocess`]
/// reduces each token under all four categories and keeps the shortest
/// result, favoring maximal stemming without a part-of-speech tagger.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str, pos: PartOfSpeech) -> String;
}

/// Split free text into word tokens. `/` separates words (tags like
/// "field-recording/birds" are two words), as do whitespace and any other
/// punctuation except `-`, which stays inside tokens for the hyphenated-word
/// check in [`preprocess`].
pub fn tokenize(text: &str) -> Vec<String> {
    text.replace('/', " ")
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize tokens into an ordered set of terms:
/// word filter, smart lowercasing, optional lemmatization, stop-word
/// removal, order-preserving dedup. Empty input yields an empty set.
pub fn preprocess(tokens: &[String], lemmatizer: Option<&dyn Lemmatizer>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for token in tokens {
        if !is_word(token) {
            continue;
        }
        let mut term = smart_lowercase(token);
        if let Some(lemmatizer) = lemmatizer {
            term = shortest_lemma(lemmatizer, &term);
        }
        if STOP_WORDS.contains(term.as_str()) {
            continue;
        }
        if seen.insert(term.clone()) {
            terms.push(term);
        }
    }

    terms
}

/// A token is a word if it is purely alphabetic once hyphens are stripped,
/// so "field-recording" passes while "44kHz" and "!" do not.
fn is_word(token: &str) -> bool {
    let mut chars = token.chars().filter(|&c| c != '-').peekable();
    chars.peek().is_some() && chars.all(char::is_alphabetic)
}

/// Lowercase a word unless that would alter a character other than the
/// first one: "Engine" becomes "engine" but "kHz" keeps its capitalization.
fn smart_lowercase(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut word_tail = word.chars();
    let mut lower_tail = lower.chars();
    word_tail.next();
    lower_tail.next();
    if word_tail.as_str() == lower_tail.as_str() {
        lower
    } else {
        word.to_string()
    }
}

/// Reduce a token under every grammatical category and keep the shortest
/// result; earlier categories win ties.
fn shortest_lemma(lemmatizer: &dyn Lemmatizer, token: &str) -> String {
    let mut best = lemmatizer.lemmatize(token, PartOfSpeech::Adjective);
    for pos in [PartOfSpeech::Noun, PartOfSpeech::Verb, PartOfSpeech::Adverb] {
        let lemma = lemmatizer.lemmatize(token, pos);
        if lemma.len() < best.len() {
            best = lemma;
        }
    }
    best
}
