use crate::normalize::{Lemmatizer, PartOfSpeech};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Irregular plurals that suffix rules cannot reach.
static NOUN_EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("knives", "knife"),
        ("halves", "half"),
        ("calves", "calf"),
        ("hooves", "hoof"),
        ("shelves", "shelf"),
        ("loaves", "loaf"),
        ("scarves", "scarf"),
        ("thieves", "thief"),
    ]
    .into_iter()
    .collect()
});

/// Irregular past/participle forms.
static VERB_EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("sang", "sing"),
        ("sung", "sing"),
        ("rang", "ring"),
        ("rung", "ring"),
        ("ran", "run"),
        ("blew", "blow"),
        ("blown", "blow"),
        ("flew", "fly"),
        ("flown", "fly"),
        ("drove", "drive"),
        ("driven", "drive"),
        ("broke", "break"),
        ("broken", "break"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("struck", "strike"),
        ("fell", "fall"),
        ("fallen", "fall"),
        ("beaten", "beat"),
        ("bitten", "bite"),
        ("hidden", "hide"),
        ("shaken", "shake"),
        ("heard", "hear"),
        ("said", "say"),
        ("made", "make"),
        ("came", "come"),
        ("went", "go"),
        ("took", "take"),
        ("taken", "take"),
    ]
    .into_iter()
    .collect()
});

/// Rule-based English lemmatizer.
///
/// Follows the WordNet morphy scheme: an exception list first, then suffix
/// detachment rules per grammatical category. Without a lexicon to validate
/// candidates against, the rules carry guards (minimum stem length, a vowel
/// in the stem, sibilant checks) instead; unknown forms pass through
/// unchanged. Adjective and adverb detachment would strip "-er"/"-est" off
/// ordinary nouns when left unvalidated, so those categories are identity
/// here and plural/verbal reduction carries the matching load.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn noun(token: &str) -> String {
        if let Some(lemma) = NOUN_EXCEPTIONS.get(token) {
            return (*lemma).to_string();
        }
        strip_plural(token).unwrap_or_else(|| token.to_string())
    }

    fn verb(token: &str) -> String {
        if let Some(lemma) = VERB_EXCEPTIONS.get(token) {
            return (*lemma).to_string();
        }

        if let Some(stem) = token.strip_suffix("ies").filter(|s| s.len() >= 2) {
            return format!("{stem}y");
        }
        if let Some(stem) = token.strip_suffix("ied").filter(|s| s.len() >= 2) {
            return format!("{stem}y");
        }
        if let Some(stem) = strip_verbal(token, "ing") {
            return stem;
        }
        if let Some(stem) = strip_verbal(token, "ed") {
            return stem;
        }
        if let Some(stem) = strip_plural(token) {
            return stem;
        }
        token.to_string()
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, token: &str, pos: PartOfSpeech) -> String {
        match pos {
            PartOfSpeech::Noun => Self::noun(token),
            PartOfSpeech::Verb => Self::verb(token),
            PartOfSpeech::Adjective | PartOfSpeech::Adverb => token.to_string(),
        }
    }
}

/// Undo regular pluralization: "-ies" -> "-y", sibilant "-es", plain "-s".
/// Returns None when no rule applies safely.
fn strip_plural(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("ies").filter(|s| s.len() >= 2) {
        return Some(format!("{stem}y"));
    }
    if let Some(stem) = token.strip_suffix("es") {
        // "-es" only attaches after sibilants: dishes, churches, boxes,
        // glasses. A single trailing "s" means an "-se" base word instead
        // (noises, horses), which the plain "-s" rule below handles.
        let sibilant = stem.ends_with("ss")
            || stem.ends_with("zz")
            || stem.ends_with('x')
            || stem.ends_with("ch")
            || stem.ends_with("sh");
        if sibilant && stem.len() >= 3 {
            return Some(stem.to_string());
        }
    }
    if let Some(stem) = token.strip_suffix('s') {
        let blocked = stem.ends_with('s') || stem.ends_with('u') || stem.ends_with('i');
        if !blocked && stem.len() >= 3 {
            return Some(stem.to_string());
        }
    }
    None
}

/// Undo "-ing"/"-ed" attachment. The stem must keep a vowel ("string" stays
/// put) and must not end in "e" ("speed" is not "spe" + "ed"). Doubled final
/// consonants from attachment are undoubled (tapping -> tap) and stems
/// ending in consonant + "l" get their "e" back (crackling -> crackle).
fn strip_verbal(token: &str, suffix: &str) -> Option<String> {
    let stem = token.strip_suffix(suffix)?;
    if stem.chars().count() < 3 || stem.ends_with('e') || !stem.chars().any(is_vowel) {
        return None;
    }

    let mut tail = stem.chars().rev();
    let (Some(last), Some(prev)) = (tail.next(), tail.next()) else {
        return None;
    };

    // crackl -> crackle, gurgl -> gurgle, whistl -> whistle
    if last == 'l' && !is_vowel(prev) && prev != 'l' {
        return Some(format!("{stem}e"));
    }

    // tapp -> tap, humm -> hum; never for l/r/s/z/f, where doubling is part
    // of the base word (drill, purr, hiss, buzz, huff)
    if last == prev
        && matches!(last, 'b' | 'd' | 'g' | 'k' | 'm' | 'n' | 'p' | 't' | 'v')
        && stem.len() >= 4
    {
        return Some(stem[..stem.len() - 1].to_string());
    }

    Some(stem.to_string())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noun(token: &str) -> String {
        EnglishLemmatizer.lemmatize(token, PartOfSpeech::Noun)
    }

    fn verb(token: &str) -> String {
        EnglishLemmatizer.lemmatize(token, PartOfSpeech::Verb)
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(noun("engines"), "engine");
        assert_eq!(noun("cars"), "car");
        assert_eq!(noun("bells"), "bell");
        assert_eq!(noun("keys"), "key");
    }

    #[test]
    fn sibilant_plurals() {
        assert_eq!(noun("dishes"), "dish");
        assert_eq!(noun("churches"), "church");
        assert_eq!(noun("boxes"), "box");
        assert_eq!(noun("buzzes"), "buzz");
        assert_eq!(noun("classes"), "class");
    }

    #[test]
    fn y_plurals() {
        assert_eq!(noun("melodies"), "melody");
        assert_eq!(noun("cries"), "cry");
    }

    #[test]
    fn plural_guards_leave_base_forms_alone() {
        assert_eq!(noun("bus"), "bus");
        assert_eq!(noun("glass"), "glass");
        assert_eq!(noun("gas"), "gas");
        assert_eq!(noun("this"), "this");
    }

    #[test]
    fn irregular_nouns() {
        assert_eq!(noun("leaves"), "leaf");
        assert_eq!(noun("mice"), "mouse");
        assert_eq!(noun("children"), "child");
    }

    #[test]
    fn progressive_forms() {
        assert_eq!(verb("barking"), "bark");
        assert_eq!(verb("revving"), "rev");
        assert_eq!(verb("tapping"), "tap");
        assert_eq!(verb("humming"), "hum");
        assert_eq!(verb("whistling"), "whistle");
        assert_eq!(verb("crackling"), "crackle");
    }

    #[test]
    fn progressive_guards() {
        // no vowel left, or the "-ing" is part of the word
        assert_eq!(verb("string"), "string");
        assert_eq!(verb("ring"), "ring");
        assert_eq!(verb("sing"), "sing");
        // doubling kept where it belongs to the base word
        assert_eq!(verb("hissing"), "hiss");
        assert_eq!(verb("buzzing"), "buzz");
        assert_eq!(verb("purring"), "purr");
        assert_eq!(verb("drilling"), "drill");
    }

    #[test]
    fn past_forms() {
        assert_eq!(verb("crashed"), "crash");
        assert_eq!(verb("clapped"), "clap");
        assert_eq!(verb("cried"), "cry");
        // "-eed" stems are never split
        assert_eq!(verb("speed"), "speed");
    }

    #[test]
    fn irregular_verbs() {
        assert_eq!(verb("sang"), "sing");
        assert_eq!(verb("rang"), "ring");
        assert_eq!(verb("broken"), "break");
    }

    #[test]
    fn adjectives_and_adverbs_pass_through() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("louder", PartOfSpeech::Adjective), "louder");
        assert_eq!(lemmatizer.lemmatize("loudly", PartOfSpeech::Adverb), "loudly");
    }

    #[test]
    fn unknown_forms_pass_through() {
        assert_eq!(noun("engine"), "engine");
        assert_eq!(verb("noise"), "noise");
    }
}
