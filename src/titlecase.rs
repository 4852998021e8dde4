use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::dictionary::Dictionary;
use crate::tokenizer::{TokenKind, Tokenizer};
use crate::utils::{is_blank, join_with_spaces, uppercase_first_letter, uppercase_second_letter};

/// Words after this one are credited artist names and keep their casing.
const FEATURING_MARKER: &str = "(feat.";

/// A word right after one ending in these characters starts a new phrase.
const PHRASE_OPENERS: &[char] = &['(', '[', '{', '“', '‘', '"', ':', '–', '—'];

lazy_static! {
    static ref ALWAYS_LOWERCASE: HashSet<&'static str> = [
        "feat.",
        "(feat.",
        "featuring",
        "(featuring",
        "(live",
        "(remix",
        "(from",
        "(acoustic)",
    ]
    .iter()
    .copied()
    .collect();

    static ref SMALL_WORDS: HashSet<&'static str> = [
        "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "per",
        "so", "the", "to", "up", "via", "yet", "off", "out", "o'", "o’",
    ]
    .iter()
    .copied()
    .collect();

    static ref DOTTED_ABBREVIATION: Regex = Regex::new(r"^(?:\p{L}\.)+\p{L}\.?$").unwrap();
}

/// Convert a title to AP-style title case.
///
/// Blank titles are returned unchanged.
///
/// ```
/// use apcase::{to_ap_title_case, Dictionary};
///
/// let dictionary = Dictionary::new();
/// assert_eq!(to_ap_title_case("war of the worlds", &dictionary), "War of the Worlds");
/// ```
pub fn to_ap_title_case(title: &str, dictionary: &Dictionary) -> String {
    if is_blank(title) {
        return title.to_owned();
    }

    let fragments: Vec<String> = Tokenizer::new(title)
        .map(|token| match token.kind {
            TokenKind::WordGroup | TokenKind::Group => case_fragment(token.text, dictionary),
            _ => token.text.to_owned(),
        })
        .collect();

    fragments.concat()
}

fn case_fragment(fragment: &str, dictionary: &Dictionary) -> String {
    if fragment.chars().nth(1).is_none() {
        return fragment.to_owned();
    }

    match fragment.strip_prefix('(') {
        Some(rest) => format!("({}", case_sentence(rest, dictionary)),
        None => case_sentence(fragment, dictionary),
    }
}

fn case_sentence(sentence: &str, dictionary: &Dictionary) -> String {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    let cased: Vec<String> = words
        .iter()
        .enumerate()
        .map(|(index, &word)| {
            let previous = if index > 0 { words[index - 1] } else { "" };
            let pre_previous = if index > 1 { words[index - 2] } else { "" };

            if previous == FEATURING_MARKER {
                return word.to_owned();
            }

            let force_capital = index == 0
                || index == last
                || previous.ends_with(PHRASE_OPENERS)
                || completes_phrasal_verb(dictionary, word, previous, pre_previous);

            case_word(word, force_capital)
        })
        .collect();

    join_with_spaces(cased.iter())
}

/// Checks the three-word window first, then the two-word one, so that
/// "give up" is found after any word and "give it up" through the object slot.
fn completes_phrasal_verb(
    dictionary: &Dictionary,
    word: &str,
    previous: &str,
    pre_previous: &str,
) -> bool {
    let word = word.to_lowercase();
    let previous = previous.to_lowercase();
    let pre_previous = pre_previous.to_lowercase();

    dictionary.is_phrasal_verb(&word, &word, &previous, &pre_previous)
        || (!pre_previous.is_empty() && dictionary.is_phrasal_verb(&word, &word, &previous, ""))
}

fn case_word(word: &str, force_capital: bool) -> String {
    let lowercase = word.to_lowercase();
    if ALWAYS_LOWERCASE.contains(lowercase.as_str()) {
        return lowercase;
    }

    if let Some(acronym) = preserved_acronym(word) {
        return acronym;
    }

    // every part of a hyphenated compound is capitalized
    if word.contains('-') {
        let parts: Vec<String> = word
            .split('-')
            .map(|part| capitalize_if_needed(part, true))
            .collect();
        return parts.join("-");
    }

    let is_small = SMALL_WORDS.contains(lowercase.as_str());
    capitalize_if_needed(word, force_capital || !is_small)
}

fn capitalize_if_needed(word: &str, capitalize: bool) -> String {
    if is_blank(word) {
        return word.to_owned();
    }

    if let Some(acronym) = preserved_acronym(word) {
        return acronym;
    }

    if !capitalize {
        return word.to_lowercase();
    }

    match word.chars().next() {
        Some(first) if first.is_alphabetic() => uppercase_first_letter(word),
        _ => uppercase_second_letter(word),
    }
}

/// Dotted abbreviations come out upper case, all-caps words as they are.
fn preserved_acronym(word: &str) -> Option<String> {
    if DOTTED_ABBREVIATION.is_match(word) {
        Some(word.to_uppercase())
    } else if word.chars().nth(1).is_some() && word == word.to_uppercase() {
        Some(word.to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_case(title: &str) -> String {
        to_ap_title_case(title, &Dictionary::new())
    }

    fn title_case_with(title: &str, dictionary: &str) -> String {
        to_ap_title_case(title, &Dictionary::parse(dictionary))
    }

    #[test]
    fn test_small_words() {
        assert_eq!(title_case("the cat in the hat"), "The Cat in the Hat");
        assert_eq!(title_case("war of the worlds"), "War of the Worlds");
        assert_eq!(title_case("WAR of THE worlds"), "WAR of THE Worlds");
        assert_eq!(title_case("what are you waiting for"), "What Are You Waiting For");
        assert_eq!(title_case("will o' the wisp"), "Will o' the Wisp");
    }

    #[test]
    fn test_blank_titles() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("   "), "   ");
    }

    #[test]
    fn test_parentheses_and_brackets() {
        assert_eq!(title_case("song title (live)"), "Song Title (Live)");
        assert_eq!(title_case("song title (in the round)"), "Song Title (In the Round)");
        assert_eq!(title_case("hey jude [2015 remaster]"), "Hey Jude [2015 Remaster]");
        assert_eq!(title_case("one (feat. someone)"), "One (feat. Someone)");
    }

    #[test]
    fn test_featured_artist_keeps_casing() {
        assert_eq!(
            title_case("[remix (feat. dj shadow)]"),
            "[Remix (feat. dj Shadow)]"
        );
        assert_eq!(
            title_case("[one (feat. mC hammer) two]"),
            "[One (feat. mC Hammer) Two]"
        );
    }

    #[test]
    fn test_always_lowercase_words() {
        assert_eq!(title_case("song featuring someone"), "Song featuring Someone");
        assert_eq!(title_case("featuring someone"), "featuring Someone");
        assert_eq!(title_case("song featuring"), "Song featuring");
        assert_eq!(title_case("[song (remix by dj x)]"), "[Song (remix by Dj X)]");
        assert_eq!(title_case("[hit (featuring dj x)]"), "[Hit (featuring Dj X)]");
        assert_eq!(title_case("[song (live at wembley)]"), "[Song (live at Wembley)]");
        assert_eq!(title_case("[theme (from the movie)]"), "[Theme (from the Movie)]");
        assert_eq!(title_case("[live (acoustic) version]"), "[Live (acoustic) Version]");

        // lowered before the acronym check and regardless of position
        assert_eq!(case_word("FEATURING", true), "featuring");
        assert_eq!(case_word("(LIVE", true), "(live");
        assert_eq!(case_word("(Remix", true), "(remix");
        assert_eq!(case_word("(Acoustic)", true), "(acoustic)");
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(title_case("u.s.a. anthem"), "U.S.A. Anthem");
        assert_eq!(title_case("born in the U.S.A."), "Born in the U.S.A.");
        assert_eq!(title_case("fly me to NASA now"), "Fly Me to NASA Now");
        assert_eq!(case_word("U.S", false), "U.S");
        assert_eq!(case_word("t.v.", false), "T.V.");
    }

    #[test]
    fn test_separators_split_sentences() {
        assert_eq!(title_case("this/that of the other"), "This/That of the Other");
        assert_eq!(title_case("rock-n-roll"), "Rock-n-Roll");
        assert_eq!(title_case("stop! in the name of love"), "Stop! In the Name of Love");
    }

    #[test]
    fn test_phrase_openers_force_capitals() {
        assert_eq!(title_case("part one: the return"), "Part One: The Return");
        assert_eq!(title_case("love — and other drugs"), "Love — And Other Drugs");
        assert_eq!(title_case("say “the end”"), "Say “The End”");
    }

    #[test]
    fn test_hyphenated_compounds() {
        assert_eq!(case_word("up-to-date", false), "Up-To-Date");
        assert_eq!(
            title_case("[a one-of-a-kind thing]"),
            "[A One-Of-A-Kind Thing]"
        );
    }

    #[test]
    fn test_leading_symbol() {
        assert_eq!(capitalize_if_needed("'til", true), "'Til");
        assert_eq!(capitalize_if_needed("“hello", true), "“Hello");
        assert_eq!(capitalize_if_needed("ThE", false), "the");
    }

    #[test]
    fn test_phrasal_verbs() {
        let dictionary = "give;giving;gave;;up\ngive <sb>;giving <sb>;gave <sb>;;up\n";
        assert_eq!(title_case_with("don't give up", dictionary), "Don't Give Up");
        assert_eq!(title_case_with("don't give up now", dictionary), "Don't Give Up Now");
        assert_eq!(title_case_with("never giving up on you", dictionary), "Never Giving Up on You");
        assert_eq!(title_case_with("never gave it up again", dictionary), "Never Gave It Up Again");
        assert_eq!(title_case_with("the way up the hill", dictionary), "The Way up the Hill");
        assert_eq!(title_case("don't give up now"), "Don't Give up Now");
    }

    #[test]
    fn test_idempotent() {
        for title in &[
            "the cat in the hat",
            "song title (live)",
            "u.s.a. anthem",
            "part one: the return",
        ] {
            let once = title_case(title);
            assert_eq!(title_case(&once), once);
        }
    }
}
