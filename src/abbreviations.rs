//! Protection of dotted letter abbreviations ("U.S.A.", "T.V.") from the tokenizer.
//!
//! The tokenizer treats `.` as a fragment of its own, so an abbreviation would
//! otherwise be torn apart letter by letter. Instead of swapping abbreviations
//! for placeholder strings, protected regions are recorded as byte spans over
//! the original text. The tokenizer consumes a protected span as ordinary word
//! characters and hands out slices of the input, so restoring is a no-op and a
//! placeholder can never collide with real title text.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOTTED_ABBREVIATION: Regex = Regex::new(r"\b(?:\p{L}\.){2,}").unwrap();
}

/// One occurrence of an abbreviation in the protected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    /// Byte offset where the abbreviation starts.
    pub start: usize,
    /// Byte offset right after the abbreviation.
    pub end: usize,
    /// Index into [`ProtectedText::abbreviations`]. Textually identical
    /// abbreviations share one index.
    pub index: usize,
}

impl ProtectedSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Text together with the abbreviation spans that must not be split.
#[derive(Debug, Clone)]
pub struct ProtectedText<'a> {
    text: &'a str,
    spans: Vec<ProtectedSpan>,
    abbreviations: Vec<&'a str>,
}

/// Find every dotted abbreviation in `text`.
pub fn protect_abbreviations(text: &str) -> ProtectedText {
    let matches: Vec<Range<usize>> = DOTTED_ABBREVIATION
        .find_iter(text)
        .map(|mat| mat.range())
        .collect();

    let mut abbreviations: Vec<&str> = Vec::new();
    let spans = matches
        .into_iter()
        .map(|range| {
            let abbreviation = &text[range.clone()];
            let index = match abbreviations.iter().position(|&a| a == abbreviation) {
                Some(index) => index,
                None => {
                    abbreviations.push(abbreviation);
                    abbreviations.len() - 1
                }
            };
            ProtectedSpan {
                start: range.start,
                end: range.end,
                index,
            }
        })
        .collect();

    ProtectedText {
        text,
        spans,
        abbreviations,
    }
}

impl<'a> ProtectedText<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Spans in the order they appear in the text.
    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    /// Distinct abbreviations, in order of first appearance.
    pub fn abbreviations(&self) -> &[&'a str] {
        &self.abbreviations
    }

    /// The span starting exactly at `offset`, if there is one.
    pub(crate) fn span_starting_at(&self, offset: usize) -> Option<&ProtectedSpan> {
        self.spans
            .binary_search_by_key(&offset, |span| span.start)
            .ok()
            .map(|i| &self.spans[i])
    }
}
