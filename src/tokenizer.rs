use crate::abbreviations::{protect_abbreviations, ProtectedText};

/// Split a title into fragments: bracketed groups, `/`, `-`, `.`, `!`, `?`,
/// single spaces and word groups. Concatenating the fragments gives back the
/// input exactly.
pub fn tokenize(title: &str) -> Vec<&str> {
    Tokenizer::new(title).map(|token| token.text).collect()
}

pub(crate) struct Tokenizer<'a> {
    protected: ProtectedText<'a>,
    offset: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            protected: protect_abbreviations(title),
            offset: 0,
        }
    }

    fn is_protected_at(&self, offset: usize) -> bool {
        self.protected.span_starting_at(offset).is_some()
    }

    /// End of the word group starting at `start`: a maximal run of ordinary
    /// characters and protected abbreviations, with single interior spaces.
    fn word_group_end(&self, start: usize) -> usize {
        let text = self.protected.text();
        let mut position = start;

        loop {
            if let Some(span) = self.protected.span_starting_at(position) {
                position = span.end;
                continue;
            }

            let mut chars = text[position..].chars();
            match chars.next() {
                Some(c) if !is_special(c) => position += c.len_utf8(),
                Some(' ') => {
                    let after = position + 1;
                    let continues = match chars.next() {
                        Some(next) => !is_special(next) || self.is_protected_at(after),
                        None => false,
                    };
                    if continues {
                        position = after;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        position
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.protected.text();
        let rest = &text[self.offset..];
        let first = rest.chars().next()?;

        let (length, kind) = if self.is_protected_at(self.offset) {
            (self.word_group_end(self.offset) - self.offset, TokenKind::WordGroup)
        } else {
            match first {
                '(' => group_length(rest, ')'),
                '[' => group_length(rest, ']'),
                '/' => (1, TokenKind::Slash),
                '-' => (1, TokenKind::Hyphen),
                '.' | '!' | '?' => (1, TokenKind::Punctuation),
                ' ' => (1, TokenKind::Space),
                ')' | ']' => (1, TokenKind::Stray),
                _ => (self.word_group_end(self.offset) - self.offset, TokenKind::WordGroup),
            }
        };

        let token = Token::new(&rest[..length], kind);
        self.offset += length;
        Some(token)
    }
}

fn is_special(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '/' | '-' | '.' | '!' | '?' | ' ')
}

/// A group runs up to the first closing character; nesting is not tracked.
/// An opening character that is never closed becomes a fragment of its own.
fn group_length(rest: &str, closing: char) -> (usize, TokenKind) {
    match rest[1..].find(closing) {
        Some(index) => (index + 1 + closing.len_utf8(), TokenKind::Group),
        None => (1, TokenKind::Stray),
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Group,
    Slash,
    Hyphen,
    Punctuation,
    Space,
    WordGroup,
    Stray,
}

#[derive(Debug, Clone)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, kind: TokenKind) -> Self {
        Self { text, kind }
    }
}
