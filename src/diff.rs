//! Word-level diff between an original and a re-cased title, for previews.

use serde::Deserialize;

use crate::utils::join_with_spaces;

/// Delimiters wrapped around inserted or changed words.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiffMarkup {
    pub open: String,
    pub close: String,
}

impl Default for DiffMarkup {
    fn default() -> Self {
        Self {
            open: "<u>".to_owned(),
            close: "</u>".to_owned(),
        }
    }
}

impl DiffMarkup {
    fn wrap(&self, word: &str) -> String {
        format!("{}{}{}", self.open, word, self.close)
    }
}

/// Return `modified` with every word that is not part of the longest common
/// word subsequence with `original` wrapped in `<u>`/`</u>`.
///
/// ```
/// use apcase::highlight_diff;
///
/// assert_eq!(highlight_diff("hello world", "hello there world"), "hello <u>there</u> world");
/// ```
pub fn highlight_diff(original: &str, modified: &str) -> String {
    highlight_diff_with(original, modified, &DiffMarkup::default())
}

pub fn highlight_diff_with(original: &str, modified: &str, markup: &DiffMarkup) -> String {
    let original: Vec<&str> = original.split_whitespace().collect();
    let modified: Vec<&str> = modified.split_whitespace().collect();
    let lcs = suffix_lcs_table(&original, &modified);

    let mut output: Vec<String> = Vec::with_capacity(modified.len());
    let (mut i, mut j) = (0, 0);

    while i < original.len() && j < modified.len() {
        if original[i] == modified[j] {
            output.push(modified[j].to_owned());
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            // dropped from the original, nothing to show
            i += 1;
        } else {
            output.push(markup.wrap(modified[j]));
            j += 1;
        }
    }

    for word in &modified[j..] {
        output.push(markup.wrap(word));
    }

    join_with_spaces(output.iter()).trim_end().to_owned()
}

/// `table[i][j]` is the LCS length of `a[i..]` and `b[j..]`.
fn suffix_lcs_table(a: &[&str], b: &[&str]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0; b.len() + 1]; a.len() + 1];

    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion() {
        assert_eq!(
            highlight_diff("hello world", "hello there world"),
            "hello <u>there</u> world"
        );
    }

    #[test]
    fn test_unchanged() {
        assert_eq!(highlight_diff("a b c", "a b c"), "a b c");
        assert_eq!(highlight_diff("", ""), "");
    }

    #[test]
    fn test_recased_words_are_marked() {
        assert_eq!(
            highlight_diff("the cat in the hat", "The Cat in the Hat"),
            "<u>The</u> <u>Cat</u> in the <u>Hat</u>"
        );
    }

    #[test]
    fn test_deletions_are_silent() {
        assert_eq!(highlight_diff("a b c d", "a d"), "a d");
        assert_eq!(highlight_diff("a b c", ""), "");
    }

    #[test]
    fn test_trailing_insertions() {
        assert_eq!(highlight_diff("", "x y"), "<u>x</u> <u>y</u>");
        assert_eq!(highlight_diff("a", "a b"), "a <u>b</u>");
    }

    #[test]
    fn test_every_modified_word_appears_once() {
        let modified = "one two three two one";
        let highlighted = highlight_diff("two one three", modified);
        let stripped: Vec<String> = highlighted
            .split_whitespace()
            .map(|word| word.replace("<u>", "").replace("</u>", ""))
            .collect();
        assert_eq!(stripped, modified.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_custom_markup() {
        let markup = DiffMarkup {
            open: "**".to_owned(),
            close: "**".to_owned(),
        };
        assert_eq!(highlight_diff_with("a", "b", &markup), "**b**");
    }

    #[test]
    fn test_lcs_table() {
        let table = suffix_lcs_table(&["a", "b", "c"], &["a", "c"]);
        assert_eq!(table[0][0], 2);
        assert_eq!(table[1][0], 1);
        assert_eq!(table[3][0], 0);
    }
}
