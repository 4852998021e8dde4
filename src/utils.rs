/// Uppercase the first character and lowercase everything after it.
pub(crate) fn uppercase_first_letter(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + &c.as_str().to_lowercase(),
    }
}

/// Keep the first character as is, uppercase the second one and lowercase the rest.
/// Used for words that open with a quote or some other symbol.
pub(crate) fn uppercase_second_letter(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => {
            let mut string = String::with_capacity(s.len());
            string.push(f);
            string.push_str(&uppercase_first_letter(c.as_str()));
            string
        }
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

pub(crate) fn join_with_spaces<I>(mut iter: I) -> String
where
    I: Iterator + Clone,
    I::Item: AsRef<str>,
{
    let length: usize = iter
        .clone()
        .map(|item| item.as_ref().len() + 1)
        .sum::<usize>()
        .saturating_sub(1);
    let mut string = String::with_capacity(length);

    match iter.next() {
        Some(item) => string.push_str(item.as_ref()),
        None => return string,
    };

    for item in iter {
        string.push(' ');
        string.push_str(item.as_ref());
    }
    string
}
