//! Rule-based inflection of phrasal verb bases.
//!
//! A base may end with the object slot marker `" <sb>"` ("give <sb>" as in
//! "give it up"). Every rule inflects only the verb part and puts the marker
//! back afterwards.

/// Marks the object slot of a phrasal verb, e.g. `give <sb> up`.
pub const OBJECT_SLOT: &str = "<sb>";

const OBJECT_SLOT_SUFFIX: &str = " <sb>";

/// Split `"give <sb>"` into `("give", " <sb>")` and `"give"` into `("give", "")`.
fn split_object_slot(verb: &str) -> (&str, &str) {
    if verb.ends_with(OBJECT_SLOT_SUFFIX) {
        verb.split_at(verb.len() - OBJECT_SLOT_SUFFIX.len())
    } else {
        (verb, "")
    }
}

fn inflect<F>(verb: &str, rule: F) -> String
where
    F: FnOnce(&str) -> String,
{
    let (stem, slot) = split_object_slot(verb);
    rule(stem) + slot
}

pub fn gerund(verb: &str) -> String {
    inflect(verb, |stem| format!("{}ing", stem))
}

/// Simple past and past participle share one rule.
pub fn past_tense(verb: &str) -> String {
    inflect(verb, |stem| {
        if let Some(head) = stem.strip_suffix('y') {
            format!("{}ied", head)
        } else if let Some(head) = stem.strip_suffix('e') {
            format!("{}ed", head)
        } else {
            format!("{}ed", stem)
        }
    })
}

pub fn third_person(verb: &str) -> String {
    inflect(verb, |stem| {
        if stem.ends_with('s') {
            format!("{}es", stem)
        } else {
            format!("{}s", stem)
        }
    })
}

/// Informal spelling of a gerund with a dropped "g": "givin'" from "giving".
/// Only the trailing "ing" of the verb part is replaced.
pub fn informal_gerund(gerund: &str, apostrophe: char) -> String {
    inflect(gerund, |stem| match stem.strip_suffix("ing") {
        Some(head) => format!("{}in{}", head, apostrophe),
        None => stem.to_owned(),
    })
}
