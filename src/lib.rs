//! AP-style title casing for song and track titles.
//!
//! Words are capitalized except for a short list of articles, conjunctions
//! and prepositions, which stay lower case unless they open or close the
//! title, follow an opening bracket, quote, colon or dash, or complete a
//! phrasal verb ("Give Up", "Give It Up"). Bracketed asides are cased on their
//! own, dotted abbreviations and all-caps words are kept, and words following
//! a `(feat.` credit are left untouched.
//!
//! Phrasal verbs come from a [`Dictionary`]: a packaged baseline merged into
//! a user-editable file.
//!
//! # Usage
//!
//! ```
//! use apcase::{highlight_diff, to_ap_title_case, Dictionary};
//!
//! let dictionary = Dictionary::builtin();
//!
//! let cased = to_ap_title_case("never gonna give you up (live at the u.s. open)", &dictionary);
//! assert_eq!(cased, "Never Gonna Give You Up (Live at the U.S. Open)");
//!
//! let cased = to_ap_title_case("don't give up on me", &dictionary);
//! assert_eq!(cased, "Don't Give Up on Me");
//!
//! assert_eq!(
//!     highlight_diff("the cat in the hat", "The Cat in the Hat"),
//!     "<u>The</u> <u>Cat</u> in the <u>Hat</u>"
//! );
//! ```
//!
//! A dictionary backed by a user file, reloaded whenever that file changes:
//!
//! ```no_run
//! use apcase::{to_ap_title_case, Baseline, SharedDictionary};
//!
//! let shared = SharedDictionary::open_or_empty(Baseline::Builtin, "phrasal_verbs_en.txt");
//! let cased = to_ap_title_case("wake me up", &shared.snapshot());
//! ```

mod abbreviations;
mod config;
mod diff;
mod dictionary;
mod errors;
mod morphology;
mod shared;
mod titlecase;
mod tokenizer;
mod utils;

pub use abbreviations::{protect_abbreviations, ProtectedSpan, ProtectedText};
pub use config::Config;
pub use diff::{highlight_diff, highlight_diff_with, DiffMarkup};
pub use dictionary::{Baseline, Dictionary, PhrasalVerbEntry, BUILTIN_BASELINE};
pub use errors::{ConfigError, DictionaryError, DictionaryLoadError, DictionaryPersistError};
pub use morphology::OBJECT_SLOT;
pub use shared::SharedDictionary;
pub use titlecase::to_ap_title_case;
pub use tokenizer::tokenize;
