use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::errors::{DictionaryError, DictionaryLoadError, DictionaryPersistError};
use crate::morphology::{self, OBJECT_SLOT};
use crate::utils::join_with_spaces;

/// Phrasal verbs shipped with the crate, in the dictionary file format.
pub const BUILTIN_BASELINE: &str = include_str!("../data/phrasal_verbs_en.txt");

/// Words that stand in an object slot: "give *it* up", "let *them* down".
const PRONOUNS: &[&str] = &[
    "me", "you", "him", "her", "it", "us", "them", "anybody", "nobody", "somebody", "anyone",
    "noone", "someone",
];

const FIELD_SEPARATOR: char = ';';
const FIELD_COUNT: usize = 5;

/// One row of the phrasal verb dictionary.
///
/// Equality only looks at the base verb and the particle.
#[derive(Debug, Clone)]
pub struct PhrasalVerbEntry {
    base_verb: String,
    gerund: String,
    simple_past: String,
    past_participle: String,
    particle: String,
}

impl PhrasalVerbEntry {
    /// Create an entry, deriving every empty inflection from `base_verb`.
    ///
    /// The past participle always ends up equal to the simple past, even if
    /// one is given explicitly.
    pub fn new(
        base_verb: &str,
        gerund: &str,
        simple_past: &str,
        _past_participle: &str,
        particle: &str,
    ) -> Self {
        let gerund = if gerund.is_empty() {
            morphology::gerund(base_verb)
        } else {
            gerund.to_owned()
        };
        let simple_past = if simple_past.is_empty() {
            morphology::past_tense(base_verb)
        } else {
            simple_past.to_owned()
        };
        let past_participle = simple_past.clone();

        Self {
            base_verb: base_verb.to_owned(),
            gerund,
            simple_past,
            past_participle,
            particle: particle.to_owned(),
        }
    }

    /// Parse one `verb;gerund;simple_past;past_participle;particle` line.
    /// Comments, blank lines and lines with the wrong number of fields give `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            trace!(line, "skipping dictionary line with {} fields", fields.len());
            return None;
        }
        if fields[0].is_empty() || fields[4].is_empty() {
            trace!(line, "skipping dictionary line without verb or particle");
            return None;
        }

        Some(Self::new(fields[0], fields[1], fields[2], fields[3], fields[4]))
    }

    pub fn base_verb(&self) -> &str {
        &self.base_verb
    }

    pub fn gerund(&self) -> &str {
        &self.gerund
    }

    pub fn simple_past(&self) -> &str {
        &self.simple_past
    }

    pub fn past_participle(&self) -> &str {
        &self.past_participle
    }

    pub fn particle(&self) -> &str {
        &self.particle
    }

    /// Every spelling the verb part can take in a title.
    pub fn surface_forms(&self) -> Vec<String> {
        vec![
            self.base_verb.clone(),
            morphology::third_person(&self.base_verb),
            self.gerund.clone(),
            morphology::informal_gerund(&self.gerund, '\''),
            morphology::informal_gerund(&self.gerund, '’'),
            self.simple_past.clone(),
            self.past_participle.clone(),
        ]
    }

    /// Whether `expression` is `"<surface form> <particle>"` for this entry.
    pub fn matches(&self, expression: &str) -> bool {
        let verb_part = match expression
            .strip_suffix(self.particle.as_str())
            .and_then(|head| head.strip_suffix(' '))
        {
            Some(verb_part) => verb_part,
            None => return false,
        };

        self.surface_forms().iter().any(|form| form == verb_part)
    }
}

impl PartialEq for PhrasalVerbEntry {
    fn eq(&self, other: &Self) -> bool {
        self.base_verb == other.base_verb && self.particle == other.particle
    }
}

impl Eq for PhrasalVerbEntry {}

impl fmt::Display for PhrasalVerbEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{}",
            self.base_verb, self.gerund, self.simple_past, self.past_participle, self.particle
        )
    }
}

/// Where the read-only baseline dictionary comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Baseline {
    /// The list embedded in the crate, [`BUILTIN_BASELINE`].
    Builtin,
    File(PathBuf),
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::Builtin
    }
}

impl Baseline {
    pub fn load(&self) -> Result<Dictionary, DictionaryLoadError> {
        match self {
            Baseline::Builtin => Ok(Dictionary::builtin()),
            Baseline::File(path) => Dictionary::from_file(path),
        }
    }
}

/// Phrasal verbs keyed by their particle.
///
/// See [crate documentation](index.html) for examples.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: IndexMap<String, Vec<PhrasalVerbEntry>>,
}

impl Dictionary {
    /// An empty dictionary. Nothing is a phrasal verb.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text, one entry per line. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut dictionary = Self::new();
        for entry in text.lines().filter_map(PhrasalVerbEntry::from_line) {
            dictionary.insert(entry);
        }
        dictionary
    }

    /// The baseline shipped with the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_BASELINE)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryLoadError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Add an entry unless an equal one is already filed under its particle.
    /// Returns whether the entry was added.
    pub fn insert(&mut self, entry: PhrasalVerbEntry) -> bool {
        let entries = self
            .entries
            .entry(entry.particle.clone())
            .or_insert_with(Vec::new);

        if entries.contains(&entry) {
            return false;
        }

        entries.push(entry);
        true
    }

    /// Add every entry of `other` missing from this dictionary.
    /// Existing entries are never replaced. Returns how many were added.
    pub fn merge(&mut self, other: &Dictionary) -> usize {
        let mut added = 0;
        for entry in other.entries() {
            if self.insert(entry.clone()) {
                added += 1;
            }
        }
        added
    }

    /// Entries completed by `particle`.
    pub fn get(&self, particle: &str) -> &[PhrasalVerbEntry] {
        self.entries
            .get(particle)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, entry: &PhrasalVerbEntry) -> bool {
        self.get(&entry.particle).contains(entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PhrasalVerbEntry> {
        self.entries.values().flatten()
    }

    pub fn particles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries across all particles.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `current_word`, read after `previous_word` and
    /// `pre_previous_word`, completes a phrasal verb ending in `particle`.
    ///
    /// A pronoun in `previous_word` fills the object slot of entries such as
    /// `give <sb>`. Empty words are left out of the expression.
    pub fn is_phrasal_verb(
        &self,
        particle: &str,
        current_word: &str,
        previous_word: &str,
        pre_previous_word: &str,
    ) -> bool {
        let entries = match self.entries.get(particle) {
            Some(entries) => entries,
            None => return false,
        };

        let previous_word = if PRONOUNS.contains(&previous_word) {
            OBJECT_SLOT
        } else {
            previous_word
        };
        let words = [pre_previous_word, previous_word, current_word];
        let expression = join_with_spaces(words.iter().filter(|word| !word.is_empty()));

        entries.iter().any(|entry| entry.matches(&expression))
    }

    /// The dictionary in file format, sorted by base verb.
    pub fn to_file_contents(&self) -> String {
        let mut entries: Vec<&PhrasalVerbEntry> = self.entries().collect();
        entries.sort_by(|a, b| {
            a.base_verb
                .cmp(&b.base_verb)
                .then_with(|| a.particle.cmp(&b.particle))
        });

        let mut contents = String::new();
        for entry in entries {
            contents.push_str(&entry.to_string());
            contents.push('\n');
        }
        contents
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryPersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DictionaryPersistError::CreateDir {
                path: parent.to_owned(),
                source,
            })?;
        }

        fs::write(path, self.to_file_contents()).map_err(|source| {
            DictionaryPersistError::WriteFile {
                path: path.to_owned(),
                source,
            }
        })
    }

    /// Load the user dictionary at `user_path` and add to it whatever the
    /// baseline has that it lacks. The user file is rewritten only when
    /// something was added.
    ///
    /// A missing user file counts as an empty one. Bytes that are not UTF-8
    /// are replaced, so the readable lines still load. A user file that
    /// exists but cannot be read at all is never rewritten: the merge then
    /// only happens in memory.
    pub fn load_and_merge<P: AsRef<Path>>(
        baseline: &Baseline,
        user_path: P,
    ) -> Result<Self, DictionaryError> {
        let user_path = user_path.as_ref();
        let baseline = baseline.load()?;

        let (mut dictionary, writable) = match fs::read(user_path) {
            Ok(bytes) => (Self::parse(&String::from_utf8_lossy(&bytes)), true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?user_path, "no user dictionary yet");
                (Self::new(), true)
            }
            Err(err) => {
                warn!(path = ?user_path, error = %err, "cannot read user dictionary, merging in memory only");
                (Self::new(), false)
            }
        };

        let added = dictionary.merge(&baseline);
        if added > 0 && writable {
            dictionary.save_to_file(user_path)?;
            info!(path = ?user_path, added, "merged baseline into user dictionary");
        }

        info!(
            path = ?user_path,
            entries = dictionary.len(),
            "loaded phrasal verb dictionary"
        );
        Ok(dictionary)
    }
}
