//! Configuration file support.
//!
//! ```toml
//! language = "en"
//! data_dir = "/home/me/.local/share/apcase"
//! baseline_dictionary = "/usr/share/apcase/phrasal_verbs_en.txt"
//!
//! [diff]
//! open = "<u>"
//! close = "</u>"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dictionary::Baseline;
use crate::diff::DiffMarkup;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Language code selecting the user dictionary file (default: "en").
    pub language: String,

    /// Directory holding the user dictionaries (default: current directory).
    pub data_dir: Option<PathBuf>,

    /// Baseline dictionary file; the embedded one is used when unset.
    pub baseline_dictionary: Option<PathBuf>,

    /// Markup for highlighted diffs.
    pub diff: DiffMarkup,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            data_dir: None,
            baseline_dictionary: None,
            diff: DiffMarkup::default(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// `<data_dir>/phrasal_verbs_<language>.txt`
    pub fn user_dictionary_path(&self) -> PathBuf {
        let file_name = format!("phrasal_verbs_{}.txt", self.language);
        match &self.data_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    pub fn baseline(&self) -> Baseline {
        match &self.baseline_dictionary {
            Some(path) => Baseline::File(path.clone()),
            None => Baseline::Builtin,
        }
    }

    pub fn markup(&self) -> &DiffMarkup {
        &self.diff
    }
}
