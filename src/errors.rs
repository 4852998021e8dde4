use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryLoadError {
    #[error("cannot read baseline dictionary {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum DictionaryPersistError {
    #[error("cannot create dictionary directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write dictionary into file {path:?}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Anything that can go wrong while building the merged dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error(transparent)]
    Load(#[from] DictionaryLoadError),
    #[error(transparent)]
    Persist(#[from] DictionaryPersistError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config from file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}
