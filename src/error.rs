use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("InputNotFound: {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("DocumentParseError: {path}: {reason}")]
    DocumentParse { path: PathBuf, reason: String },
    #[error("NoSectionsExtracted: base yielded {base} sections, updated yielded {updated}")]
    NoSectionsExtracted { base: usize, updated: usize },
    #[error("NoQualifyingMatches: no question matched a document line above the threshold")]
    NoQualifyingMatches,
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
    #[error("WriteFailed: {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl MergeError {
    /// An input that cannot be opened, whatever the io cause.
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::InputNotFound {
            path: path.into(),
            source,
        }
    }

    /// Whether extraction should degrade to an empty section map instead of aborting.
    pub fn is_recoverable_parse(&self) -> bool {
        matches!(self, MergeError::DocumentParse { .. })
    }
}
