use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed line {line} in {}: {content:?}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("cheat {index} cannot be written: {reason}")]
    Unencodable { index: usize, reason: &'static str },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}

/// Rejections from [`CheatEntry::from_input`](crate::cheats::CheatEntry::from_input).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheatInputError {
    #[error("cheat description is blank")]
    BlankDescription,

    #[error("cheat code must be 8 or 9 characters long, got {0}")]
    InvalidCodeLength(usize),

    #[error("cheat code may not contain {0:?}")]
    ReservedCodeChar(char),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
