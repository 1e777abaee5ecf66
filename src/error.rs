//! Error types for the godsong library

use std::io;

use crate::config::ErrorPolicy;

/// Library error type for godsong operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GodsongError {
    /// The song source could not be read
    #[error("could not read song: {0}")]
    UnreadableInput(String),

    /// A note-unit did not end with a pitch letter `A`-`G`.
    ///
    /// `line` and `column` are 1-based positions in the normalized song, that
    /// is after the reader dropped every whitespace character but newlines.
    #[error("invalid note {letter:?} at line {line}, column {column}")]
    InvalidNoteLetter {
        letter: char,
        line: usize,
        column: usize,
    },

    /// Character missing from the duration specifier table
    #[error("invalid duration specifier: '{0}'")]
    InvalidDurationSpecifier(char),

    /// Character missing from the duration modifier table
    #[error("invalid duration modifier: '{0}'")]
    InvalidDurationModifier(char),

    /// Character missing from the accidental table
    #[error("invalid accidental: '{0}'")]
    InvalidAccidental(char),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error while writing the transcoded song
    #[error("I/O error: {0}")]
    IoError(String),
}

impl GodsongError {
    /// Whether the error must stop the current transcoding pass.
    ///
    /// Invalid notes are always skipped, grammar table misses follow `policy`,
    /// everything else aborts.
    pub const fn is_fatal(&self, policy: ErrorPolicy) -> bool {
        match self {
            Self::InvalidNoteLetter { .. } => false,
            Self::InvalidDurationSpecifier(_)
            | Self::InvalidDurationModifier(_)
            | Self::InvalidAccidental(_) => matches!(policy, ErrorPolicy::Fatal),
            Self::UnreadableInput(_) | Self::ConfigError(_) | Self::IoError(_) => true,
        }
    }
}

impl From<io::Error> for GodsongError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
