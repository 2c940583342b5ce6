//! # Error Types

/// Errors from codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A merge-produced subword has no id in the token mapping.
    #[error("no vocabulary entry for subword {symbol:?}")]
    MissingVocabularyEntry {
        /// The unmapped subword.
        symbol: String,
    },

    /// A token id has no subword in the token mapping.
    #[error("unknown token id: {id}")]
    UnknownTokenId {
        /// The unmapped id.
        id: u64,
    },

    /// A decoded character is not part of the byte/symbol table.
    #[error("character {symbol:?} is not a byte symbol")]
    UnmappedSymbol {
        /// The offending character.
        symbol: char,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Malformed vocabulary asset.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid pre-tokenizer pattern, or a regex runtime failure.
    #[error(transparent)]
    Pattern(#[from] fancy_regex::Error),

    /// Failure raised by a lookup backend.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Parse(err.to_string())
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = core::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CodecError::MissingVocabularyEntry {
            symbol: "Ġfoo".to_string(),
        };
        assert_eq!(err.to_string(), "no vocabulary entry for subword \"Ġfoo\"");

        let err = CodecError::UnknownTokenId { id: 99 };
        assert_eq!(err.to_string(), "unknown token id: 99");

        let err = CodecError::UnmappedSymbol { symbol: 'x' };
        assert_eq!(err.to_string(), "character 'x' is not a byte symbol");
    }

    #[test]
    fn test_from_json_error() {
        let err: CodecError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CodecError::Parse(_)));
    }
}
