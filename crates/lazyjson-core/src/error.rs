//! Error types for decoding and querying objects.

use crate::value::ValueTag;
use thiserror::Error;

/// Errors that can occur while decoding an object or reading one of its values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LazyJsonError {
    /// The text is not a well-formed object in the supported dialect.
    /// `offset` is the character offset in the decoded text where the
    /// problem was detected (the text length for end-of-input errors).
    #[error("format error at offset {offset}: {message}")]
    Format { offset: usize, message: String },

    /// The caller used an accessor that does not match the stored tag.
    #[error("key '{key}' holds {tag} value, use {accessor} instead")]
    WrongAccessor {
        key: String,
        tag: ValueTag,
        accessor: &'static str,
    },
}

impl LazyJsonError {
    pub(crate) fn format(offset: usize, message: impl Into<String>) -> Self {
        LazyJsonError::Format {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn wrong_accessor(key: &str, tag: ValueTag) -> Self {
        LazyJsonError::WrongAccessor {
            key: key.to_string(),
            tag,
            accessor: tag.accessor(),
        }
    }
}

/// Convenience alias used throughout lazyjson-core.
pub type Result<T> = std::result::Result<T, LazyJsonError>;
