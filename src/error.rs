//! Error types for document decoding and store round trips.

use thiserror::Error;

/// A document could not be decoded into its model type.
///
/// Decoding is all-or-nothing: either every field populates or the whole
/// decode fails with the first offending field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field was absent from the document.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field was present but had the wrong shape.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// The offending field name.
        field: &'static str,
        /// What was expected instead.
        reason: String,
    },
}

impl DecodeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Error from a read path that both talks to the gateway and decodes.
///
/// Gateway errors pass through unmodified; the core performs no retries and
/// no recovery.
#[derive(Debug, Error)]
pub enum StoreOpError<E> {
    /// The store gateway failed.
    #[error("store gateway error: {0}")]
    Store(E),

    /// The stored document failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
