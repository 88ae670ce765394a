use thiserror::Error;

/// Errors produced by the query-string codec and by [`QueryParams`](crate::QueryParams)
/// lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed percent-escape sequence in a decoded component.
    ///
    /// `position` is the byte offset of the offending `%` inside `input`, or `None`
    /// when the escapes were well formed but decoded to invalid UTF-8.
    #[error("invalid percent encoding in {input:?}{}", at_byte(.position))]
    Decode {
        input: String,
        position: Option<usize>,
    },
    /// `get` on a key that is not present.
    #[error("key not found: {key:?}")]
    NotFound { key: String },
}

#[allow(clippy::ref_option)]
fn at_byte(position: &Option<usize>) -> String {
    position.map(|p| format!(" at byte {p}")).unwrap_or_default()
}

impl Error {
    pub(crate) fn decode(input: &str, position: Option<usize>) -> Self {
        Self::Decode {
            input: input.to_owned(),
            position,
        }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_owned(),
        }
    }
}

/// Result type for codec operations
pub type Result<T> = core::result::Result<T, Error>;
