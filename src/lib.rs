//! Ordered query-string variables and an `application/x-www-form-urlencoded` codec.
//!
//! ```
//! let params = urlvars::parse("http://example.com/?name=Jeongho&age=29&is_crazy#top")?;
//! assert_eq!(params.get("age")?, "29");
//! assert_eq!(params.serialize(), "name=Jeongho&age=29&is_crazy");
//!
//! let object = urlvars::parse_typed_default("age=29&is_crazy=true")?;
//! assert_eq!(object["age"], urlvars::Value::Number(29.0));
//! # Ok::<(), urlvars::Error>(())
//! ```

// Internal modules (not public API)
mod codec;
mod error;
mod percent_encode;
mod query_params;
mod typed;
mod value;

// Public API
pub use codec::{CodecOptions, KeyEncoding, QueryCodec};
pub use error::{Error, Result};
pub use percent_encode::{COMPONENT_SET, decode_component, encode_component};
pub use query_params::{Iter, QueryParams};
pub use typed::{FieldValue, ToQueryString, parse_typed, parse_typed_default, stringify};
pub use value::{Object, Value};

/// Parse a query string with the default [`QueryCodec`].
///
/// # Errors
///
/// Returns [`Error::Decode`] on a malformed percent-escape.
pub fn parse(input: &str) -> Result<QueryParams> {
    QueryCodec::default().parse(input)
}

/// Serialize variables with the default [`QueryCodec`].
pub fn serialize(params: &QueryParams) -> String {
    QueryCodec::default().serialize(params)
}
