use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

// Based on https://tc39.es/ecma262/#sec-encodeuricomponent-uricomponent

/// URI component percent-encode set
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a component directly into buffer
pub fn percent_encode_into(buffer: &mut String, input: &str) {
    buffer.reserve(input.len());

    for chunk in utf8_percent_encode(input, COMPONENT_SET) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a component
pub fn encode_component(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, COMPONENT_SET).into()
}

/// Decode a percent-encoded component.
///
/// Unlike `percent_decode_str`, every `%` must start a two-digit hex escape and the
/// decoded bytes must be valid UTF-8. `+` is kept as is.
///
/// # Errors
///
/// Returns [`Error::Decode`] for a truncated or non-hex escape, or for escapes that
/// do not form UTF-8.
pub fn decode_component(input: &str) -> Result<Cow<'_, str>> {
    let bytes = input.as_bytes();

    // Fast path: nothing to decode
    let Some(first) = memchr::memchr(b'%', bytes) else {
        return Ok(Cow::Borrowed(input));
    };

    let mut offset = first;
    loop {
        let escape = bytes.get(offset + 1..offset + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            log::debug!("malformed percent escape at byte {offset} in {input:?}");
            return Err(Error::decode(input, Some(offset)));
        }
        match memchr::memchr(b'%', &bytes[offset + 3..]) {
            Some(next) => offset += 3 + next,
            None => break,
        }
    }

    percent_encoding::percent_decode(bytes)
        .decode_utf8()
        .map_err(|_| {
            log::debug!("percent escapes in {input:?} do not decode to UTF-8");
            Error::decode(input, None)
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("hello%20world").unwrap(), "hello world");
        assert_eq!(decode_component("test").unwrap(), "test");
        assert_eq!(decode_component("%2F").unwrap(), "/");
        assert_eq!(decode_component("%C3%A9").unwrap(), "é");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_decode_component_borrows_plain_input() {
        assert!(matches!(decode_component("plain").unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_component_malformed() {
        assert_eq!(
            decode_component("%zz").unwrap_err(),
            Error::decode("%zz", Some(0))
        );
        assert_eq!(
            decode_component("ab%2").unwrap_err(),
            Error::decode("ab%2", Some(2))
        );
        assert_eq!(
            decode_component("%41%").unwrap_err(),
            Error::decode("%41%", Some(3))
        );
        assert_eq!(decode_component("%FF").unwrap_err(), Error::decode("%FF", None));
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("#?%+,/"), "%23%3F%25%2B%2C%2F");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_percent_encode_into_appends() {
        let mut buffer = String::from("k=");
        percent_encode_into(&mut buffer, "x y");
        assert_eq!(buffer, "k=x%20y");
    }
}
