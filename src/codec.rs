use crate::error::Result;
use crate::percent_encode::{decode_component, percent_encode_into};
use crate::query_params::QueryParams;
use std::borrow::Cow;

/// How keys are treated by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// Keys are written and read verbatim. A key containing `&` or `=` does not
    /// survive a round trip.
    #[default]
    Raw,
    /// Keys are percent-encoded on output and percent-decoded on input, like values.
    Strict,
}

/// Options for a [`QueryCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub key_encoding: KeyEncoding,
    /// Drop everything up to and including the first `?` before parsing.
    pub strip_prefix: bool,
    /// Drop everything from the first `#` before parsing.
    pub strip_fragment: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            key_encoding: KeyEncoding::Raw,
            strip_prefix: true,
            strip_fragment: true,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key_encoding(mut self, key_encoding: KeyEncoding) -> Self {
        self.key_encoding = key_encoding;
        self
    }

    #[must_use]
    pub fn strip_prefix(mut self, strip_prefix: bool) -> Self {
        self.strip_prefix = strip_prefix;
        self
    }

    #[must_use]
    pub fn strip_fragment(mut self, strip_fragment: bool) -> Self {
        self.strip_fragment = strip_fragment;
        self
    }
}

/// `application/x-www-form-urlencoded` codec between strings and [`QueryParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCodec {
    options: CodecOptions,
}

impl QueryCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Parse a query string, or a URL carrying one, into ordered variables.
    ///
    /// Pairs are split on `&` and then on the first `=`. Values are percent-decoded;
    /// keys only when [`KeyEncoding::Strict`] is set. A pair without `=` becomes a
    /// flag with an empty value. A repeated key keeps its first position and takes
    /// the last value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) on the first malformed
    /// percent-escape.
    pub fn parse(&self, input: &str) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        if input.trim().is_empty() {
            return Ok(params);
        }

        let query = self.prune(input);
        for pair in query.split('&') {
            let (key, value) = match memchr::memchr(b'=', pair.as_bytes()) {
                Some(pos) => (
                    self.decode_key(&pair[..pos])?,
                    decode_component(&pair[pos + 1..])?,
                ),
                None => (self.decode_key(pair)?, "".into()),
            };
            log::trace!("parsed pair {key:?} = {value:?}");
            params.set(key, value);
        }

        log::debug!("parsed {} variables from {} bytes", params.size(), input.len());
        Ok(params)
    }

    /// Serialize variables into a query string (without a leading `?`).
    ///
    /// Empty values are written as bare keys.
    pub fn serialize(&self, params: &QueryParams) -> String {
        let mut result = String::new();
        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                result.push('&');
            }
            match self.options.key_encoding {
                KeyEncoding::Raw => result.push_str(key),
                KeyEncoding::Strict => percent_encode_into(&mut result, key),
            }
            if !value.is_empty() {
                result.push('=');
                percent_encode_into(&mut result, value);
            }
        }
        result
    }

    fn prune<'a>(&self, input: &'a str) -> &'a str {
        let mut query = input;
        if self.options.strip_prefix {
            if let Some(pos) = memchr::memchr(b'?', query.as_bytes()) {
                query = &query[pos + 1..];
            }
        }
        if self.options.strip_fragment {
            if let Some(pos) = memchr::memchr(b'#', query.as_bytes()) {
                query = &query[..pos];
            }
        }
        query
    }

    fn decode_key<'a>(&self, key: &'a str) -> Result<Cow<'a, str>> {
        match self.options.key_encoding {
            KeyEncoding::Raw => Ok(key.into()),
            KeyEncoding::Strict => decode_component(key),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    fn entries(params: &QueryParams) -> Vec<(&str, &str)> {
        params.iter().collect()
    }

    #[test]
    fn test_parse_empty() {
        let codec = QueryCodec::default();
        assert_eq!(codec.parse("").unwrap().size(), 0);
        assert_eq!(codec.parse("  \t").unwrap().size(), 0);
    }

    #[test]
    fn test_parse_keeps_empty_pairs() {
        let params = QueryCodec::default().parse("a=1&&b").unwrap();
        assert_eq!(entries(&params), vec![("a", "1"), ("", ""), ("b", "")]);
    }

    #[test]
    fn test_parse_key_not_decoded() {
        let params = QueryCodec::default().parse("a%20b=c%20d").unwrap();
        assert_eq!(entries(&params), vec![("a%20b", "c d")]);
    }

    #[test]
    fn test_parse_flag_key_not_decoded() {
        let params = QueryCodec::default().parse("%zz").unwrap();
        assert_eq!(entries(&params), vec![("%zz", "")]);
    }

    #[test]
    fn test_parse_strict_keys() {
        let codec = QueryCodec::new(CodecOptions::new().key_encoding(KeyEncoding::Strict));
        let params = codec.parse("a%26b=1&c%3Dd").unwrap();
        assert_eq!(entries(&params), vec![("a&b", "1"), ("c=d", "")]);
        assert!(codec.parse("%zz=1").is_err());
    }

    #[test]
    fn test_parse_without_stripping() {
        let codec = QueryCodec::new(
            CodecOptions::new()
                .strip_prefix(false)
                .strip_fragment(false),
        );
        let params = codec.parse("a=1?b=2#c").unwrap();
        assert_eq!(entries(&params), vec![("a", "1?b=2#c")]);
    }

    #[test]
    fn test_parse_decode_error() {
        let err = QueryCodec::default().parse("ok=1&bad=%E0%A4%A").unwrap_err();
        assert_eq!(err, Error::decode("%E0%A4%A", Some(6)));
    }

    #[test]
    fn test_serialize_flags() {
        let params: QueryParams = [("is_crazy", ""), ("age", "29")].into_iter().collect();
        assert_eq!(QueryCodec::default().serialize(&params), "is_crazy&age=29");
    }

    #[test]
    fn test_serialize_raw_keys() {
        let params: QueryParams = [("a b", "c d")].into_iter().collect();
        assert_eq!(QueryCodec::default().serialize(&params), "a b=c%20d");
    }

    #[test]
    fn test_serialize_strict_keys_round_trip() {
        let codec = QueryCodec::new(CodecOptions::new().key_encoding(KeyEncoding::Strict));
        let params: QueryParams = [("a&b", "1"), ("c=d", "x=y")].into_iter().collect();
        let encoded = codec.serialize(&params);
        assert_eq!(encoded, "a%26b=1&c%3Dd=x%3Dy");
        assert_eq!(codec.parse(&encoded).unwrap(), params);
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(QueryCodec::default().serialize(&QueryParams::new()), "");
    }
}
