use crate::codec::QueryCodec;
use crate::error::Result;
use crate::query_params::QueryParams;
use crate::value::{Object, Value, format_number, widen_f32};
use indexmap::IndexMap;
use std::collections::BTreeMap;

impl QueryCodec {
    /// Parse a query string into a typed [`Object`].
    ///
    /// With `auto_coerce`, flags (empty values) become `true`, `"true"`/`"false"`
    /// become booleans and numeric literals become numbers. Without it every value
    /// is kept as a string. Field names are taken verbatim.
    ///
    /// # Errors
    ///
    /// Fails like [`QueryCodec::parse`].
    pub fn parse_typed(&self, input: &str, auto_coerce: bool) -> Result<Object> {
        let params = self.parse(input)?;
        let object = params
            .into_iter()
            .map(|(key, value)| {
                let value = match (auto_coerce, value.is_empty()) {
                    (false, _) => Value::String(value),
                    (true, true) => Value::Boolean(true),
                    (true, false) => Value::coerce(&value),
                };
                (key, value)
            })
            .collect();
        Ok(object)
    }
}

/// Parse a query string into a typed [`Object`] using the default codec.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) on a malformed percent-escape.
pub fn parse_typed(input: &str, auto_coerce: bool) -> Result<Object> {
    QueryCodec::default().parse_typed(input, auto_coerce)
}

/// [`parse_typed`] with type coercion on.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) on a malformed percent-escape.
pub fn parse_typed_default(input: &str) -> Result<Object> {
    parse_typed(input, true)
}

/// Convert a value into a query string.
///
/// Scalars and strings are written as bare text; [`QueryParams`] and mappings are
/// serialized as `key=value` pairs.
pub fn stringify<T: ToQueryString + ?Sized>(value: &T) -> String {
    value.to_query_string()
}

/// Types [`stringify`] accepts.
pub trait ToQueryString {
    fn to_query_string(&self) -> String;
}

/// Text of a single field in a mapping given to [`stringify`].
///
/// `None` marks an absent field, which is skipped.
pub trait FieldValue {
    fn field_text(&self) -> Option<String>;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl ToQueryString for $t {
                fn to_query_string(&self) -> String {
                    self.to_string()
                }
            }

            impl FieldValue for $t {
                fn field_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, str, String, Value
);

impl ToQueryString for f64 {
    fn to_query_string(&self) -> String {
        format_number(*self)
    }
}

impl FieldValue for f64 {
    fn field_text(&self) -> Option<String> {
        Some(format_number(*self))
    }
}

impl ToQueryString for f32 {
    fn to_query_string(&self) -> String {
        format_number(widen_f32(*self))
    }
}

impl FieldValue for f32 {
    fn field_text(&self) -> Option<String> {
        Some(format_number(widen_f32(*self)))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_text(&self) -> Option<String> {
        self.as_ref().and_then(FieldValue::field_text)
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn field_text(&self) -> Option<String> {
        (**self).field_text()
    }
}

impl<T: ToQueryString + ?Sized> ToQueryString for &T {
    fn to_query_string(&self) -> String {
        (**self).to_query_string()
    }
}

impl ToQueryString for QueryParams {
    fn to_query_string(&self) -> String {
        self.serialize()
    }
}

fn stringify_fields<'a, K, V, I>(fields: I) -> String
where
    K: AsRef<str> + 'a,
    V: FieldValue + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut params = QueryParams::new();
    for (key, value) in fields {
        if let Some(text) = value.field_text() {
            params.set(key.as_ref(), text);
        }
    }
    params.serialize()
}

impl<K: AsRef<str>, V: FieldValue, S> ToQueryString for IndexMap<K, V, S> {
    fn to_query_string(&self) -> String {
        stringify_fields(self.iter())
    }
}

impl<K: AsRef<str>, V: FieldValue> ToQueryString for BTreeMap<K, V> {
    fn to_query_string(&self) -> String {
        stringify_fields(self.iter())
    }
}

impl<K: AsRef<str>, V: FieldValue> ToQueryString for [(K, V)] {
    fn to_query_string(&self) -> String {
        stringify_fields(self.iter().map(|(k, v)| (k, v)))
    }
}

impl<K: AsRef<str>, V: FieldValue> ToQueryString for Vec<(K, V)> {
    fn to_query_string(&self) -> String {
        self.as_slice().to_query_string()
    }
}

impl<K: AsRef<str>, V: FieldValue, const N: usize> ToQueryString for [(K, V); N] {
    fn to_query_string(&self) -> String {
        self.as_slice().to_query_string()
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::{FieldValue, ToQueryString, stringify_fields};
    use crate::query_params::QueryParams;
    use serde_json::Value;

    /// `null` counts as an absent field. Nested arrays and objects are written as
    /// their JSON text.
    impl FieldValue for Value {
        fn field_text(&self) -> Option<String> {
            match self {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        }
    }

    /// Objects are serialized field by field; arrays use their indices as keys.
    impl ToQueryString for Value {
        fn to_query_string(&self) -> String {
            match self {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        item.field_text().map(|text| (i.to_string(), text))
                    })
                    .collect::<QueryParams>()
                    .serialize(),
                Value::Object(fields) => stringify_fields(fields.iter()),
            }
        }
    }
}
