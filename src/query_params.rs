use crate::codec::QueryCodec;
use crate::error::{Error, Result};
use core::str::FromStr;
use indexmap::IndexMap;

/// Ordered set of query variables.
///
/// Keys are unique and iterate in the order they were first inserted. Setting an
/// existing key replaces its value without moving it.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: IndexMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self {
            params: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            params: IndexMap::with_capacity(capacity),
        }
    }

    /// Parse from a URL-encoded string using the default [`QueryCodec`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] on a malformed percent-escape.
    pub fn parse(input: &str) -> Result<Self> {
        QueryCodec::default().parse(input)
    }

    /// Insert a variable, or overwrite the value of an existing one in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Get the value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::not_found(key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Remove a variable, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Number of variables.
    pub fn size(&self) -> usize {
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.params.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.values().map(String::as_str)
    }

    /// Convert to a URL-encoded string using the default [`QueryCodec`].
    pub fn serialize(&self) -> String {
        QueryCodec::default().serialize(self)
    }
}

/// Borrowing iterator over the variables of a [`QueryParams`], in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

// Order-sensitive, unlike `IndexMap`'s own equality.
impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.params.len() == other.params.len() && self.params.iter().eq(other.params.iter())
    }
}

impl Eq for QueryParams {}

impl core::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for QueryParams {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for QueryParams {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QueryParams {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

/// Serialized as its URL-encoded string.
#[cfg(feature = "serde")]
impl serde::Serialize for QueryParams {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&QueryCodec::default().serialize(self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}
