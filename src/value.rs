use indexmap::IndexMap;

/// Structured object produced by [`parse_typed`](crate::parse_typed): field name to
/// value, in query order.
pub type Object = IndexMap<String, Value>;

/// A typed query value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Infer the type of a non-empty raw value: `"true"`/`"false"` become booleans,
    /// numeric literals become numbers, anything else stays a string.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => parse_number(raw).map_or_else(|| Self::String(raw.to_owned()), Self::Number),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Number(f64::from(n))
                }
            }
        )*
    };
}

impl_from_number!(f64, i32, u32, i16, u16, i8, u8);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(widen_f32(n))
    }
}

#[cfg(feature = "serde")]
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Boolean(b) => Self::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
        }
    }
}

/// Parse text the way a numeric-literal coercion would, accepting only finite results.
///
/// Surrounding whitespace is ignored. Decimal literals may carry a sign, a fraction
/// and an exponent; `0x`, `0o` and `0b` prefixed integers are unsigned.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        let value = digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })?;
        return value.is_finite().then_some(value);
    }

    // Rejects `inf`, `NaN` and friends before handing off to the float parser.
    let is_literal = text
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'));
    if !is_literal || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Widen an `f32` to the `f64` closest to its shortest decimal text, so `0.1_f32`
/// becomes `0.1` rather than `0.10000000149011612`.
pub fn widen_f32(n: f32) -> f64 {
    if !n.is_finite() {
        return f64::from(n);
    }
    n.to_string().parse().unwrap_or_else(|_| f64::from(n))
}

/// Format a number the way it is written into a query string.
///
/// Integral values have no fraction; non-finite values are `NaN`, `Infinity` and
/// `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        // Negative zero prints as "0"
        return "0".to_owned();
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(Value::coerce("true"), Value::Boolean(true));
        assert_eq!(Value::coerce("false"), Value::Boolean(false));
        assert_eq!(Value::coerce("29"), Value::Number(29.0));
        assert_eq!(Value::coerce("-1.5e2"), Value::Number(-150.0));
        assert_eq!(Value::coerce("hi"), Value::String("hi".to_owned()));
        assert_eq!(Value::coerce("True"), Value::String("True".to_owned()));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
    }

    #[test]
    fn test_parse_number_rejects() {
        for text in [
            "", "  ", "abc", "12px", "1e", ".", "-", "0x", "-0x1", "0xZ", "inf", "NaN",
            "Infinity", "1e400", "1_000", "1,5",
        ] {
            assert_eq!(parse_number(text), None, "{text:?}");
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(29.0), "29");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(29).to_string(), "29");
        assert_eq!(Value::from("memo").to_string(), "memo");
    }

    #[test]
    fn test_accessors() {
        let value = Value::from(3.5);
        assert_eq!(value.as_f64(), Some(3.5));
        assert!(value.is_number());
        assert!(!value.is_string());
        assert!(!value.is_boolean());
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_bool(), None);

        let flag = Value::from(true);
        assert!(flag.is_boolean());
        assert!(!flag.is_string());
        assert_eq!(flag.as_bool(), Some(true));

        let memo = Value::from("hi");
        assert!(memo.is_string());
        assert!(!memo.is_number());
        assert_eq!(memo.as_str(), Some("hi"));
    }

    #[test]
    fn test_from_f32_keeps_decimal_text() {
        assert_eq!(Value::from(0.1_f32), Value::Number(0.1));
        assert_eq!(Value::from(0.1_f32).to_string(), "0.1");
        assert_eq!(widen_f32(-2.5), -2.5);
        assert!(widen_f32(f32::NAN).is_nan());
        assert_eq!(widen_f32(f32::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_whitespace_is_not_a_number() {
        assert_eq!(Value::coerce(" "), Value::String(" ".to_owned()));
    }
}
