//! FILENAME: core/datasource/src/value.rs
//! PURPOSE: Row and row value types.
//! CONTEXT: Rows are open-ended key/value maps. The store never inspects
//! them except for the key referenced by the active sort (and export).
//! `RowValue::to_number` defines what "numeric-looking" means for the
//! sort comparator, independent of the stored type.

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A single value stored under a row key.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Key absent from the row.
    Missing,
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

static MISSING: RowValue = RowValue::Missing;

impl RowValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RowValue::Missing)
    }

    /// Numeric coercion used by the sort comparator.
    /// Returns None when the value does not look like a number.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            RowValue::Missing => return None,
            RowValue::Null => 0.0,
            RowValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            RowValue::Number(n) => *n,
            RowValue::Text(s) => return parse_numeric_text(s),
            RowValue::Date(dt) => dt.and_utc().timestamp_millis() as f64,
        };
        if n.is_nan() {
            None
        } else {
            Some(n)
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.to_number().is_some()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RowValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for RowValue {
    fn default() -> Self {
        RowValue::Missing
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        RowValue::Text(value.to_string())
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        RowValue::Text(value)
    }
}

impl From<f64> for RowValue {
    fn from(value: f64) -> Self {
        RowValue::Number(value)
    }
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        RowValue::Number(value as f64)
    }
}

impl From<i32> for RowValue {
    fn from(value: i32) -> Self {
        RowValue::Number(value as f64)
    }
}

impl From<bool> for RowValue {
    fn from(value: bool) -> Self {
        RowValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for RowValue {
    fn from(value: NaiveDateTime) -> Self {
        RowValue::Date(value)
    }
}

impl<T: Into<RowValue>> From<Option<T>> for RowValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RowValue::Null)
    }
}

// ============================================================================
// TEXT TO NUMBER
// ============================================================================

/// Parses text the way a loosely typed numeric conversion does:
/// surrounding whitespace is ignored, blank text is zero, `Infinity`
/// (optionally signed) and `0x`/`0o`/`0b` integer literals are accepted,
/// and otherwise the whole text must be a decimal literal.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let s = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&s[2..], radix);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().ok()
    } else {
        None
    }
}

fn parse_radix_integer(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        let d = c.to_digit(radix)?;
        value = value * radix as f64 + d as f64;
    }
    Some(value)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

// ============================================================================
// ROW
// ============================================================================

/// One record of the data source. Keys not present read as `Missing`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, RowValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            values: HashMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<RowValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> &RowValue {
        self.values.get(key).unwrap_or(&MISSING)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<RowValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
