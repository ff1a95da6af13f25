//! Loose numeric coercion and the normalized border-radius list.
//!
//! Form input arrives as text. Numbers are coerced leniently: surrounding
//! whitespace is ignored, an empty value counts as zero and anything else that
//! does not parse becomes NaN instead of an error.

use serde::{Deserialize, Deserializer, Serialize};

/// Coerce a text value into a number.
///
/// Besides plain decimals this accepts `Infinity` with an optional sign and
/// unsigned `0x`/`0o`/`0b` integer literals. Other spellings of infinity or
/// NaN (`inf`, `nan`, ...) are not numbers.
///
/// # Examples
///
/// ```
/// use angle_catalog_common::numbers::coerce_number;
///
/// assert_eq!(coerce_number(" 12.5 "), 12.5);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("0x10"), 16.0);
/// assert!(coerce_number("twelve").is_nan());
/// assert!(coerce_number("inf").is_nan());
/// ```
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = radix_literal(trimmed) {
        return value;
    }

    // f64::from_str also takes "inf", "infinity" and "nan" in any case.
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x1F`, `0o17` or `0b101`. A prefix without valid digits is NaN.
fn radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Collapse every NaN onto the canonical one and `-0` onto `0`.
fn canonical(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Ascending list of distinct corner radii.
///
/// Constructed only through [`BorderRadius::parse`] or from values that were
/// already normalized, so the list is always sorted and free of duplicates.
/// A non-numeric token is kept as a single NaN entry that sorts last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BorderRadius(Vec<f64>);

impl BorderRadius {
    /// Parse a comma-separated list into a sorted, deduplicated list.
    ///
    /// # Examples
    ///
    /// ```
    /// use angle_catalog_common::numbers::BorderRadius;
    ///
    /// let radius = BorderRadius::parse("8, 2,4,2");
    /// assert_eq!(radius.values(), &[2.0, 4.0, 8.0]);
    /// ```
    pub fn parse(input: &str) -> Self {
        Self::normalized(input.split(',').map(coerce_number).collect())
    }

    fn normalized(values: Vec<f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().map(canonical).collect();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
        Self(values)
    }

    /// The radii in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode for storage as a comma-separated column value.
    pub fn to_storage(&self) -> String {
        self.0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode a column value written by [`BorderRadius::to_storage`].
    pub fn from_storage(stored: &str) -> Self {
        if stored.is_empty() {
            return Self::default();
        }
        Self::normalized(
            stored
                .split(',')
                .map(|v| v.parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        )
    }
}

impl From<Vec<f64>> for BorderRadius {
    fn from(values: Vec<f64>) -> Self {
        Self::normalized(values)
    }
}

/// Reads the serialized form back: `null` entries are NaN, and the list is
/// normalized again.
impl<'de> Deserialize<'de> for BorderRadius {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(Self::normalized(
            values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
        ))
    }
}
