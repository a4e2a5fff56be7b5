//! Crop-center dimension units.
//!
//! A center-crop dimension is either a bare pixel count or a decimal number
//! with a unit suffix:
//!
//! | Input | Meaning |
//! |---|---|
//! | `300` (integer) | 300 pixels |
//! | `"300px"` | 300 pixels |
//! | `"25%"` | 25% of the source dimension on that axis |
//! | `"4pr"` | aspect component; pair with another `pr` value |
//!
//! Parsing is hand-rolled; the grammar is `digits ('.' digits)*` followed by
//! one of `px`, `%`, `pr`. Only the leading `digits ('.' digits)?` part of
//! the number contributes to its value.

use core::str::FromStr;

use crate::error::LayoutError;
use crate::math::round_i32;

/// A parsed crop-center dimension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CropUnit {
    /// Absolute pixels.
    Pixels(u32),
    /// Percentage of the source dimension on the same axis.
    Percent(f64),
    /// Aspect-ratio component. Only meaningful in pairs.
    Proportion(f64),
}

impl CropUnit {
    /// Parse a suffixed crop dimension such as `"300px"`, `"12.5%"`, `"16pr"`.
    ///
    /// ```
    /// use zenframe::CropUnit;
    ///
    /// assert_eq!(CropUnit::parse("300px"), Ok(CropUnit::Pixels(300)));
    /// assert_eq!(CropUnit::parse("12.5%"), Ok(CropUnit::Percent(12.5)));
    /// assert!(CropUnit::parse("12.5").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let (number, unit) = split_unit(s)
            .ok_or(LayoutError::invalid("crop dimension needs a px, % or pr suffix"))?;
        if !is_decimal(number) {
            return Err(LayoutError::invalid(
                "crop dimension must be an unsigned decimal number",
            ));
        }
        let value = leading_value(number)?;
        Ok(match unit {
            Unit::Pixels => Self::Pixels(value as u32),
            Unit::Percent => Self::Percent(value),
            Unit::Proportion => Self::Proportion(value),
        })
    }

    /// Whether this is an aspect component.
    pub fn is_proportion(&self) -> bool {
        matches!(self, Self::Proportion(_))
    }

    /// Resolve to pixels along an axis of length `extent`.
    ///
    /// Proportions can't be resolved per axis and yield `None`.
    pub fn to_pixels(self, extent: i32) -> Option<i32> {
        match self {
            Self::Pixels(px) => Some(i32::try_from(px).unwrap_or(i32::MAX)),
            Self::Percent(pct) => Some(round_i32(extent as f64 / 100.0 * pct)),
            Self::Proportion(_) => None,
        }
    }
}

impl From<u32> for CropUnit {
    fn from(px: u32) -> Self {
        Self::Pixels(px)
    }
}

impl FromStr for CropUnit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CropUnit {
    type Error = LayoutError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[derive(Copy, Clone)]
enum Unit {
    Pixels,
    Percent,
    Proportion,
}

fn split_unit(s: &str) -> Option<(&str, Unit)> {
    if let Some(n) = s.strip_suffix("px") {
        Some((n, Unit::Pixels))
    } else if let Some(n) = s.strip_suffix('%') {
        Some((n, Unit::Percent))
    } else if let Some(n) = s.strip_suffix("pr") {
        Some((n, Unit::Proportion))
    } else {
        None
    }
}

/// `digits ('.' digits)*`, ASCII only.
fn is_decimal(s: &str) -> bool {
    s.split('.')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

/// Value of the leading `digits ('.' digits)?` of an already validated number.
fn leading_value(s: &str) -> Result<f64, LayoutError> {
    let mut groups = s.split('.');
    let int_len = groups.next().map_or(0, str::len);
    let len = match groups.next() {
        Some(frac) => int_len + 1 + frac.len(),
        None => int_len,
    };
    s[..len]
        .parse::<f64>()
        .map_err(|_| LayoutError::invalid("crop dimension is not a number"))
}
