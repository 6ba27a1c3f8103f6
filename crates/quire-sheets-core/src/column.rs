//! Column width overrides

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Width override for a contiguous span of columns
///
/// `min` and `max` are 1-based and inclusive, matching the `<col>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnWidth {
    /// First column (1-based)
    pub min: u16,
    /// Last column (1-based, inclusive)
    pub max: u16,
    /// Width in character units
    pub width: f64,
    /// Width was set explicitly rather than inherited
    pub custom_width: bool,
}

impl ColumnWidth {
    /// Create a custom width override for `min..=max`
    pub fn new(min: u16, max: u16, width: f64) -> Result<Self> {
        if min == 0 || min > max || max > MAX_COLS {
            return Err(Error::InvalidColumnRange { min, max });
        }
        if !width.is_finite() || width < 0.0 {
            return Err(Error::InvalidNumber(width.to_string()));
        }
        Ok(Self {
            min,
            max,
            width,
            custom_width: true,
        })
    }

    /// Check whether this span covers the given 1-based column
    pub fn covers(&self, column: u16) -> bool {
        column >= self.min && column <= self.max
    }

    /// Check whether two spans share at least one column
    pub fn overlaps(&self, other: &ColumnWidth) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}
