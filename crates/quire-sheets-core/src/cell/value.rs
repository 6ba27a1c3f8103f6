//! Cell value types

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The value stored in a cell
///
/// String content normally lives in the workbook's shared string table and
/// is referenced by index; [`CellValue::InlineString`] only appears when a
/// decoded package stored the text inside the cell itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Text stored directly in the cell
    InlineString(String),

    /// Index into the owning workbook's shared string table
    SharedString(u32),

    /// Numeric value in canonical decimal text form
    Number(NumberText),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Formula kept verbatim, never evaluated
    Formula {
        /// Formula text without the leading '='
        text: String,
        /// Cell type attribute of the cached result, if any (e.g. "str")
        result_type: Option<String>,
        /// Raw cached result text
        cached: Option<String>,
    },
}

/// Discriminant of a [`CellValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    InlineString,
    SharedString,
    Number,
    Boolean,
    Formula,
}

impl CellValue {
    /// Build a number value from a float
    pub fn number(n: f64) -> Result<Self> {
        NumberText::from_f64(n).map(CellValue::Number)
    }

    /// Kind of this value
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::InlineString(_) => CellKind::InlineString,
            CellValue::SharedString(_) => CellKind::SharedString,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Formula { .. } => CellKind::Formula,
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(n.value()),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Shared string index, if this is a shared string reference
    pub fn shared_string_index(&self) -> Option<u32> {
        match self {
            CellValue::SharedString(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::InlineString(_) => "inline_string",
            CellValue::SharedString(_) => "shared_string",
            CellValue::Number(_) => "number",
            CellValue::Boolean(_) => "boolean",
            CellValue::Formula { .. } => "formula",
        }
    }
}

/// A finite number held as the canonical decimal text written to the package
///
/// The canonical form is the shortest text that parses back to the same
/// `f64`, so `"5.950"` and `"5.95"` normalize to the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberText(String);

impl NumberText {
    /// Canonical text for a finite float
    pub fn from_f64(n: f64) -> Result<Self> {
        if !n.is_finite() {
            return Err(Error::InvalidNumber(n.to_string()));
        }
        Ok(NumberText(format!("{}", n)))
    }

    /// Parse a decimal literal and normalize it
    pub fn parse(s: &str) -> Result<Self> {
        let n: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidNumber(s.to_string()))?;
        Self::from_f64(n).map_err(|_| Error::InvalidNumber(s.to_string()))
    }

    /// The canonical text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value
    pub fn value(&self) -> f64 {
        // Construction guarantees the text parses.
        self.0.parse().unwrap_or_default()
    }
}

impl fmt::Display for NumberText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NumberText {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A value handed to the model API
///
/// Strings are interned into the shared string table when the input is
/// stored, so they never land in a cell as inline text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl From<&String> for CellInput {
    fn from(s: &String) -> Self {
        CellInput::Text(s.clone())
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        CellInput::Number(n)
    }
}

impl From<i32> for CellInput {
    fn from(n: i32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<i64> for CellInput {
    fn from(n: i64) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<u32> for CellInput {
    fn from(n: u32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<bool> for CellInput {
    fn from(b: bool) -> Self {
        CellInput::Boolean(b)
    }
}

impl<T: Into<CellInput>> From<Option<T>> for CellInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellInput::Empty, Into::into)
    }
}
