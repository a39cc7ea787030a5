/// Column storage for listing tables
///
/// A Column is an array-like random-access container indexed by row number.
/// Every cell is text as read from the dataset file; an empty field is stored
/// as `ColumnValue::Null` so filters can tell "missing" apart from a value.

use serde::Serialize;

/// A single cell value. Serializes as a JSON string or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    String(String),
    Null,
}

impl ColumnValue {
    /// Build a cell from a raw field, mapping the empty field to `Null`.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            ColumnValue::Null
        } else {
            ColumnValue::String(field.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            ColumnValue::Null => None,
        }
    }

    /// Cell as text, with missing values read as the empty string.
    pub fn as_text(&self) -> &str {
        self.as_string().unwrap_or("")
    }

    /// Numeric reading of the cell. `None` for missing or non-numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_string().and_then(|s| s.trim().parse::<f64>().ok())
    }

    /// Case-insensitive substring test. A missing cell never matches.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.contains_folded(&needle.to_lowercase())
    }

    /// Like `contains_ignore_case`, for a needle that is already lowercase.
    /// Only the cell is folded, so one needle can be tested against a whole
    /// column.
    pub fn contains_folded(&self, folded_needle: &str) -> bool {
        match self {
            ColumnValue::String(v) => v.to_lowercase().contains(folded_needle),
            ColumnValue::Null => false,
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::from_field(value)
    }
}

/// A named sequence of cells.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    values: Vec<ColumnValue>,
}

impl Column {
    pub fn new(name: String) -> Self {
        Column {
            name,
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&ColumnValue, String> {
        self.values.get(index).ok_or_else(|| {
            format!(
                "Index {} out of range [0, {}) in column '{}'",
                index,
                self.values.len(),
                self.name
            )
        })
    }

    pub fn append(&mut self, value: ColumnValue) {
        self.values.push(value);
    }
}
