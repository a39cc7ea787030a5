/// Filter engine
///
/// Turns a submitted form into successive narrowings of a `FilterView`:
///
/// ```text
///   form fields ──► price bounds ──► Make ──► every other column
///                      │              │            │
///                      ▼              ▼            ▼
///                  AppliedFilters (in evaluation order)
/// ```
///
/// Blank fields are ignored. Price bounds that do not parse as numbers are
/// ignored too; nothing here rejects a request.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::column::ColumnValue;
use crate::normalize::PRICE_COLUMN;
use crate::view::FilterView;

/// Column with its own filter step, ahead of the generic column filters.
pub const MAKE_COLUMN: &str = "Make";
/// Form field for the lower price bound.
pub const MIN_PRICE_FIELD: &str = "min_price";
/// Form field for the upper price bound.
pub const MAX_PRICE_FIELD: &str = "max_price";

/// Raw form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    fields: HashMap<String, String>,
}

impl FilterRequest {
    pub fn new(fields: HashMap<String, String>) -> Self {
        FilterRequest { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The raw value of `field` if it is present and not blank after trimming.
    pub fn active(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FilterRequest {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Outcome of reading a numeric form field.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    /// Absent, or only whitespace.
    Blank,
    /// Present but not a number; carries the raw text.
    Invalid(String),
    Value(f64),
}

impl NumericInput {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return NumericInput::Blank;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return NumericInput::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => NumericInput::Value(value),
            Err(_) => NumericInput::Invalid(raw.to_string()),
        }
    }
}

/// Which end of the price range a bound constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn field(&self) -> &'static str {
        match self {
            Bound::Min => MIN_PRICE_FIELD,
            Bound::Max => MAX_PRICE_FIELD,
        }
    }

    /// Whether a row price passes this bound. A missing or non-numeric price
    /// never passes.
    pub fn admits(&self, cell: &ColumnValue, limit: f64) -> bool {
        match (self, cell.as_f64()) {
            (Bound::Min, Some(price)) => price >= limit,
            (Bound::Max, Some(price)) => price <= limit,
            (_, None) => false,
        }
    }
}

/// Filter values that were applied, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedFilters {
    entries: Vec<(String, String)>,
}

impl AppliedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `field`, replacing an earlier value in place.
    pub fn insert(&mut self, field: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == field) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((field.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for AppliedFilters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Apply one price bound. Returns true if the bound was applied.
pub fn apply_price_bound(
    view: &mut FilterView<'_>,
    bound: Bound,
    raw: Option<&str>,
    applied: &mut AppliedFilters,
) -> bool {
    let limit = match NumericInput::parse(raw) {
        NumericInput::Blank => return false,
        NumericInput::Invalid(input) => {
            log::debug!("ignoring {}: '{}' is not a number", bound.field(), input);
            return false;
        }
        NumericInput::Value(limit) => limit,
    };

    if view.parent().column(PRICE_COLUMN).is_none() {
        log::debug!(
            "ignoring {}: table '{}' has no '{}' column",
            bound.field(),
            view.parent().name(),
            PRICE_COLUMN
        );
        return false;
    }

    view.retain_column(PRICE_COLUMN, |cell| bound.admits(cell, limit));
    if let Some(raw) = raw {
        applied.insert(bound.field(), raw);
    }
    true
}

/// Apply `min_price` then `max_price`.
pub fn apply_price_range(
    view: &mut FilterView<'_>,
    request: &FilterRequest,
    applied: &mut AppliedFilters,
) {
    apply_price_bound(view, Bound::Min, request.get(MIN_PRICE_FIELD), applied);
    apply_price_bound(view, Bound::Max, request.get(MAX_PRICE_FIELD), applied);
}

/// Keep rows whose `column` cell contains `raw` (trimmed), ignoring case.
fn apply_contains(
    view: &mut FilterView<'_>,
    column: &str,
    raw: &str,
    applied: &mut AppliedFilters,
) {
    let needle = raw.trim().to_lowercase();
    applied.insert(column, raw);
    view.retain_column(column, |cell| cell.contains_folded(&needle));
}

/// Substring match on `Make`. Named for the dedicated form field, but the
/// match is containment, so "ford" keeps "Ford Focus" and "CrossFord".
pub fn apply_make_filter(
    view: &mut FilterView<'_>,
    request: &FilterRequest,
    applied: &mut AppliedFilters,
) {
    if let Some(raw) = request.active(MAKE_COLUMN) {
        apply_contains(view, MAKE_COLUMN, raw, applied);
    }
}

/// Substring match for every other column that has a non-blank field.
///
/// Columns come from the parent table, not from the rows still in the view.
pub fn apply_column_filters(
    view: &mut FilterView<'_>,
    request: &FilterRequest,
    applied: &mut AppliedFilters,
) {
    let parent = view.parent();
    for column in parent.column_names() {
        if column == PRICE_COLUMN || column == MAKE_COLUMN {
            continue;
        }
        if let Some(raw) = request.active(column) {
            apply_contains(view, column, raw, applied);
        }
    }
}

/// Run every filter step in order: price bounds, `Make`, other columns.
pub fn apply_filters(view: &mut FilterView<'_>, request: &FilterRequest) -> AppliedFilters {
    let mut applied = AppliedFilters::new();
    apply_price_range(view, request, &mut applied);
    apply_make_filter(view, request, &mut applied);
    apply_column_filters(view, request, &mut applied);
    applied
}
