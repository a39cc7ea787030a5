/// Listing query orchestration
///
/// One call per request: resolve the dataset, load it, normalize the price
/// column, run the filter steps when the request carries a submission, and
/// cut the result down to the page size.

use std::collections::HashMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::column::ColumnValue;
use crate::error::Result;
use crate::filter::{apply_filters, AppliedFilters, FilterRequest};
use crate::loader::TableLoader;
use crate::normalize::normalize_price_column;
use crate::registry::DatasetRegistry;
use crate::table::Row;
use crate::view::FilterView;

/// Rows returned per page.
pub const ROW_LIMIT: usize = 50;

/// Form field that selects the dataset.
pub const DATASET_FIELD: &str = "dataset";

/// What a request asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    pub dataset: Option<String>,
    /// `None` shows the form with the unfiltered dataset.
    pub filters: Option<FilterRequest>,
}

impl ListingRequest {
    /// A plain page view without filters.
    pub fn show(dataset: Option<String>) -> Self {
        ListingRequest {
            dataset,
            filters: None,
        }
    }

    /// A form submission. The `dataset` field selects the dataset and every
    /// field is offered to the filters.
    pub fn submit(fields: HashMap<String, String>) -> Self {
        let dataset = fields.get(DATASET_FIELD).cloned();
        ListingRequest {
            dataset,
            filters: Some(FilterRequest::new(fields)),
        }
    }

    pub fn is_submission(&self) -> bool {
        self.filters.is_some()
    }
}

/// Everything the page needs to render.
///
/// Serialized rows are JSON objects whose keys follow `columns`.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub datasets: Vec<String>,
    pub selected: String,
    pub columns: Vec<String>,
    pub filters: AppliedFilters,
    pub rows: Vec<Row>,
    pub total_rows: usize,
    pub matched_rows: usize,
}

impl Serialize for ListingPage {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut page = serializer.serialize_struct("ListingPage", 7)?;
        page.serialize_field("datasets", &self.datasets)?;
        page.serialize_field("selected", &self.selected)?;
        page.serialize_field("columns", &self.columns)?;
        page.serialize_field("filters", &self.filters)?;
        page.serialize_field(
            "rows",
            &OrderedRows {
                columns: &self.columns,
                rows: &self.rows,
            },
        )?;
        page.serialize_field("total_rows", &self.total_rows)?;
        page.serialize_field("matched_rows", &self.matched_rows)?;
        page.end()
    }
}

struct OrderedRows<'a> {
    columns: &'a [String],
    rows: &'a [Row],
}

impl Serialize for OrderedRows<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(|row| OrderedRow {
            columns: self.columns,
            row,
        }))
    }
}

/// One row as a map in column order.
struct OrderedRow<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            match self.row.get(column) {
                Some(cell) => map.serialize_entry(column, cell)?,
                None => map.serialize_entry(column, &ColumnValue::Null)?,
            }
        }
        map.end()
    }
}

/// Handles listing requests against a registry and a table source.
pub struct ListingService<'a> {
    registry: &'a DatasetRegistry,
    loader: &'a dyn TableLoader,
    row_limit: usize,
}

impl<'a> ListingService<'a> {
    pub fn new(registry: &'a DatasetRegistry, loader: &'a dyn TableLoader) -> Self {
        ListingService {
            registry,
            loader,
            row_limit: ROW_LIMIT,
        }
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn run(&self, request: &ListingRequest) -> Result<ListingPage> {
        let selected = self.registry.resolve(request.dataset.as_deref())?;
        let path = self.registry.path(selected)?;

        let mut table = self.loader.load(path).map_err(|e| {
            log::warn!("loading dataset '{}' failed: {}", selected, e);
            e
        })?;
        normalize_price_column(&mut table);

        let mut view = FilterView::new(&table);
        let filters = match &request.filters {
            Some(submission) => apply_filters(&mut view, submission),
            None => AppliedFilters::new(),
        };

        log::debug!("Total records before filtering: {}", table.len());
        log::debug!("Total records after filtering: {}", view.len());
        log::debug!("Applied filters: {:?}", filters);

        Ok(ListingPage {
            datasets: self.registry.keys().into_iter().map(String::from).collect(),
            selected: selected.to_string(),
            columns: table.column_names().into_iter().map(String::from).collect(),
            filters,
            rows: view.head(self.row_limit),
            total_rows: table.len(),
            matched_rows: view.len(),
        })
    }
}
