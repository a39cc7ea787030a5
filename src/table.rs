/// Listing table implementation
///
/// A Table is an ordered collection of named text columns with aligned rows.
/// Tables are built once from a dataset file and are read-only afterwards,
/// apart from column renames applied during normalization.
///
/// # Examples
///
/// ```
/// use carlist::Table;
///
/// let table = Table::from_csv("cars", "Make,Price\nFord Focus,12000\nTesla S,45000\n").unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.column_names(), vec!["Make", "Price"]);
/// assert_eq!(table.get_value(1, "Make").unwrap().as_string(), Some("Tesla S"));
/// ```

use crate::column::{Column, ColumnValue};
use crate::error::TableReadError;
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// A row keyed by column name.
pub type Row = HashMap<String, ColumnValue>;

/// Ordered, unique column names of a table.
///
/// # Examples
///
/// ```
/// use carlist::Schema;
///
/// let schema = Schema::new(vec!["Make".to_string(), "Price".to_string()]);
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get_column_index("Price"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_column_index(name).is_some()
    }
}

/// Root table owning its data.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Schema,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(name: String, schema: Schema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|col_name| Column::new(col_name.clone()))
            .collect();

        Table {
            name,
            schema,
            columns,
            row_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.get_column_names()
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.schema
            .get_column_index(name)
            .map(|idx| &self.columns[idx])
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<&ColumnValue, String> {
        let col_idx = self
            .schema
            .get_column_index(column)
            .ok_or_else(|| format!("Column '{}' not found", column))?;

        self.columns[col_idx].get(row)
    }

    pub fn get_row(&self, row: usize) -> Result<Row, String> {
        if row >= self.row_count {
            return Err(format!("Row {} out of range [0, {})", row, self.row_count));
        }

        let mut result = HashMap::with_capacity(self.columns.len());
        for col in &self.columns {
            result.insert(col.name().to_string(), col.get(row)?.clone());
        }

        Ok(result)
    }

    /// Append a row given positionally, in schema order.
    pub fn append_values(&mut self, values: Vec<ColumnValue>) -> Result<(), String> {
        if values.len() != self.columns.len() {
            return Err(format!(
                "Row has {} fields but table '{}' has {} columns",
                values.len(),
                self.name,
                self.columns.len()
            ));
        }

        for (col, value) in self.columns.iter_mut().zip(values) {
            col.append(value);
        }
        self.row_count += 1;

        Ok(())
    }

    /// Rename a column in place, keeping its position and data.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<(), String> {
        let idx = self
            .schema
            .get_column_index(old)
            .ok_or_else(|| format!("Column '{}' not found", old))?;

        if old == new {
            return Ok(());
        }
        if self.schema.contains(new) {
            return Err(format!("Column '{}' already exists", new));
        }

        self.schema.columns[idx] = new.to_string();
        self.columns[idx].rename(new.to_string());
        Ok(())
    }

    /// Build a table from CSV text with a header row.
    pub fn from_csv(name: &str, csv: &str) -> Result<Table, TableReadError> {
        Self::from_csv_reader(name, csv.as_bytes())
    }

    /// Build a table from a CSV byte stream with a header row.
    ///
    /// Blank header cells become `Unnamed: <index>` and repeated names get a
    /// `.N` suffix, so column names are always unique. Empty fields are
    /// stored as `ColumnValue::Null`. Unreadable CSV is a
    /// `TableReadError::Csv`; a missing header or a record with a different
    /// field count than the header is a `TableReadError::Schema`.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R) -> Result<Table, TableReadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(TableReadError::Schema("Missing header row".to_string()));
        }

        let mut table = Table::new(name.to_string(), Schema::new(dedupe_headers(headers.iter())));

        for (row_no, record) in rdr.records().enumerate() {
            let record = record?;
            let values = record.iter().map(ColumnValue::from_field).collect();
            table
                .append_values(values)
                .map_err(|e| TableReadError::Schema(format!("Row {}: {}", row_no + 1, e)))?;
        }

        Ok(table)
    }
}

/// Make header names unique and non-empty.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, raw) in headers.enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
