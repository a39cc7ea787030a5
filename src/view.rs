/// Filtered views over a table
///
/// A view never copies or mutates the parent table. It keeps a mapping from
/// view positions to parent row indices and narrows that mapping each time a
/// predicate is applied, so successive filters intersect.

use crate::column::ColumnValue;
use crate::table::{Row, Table};

/// A FilterView selects rows from the parent table.
///
/// # Examples
///
/// ```
/// use carlist::{FilterView, Table};
///
/// let table = Table::from_csv("cars", "Make,price\nFord,100\nTesla,900\n").unwrap();
/// let mut view = FilterView::new(&table);
///
/// view.retain_column("Make", |cell| cell.contains_ignore_case("tes"));
///
/// assert_eq!(view.len(), 1);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FilterView<'a> {
    parent: &'a Table,
    view_to_parent: Vec<usize>,
}

impl<'a> FilterView<'a> {
    /// A view over every row of `parent`.
    pub fn new(parent: &'a Table) -> Self {
        FilterView {
            parent,
            view_to_parent: (0..parent.len()).collect(),
        }
    }

    pub fn parent(&self) -> &'a Table {
        self.parent
    }

    pub fn len(&self) -> usize {
        self.view_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_parent.is_empty()
    }

    /// Parent row indices currently in the view, in parent order.
    pub fn indices(&self) -> &[usize] {
        &self.view_to_parent
    }

    /// Keep only rows whose cell in `column` satisfies `predicate`.
    ///
    /// If the column does not exist every cell reads as `Null`.
    pub fn retain_column<F>(&mut self, column: &str, predicate: F)
    where
        F: Fn(&ColumnValue) -> bool,
    {
        match self.parent.column(column) {
            Some(col) => self.view_to_parent.retain(|&idx| {
                col.get(idx).map(|cell| predicate(cell)).unwrap_or(false)
            }),
            None => {
                if !predicate(&ColumnValue::Null) {
                    self.view_to_parent.clear();
                }
            }
        }
    }

    pub fn get_row(&self, index: usize) -> Result<Row, String> {
        let parent_index = self
            .view_to_parent
            .get(index)
            .ok_or_else(|| format!("Index {} out of range [0, {})", index, self.len()))?;
        self.parent.get_row(*parent_index)
    }

    pub fn get_value(&self, row: usize, column: &str) -> Result<&'a ColumnValue, String> {
        let parent_index = self
            .view_to_parent
            .get(row)
            .ok_or_else(|| format!("Row {} out of range [0, {})", row, self.len()))?;
        self.parent.get_value(*parent_index, column)
    }

    /// The first `n` rows of the view.
    pub fn head(&self, n: usize) -> Vec<Row> {
        self.view_to_parent
            .iter()
            .take(n)
            .filter_map(|&idx| self.parent.get_row(idx).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_csv(
            "cars",
            "Make,Model,price\n\
             Ford,Focus,12000\n\
             Tesla,Model S,45000\n\
             Ford,Kuga,\n\
             Kia,Niro,30000\n",
        )
        .unwrap()
    }

    #[test]
    fn test_filter_view() {
        let table = sample_table();
        let mut view = FilterView::new(&table);
        assert_eq!(view.len(), 4);

        view.retain_column("Make", |cell| cell.contains_ignore_case("ford"));

        assert_eq!(view.len(), 2);
        assert_eq!(view.indices(), &[0, 2]);
        assert_eq!(view.get_value(1, "Model").unwrap().as_string(), Some("Kuga"));
        assert!(view.get_row(2).is_err());
    }

    #[test]
    fn test_filter_view_intersects() {
        let table = sample_table();
        let mut view = FilterView::new(&table);

        view.retain_column("Make", |cell| cell.contains_ignore_case("ford"));
        view.retain_column("price", |cell| cell.as_f64().map_or(false, |p| p >= 10000.0));

        assert_eq!(view.len(), 1);
        assert_eq!(view.get_row(0).unwrap()["Model"].as_text(), "Focus");
    }

    #[test]
    fn test_filter_view_leaves_parent_untouched() {
        let table = sample_table();
        let mut view = FilterView::new(&table);
        view.retain_column("Make", |_| false);

        assert!(view.is_empty());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_filter_view_missing_column() {
        let table = sample_table();

        let mut view = FilterView::new(&table);
        view.retain_column("Colour", |cell| cell.contains_ignore_case("red"));
        assert!(view.is_empty());

        let mut view = FilterView::new(&table);
        view.retain_column("Colour", ColumnValue::is_null);
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_head() {
        let table = sample_table();
        let view = FilterView::new(&table);

        let rows = view.head(2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Make"].as_text(), "Tesla");

        assert_eq!(view.head(100).len(), 4);
        assert_eq!(view.parent().len(), 4);
    }
}
