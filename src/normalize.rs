/// Price column normalization
///
/// Listing datasets name their price column differently ("Price",
/// "price_gbp", "Listing Price"). The first column whose name contains
/// "price" in any case is renamed to the canonical `price` so the range
/// filter can address it.

use crate::table::Table;

/// Canonical name of the price column after normalization.
pub const PRICE_COLUMN: &str = "price";

/// Columns whose name contains "price" (any case), in table order.
pub fn price_columns<'a>(names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(PRICE_COLUMN))
        .collect()
}

/// Rename the leftmost price-like column to `price`.
///
/// Returns the original name of the renamed column, or `None` when nothing
/// was renamed: no price-like column exists, the leftmost one is already
/// called `price`, or a later column is already called `price` (renaming
/// would duplicate a column name).
pub fn normalize_price_column(table: &mut Table) -> Option<String> {
    let original = {
        let names = table.column_names();
        let first = *price_columns(&names).first()?;
        if first == PRICE_COLUMN {
            return None;
        }
        if names.contains(&PRICE_COLUMN) {
            log::warn!(
                "table '{}': not renaming '{}', a '{}' column already exists",
                table.name(),
                first,
                PRICE_COLUMN
            );
            return None;
        }
        first.to_string()
    };

    match table.rename_column(&original, PRICE_COLUMN) {
        Ok(()) => {
            log::debug!("table '{}': renamed '{}' to '{}'", table.name(), original, PRICE_COLUMN);
            Some(original)
        }
        Err(e) => {
            log::warn!("table '{}': {}", table.name(), e);
            None
        }
    }
}
