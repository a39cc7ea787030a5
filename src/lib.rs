/// carlist - vehicle listing browser
///
/// Loads listing datasets from CSV, normalizes the price column, narrows the
/// rows with form-driven column filters, and renders the first page of
/// matches as HTML (or JSON through the API).

pub mod column;
pub mod table;
pub mod view;
pub mod normalize;
pub mod filter;
pub mod error;
pub mod loader;
pub mod registry;
pub mod query;
pub mod render;
pub mod messages;

pub use column::{Column, ColumnValue};
pub use table::{Row, Schema, Table};
pub use view::FilterView;
pub use normalize::{normalize_price_column, PRICE_COLUMN};
pub use filter::{apply_filters, AppliedFilters, Bound, FilterRequest, NumericInput};
pub use error::{Error, LoadError, TableReadError};
pub use loader::{CsvLoader, TableLoader};
pub use registry::DatasetRegistry;
pub use query::{ListingPage, ListingRequest, ListingService, ROW_LIMIT};

// HTTP server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;
