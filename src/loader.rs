/// Dataset loading
///
/// The request path only needs `load(path) -> Table`; `TableLoader` is the
/// seam, `CsvLoader` reads CSV files from disk.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::LoadError;
use crate::table::Table;

/// Source of tables, addressed by storage path.
pub trait TableLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Table, LoadError>;
}

/// Reads a CSV file with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl TableLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<Table, LoadError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let table = read_csv(path, BufReader::new(file))?;
        log::debug!(
            "loaded {} rows x {} columns from {}",
            table.len(),
            table.schema().len(),
            path.display()
        );
        Ok(table)
    }
}

/// Parse CSV from `reader`, naming the table after the file stem of `path`.
pub fn read_csv<R: Read>(path: &Path, reader: R) -> Result<Table, LoadError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");

    Table::from_csv_reader(name, reader).map_err(|e| LoadError::from_read(path, e))
}
