//! Spreadsheet export of table rows.
//!
//! Files are CSV with a UTF-8 byte order mark so spreadsheet applications pick
//! the right encoding, and `;` as the default delimiter.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::column::Column;
use crate::errors::ServiceError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the header row and `rows`; returns the number of data rows written.
pub fn write_csv<'a, T, W, I>(
    columns: &[Column<T>],
    rows: I,
    writer: W,
    delimiter: u8,
) -> Result<usize, ServiceError>
where
    T: 'a,
    W: Write,
    I: IntoIterator<Item = &'a T>,
{
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return Err(ServiceError::ExportError("No data to export".to_string()));
    }

    let mut writer = writer;
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv.write_record(columns.iter().map(|c| c.label))?;

    let mut written = 0;
    for row in rows {
        csv.write_record(columns.iter().map(|c| c.value(row).to_string()))?;
        written += 1;
    }
    csv.flush()?;
    Ok(written)
}

pub fn export_to_path<'a, T, I>(
    columns: &[Column<T>],
    rows: I,
    path: &Path,
    delimiter: u8,
) -> Result<usize, ServiceError>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    let file = File::create(path)?;
    let written = write_csv(columns, rows, BufWriter::new(file), delimiter)?;
    info!(path = %path.display(), rows = written, "Table exported");
    Ok(written)
}
