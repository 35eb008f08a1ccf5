use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::record::TableRecord;
use crate::domain::table_view::TableView;

/// Writes the filtered and sorted rows of `view` (every page) to `csv_path`.
pub fn export_visible_to_csv<R: TableRecord>(view: &TableView<R>, csv_path: &Path) -> Result<usize> {
    let headers: Vec<&str> = R::columns().iter().map(|column| column.label).collect();
    let rows: Vec<Vec<String>> = view.visible().iter().map(|row| row.record.cells()).collect();
    write_rows(csv_path, &headers, &rows)
}

pub fn write_rows(csv_path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<usize> {
    if let Some(parent) = csv_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for row in rows {
        writer
            .write_record(row)
            .context("failed to write csv record")?;
    }
    writer.flush().context("failed to flush csv")?;

    Ok(rows.len())
}
