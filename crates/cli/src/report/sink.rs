// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Destinations for a finished report.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::Result;

use super::row::Cell;

const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm";

/// Persists one named table: a header row followed by data rows.
pub trait ReportSink {
    fn write_sheet(&mut self, title: &str, columns: &[&str], rows: &[Vec<Cell>]) -> Result<()>;
}

/// Writes the table as a single-sheet `.xlsx` workbook.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    /// Sink for `<output_dir>/<name>.xlsx`.
    pub fn new(output_dir: &Path, name: &str) -> Self {
        XlsxSink {
            path: output_dir.join(format!("{name}.xlsx")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for XlsxSink {
    fn write_sheet(&mut self, title: &str, columns: &[&str], rows: &[Vec<Cell>]) -> Result<()> {
        let header = Format::new().set_bold();
        let date_time = Format::new().set_num_format(DATE_TIME_FORMAT);

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(title)?;

        for (col, name) in columns.iter().enumerate() {
            sheet.write_string_with_format(0, column(col)?, *name, &header)?;
        }

        for (index, cells) in rows.iter().enumerate() {
            let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in cells.iter().enumerate() {
                let col = column(col)?;
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(row, col, text.as_str())?;
                    }
                    Cell::Integer(n) => {
                        sheet.write_number(row, col, *n as f64)?;
                    }
                    Cell::DateTime(dt) => {
                        sheet.write_datetime_with_format(row, col, dt, &date_time)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        for col in 0..columns.len() {
            sheet.set_column_width(column(col)?, 20)?;
        }

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        workbook.save(&self.path)?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "wrote report workbook");
        Ok(())
    }
}

fn column(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
