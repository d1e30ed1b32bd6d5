//! In-memory table and the result merge.

use std::io::{Read, Write};

use factsift_core::{Error, ExtractionRecord, Result};
use serde::{Deserialize, Serialize};

pub const SUMMARY_COLUMN: &str = "LLM Output";
pub const PHONES_COLUMN: &str = "Fallback Phones";
pub const EMAILS_COLUMN: &str = "Fallback Emails";

/// Header row plus string cells. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, padding or truncating rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// First row is the header; the rest are records.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::Table("table has no header row".into()));
        }
        let header = grid.remove(0);
        let columns = clean_header(header)?;
        let rows = grid
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        Ok(Self::new(columns, rows))
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        let columns = clean_header(header)?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(String::from).collect());
        }
        Ok(Self::new(columns, rows))
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_csv_reader(bytes)
    }

    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.to_csv_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Table(format!("CSV output is not UTF-8: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let idx = self.column_index(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
            available: self.columns.clone(),
        })?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// Copy of the header and the first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Append (or overwrite) the summary, phone and email columns.
    ///
    /// `records[i]` goes to row `i`; the counts must match.
    pub fn with_results(&self, records: &[ExtractionRecord]) -> Result<Table> {
        if records.len() != self.rows.len() {
            return Err(Error::Table(format!(
                "{} results for {} rows",
                records.len(),
                self.rows.len()
            )));
        }

        let mut out = self.clone();
        let summary_idx = out.ensure_column(SUMMARY_COLUMN);
        let phones_idx = out.ensure_column(PHONES_COLUMN);
        let emails_idx = out.ensure_column(EMAILS_COLUMN);

        for (row, record) in out.rows.iter_mut().zip(records) {
            row[summary_idx] = record.summary.clone().unwrap_or_default();
            row[phones_idx] = record.phones.join(", ");
            row[emails_idx] = record.emails.join(", ");
        }
        Ok(out)
    }

    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }
}

fn clean_header(header: Vec<String>) -> Result<Vec<String>> {
    let columns: Vec<String> = header
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let c = if i == 0 {
                c.trim_start_matches('\u{feff}').to_string()
            } else {
                c
            };
            c.trim().to_string()
        })
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(Error::Table("table has no header row".into()));
    }
    Ok(columns)
}
