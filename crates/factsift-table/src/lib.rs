//! FactSift Table: entity sources and result sinks.
//!
//! `Table` is a plain header + rows grid. Tables come from CSV files or
//! uploads (`CsvFile`, `Table::from_csv_bytes`) or from the first worksheet
//! of a Google spreadsheet (`GoogleSheet`), and go back out the same way.

pub mod csv_file;
pub mod sheets;
pub mod table;

pub use csv_file::CsvFile;
pub use sheets::{
    GoogleSheet, ServiceAccountKey, ServiceAccountTokens, SheetConnector, StaticToken,
    TokenSource,
};
pub use table::{Table, EMAILS_COLUMN, PHONES_COLUMN, SUMMARY_COLUMN};

use async_trait::async_trait;
use factsift_core::Result;

/// Somewhere a table can be loaded from.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn load(&self) -> Result<Table>;
}

/// Somewhere a table can be written to.
#[async_trait]
pub trait TableSink: Send + Sync {
    async fn write(&self, table: &Table) -> Result<()>;
}
