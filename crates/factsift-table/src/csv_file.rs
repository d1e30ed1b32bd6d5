//! CSV file source and sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use factsift_core::Result;
use tracing::info;

use crate::table::Table;
use crate::{TableSink, TableSource};

/// A delimited file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableSource for CsvFile {
    async fn load(&self) -> Result<Table> {
        let bytes = tokio::fs::read(&self.path).await?;
        let table = Table::from_csv_bytes(&bytes)?;
        info!(
            "Loaded {} rows x {} columns from {}",
            table.len(),
            table.columns.len(),
            self.path.display()
        );
        Ok(table)
    }
}

#[async_trait]
impl TableSink for CsvFile {
    async fn write(&self, table: &Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let csv = table.to_csv_string()?;
        tokio::fs::write(&self.path, csv).await?;
        info!("Wrote {} rows to {}", table.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factsift_core::Error;

    #[tokio::test]
    async fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = CsvFile::new(dir.path().join("out/extracted_data.csv"));
        let table = Table::new(
            vec!["Name".into(), "Note".into()],
            vec![vec!["Acme".into(), "line one\nline two".into()]],
        );

        file.write(&table).await.unwrap();
        let loaded = file.load().await.unwrap();
        assert_eq!(loaded, table);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = CsvFile::new(dir.path().join("nope.csv"));
        assert!(matches!(file.load().await, Err(Error::Io(_))));
    }
}
