//! The metadata table, in memory and on disk.
//!
//! The file on disk is append-only: the header is written when the run
//! starts and every record is appended and flushed as soon as it is added.
//! A run that dies halfway leaves a valid CSV file with the records seen so
//! far.

use crate::errors::Result;
use crate::record::MetadataRecord;
use log::{debug, info};
use std::fs::File;
use std::iter;
use std::path::{Path, PathBuf};

/// All records of one run, with a fixed column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataTable {
    columns: Vec<String>,
    records: Vec<MetadataRecord>,
}

impl MetadataTable {
    pub fn new(columns: &[String]) -> MetadataTable {
        MetadataTable {
            columns: columns.to_vec(),
            records: vec![],
        }
    }

    pub fn push(&mut self, record: MetadataRecord) {
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one field, in row order.
    pub fn column<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records.iter().map(move |r| r.get(field))
    }

    /// Rows projected to the column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        self.records
            .iter()
            .map(|r| r.project(&self.columns).collect())
    }
}

/// Append-only CSV writer with a leading row index column.
pub struct TableWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    columns: Vec<String>,
    rows: usize,
}

impl TableWriter {
    /// Create (or truncate) the file and write the header.
    pub fn create(path: &Path, columns: &[String]) -> Result<TableWriter> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(iter::once("").chain(columns.iter().map(String::as_str)))?;
        writer.flush()?;
        debug!(target: "teimeta", "created {}", path.display());
        Ok(TableWriter {
            path: path.to_owned(),
            writer,
            columns: columns.to_vec(),
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &MetadataRecord) -> Result<()> {
        let index = self.rows.to_string();
        self.writer
            .write_record(iter::once(index.as_str()).chain(record.project(&self.columns)))?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Builds the table in memory while persisting every record as it arrives.
pub struct TableAssembler {
    table: MetadataTable,
    writer: TableWriter,
}

impl TableAssembler {
    pub fn create(path: &Path, columns: &[String]) -> Result<TableAssembler> {
        Ok(TableAssembler {
            table: MetadataTable::new(columns),
            writer: TableWriter::create(path, columns)?,
        })
    }

    pub fn append(&mut self, record: MetadataRecord) -> Result<()> {
        self.writer.append(&record)?;
        self.table.push(record);
        Ok(())
    }

    pub fn finish(self) -> MetadataTable {
        info!(
            target: "teimeta",
            "wrote {} rows to {}",
            self.writer.rows(),
            self.writer.path.display()
        );
        self.table
    }
}
