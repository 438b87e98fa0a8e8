//! Main entry point for building the table and the reports.

use crate::aggregate::{self, CompositionReport, FullReport};
use crate::config::Config;
use crate::errors::Result;
use crate::extract::Extractor;
use crate::input::{self, SourceFile};
use crate::output;
use crate::table::{MetadataTable, TableAssembler};
use log::{debug, error, info, warn};
use std::fs;

/// Everything one run produced.
pub struct Outcome {
    pub table: MetadataTable,
    pub composition: CompositionReport,
    pub full: FullReport,
    /// Files that could not be read or parsed.
    pub skipped: Vec<SourceFile>,
}

/// Extract one record per file and persist the table as it grows.
///
/// A file that cannot be read or parsed is logged and skipped; the run
/// goes on with the next one.
pub fn build_table(config: &Config) -> Result<(MetadataTable, Vec<SourceFile>)> {
    let files = input::enumerate(&config.input_dir, &config.pattern, &config.exclude)?;
    fs::create_dir_all(&config.output_dir)?;
    let extractor = Extractor::new(config);
    let mut assembler = TableAssembler::create(&config.table_path(), &config.columns)?;
    let mut skipped = vec![];
    for file in files {
        debug!(target: "teimeta", "read: {}", file.path.display());
        match extractor.extract_file(&file.path, &file.stem) {
            Ok(record) => assembler.append(record)?,
            Err(e) => {
                error!(target: "teimeta", "{}: skipped: {e}", file.path.display());
                skipped.push(file);
            }
        }
    }
    let table = assembler.finish();
    if !skipped.is_empty() {
        warn!(
            target: "teimeta",
            "{} of {} files skipped",
            skipped.len(),
            table.len() + skipped.len()
        );
    }
    Ok((table, skipped))
}

/// Calculate everything and write the table and both reports.
///
/// This is the main entry point for the library.
pub fn run(config: &Config) -> Result<Outcome> {
    let (table, skipped) = build_table(config)?;
    let composition = aggregate::composition(&table);
    output::save_report(&composition, &config.composition_path())?;
    let full = aggregate::full(&table);
    output::save_report(&full, &config.full_path())?;
    info!(
        target: "teimeta",
        "{} novels by {} authors",
        full.num_novels,
        full.num_authors
    );
    Ok(Outcome {
        table,
        composition,
        full,
        skipped,
    })
}
