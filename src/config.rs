//! Fixed run configuration.

use crate::errors::Result;
use crate::query::{self, Namespaces, PathQuery};
use std::path::{Path, PathBuf};

/// Field names with a special role in the pipeline.
pub mod fields {
    pub const FILENAME: &str = "filename";
    pub const XMLID: &str = "xmlid";
    pub const AU_NAME: &str = "au-name";
    pub const AU_BIRTH: &str = "au-birth";
    pub const AU_DEATH: &str = "au-death";
    pub const TITLE: &str = "title";
    pub const TITLE_IDS: &str = "title-ids";
    pub const AU_IDS: &str = "au-ids";
    pub const AU_GENDER: &str = "au-gender";
    pub const SIZE_CAT: &str = "sizeCat";
    pub const CANONICITY: &str = "canonicity";
    pub const TIME_SLOT: &str = "time-slot";
    pub const FIRST_ED: &str = "first-ed";
    pub const NUMWORDS: &str = "numwords";
    pub const LANGUAGE: &str = "language";
}

use fields::*;

const ELTEC_FIELDS: [(&str, &str); 11] = [
    (XMLID, "//tei:TEI/@xml:id"),
    (TITLE, "//tei:titleStmt/tei:title/text()"),
    (TITLE_IDS, "//tei:titleStmt/tei:title/@ref"),
    (AU_IDS, "//tei:titleStmt/tei:author/@ref"),
    (NUMWORDS, "//tei:extent/tei:measure[@unit='words']/text()"),
    (AU_GENDER, "//tei:textDesc/eltec:authorGender/@key"),
    (SIZE_CAT, "//tei:textDesc/eltec:size/@key"),
    (CANONICITY, "//tei:textDesc/eltec:canonicity/@key"),
    (TIME_SLOT, "//tei:textDesc/eltec:timeSlot/@key"),
    (FIRST_ED, "//tei:bibl[@type='edition-first']/tei:date/text()"),
    (LANGUAGE, "//tei:langUsage/tei:language/@ident"),
];

const ELTEC_AUTHOR: &str = "//tei:titleStmt/tei:author/text()";

const ELTEC_COLUMNS: [&str; 15] = [
    FILENAME, XMLID, AU_NAME, TITLE, AU_BIRTH, AU_DEATH, AU_GENDER, AU_IDS, FIRST_ED, TITLE_IDS,
    SIZE_CAT, CANONICITY, TIME_SLOT, NUMWORDS, LANGUAGE,
];

/// A named query locating one field inside a document.
#[derive(Clone, Debug)]
pub struct FieldPath {
    pub name: String,
    pub query: PathQuery,
}

impl FieldPath {
    pub fn new(name: &str, query: &str, namespaces: &Namespaces) -> Result<FieldPath> {
        Ok(FieldPath {
            name: name.to_owned(),
            query: PathQuery::parse(query, namespaces)?,
        })
    }
}

/// Everything a run needs to know, built once and never changed.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory with the XML files.
    pub input_dir: PathBuf,
    /// File name pattern inside [Config::input_dir].
    pub pattern: String,
    /// Files whose stem contains this are skipped.
    pub exclude: String,
    pub output_dir: PathBuf,
    pub fields: Vec<FieldPath>,
    /// The composite author string, split into name, birth and death.
    pub author: PathQuery,
    /// Column order of the metadata table.
    pub columns: Vec<String>,
    pub table_file: String,
    pub composition_file: String,
    pub full_file: String,
}

impl Config {
    /// Default configuration for ELTeC level-1 collections.
    pub fn eltec(input_dir: &Path, output_dir: &Path) -> Result<Config> {
        let namespaces = query::eltec_namespaces();
        let fields = ELTEC_FIELDS
            .iter()
            .map(|(name, q)| FieldPath::new(name, q, &namespaces))
            .collect::<Result<Vec<_>>>()?;
        Ok(Config {
            input_dir: input_dir.to_owned(),
            pattern: "*.xml".to_owned(),
            exclude: "schemas".to_owned(),
            output_dir: output_dir.to_owned(),
            fields,
            author: PathQuery::parse(ELTEC_AUTHOR, &namespaces)?,
            columns: ELTEC_COLUMNS.iter().map(|&c| c.to_owned()).collect(),
            table_file: "metadata.csv".to_owned(),
            composition_file: "report_composition.txt".to_owned(),
            full_file: "report_full.txt".to_owned(),
        })
    }

    pub fn with_exclude(mut self, exclude: &str) -> Config {
        self.exclude = exclude.to_owned();
        self
    }

    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(&self.table_file)
    }

    pub fn composition_path(&self) -> PathBuf {
        self.output_dir.join(&self.composition_file)
    }

    pub fn full_path(&self) -> PathBuf {
        self.output_dir.join(&self.full_file)
    }
}
