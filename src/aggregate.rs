//! Corpus composition statistics derived from a finished table.

use crate::config::fields;
use crate::counter::Tally;
use crate::table::MetadataTable;
use itertools::Itertools;
use serde::Serialize;

/// Category counts along the ELTeC corpus design criteria.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    pub num_novels: usize,
    #[serde(rename = "timeSlots")]
    pub time_slots: Tally<String>,
    #[serde(rename = "sizeCats")]
    pub size_cats: Tally<String>,
    pub canonicity: Tally<String>,
    #[serde(rename = "au-gender")]
    pub au_gender: Tally<String>,
}

/// The composition report plus author and length distributions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FullReport {
    pub num_novels: usize,
    pub num_authors: usize,
    #[serde(rename = "timeSlots")]
    pub time_slots: Tally<String>,
    #[serde(rename = "sizeCats")]
    pub size_cats: Tally<String>,
    pub canonicity: Tally<String>,
    #[serde(rename = "au-gender")]
    pub au_gender: Tally<String>,
    #[serde(rename = "texts-per-au")]
    pub texts_per_author: Tally<String>,
    /// Number of texts K to the number of authors with exactly K texts.
    #[serde(rename = "aus-per-textcount")]
    pub authors_per_textcount: Tally<u64>,
    /// Raw word counts; may contain the NA sentinel.
    pub text_lengths: Vec<String>,
}

fn tally(table: &MetadataTable, field: &str) -> Tally<String> {
    table.column(field).map(str::to_owned).collect()
}

fn distinct(table: &MetadataTable, field: &str) -> usize {
    table.column(field).unique().count()
}

pub fn composition(table: &MetadataTable) -> CompositionReport {
    CompositionReport {
        num_novels: distinct(table, fields::XMLID),
        time_slots: tally(table, fields::TIME_SLOT),
        size_cats: tally(table, fields::SIZE_CAT),
        canonicity: tally(table, fields::CANONICITY),
        au_gender: tally(table, fields::AU_GENDER),
    }
}

pub fn full(table: &MetadataTable) -> FullReport {
    let texts_per_author = tally(table, fields::AU_NAME);
    let authors_per_textcount = texts_per_author.iter().map(|(_, c)| c).collect();
    FullReport {
        num_novels: distinct(table, fields::XMLID),
        num_authors: texts_per_author.len(),
        time_slots: tally(table, fields::TIME_SLOT),
        size_cats: tally(table, fields::SIZE_CAT),
        canonicity: tally(table, fields::CANONICITY),
        au_gender: tally(table, fields::AU_GENDER),
        texts_per_author,
        authors_per_textcount,
        text_lengths: table.column(fields::NUMWORDS).map(str::to_owned).collect_vec(),
    }
}

/// Word counts that parse as numbers; the sentinel and junk are dropped.
pub fn numeric_lengths(report: &FullReport) -> Vec<u64> {
    report
        .text_lengths
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect_vec()
}

/// Shortest, longest and mean of [numeric_lengths], if there are any.
pub fn length_summary(report: &FullReport) -> Option<(u64, u64, u64)> {
    let lengths = numeric_lengths(report);
    let (min, max) = lengths.iter().copied().minmax().into_option()?;
    let sum: u128 = lengths.iter().map(|&n| u128::from(n)).sum();
    // The mean never exceeds the maximum, so it fits.
    let mean = (sum / lengths.len() as u128) as u64;
    Some((min, max, mean))
}
