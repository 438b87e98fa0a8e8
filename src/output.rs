//! Writing reports.
//!
//! The text form is a plain dump of the nested structure,
//! `{'key': value, ...}` with single-quoted strings and bare integers.
//! It is meant for people; use the JSON form for anything else.

use crate::aggregate::{CompositionReport, FullReport};
use crate::counter::Tally;
use crate::errors::Result;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use std::path::Path;
use std::{fmt, fs, io};

/// Text representation of a value inside a dump.
pub trait Repr {
    fn repr(&self) -> String;
}

impl Repr for str {
    fn repr(&self) -> String {
        let quote = if self.contains('\'') && !self.contains('"') {
            '"'
        } else {
            '\''
        };
        let mut s = String::with_capacity(self.len() + 2);
        s.push(quote);
        for c in self.chars() {
            match c {
                '\\' => s.push_str("\\\\"),
                '\n' => s.push_str("\\n"),
                '\t' => s.push_str("\\t"),
                '\r' => s.push_str("\\r"),
                c if c == quote => {
                    s.push('\\');
                    s.push(c);
                }
                c => s.push(c),
            }
        }
        s.push(quote);
        s
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        self.as_str().repr()
    }
}

impl Repr for u64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl Repr for usize {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl<T: Repr> Repr for [T] {
    fn repr(&self) -> String {
        format!("[{}]", self.iter().map(Repr::repr).join(", "))
    }
}

impl<T: Repr> Repr for Vec<T> {
    fn repr(&self) -> String {
        self.as_slice().repr()
    }
}

impl<K: Repr> Repr for Tally<K> {
    fn repr(&self) -> String {
        let entries = self.iter().map(|(k, c)| format!("{}: {}", k.repr(), c));
        format!("{{{}}}", entries.format(", "))
    }
}

fn dump(f: &mut fmt::Formatter, entries: &[(&str, &dyn Repr)]) -> fmt::Result {
    let entries = entries
        .iter()
        .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()));
    write!(f, "{{{}}}", entries.format(", "))
}

impl fmt::Display for CompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: [(&str, &dyn Repr); 5] = [
            ("num_novels", &self.num_novels),
            ("timeSlots", &self.time_slots),
            ("sizeCats", &self.size_cats),
            ("canonicity", &self.canonicity),
            ("au-gender", &self.au_gender),
        ];
        dump(f, &entries)
    }
}

impl fmt::Display for FullReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: [(&str, &dyn Repr); 9] = [
            ("num_novels", &self.num_novels),
            ("num_authors", &self.num_authors),
            ("timeSlots", &self.time_slots),
            ("sizeCats", &self.size_cats),
            ("canonicity", &self.canonicity),
            ("au-gender", &self.au_gender),
            ("texts-per-au", &self.texts_per_author),
            ("aus-per-textcount", &self.authors_per_textcount),
            ("text_lengths", &self.text_lengths),
        ];
        dump(f, &entries)
    }
}

/// Write the text dump, replacing any existing file.
pub fn save_report(report: &impl fmt::Display, path: &Path) -> Result<()> {
    fs::write(path, report.to_string())?;
    info!(target: "teimeta", "report saved: {}", path.display());
    Ok(())
}

pub fn save_json(report: &impl Serialize, path: &Path, compact: bool) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);
    if compact {
        serde_json::to_writer(writer, report)?;
    } else {
        serde_json::to_writer_pretty(writer, report)?;
    }
    info!(target: "teimeta", "report saved: {}", path.display());
    Ok(())
}

/// The dump wrapped for a terminal.
pub fn wrapped(report: &impl fmt::Display, width: usize) -> String {
    let options = textwrap::Options::new(width).subsequent_indent(" ");
    textwrap::fill(&report.to_string(), &options)
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}
