//! Fixed-bucket series for corpus composition charts.
//!
//! Drawing is left to other tools. A bucket that does not occur in the
//! report counts as zero, and values that have no bucket are left out.

use crate::aggregate::FullReport;
use crate::counter::Tally;
use itertools::Itertools;
use log::debug;
use std::fmt;

pub struct Chart {
    pub name: &'static str,
    pub title: &'static str,
    pub series: Vec<(&'static str, u64)>,
}

fn series(
    name: &str,
    tally: &Tally<String>,
    buckets: &[(&str, &'static str)],
) -> Vec<(&'static str, u64)> {
    for (key, _) in tally.iter() {
        if !buckets.iter().any(|(b, _)| b == key) {
            debug!(target: "teimeta", "{name}: value '{key}' has no bucket");
        }
    }
    buckets
        .iter()
        .map(|&(key, label)| (label, tally.get(&key.to_owned())))
        .collect_vec()
}

pub fn au_genders(report: &FullReport) -> Chart {
    Chart {
        name: "au-genders",
        title: "Number of novels per author gender",
        series: series(
            "au-genders",
            &report.au_gender,
            &[("M", "Male"), ("F", "Female"), ("X", "Other")],
        ),
    }
}

pub fn size_cats(report: &FullReport) -> Chart {
    Chart {
        name: "sizeCats",
        title: "Number of novels per size category",
        series: series(
            "sizeCats",
            &report.size_cats,
            &[
                ("short", "short (10-50k words)"),
                ("medium", "medium (50-100k words)"),
                ("long", "long (>100k words)"),
            ],
        ),
    }
}

pub fn time_slots(report: &FullReport) -> Chart {
    Chart {
        name: "timeSlots",
        title: "Number of novels per time period",
        series: series(
            "timeSlots",
            &report.time_slots,
            &[
                ("T1", "T1 (1840-1859)"),
                ("T2", "T2 (1860-1879)"),
                ("T3", "T3 (1880-1899)"),
                ("T4", "T4 (1900-1919)"),
            ],
        ),
    }
}

pub fn canonicity(report: &FullReport) -> Chart {
    Chart {
        name: "canonicity",
        title: "Number of novels per canonicity category",
        series: series(
            "canonicity",
            &report.canonicity,
            &[
                ("low", "low canonicity"),
                ("medium", "medium canonicity"),
                ("high", "high canonicity"),
            ],
        ),
    }
}

pub fn novels_per_author(report: &FullReport) -> Chart {
    const LABELS: [&str; 5] = ["1 novel", "2 novels", "3 novels", "4 novels", "5 novels"];
    let counts = &report.authors_per_textcount;
    for (k, _) in counts.iter() {
        if !(1..=LABELS.len() as u64).contains(k) {
            debug!(target: "teimeta", "novels-per-author: {k} novels has no bucket");
        }
    }
    Chart {
        name: "novels-per-author",
        title: "Number of authors with given number of novels",
        series: LABELS
            .iter()
            .zip(1u64..)
            .map(|(&label, k)| (label, counts.get(&k)))
            .collect_vec(),
    }
}

pub fn all(report: &FullReport) -> Vec<Chart> {
    vec![
        au_genders(report),
        size_cats(report),
        time_slots(report),
        canonicity(report),
        novels_per_author(report),
    ]
}

const BAR_WIDTH: u64 = 40;

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        let max = self.series.iter().map(|&(_, c)| c).max().unwrap_or(0);
        let width = self.series.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for &(label, count) in &self.series {
            let bar = if max == 0 {
                0
            } else {
                (count * BAR_WIDTH).div_ceil(max)
            };
            writeln!(
                f,
                "  {label:<width$} {count:>5} {}",
                "#".repeat(bar as usize)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tally(keys: &[&str]) -> Tally<String> {
        keys.iter().map(|&k| k.to_owned()).collect()
    }

    fn report() -> FullReport {
        FullReport {
            num_novels: 4,
            num_authors: 3,
            time_slots: tally(&["T1", "T3", "T3", "T9"]),
            size_cats: tally(&["short", "long", "long", "NA"]),
            canonicity: tally(&["medium", "medium", "medium", "medium"]),
            au_gender: tally(&["M", "F", "M", "M"]),
            texts_per_author: tally(&["A", "A", "B", "C"]),
            authors_per_textcount: [2, 1, 1].into_iter().collect(),
            text_lengths: vec![],
        }
    }

    #[test]
    fn missing_buckets_are_zero() {
        let r = report();
        assert_eq!(
            au_genders(&r).series,
            [("Male", 3), ("Female", 1), ("Other", 0)]
        );
        assert_eq!(
            canonicity(&r).series,
            [
                ("low canonicity", 0),
                ("medium canonicity", 4),
                ("high canonicity", 0)
            ]
        );
        assert_eq!(
            novels_per_author(&r).series,
            [
                ("1 novel", 2),
                ("2 novels", 1),
                ("3 novels", 0),
                ("4 novels", 0),
                ("5 novels", 0)
            ]
        );
    }

    #[test]
    fn unknown_values_are_left_out() {
        let r = report();
        let slots = time_slots(&r).series;
        assert_eq!(slots.iter().map(|&(_, c)| c).sum::<u64>(), 3);
        let sizes = size_cats(&r).series;
        assert_eq!(sizes.iter().map(|&(_, c)| c).collect_vec(), [1, 0, 2]);
    }

    #[test]
    fn text_bars() {
        let chart = Chart {
            name: "x",
            title: "Title",
            series: vec![("a", 2), ("bb", 1), ("c", 0)],
        };
        let s = chart.to_string();
        let lines = s.lines().collect_vec();
        assert_eq!(lines[0], "Title:");
        assert!(lines[1].ends_with(&"#".repeat(40)));
        assert!(lines[2].ends_with(&format!(" {}", "#".repeat(20))));
        assert!(lines[3].ends_with("0 "));
        assert_eq!(all(&report()).len(), 5);
    }
}
