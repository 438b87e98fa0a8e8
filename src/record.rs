use crate::NA;
use std::collections::HashMap;

/// Metadata of one document: field name to raw text value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataRecord {
    values: HashMap<String, String>,
}

impl MetadataRecord {
    pub fn new(values: HashMap<String, String>) -> MetadataRecord {
        MetadataRecord { values }
    }

    /// The value of a field, or [NA] if the record has no such field.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or(NA, String::as_str)
    }

    /// Values in the given column order.
    pub fn project<'a>(&'a self, columns: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        columns.iter().map(|c| self.get(c))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        MetadataRecord::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
