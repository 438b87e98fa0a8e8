//! Turning one document into one [MetadataRecord].

use crate::author::AuthorParser;
use crate::config::{Config, fields};
use crate::errors::Result;
use crate::query::{PathQuery, Queryable, TeiDocument};
use crate::record::MetadataRecord;
use crate::NA;
use log::{debug, trace};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// First match of a query, or [NA].
pub fn first_or_na(doc: &impl Queryable, query: &PathQuery) -> String {
    match doc.evaluate(query).into_iter().next() {
        Some(value) => value,
        None => NA.to_owned(),
    }
}

pub struct Extractor<'a> {
    config: &'a Config,
    author: AuthorParser,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a Config) -> Extractor<'a> {
        Extractor {
            config,
            author: AuthorParser::new(),
        }
    }

    /// Evaluate every configured field against a parsed document.
    ///
    /// Missing fields become [NA] one by one; the three author fields
    /// become [NA] together.
    pub fn extract(&self, stem: &str, doc: &impl Queryable) -> MetadataRecord {
        let mut values = HashMap::new();
        values.insert(fields::FILENAME.to_owned(), stem.to_owned());

        let composite = doc.evaluate(&self.config.author).into_iter().next();
        let author = self.author.parse(composite.as_deref());
        if author.name == NA {
            debug!(target: "teimeta", "{stem}: author not available in {composite:?}");
        }
        values.insert(fields::AU_NAME.to_owned(), author.name);
        values.insert(fields::AU_BIRTH.to_owned(), author.birth);
        values.insert(fields::AU_DEATH.to_owned(), author.death);

        for field in &self.config.fields {
            let value = first_or_na(doc, &field.query);
            if value == NA {
                debug!(target: "teimeta", "{stem}: no match for {} ({})", field.name, field.query);
            } else {
                trace!(target: "teimeta", "{stem}: {} = {value}", field.name);
            }
            values.insert(field.name.clone(), value);
        }
        MetadataRecord::new(values)
    }

    /// Read and parse one file, then extract its record.
    pub fn extract_file(&self, path: &Path, stem: &str) -> Result<MetadataRecord> {
        let text = fs::read_to_string(path)?;
        let doc = TeiDocument::parse(&text)?;
        Ok(self.extract(stem, &doc))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::fields::*;
    use crate::query::eltec_namespaces;
    use std::collections::HashMap;

    const FULL: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:eltec="http://distantreading.net/eltec/ns" xml:id="ENG18400">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title ref="viaf:99">A Novel</title>
        <author ref="viaf:1 wikidata:Q2">Jane Doe (J.D.) (1800-1850)</author>
      </titleStmt>
      <extent><measure unit="words">54321</measure></extent>
      <sourceDesc>
        <bibl type="edition-first"><date>1845</date></bibl>
      </sourceDesc>
    </fileDesc>
    <profileDesc>
      <langUsage><language ident="en"/></langUsage>
      <textDesc>
        <eltec:authorGender key="F"/>
        <eltec:size key="medium"/>
        <eltec:canonicity key="low"/>
        <eltec:timeSlot key="T1"/>
      </textDesc>
    </profileDesc>
  </teiHeader>
</TEI>"#;

    fn config() -> Config {
        Config::eltec(Path::new("."), Path::new(".")).unwrap()
    }

    #[test]
    fn extract_all_fields() {
        let config = config();
        let doc = TeiDocument::parse(FULL).unwrap();
        let record = Extractor::new(&config).extract("ENG18400_Doe", &doc);
        assert_eq!(record.get(FILENAME), "ENG18400_Doe");
        assert_eq!(record.get(XMLID), "ENG18400");
        assert_eq!(record.get(TITLE), "A Novel");
        assert_eq!(record.get(TITLE_IDS), "viaf:99");
        assert_eq!(record.get(AU_IDS), "viaf:1 wikidata:Q2");
        assert_eq!(record.get(AU_NAME), "Jane Doe");
        assert_eq!(record.get(AU_BIRTH), "1800");
        assert_eq!(record.get(AU_DEATH), "1850");
        assert_eq!(record.get(NUMWORDS), "54321");
        assert_eq!(record.get(FIRST_ED), "1845");
        assert_eq!(record.get(LANGUAGE), "en");
        assert_eq!(record.get(AU_GENDER), "F");
        assert_eq!(record.get(SIZE_CAT), "medium");
        assert_eq!(record.get(CANONICITY), "low");
        assert_eq!(record.get(TIME_SLOT), "T1");
    }

    #[test]
    fn missing_field_affects_only_itself() {
        let config = config();
        let without_size = FULL.replace(r#"<eltec:size key="medium"/>"#, "");
        let full = Extractor::new(&config).extract("x", &TeiDocument::parse(FULL).unwrap());
        let partial =
            Extractor::new(&config).extract("x", &TeiDocument::parse(&without_size).unwrap());
        assert_eq!(partial.get(SIZE_CAT), NA);
        for column in &config.columns {
            if column != SIZE_CAT {
                assert_eq!(partial.get(column), full.get(column), "{column}");
            }
        }
    }

    #[test]
    fn bad_author_degrades_three_fields() {
        let config = config();
        let doc = FULL.replace("Jane Doe (J.D.) (1800-1850)", "Jane Doe");
        let record = Extractor::new(&config).extract("x", &TeiDocument::parse(&doc).unwrap());
        assert_eq!(record.get(AU_NAME), NA);
        assert_eq!(record.get(AU_BIRTH), NA);
        assert_eq!(record.get(AU_DEATH), NA);
        assert_eq!(record.get(AU_IDS), "viaf:1 wikidata:Q2");
    }

    struct Canned(HashMap<String, Vec<String>>);

    impl Queryable for Canned {
        fn evaluate(&self, query: &PathQuery) -> Vec<String> {
            self.0.get(&query.to_string()).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn first_match_wins() {
        let ns = eltec_namespaces();
        let query = PathQuery::parse("//tei:author/@ref", &ns).unwrap();
        let doc = Canned(HashMap::from([(
            "//tei:author/@ref".to_owned(),
            vec!["viaf:1".to_owned(), "viaf:2".to_owned()],
        )]));
        assert_eq!(first_or_na(&doc, &query), "viaf:1");
        let empty = Canned(HashMap::new());
        assert_eq!(first_or_na(&empty, &query), NA);
    }

    #[test]
    fn every_column_is_present() {
        let config = config();
        let record = Extractor::new(&config).extract("x", &Canned(HashMap::new()));
        assert_eq!(record.get(FILENAME), "x");
        for column in config.columns.iter().filter(|c| *c != FILENAME) {
            assert_eq!(record.get(column), NA, "{column}");
        }
    }
}
