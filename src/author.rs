//! Splitting the composite author field.
//!
//! ELTeC headers carry the author as `Name (Alternate name) (1800-1850)`.
//! The alternate name is not kept.

use crate::NA;
use regex::Regex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorData {
    pub name: String,
    pub birth: String,
    pub death: String,
}

impl AuthorData {
    /// All three parts set to [NA].
    pub fn not_available() -> AuthorData {
        AuthorData {
            name: NA.to_owned(),
            birth: NA.to_owned(),
            death: NA.to_owned(),
        }
    }
}

pub struct AuthorParser {
    name: Regex,
    birth: Regex,
    death: Regex,
}

impl Default for AuthorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorParser {
    pub fn new() -> AuthorParser {
        AuthorParser {
            name: Regex::new(r"^(.*?)\s*\(").expect("valid regex"),
            birth: Regex::new(r"\((\d{4})").expect("valid regex"),
            death: Regex::new(r"(\d{4})\)").expect("valid regex"),
        }
    }

    fn capture(re: &Regex, s: &str) -> Option<String> {
        re.captures(s).map(|c| c[1].to_owned())
    }

    /// Either all three parts are found, or none.
    pub fn parse(&self, composite: Option<&str>) -> AuthorData {
        let Some(s) = composite else {
            return AuthorData::not_available();
        };
        let parts = (
            Self::capture(&self.name, s),
            Self::capture(&self.birth, s),
            Self::capture(&self.death, s),
        );
        match parts {
            (Some(name), Some(birth), Some(death)) => AuthorData { name, birth, death },
            _ => AuthorData::not_available(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(s: &str) -> (String, String, String) {
        let a = AuthorParser::new().parse(Some(s));
        (a.name, a.birth, a.death)
    }

    fn na() -> (String, String, String) {
        (NA.to_owned(), NA.to_owned(), NA.to_owned())
    }

    #[test]
    fn full_pattern() {
        assert_eq!(
            parse("Jane Doe (J.D.) (1800-1850)"),
            ("Jane Doe".to_owned(), "1800".to_owned(), "1850".to_owned())
        );
    }

    #[test]
    fn without_alternate_name() {
        assert_eq!(
            parse("Zola, Émile (1840-1902)"),
            ("Zola, Émile".to_owned(), "1840".to_owned(), "1902".to_owned())
        );
        assert_eq!(
            parse("Sand, George(1804-1876)"),
            ("Sand, George".to_owned(), "1804".to_owned(), "1876".to_owned())
        );
    }

    #[test]
    fn fail_together() {
        assert_eq!(parse("NA"), na());
        assert_eq!(parse("Jane Doe"), na());
        assert_eq!(parse("Jane Doe (J.D.)"), na());
        assert_eq!(parse("Jane Doe (1800-?)"), na());
        assert_eq!(parse("Jane Doe (?-1850)"), na());
        assert_eq!(parse("Jane Doe (18-1850)"), na());
        assert_eq!(parse(""), na());
    }

    #[test]
    fn absent_field() {
        assert_eq!(AuthorParser::new().parse(None), AuthorData::not_available());
    }
}
