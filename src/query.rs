//! Path queries over parsed XML documents.
//!
//! The supported language is the small XPath subset needed for TEI headers:
//! child (`/`) and descendant (`//`) steps over qualified element names, an
//! optional `[@attr='value']` predicate per step, and a final `/@attr` or
//! `/text()` target.

use crate::errors::{self, Result};
use itertools::Itertools;
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashMap;
use std::fmt;

pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
pub const ELTEC_NS: &str = "http://distantreading.net/eltec/ns";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace prefix bindings used when parsing queries.
pub type Namespaces = HashMap<String, String>;

/// The prefixes used in ELTeC documents.
pub fn eltec_namespaces() -> Namespaces {
    [("tei", TEI_NS), ("eltec", ELTEC_NS)]
        .into_iter()
        .map(|(p, u)| (p.to_owned(), u.to_owned()))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    pub ns: Option<String>,
    pub local: String,
}

impl QName {
    fn parse(query: &str, s: &str, namespaces: &Namespaces) -> Result<QName> {
        let (ns, local) = match s.split_once(':') {
            None => (None, s),
            Some(("xml", local)) => (Some(XML_NS.to_owned()), local),
            Some((prefix, local)) => match namespaces.get(prefix) {
                Some(uri) => (Some(uri.clone()), local),
                None => {
                    return Err(errors::invalid_query(
                        query,
                        &format!("unknown namespace prefix '{prefix}'"),
                    ));
                }
            },
        };
        let valid = |c: char| c.is_alphanumeric() || c == '-' || c == '_' || c == '.';
        if local.is_empty() || !local.chars().all(valid) {
            return Err(errors::invalid_query(query, &format!("bad name '{s}'")));
        }
        Ok(QName {
            ns,
            local: local.to_owned(),
        })
    }

    fn matches_element(&self, node: &Node) -> bool {
        node.is_element()
            && node.tag_name().name() == self.local
            && node.tag_name().namespace() == self.ns.as_deref()
    }

    fn attribute<'a>(&self, node: &Node<'a, '_>) -> Option<&'a str> {
        match &self.ns {
            None => node.attribute(self.local.as_str()),
            Some(ns) => node.attribute((ns.as_str(), self.local.as_str())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Step {
    axis: Axis,
    name: QName,
    predicate: Option<(QName, String)>,
}

impl Step {
    fn matches(&self, node: &Node) -> bool {
        if !self.name.matches_element(node) {
            return false;
        }
        match &self.predicate {
            None => true,
            Some((attr, value)) => attr.attribute(node) == Some(value.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
    /// Full text content of each selected element.
    Content,
    /// Direct child text nodes of each selected element.
    Text,
    /// All descendant text nodes of each selected element.
    DescendantText,
    Attribute(QName),
}

/// A parsed path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathQuery {
    source: String,
    steps: Vec<Step>,
    target: Target,
}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn parse_predicate(query: &str, s: &str, namespaces: &Namespaces) -> Result<(QName, String)> {
    let Some((attr, quoted)) = s.split_once('=') else {
        return Err(errors::invalid_query(query, "predicate without '='"));
    };
    let attr = QName::parse(query, attr.trim(), namespaces)?;
    let quoted = quoted.trim();
    let value = ['\'', '"'].iter().find_map(|&q| {
        quoted
            .strip_prefix(q)
            .and_then(|v| v.strip_suffix(q))
            .filter(|v| !v.contains(q))
    });
    match value {
        Some(v) => Ok((attr, v.to_owned())),
        None => Err(errors::invalid_query(query, "predicate value must be quoted")),
    }
}

impl PathQuery {
    pub fn parse(query: &str, namespaces: &Namespaces) -> Result<PathQuery> {
        let mut rest = query.trim();
        let mut steps = vec![];
        let mut target = Target::Content;
        while !rest.is_empty() {
            let axis = if let Some(r) = rest.strip_prefix("//") {
                rest = r;
                Axis::Descendant
            } else if let Some(r) = rest.strip_prefix('/') {
                rest = r;
                Axis::Child
            } else {
                return Err(errors::invalid_query(query, "expected '/' or '//'"));
            };
            if rest == "text()" {
                target = match axis {
                    Axis::Child => Target::Text,
                    Axis::Descendant => Target::DescendantText,
                };
                break;
            }
            if let Some(attr) = rest.strip_prefix('@') {
                if axis == Axis::Descendant {
                    return Err(errors::invalid_query(query, "'//@' is not supported"));
                }
                target = Target::Attribute(QName::parse(query, attr, namespaces)?);
                break;
            }
            let end = rest.find(['/', '[']).unwrap_or(rest.len());
            let name = QName::parse(query, &rest[..end], namespaces)?;
            rest = &rest[end..];
            let predicate = match rest.strip_prefix("[@") {
                None => None,
                Some(r) => {
                    let Some(close) = r.find(']') else {
                        return Err(errors::invalid_query(query, "unterminated predicate"));
                    };
                    rest = &r[close + 1..];
                    Some(parse_predicate(query, &r[..close], namespaces)?)
                }
            };
            steps.push(Step {
                axis,
                name,
                predicate,
            });
        }
        if steps.is_empty() {
            return Err(errors::invalid_query(query, "no element steps"));
        }
        Ok(PathQuery {
            source: query.to_owned(),
            steps,
            target,
        })
    }

    fn select<'a, 'input>(&self, doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        let mut current = vec![doc.root()];
        for step in &self.steps {
            let mut next = vec![];
            for node in &current {
                match step.axis {
                    Axis::Child => next.extend(node.children().filter(|n| step.matches(n))),
                    Axis::Descendant => {
                        next.extend(node.descendants().skip(1).filter(|n| step.matches(n)))
                    }
                }
            }
            // Nested contexts may select the same element twice.
            next.sort_by_key(|n| n.id().get());
            next.dedup_by_key(|n| n.id().get());
            current = next;
        }
        current
    }

    fn evaluate_on(&self, doc: &Document) -> Vec<String> {
        let nodes = self.select(doc);
        match &self.target {
            Target::Content => nodes
                .iter()
                .map(|n| {
                    n.descendants()
                        .filter(|d| d.is_text())
                        .filter_map(|d| d.text())
                        .join("")
                })
                .collect_vec(),
            Target::Text => nodes
                .iter()
                .flat_map(|n| n.children().filter(|c| c.is_text()))
                .filter_map(|c| c.text())
                .map(str::to_owned)
                .collect_vec(),
            Target::DescendantText => nodes
                .iter()
                .flat_map(|n| n.descendants().filter(|c| c.is_text()))
                .filter_map(|c| c.text())
                .map(str::to_owned)
                .collect_vec(),
            Target::Attribute(attr) => nodes
                .iter()
                .filter_map(|n| attr.attribute(n))
                .map(str::to_owned)
                .collect_vec(),
        }
    }
}

/// Anything a [PathQuery] can be evaluated against.
pub trait Queryable {
    /// All matches in document order; empty if nothing matches.
    fn evaluate(&self, query: &PathQuery) -> Vec<String>;
}

/// An XML document parsed into memory once and queried many times.
pub struct TeiDocument<'input> {
    doc: Document<'input>,
}

impl<'input> TeiDocument<'input> {
    pub fn parse(text: &'input str) -> Result<TeiDocument<'input>> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options)?;
        Ok(TeiDocument { doc })
    }

    pub fn document(&self) -> &Document<'input> {
        &self.doc
    }
}

impl Queryable for TeiDocument<'_> {
    fn evaluate(&self, query: &PathQuery) -> Vec<String> {
        query.evaluate_on(&self.doc)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:eltec="http://distantreading.net/eltec/ns" xml:id="FRA00101">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title ref="wikidata:Q1">Le roman<hi>!</hi></title>
        <author ref="viaf:1">Jane Doe (J.D.) (1800-1850)</author>
        <author ref="viaf:2">Other Person (1810-1870)</author>
      </titleStmt>
      <extent>
        <measure unit="pages">300</measure>
        <measure unit="words">123456</measure>
      </extent>
    </fileDesc>
    <profileDesc>
      <textDesc>
        <eltec:authorGender key="F"/>
      </textDesc>
    </profileDesc>
  </teiHeader>
</TEI>"#;

    fn q(s: &str) -> PathQuery {
        PathQuery::parse(s, &eltec_namespaces()).unwrap()
    }

    #[test]
    fn evaluate_attributes() {
        let doc = TeiDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.evaluate(&q("//tei:TEI/@xml:id")), ["FRA00101"]);
        assert_eq!(
            doc.evaluate(&q("//tei:titleStmt/tei:author/@ref")),
            ["viaf:1", "viaf:2"]
        );
        assert_eq!(
            doc.evaluate(&q("//tei:textDesc/eltec:authorGender/@key")),
            ["F"]
        );
        assert!(doc.evaluate(&q("//tei:textDesc/eltec:size/@key")).is_empty());
    }

    #[test]
    fn evaluate_text_nodes() {
        let doc = TeiDocument::parse(SAMPLE).unwrap();
        assert_eq!(
            doc.evaluate(&q("//tei:titleStmt/tei:title/text()")),
            ["Le roman"]
        );
        assert_eq!(doc.evaluate(&q("//tei:titleStmt/tei:title")), ["Le roman!"]);
        assert_eq!(doc.evaluate(&q("//tei:title//text()")), ["Le roman", "!"]);
    }

    #[test]
    fn evaluate_predicate() {
        let doc = TeiDocument::parse(SAMPLE).unwrap();
        assert_eq!(
            doc.evaluate(&q("//tei:extent/tei:measure[@unit='words']/text()")),
            ["123456"]
        );
        assert_eq!(
            doc.evaluate(&q("//tei:measure[@unit=\"pages\"]/text()")),
            ["300"]
        );
        assert!(
            doc.evaluate(&q("//tei:measure[@unit='chars']/text()"))
                .is_empty()
        );
    }

    #[test]
    fn namespace_must_match() {
        let doc = TeiDocument::parse(SAMPLE).unwrap();
        assert!(doc.evaluate(&q("//titleStmt/title/text()")).is_empty());
        assert!(doc.evaluate(&q("/tei:teiHeader")).is_empty());
        assert_eq!(doc.evaluate(&q("/tei:TEI/@xml:id")), ["FRA00101"]);
    }

    #[test]
    fn nested_descendants_are_not_repeated() {
        let doc = TeiDocument::parse("<a><a><b>x</b></a></a>").unwrap();
        let ns = Namespaces::new();
        let query = PathQuery::parse("//a//b/text()", &ns).unwrap();
        assert_eq!(doc.evaluate(&query), ["x"]);
    }

    #[test]
    fn parse_errors() {
        let ns = eltec_namespaces();
        assert!(PathQuery::parse("", &ns).is_err());
        assert!(PathQuery::parse("tei:TEI", &ns).is_err());
        assert!(PathQuery::parse("//foo:TEI", &ns).is_err());
        assert!(PathQuery::parse("//tei:TEI[@unit='x'", &ns).is_err());
        assert!(PathQuery::parse("//tei:TEI[@unit=x]", &ns).is_err());
        assert!(PathQuery::parse("//@key", &ns).is_err());
        assert!(PathQuery::parse("//tei:TEI/@", &ns).is_err());
    }

    #[test]
    fn malformed_document() {
        assert!(TeiDocument::parse("<TEI><unclosed></TEI>").is_err());
    }
}
