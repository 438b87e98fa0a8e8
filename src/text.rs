//! Plain-text renditions of TEI documents.

use crate::query::{TEI_NS, TeiDocument};
use regex::Regex;
use roxmltree::Node;
use std::mem;

/// Elements dropped together with their content.
const DROPPED: [&str; 2] = ["note", "head"];

/// Elements whose tags are removed but whose text stays in place.
const INLINE: [&str; 2] = ["hi", "seg"];

fn is_tei(node: &Node, names: &[&str]) -> bool {
    node.tag_name().namespace() == Some(TEI_NS) && names.contains(&node.tag_name().name())
}

fn flush(current: &mut String, pieces: &mut Vec<String>) {
    if !current.is_empty() {
        pieces.push(mem::take(current));
    }
}

fn walk(node: Node, current: &mut String, pieces: &mut Vec<String>) {
    for child in node.children() {
        if child.is_text() {
            current.push_str(child.text().unwrap_or_default());
        } else if !child.is_element() {
            // Comments and processing instructions still separate words.
            flush(current, pieces);
        } else if is_tei(&child, &DROPPED) {
            continue;
        } else if is_tei(&child, &INLINE) {
            walk(child, current, pieces);
        } else {
            flush(current, pieces);
            walk(child, current, pieces);
            flush(current, pieces);
        }
    }
}

/// Text pieces of `<body>`, one per run of text not interrupted by a
/// block-level tag. Empty if the document has no body.
pub fn body_pieces(doc: &TeiDocument) -> Vec<String> {
    let body = doc
        .document()
        .descendants()
        .find(|n| n.has_tag_name((TEI_NS, "body")));
    let mut pieces = vec![];
    if let Some(body) = body {
        let mut current = String::new();
        walk(body, &mut current, &mut pieces);
        flush(&mut current, &mut pieces);
    }
    pieces
}

pub struct TextConverter {
    dashes: Regex,
    spaces: Regex,
    newlines: Regex,
    breaks: Regex,
    tabs: Regex,
    nonword: Regex,
}

impl Default for TextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextConverter {
    pub fn new() -> TextConverter {
        TextConverter {
            dashes: Regex::new(r"-- *\n? *").expect("valid regex"),
            spaces: Regex::new(r" +").expect("valid regex"),
            newlines: Regex::new(r"\n+").expect("valid regex"),
            breaks: Regex::new(r"[ \n]{2,}").expect("valid regex"),
            tabs: Regex::new(r"\t+").expect("valid regex"),
            nonword: Regex::new(r"\W+").expect("valid regex"),
        }
    }

    /// Whitespace normalization; the order of the steps matters.
    pub fn clean(&self, text: &str) -> String {
        let text = self.dashes.replace_all(text, "-- ");
        let text = self.spaces.replace_all(&text, " ");
        let text = self.newlines.replace_all(&text, "\n");
        let text = self.breaks.replace_all(&text, " \n");
        let text = self.tabs.replace_all(&text, "\t");
        text.into_owned()
    }

    pub fn convert(&self, doc: &TeiDocument) -> String {
        self.clean(&body_pieces(doc).join(" "))
    }

    /// Number of non-empty pieces between runs of non-word characters.
    pub fn count_words(&self, text: &str) -> usize {
        self.nonword.split(text).filter(|w| !w.is_empty()).count()
    }
}
