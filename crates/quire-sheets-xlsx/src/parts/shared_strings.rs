//! `xl/sharedStrings.xml`

use log::debug;
use quire_sheets_core::SharedStringTable;

use super::{decode_excel_escapes, encode_excel_escapes, parsed, SPREADSHEETML_NS};
use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

/// Build the string table tree
///
/// `references` is the number of cells pointing into the table (the `count`
/// attribute); `uniqueCount` is the table length.
pub fn to_tree(table: &SharedStringTable, references: usize) -> XmlElement {
    let mut root = XmlElement::new("sst")
        .with_attr("xmlns", SPREADSHEETML_NS)
        .with_attr("count", references)
        .with_attr("uniqueCount", table.len());
    for s in table.iter() {
        root.push_child(XmlElement::new("si").with_child(text_element(s)));
    }
    root
}

/// Decode the string items in table order
///
/// Rich-text items are flattened to the concatenation of their runs.
pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<Vec<String>> {
    let strings: Vec<String> = root.children_named("si").map(item_text).collect();
    if let Some(unique) = parsed::<usize>(part, root, "uniqueCount")? {
        if unique != strings.len() {
            debug!(
                "{}: uniqueCount={} but {} items present",
                part,
                unique,
                strings.len()
            );
        }
    }
    if root.children.iter().any(|c| c.name != "si") {
        return Err(XlsxError::malformed(part, "unexpected element in <sst>"));
    }
    Ok(strings)
}

/// A `<t>` element for string content
pub(crate) fn text_element(s: &str) -> XmlElement {
    let mut t = XmlElement::new("t");
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        t.push_attr("xml:space", "preserve");
    }
    t.with_text(encode_excel_escapes(s))
}

/// Text of a string item (`<si>` or `<is>`): a plain `<t>` or rich runs
pub(crate) fn item_text(item: &XmlElement) -> String {
    let mut text = String::new();
    for child in &item.children {
        match child.name.as_str() {
            "t" => text.push_str(&child.text),
            "r" => {
                for t in child.children_named("t") {
                    text.push_str(&t.text);
                }
            }
            _ => {}
        }
    }
    decode_excel_escapes(&text)
}
