//! Relationship parts (`_rels/*.rels`)

use super::{required, PACKAGE_REL_NS};
use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

/// A single relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is not a package part
    pub external: bool,
}

/// Relationships of one source part, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an internal relationship
    pub fn push(&mut self, id: impl Into<String>, rel_type: &str, target: impl Into<String>) {
        self.items.push(Relationship {
            id: id.into(),
            rel_type: rel_type.to_string(),
            target: target.into(),
            external: false,
        });
    }

    /// Relationship by id
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// First relationship of a type
    pub fn first_of_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_tree(&self) -> XmlElement {
        let mut root = XmlElement::new("Relationships").with_attr("xmlns", PACKAGE_REL_NS);
        for rel in &self.items {
            let mut element = XmlElement::new("Relationship")
                .with_attr("Id", &rel.id)
                .with_attr("Type", &rel.rel_type)
                .with_attr("Target", &rel.target);
            if rel.external {
                element.push_attr("TargetMode", "External");
            }
            root.push_child(element);
        }
        root
    }

    pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<Self> {
        let mut rels = Relationships::new();
        for child in root.children_named("Relationship") {
            let id = required(part, child, "Id")?;
            if rels.get(id).is_some() {
                return Err(XlsxError::malformed(
                    part,
                    format!("duplicate relationship id {}", id),
                ));
            }
            rels.items.push(Relationship {
                id: id.to_string(),
                rel_type: required(part, child, "Type")?.to_string(),
                target: required(part, child, "Target")?.to_string(),
                external: child.attr("TargetMode") == Some("External"),
            });
        }
        Ok(rels)
    }
}

/// Name of the relationship part belonging to `part`
///
/// `xl/workbook.xml` maps to `xl/_rels/workbook.xml.rels`; the package
/// itself (`""`) maps to `_rels/.rels`.
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns the relationship
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute);
    }
    match source_part.rsplit_once('/') {
        Some((dir, _)) => normalize(&format!("{}/{}", dir, target)),
        None => normalize(target),
    }
}

fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::{REL_OFFICE_DOCUMENT, REL_WORKSHEET};
    use crate::xml::{parse, render, PartSchema};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("xl/workbook.xml", "worksheets/sheet1.xml"),
            "xl/worksheets/sheet1.xml"
        );
        assert_eq!(
            resolve_target("xl/workbook.xml", "/xl/worksheets/sheet1.xml"),
            "xl/worksheets/sheet1.xml"
        );
        assert_eq!(
            resolve_target("xl/worksheets/sheet1.xml", "../sharedStrings.xml"),
            "xl/sharedStrings.xml"
        );
        assert_eq!(resolve_target("", "xl/workbook.xml"), "xl/workbook.xml");
        assert_eq!(resolve_target("", "./xl/workbook.xml"), "xl/workbook.xml");
    }

    #[test]
    fn test_rels_part_for() {
        assert_eq!(rels_part_for(""), "_rels/.rels");
        assert_eq!(rels_part_for("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
    }

    #[test]
    fn test_tree_roundtrip() {
        let mut rels = Relationships::new();
        rels.push("rId1", REL_OFFICE_DOCUMENT, "xl/workbook.xml");
        let bytes = render(&rels.to_tree());
        let tree = parse("_rels/.rels", &bytes, PartSchema::Relationships).unwrap();
        let decoded = Relationships::from_tree("_rels/.rels", &tree).unwrap();
        assert_eq!(decoded, rels);
        assert_eq!(
            decoded.first_of_type(REL_OFFICE_DOCUMENT).unwrap().target,
            "xl/workbook.xml"
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let rel = || {
            XmlElement::new("Relationship")
                .with_attr("Id", "rId1")
                .with_attr("Type", REL_WORKSHEET)
                .with_attr("Target", "worksheets/sheet1.xml")
        };
        let tree = XmlElement::new("Relationships")
            .with_child(rel())
            .with_child(rel());
        assert!(matches!(
            Relationships::from_tree("xl/_rels/workbook.xml.rels", &tree),
            Err(XlsxError::MalformedPart { .. })
        ));
    }
}
