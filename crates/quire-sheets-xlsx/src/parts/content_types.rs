//! `[Content_Types].xml`

use super::{
    required, CONTENT_TYPES_NS, CT_RELATIONSHIPS, CT_SHARED_STRINGS, CT_STYLES, CT_WORKBOOK,
    CT_WORKSHEET, CT_XML, SHARED_STRINGS_PART, STYLES_PART, WORKBOOK_PART,
};
use crate::error::XlsxResult;
use crate::xml::XmlElement;

/// Content type declarations of a package
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentTypes {
    /// `(extension, content type)`
    pub defaults: Vec<(String, String)>,
    /// `(part name with leading '/', content type)`
    pub overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Declarations for a workbook with `sheet_count` worksheets
    pub fn for_workbook(sheet_count: usize) -> Self {
        let mut overrides = vec![(format!("/{}", WORKBOOK_PART), CT_WORKBOOK.to_string())];
        for i in 1..=sheet_count {
            overrides.push((
                format!("/xl/worksheets/sheet{}.xml", i),
                CT_WORKSHEET.to_string(),
            ));
        }
        overrides.push((format!("/{}", STYLES_PART), CT_STYLES.to_string()));
        overrides.push((
            format!("/{}", SHARED_STRINGS_PART),
            CT_SHARED_STRINGS.to_string(),
        ));

        Self {
            defaults: vec![
                ("rels".to_string(), CT_RELATIONSHIPS.to_string()),
                ("xml".to_string(), CT_XML.to_string()),
            ],
            overrides,
        }
    }

    /// Content type of an entry (given without the leading '/')
    pub fn content_type_of(&self, entry: &str) -> Option<&str> {
        let part_name = format!("/{}", entry.trim_start_matches('/'));
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&part_name))
        {
            return Some(ct);
        }
        let extension = entry.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, ct)| ct.as_str())
    }

    pub fn to_tree(&self) -> XmlElement {
        let mut root = XmlElement::new("Types").with_attr("xmlns", CONTENT_TYPES_NS);
        for (extension, content_type) in &self.defaults {
            root.push_child(
                XmlElement::new("Default")
                    .with_attr("Extension", extension)
                    .with_attr("ContentType", content_type),
            );
        }
        for (part_name, content_type) in &self.overrides {
            root.push_child(
                XmlElement::new("Override")
                    .with_attr("PartName", part_name)
                    .with_attr("ContentType", content_type),
            );
        }
        root
    }

    pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<Self> {
        let mut types = ContentTypes::default();
        for child in &root.children {
            match child.name.as_str() {
                "Default" => types.defaults.push((
                    required(part, child, "Extension")?.to_string(),
                    required(part, child, "ContentType")?.to_string(),
                )),
                "Override" => types.overrides.push((
                    required(part, child, "PartName")?.to_string(),
                    required(part, child, "ContentType")?.to_string(),
                )),
                _ => {}
            }
        }
        Ok(types)
    }
}
