//! Generic XML part trees
//!
//! Every part is parsed into an [`XmlElement`] tree restricted to the
//! elements its [`PartSchema`] knows about, and rendered back from such a
//! tree. Typed codecs in [`crate::parts`] sit on top of this module.

use log::trace;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Declaration written at the top of every rendered part
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Elements whose text content is kept verbatim
const TEXT_ELEMENTS: &[&str] = &["t", "v", "f"];

/// An element of a part tree
///
/// Names are local names (any namespace prefix dropped); attribute keys are
/// kept as written, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder form of [`push_attr`](Self::push_attr)
    pub fn with_attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push_attr(key, value);
        self
    }

    /// Builder form of [`push_child`](Self::push_child)
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn push_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        self.attributes.push((key.into(), value.to_string()));
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Attribute value by exact key, falling back to a match on the local
    /// part of a prefixed key (`id` finds `r:id`)
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .or_else(|| {
                self.attributes.iter().find(|(k, _)| {
                    !k.starts_with("xmlns")
                        && k.split_once(':').map(|(_, local)| local) == Some(key)
                })
            })
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// The element vocabulary of each part kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSchema {
    ContentTypes,
    Relationships,
    Workbook,
    Worksheet,
    SharedStrings,
    Styles,
}

impl PartSchema {
    /// Expected root element
    pub fn root(self) -> &'static str {
        match self {
            PartSchema::ContentTypes => "Types",
            PartSchema::Relationships => "Relationships",
            PartSchema::Workbook => "workbook",
            PartSchema::Worksheet => "worksheet",
            PartSchema::SharedStrings => "sst",
            PartSchema::Styles => "styleSheet",
        }
    }

    fn elements(self) -> &'static [&'static str] {
        match self {
            PartSchema::ContentTypes => &["Default", "Override"],
            PartSchema::Relationships => &["Relationship"],
            PartSchema::Workbook => &["sheets", "sheet"],
            PartSchema::Worksheet => &[
                "dimension",
                "cols",
                "col",
                "sheetData",
                "row",
                "c",
                "v",
                "f",
                "is",
                "t",
                "r",
                "autoFilter",
            ],
            PartSchema::SharedStrings => &["si", "t", "r"],
            PartSchema::Styles => &[
                "numFmts",
                "numFmt",
                "fonts",
                "font",
                "b",
                "i",
                "strike",
                "u",
                "sz",
                "color",
                "name",
                "fills",
                "fill",
                "patternFill",
                "fgColor",
                "bgColor",
                "borders",
                "border",
                "left",
                "right",
                "top",
                "bottom",
                "diagonal",
                "cellXfs",
                "xf",
            ],
        }
    }

    /// Check whether a non-root element belongs to this schema
    pub fn recognises(self, name: &str) -> bool {
        self.elements().contains(&name)
    }
}

/// Parse a part into a tree
///
/// `part` names the entry for error messages. Elements outside the schema
/// are dropped together with their subtree.
pub fn parse(part: &str, bytes: &[u8], schema: PartSchema) -> XlsxResult<XmlElement> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = Reader::from_reader(bytes);
    reader.check_end_names(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut skip_depth = 0usize;
    let mut skipped = 0usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                return Err(XlsxError::malformed(
                    part,
                    format!("{} (at byte {})", e, reader.buffer_position()),
                ))
            }
        };

        match event {
            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else {
                    match open_element(part, &e, schema, &stack, root.is_some())? {
                        Some(element) => stack.push(element),
                        None => {
                            skip_depth = 1;
                            skipped += 1;
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if skip_depth == 0 {
                    match open_element(part, &e, schema, &stack, root.is_some())? {
                        Some(element) => close_element(element, &mut stack, &mut root),
                        None => skipped += 1,
                    }
                }
            }
            Event::End(_) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root);
                }
            }
            Event::Text(e) => {
                if let Some(top) = text_target(&mut stack, skip_depth) {
                    let text = e
                        .unescape()
                        .map_err(|err| XlsxError::malformed(part, err.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(top) = text_target(&mut stack, skip_depth) {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| XlsxError::malformed(part, err.to_string()))?;
                    top.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(XlsxError::malformed(part, "unexpected end of document"));
    }
    if skipped > 0 {
        trace!("{}: skipped {} unrecognised elements", part, skipped);
    }
    root.ok_or_else(|| XlsxError::malformed(part, "empty document"))
}

fn open_element(
    part: &str,
    e: &BytesStart<'_>,
    schema: PartSchema,
    stack: &[XmlElement],
    has_root: bool,
) -> XlsxResult<Option<XmlElement>> {
    let name = std::str::from_utf8(e.local_name().as_ref())
        .map_err(|err| XlsxError::malformed(part, err.to_string()))?
        .to_string();

    if stack.is_empty() {
        if has_root {
            return Err(XlsxError::malformed(part, "more than one root element"));
        }
        if name != schema.root() {
            return Err(XlsxError::malformed(
                part,
                format!("expected root element <{}>, found <{}>", schema.root(), name),
            ));
        }
    } else if !schema.recognises(&name) {
        return Ok(None);
    }

    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XlsxError::malformed(part, err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| XlsxError::malformed(part, err.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| XlsxError::malformed(part, err.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(Some(element))
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// The open element that collects text, if text is kept at this point
fn text_target(stack: &mut [XmlElement], skip_depth: usize) -> Option<&mut XmlElement> {
    if skip_depth > 0 {
        return None;
    }
    stack
        .last_mut()
        .filter(|top| TEXT_ELEMENTS.contains(&top.name.as_str()))
}

/// Render a tree as a complete XML document
pub fn render(root: &XmlElement) -> Vec<u8> {
    let mut out = String::with_capacity(4096);
    out.push_str(XML_DECLARATION);
    write_element(&mut out, root);
    out.into_bytes()
}

fn write_element(out: &mut String, element: &XmlElement) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if element.children.is_empty() && element.text.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    out.push_str(&escape(&element.text));
    for child in &element.children {
        write_element(out, child);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_prefixed_markup() {
        let xml = br#"<?xml version="1.0"?>
<x:worksheet xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <x:sheetData>
    <x:row r="1"><x:c r="A1" t="s"><x:v>0</x:v></x:c></x:row>
  </x:sheetData>
</x:worksheet>"#;
        let root = parse("sheet1.xml", xml, PartSchema::Worksheet).unwrap();
        assert_eq!(root.name, "worksheet");

        let cell = &root.children[0].children[0].children[0];
        assert_eq!(cell.name, "c");
        assert_eq!(cell.attr("r"), Some("A1"));
        assert_eq!(cell.child("v").unwrap().text, "0");
    }

    #[test]
    fn test_unknown_subtrees_skipped() {
        let xml = br#"<worksheet>
  <sheetViews><sheetView><selection activeCell="A1"/></sheetView></sheetViews>
  <sheetData/>
  <extLst><ext uri="{x}"><row r="99"/></ext></extLst>
</worksheet>"#;
        let root = parse("sheet1.xml", xml, PartSchema::Worksheet).unwrap();
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["sheetData"]);
    }

    #[test]
    fn test_text_kept_verbatim() {
        let xml = b"<sst>\n  <si><t xml:space=\"preserve\">  two  spaces </t></si>\n  <si><t>a &amp; b</t></si>\n</sst>";
        let root = parse("sharedStrings.xml", xml, PartSchema::SharedStrings).unwrap();
        assert_eq!(root.text, "");
        assert_eq!(root.children[0].children[0].text, "  two  spaces ");
        assert_eq!(root.children[1].children[0].text, "a & b");
        assert_eq!(root.children[0].children[0].attr("space"), Some("preserve"));
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        let err = parse("xl/workbook.xml", b"<worksheet/>", PartSchema::Workbook).unwrap_err();
        match err {
            XlsxError::MalformedPart { part, reason } => {
                assert_eq!(part, "xl/workbook.xml");
                assert!(reason.contains("<workbook>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_well_formed_is_malformed() {
        for xml in [
            &b"<sst><si><t>open</si></sst>"[..],
            &b"<sst><si>"[..],
            &b""[..],
            &b"   "[..],
            &b"<sst/><sst/>"[..],
        ] {
            let err = parse("xl/sharedStrings.xml", xml, PartSchema::SharedStrings).unwrap_err();
            assert!(
                matches!(err, XlsxError::MalformedPart { .. }),
                "{:?}",
                String::from_utf8_lossy(xml)
            );
        }
    }

    #[test]
    fn test_attr_lookup() {
        let el = XmlElement::new("sheet")
            .with_attr("name", "产品")
            .with_attr("r:id", "rId1")
            .with_attr("xmlns:r", "urn:x");
        assert_eq!(el.attr("id"), Some("rId1"));
        assert_eq!(el.attr("r:id"), Some("rId1"));
        assert_eq!(el.attr("r"), None);
    }

    #[test]
    fn test_render() {
        let tree = XmlElement::new("sst")
            .with_attr("count", 2)
            .with_child(XmlElement::new("si").with_child(XmlElement::new("t").with_text("a<b")))
            .with_child(XmlElement::new("si").with_child(XmlElement::new("t")));
        let xml = String::from_utf8(render(&tree)).unwrap();
        assert_eq!(
            xml,
            format!(
                "{}<sst count=\"2\"><si><t>a&lt;b</t></si><si><t/></si></sst>",
                XML_DECLARATION
            )
        );
    }

    #[test]
    fn test_render_then_parse() {
        let tree = XmlElement::new("workbook")
            .with_attr("xmlns", "http://schemas.openxmlformats.org/spreadsheetml/2006/main")
            .with_child(
                XmlElement::new("sheets").with_child(
                    XmlElement::new("sheet")
                        .with_attr("name", "Q\"1\" & <more>")
                        .with_attr("sheetId", 1),
                ),
            );
        let parsed = parse("xl/workbook.xml", &render(&tree), PartSchema::Workbook).unwrap();
        assert_eq!(parsed, tree);
    }
}
