//! Typed codecs for the package parts
//!
//! Each codec converts between a part tree ([`crate::xml::XmlElement`]) and
//! plain records. Decoding checks structure only; resolving references
//! between parts is the reader's job.

pub mod content_types;
pub mod relationships;
pub mod shared_strings;
pub mod styles;
pub mod workbook;
pub mod worksheet;

use std::str::FromStr;

use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

pub const SPREADSHEETML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const OFFICE_REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
pub const CT_SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const WORKBOOK_PART: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
pub const STYLES_PART: &str = "xl/styles.xml";
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Required attribute
pub(crate) fn required<'a>(part: &str, element: &'a XmlElement, key: &str) -> XlsxResult<&'a str> {
    element.attr(key).ok_or_else(|| {
        XlsxError::malformed(
            part,
            format!("<{}> is missing attribute '{}'", element.name, key),
        )
    })
}

/// Optional attribute parsed with `FromStr`
pub(crate) fn parsed<T: FromStr>(
    part: &str,
    element: &XmlElement,
    key: &str,
) -> XlsxResult<Option<T>> {
    match element.attr(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            XlsxError::malformed(
                part,
                format!("<{}> has invalid {}=\"{}\"", element.name, key, raw),
            )
        }),
    }
}

/// Boolean attribute in xsd:boolean form ("1", "0", "true", "false")
pub(crate) fn flag(part: &str, element: &XmlElement, key: &str) -> XlsxResult<Option<bool>> {
    match element.attr(key) {
        None => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(raw) => Err(XlsxError::malformed(
            part,
            format!("<{}> has invalid {}=\"{}\"", element.name, key, raw),
        )),
    }
}

/// Decode `_xHHHH_` escape sequences in string text
///
/// Used for characters XML 1.0 cannot carry:
/// - `_x000d_` = CR (carriage return)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match decode_one(candidate) {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Decode a leading `_xHHHH_`
fn decode_one(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if !s.starts_with("_x")
        || bytes.len() < 7
        || bytes[6] != b'_'
        || !bytes[2..6].iter().all(u8::is_ascii_hexdigit)
    {
        return None;
    }
    u32::from_str_radix(&s[2..6], 16)
        .ok()
        .and_then(char::from_u32)
}

/// Encode characters XML cannot carry, and literal `_xHHHH_` sequences, as
/// `_xHHHH_` escapes
pub fn encode_excel_escapes(s: &str) -> String {
    let needs_escape = |c: char| {
        c == '\r' || (c < ' ' && c != '\n' && c != '\t') || c == '\u{FFFE}' || c == '\u{FFFF}'
    };
    if !s.chars().any(needs_escape) && !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 8);
    for (i, c) in s.char_indices() {
        if needs_escape(c) {
            result.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && decode_one(&s[i..]).is_some() {
            result.push_str("_x005F_");
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_excel_escapes_carriage_return() {
        assert_eq!(decode_excel_escapes("line1_x000d_line2"), "line1\rline2");
    }

    #[test]
    fn test_decode_excel_escapes_tab() {
        assert_eq!(decode_excel_escapes("col1_x0009_col2"), "col1\tcol2");
    }

    #[test]
    fn test_decode_excel_escapes_multiple() {
        assert_eq!(
            decode_excel_escapes("a_x000d__x000a_b_x0009_c"),
            "a\r\nb\tc"
        );
    }

    #[test]
    fn test_decode_excel_escapes_underscore() {
        assert_eq!(decode_excel_escapes("_x005f_x000d_"), "_x000d_");
    }

    #[test]
    fn test_decode_excel_escapes_no_escapes() {
        assert_eq!(decode_excel_escapes("Iced Lemon Tea"), "Iced Lemon Tea");
        assert_eq!(decode_excel_escapes("snake_case_x"), "snake_case_x");
    }

    #[test]
    fn test_decode_excel_escapes_partial_sequence() {
        assert_eq!(decode_excel_escapes("_x00_"), "_x00_");
        assert_eq!(decode_excel_escapes("_x00zz_"), "_x00zz_");
        assert_eq!(decode_excel_escapes("end_x000d"), "end_x000d");
    }

    #[test]
    fn test_decode_excel_escapes_uppercase() {
        assert_eq!(decode_excel_escapes("A_x000D_B"), "A\rB");
    }

    #[test]
    fn test_encode_excel_escapes() {
        assert_eq!(encode_excel_escapes("plain"), "plain");
        assert_eq!(encode_excel_escapes("a\r\nb\tc"), "a_x000D_\nb\tc");
        assert_eq!(encode_excel_escapes("bell\u{7}"), "bell_x0007_");
        assert_eq!(encode_excel_escapes("_x000d_"), "_x005F_x000d_");
    }

    #[test]
    fn test_escapes_roundtrip() {
        for s in ["a\rb", "_x0041_", "x_y", "__x__", "\u{1}\u{1f}", "产品_x"] {
            assert_eq!(decode_excel_escapes(&encode_excel_escapes(s)), s);
        }
    }

    #[test]
    fn test_attribute_helpers() {
        let el = XmlElement::new("col")
            .with_attr("min", "2")
            .with_attr("max", "x")
            .with_attr("customWidth", "1");
        assert_eq!(parsed::<u16>("p", &el, "min").unwrap(), Some(2));
        assert!(parsed::<u16>("p", &el, "max").is_err());
        assert_eq!(parsed::<u16>("p", &el, "width").unwrap(), None);
        assert_eq!(flag("p", &el, "customWidth").unwrap(), Some(true));
        assert!(required("p", &el, "style").is_err());
    }
}
