//! Tests for reading number formats.

use crate::Fixture;
use quire_sheets_core::{NumberFormat, Workbook};

const STYLES: &str = r#"<numFmts count="2"><numFmt numFmtId="164" formatCode="&quot;$&quot;#,##0.00"/><numFmt numFmtId="170" formatCode="0.000%"/></numFmts><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border/></borders><cellXfs count="5"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="170" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="49" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs>"#;

fn workbook() -> Workbook {
    Fixture::new()
        .styles(STYLES)
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" s="1"><v>45292</v></c><c r="B1" s="2"><v>5.95</v></c><c r="C1" s="3"><v>0.1234</v></c><c r="D1" s="4"><v>7</v></c></row>"#,
        )
        .open()
}

fn format_of(workbook: &Workbook, address: &str) -> NumberFormat {
    let cell = workbook.sheet(0).unwrap().cell(address).unwrap().unwrap();
    workbook
        .styles()
        .style(cell.style_index().unwrap())
        .unwrap()
        .number_format
}

#[test]
fn test_builtin_formats() {
    let workbook = workbook();
    assert_eq!(
        format_of(&workbook, "A1"),
        NumberFormat::BuiltIn(NumberFormat::ID_DATE_SHORT)
    );
    assert_eq!(
        format_of(&workbook, "D1"),
        NumberFormat::BuiltIn(NumberFormat::ID_TEXT)
    );
}

#[test]
fn test_custom_formats() {
    let workbook = workbook();
    assert_eq!(
        format_of(&workbook, "B1"),
        NumberFormat::Custom("\"$\"#,##0.00".to_string())
    );
    assert_eq!(
        format_of(&workbook, "C1"),
        NumberFormat::Custom("0.000%".to_string())
    );
}

#[test]
fn test_interning_after_read() {
    let mut workbook = workbook();
    let styles = workbook.styles_mut();
    assert_eq!(styles.intern_numbering_format("0.000%").unwrap(), 170);
    assert_eq!(styles.intern_numbering_format("#,##0.0").unwrap(), 171);
    assert_eq!(styles.intern_numbering_format("#,##0.0").unwrap(), 171);
}
