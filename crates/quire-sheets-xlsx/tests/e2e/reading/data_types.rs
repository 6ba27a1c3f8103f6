//! Tests for reading cell values of every kind.

use crate::Fixture;
use quire_sheets_core::{CellKind, CellValue};
use quire_sheets_xlsx::{ReadOptions, XlsxError};

#[test]
fn test_number_values() {
    let workbook = Fixture::new()
        .rows(
            "Sheet1",
            r#"<row r="1" spans="1:1"><c r="A1"><v>42</v></c></row><row r="2"><c r="A2"><v>3.14159</v></c></row><row r="3"><c r="A3"><v>-100</v></c></row><row r="4"><c r="A4"><v>0</v></c></row><row r="5"><c r="A5"><v>1.5E-3</v></c></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();

    let expected = [42.0, 3.14159, -100.0, 0.0, 0.0015];
    for (row, want) in expected.iter().enumerate() {
        let cell = sheet.cell_at(row as u32, 0).expect("cell should exist");
        assert_eq!(cell.kind(), CellKind::Number);
        let got = cell.value().as_number().unwrap();
        assert!((got - want).abs() < 1e-9, "row {}: expected {}, got {}", row + 1, want, got);
    }
}

#[test]
fn test_string_values() {
    let workbook = Fixture::new()
        .strings(&["Hello", "World with spaces", "\u{65e5}\u{672c}\u{8a9e}", "  padded  "])
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row><row r="2"><c r="A2" t="s"><v>1</v></c></row><row r="3"><c r="A3" t="s"><v>2</v></c></row><row r="4"><c r="A4" t="s"><v>3</v></c></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();

    let texts: Vec<String> = sheet
        .cells()
        .map(|c| workbook.display_value(c).unwrap())
        .collect();
    assert_eq!(
        texts,
        vec!["Hello", "World with spaces", "\u{65e5}\u{672c}\u{8a9e}", "  padded  "]
    );
}

#[test]
fn test_boolean_values() {
    let workbook = Fixture::new()
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="b"><v>1</v></c><c r="B1" t="b"><v>0</v></c></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();
    assert_eq!(sheet.value("A1").unwrap(), CellValue::Boolean(true));
    assert_eq!(sheet.value("B1").unwrap(), CellValue::Boolean(false));
}

#[test]
fn test_inline_and_rich_strings() {
    let workbook = Fixture::new()
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>inline</t></is></c><c r="B1" t="inlineStr"><is><r><rPr><b/></rPr><t>Bold</t></r><r><t xml:space="preserve"> tail</t></r></is></c></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();
    assert_eq!(
        sheet.value("A1").unwrap(),
        CellValue::InlineString("inline".to_string())
    );
    assert_eq!(
        sheet.value("B1").unwrap(),
        CellValue::InlineString("Bold tail".to_string())
    );
}

#[test]
fn test_formula_cells() {
    let fixture = Fixture::new().rows(
        "Sheet1",
        r#"<row r="1"><c r="A1"><v>2</v></c><c r="B1"><f>A1*2</f><v>4</v></c></row>"#,
    );

    assert!(matches!(
        fixture.try_open(&ReadOptions::default()),
        Err(XlsxError::UnsupportedFeature { .. })
    ));

    let workbook = fixture.try_open(&ReadOptions::keep_opaque()).unwrap();
    let cell = workbook.sheet(0).unwrap().cell("B1").unwrap().unwrap();
    assert_eq!(cell.kind(), CellKind::Formula);
}

#[test]
fn test_empty_styled_cells() {
    let workbook = Fixture::new()
        .rows("Sheet1", r#"<row r="3"><c r="C3" s="0"/></row>"#)
        .open();
    let sheet = workbook.sheet(0).unwrap();
    let cell = sheet.cell("C3").unwrap().unwrap();
    assert_eq!(cell.kind(), CellKind::Empty);
    assert_eq!(cell.style_index(), Some(0));
}
