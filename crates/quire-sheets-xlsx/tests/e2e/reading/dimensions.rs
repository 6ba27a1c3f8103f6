//! Tests for reading sheet layout: rows, columns, filters and multiple sheets.

use crate::Fixture;
use quire_sheets_core::{CellRange, ColumnWidth};
use quire_sheets_xlsx::{ReadOptions, XlsxError};

#[test]
fn test_column_widths() {
    let workbook = Fixture::new()
        .sheet(
            "Sheet1",
            r#"<cols><col min="1" max="1" width="38.22" customWidth="1"/><col min="3" max="5" width="9.140625" style="2"/><col min="7" max="7" hidden="1"/></cols><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();

    assert_eq!(sheet.columns().len(), 2);
    assert_eq!(sheet.column_width(1), Some(&ColumnWidth::new(1, 1, 38.22).unwrap()));
    let span = sheet.column_width(4).unwrap();
    assert_eq!((span.min, span.max), (3, 5));
    assert!(!span.custom_width);
    assert!(sheet.column_width(2).is_none());
    assert!(sheet.column_width(7).is_none());
}

#[test]
fn test_auto_filter() {
    let workbook = Fixture::new()
        .sheet(
            "Sheet1",
            r#"<sheetData><row r="1"><c r="A1"><v>1</v></c><c r="C1"><v>2</v></c></row></sheetData><autoFilter ref="A1:C1"/>"#,
        )
        .open();
    assert_eq!(
        workbook.sheet(0).unwrap().auto_filter(),
        Some(&CellRange::parse("A1:C1").unwrap())
    );
}

#[test]
fn test_sparse_rows_and_used_range() {
    let workbook = Fixture::new()
        .rows(
            "Sheet1",
            r#"<row r="2" ht="30" customHeight="1"/><row r="5"><c r="D5"><v>1</v></c></row><row r="1000"><c r="B1000"><v>2</v></c></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();

    let numbers: Vec<u32> = sheet.rows().map(|r| r.number()).collect();
    assert_eq!(numbers, vec![2, 5, 1000]);
    assert_eq!(sheet.cell_count(), 2);
    assert_eq!(sheet.used_range().unwrap().to_a1_string(), "B5:D1000");
}

#[test]
fn test_multiple_sheets() {
    let workbook = Fixture::new()
        .strings(&["产品", "Notes"])
        .rows("产品", r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#)
        .rows("Notes", r#"<row r="1"><c r="A1" t="s"><v>1</v></c></row>"#)
        .rows("Empty", "")
        .open();

    let names: Vec<&str> = workbook.sheets().map(|s| s.name()).collect();
    assert_eq!(names, vec!["产品", "Notes", "Empty"]);
    let ids: Vec<u32> = workbook.sheets().map(|s| s.sheet_id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(workbook.sheet(2).unwrap().row_count(), 0);
}

#[test]
fn test_overlapping_columns_rejected() {
    let result = Fixture::new()
        .sheet(
            "Sheet1",
            r#"<cols><col min="1" max="3" width="10" customWidth="1"/><col min="3" max="4" width="12" customWidth="1"/></cols><sheetData/>"#,
        )
        .try_open(&ReadOptions::default());
    assert!(matches!(result, Err(XlsxError::MalformedPart { .. })));
}

fn sheet_definition_error(fixture: Fixture) -> (String, String) {
    match fixture.try_open(&ReadOptions::default()) {
        Err(XlsxError::MalformedPart { part, reason }) => (part, reason),
        other => panic!("expected a malformed workbook part, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_over_long_sheet_name_rejected() {
    let name = "A".repeat(32);
    let (part, reason) = sheet_definition_error(Fixture::new().rows(&name, ""));
    assert_eq!(part, "xl/workbook.xml");
    assert!(reason.contains("too long"), "{}", reason);
}

#[test]
fn test_duplicate_sheet_name_rejected() {
    let (part, reason) =
        sheet_definition_error(Fixture::new().rows("Prices", "").rows("PRICES", ""));
    assert_eq!(part, "xl/workbook.xml");
    assert!(reason.contains("PRICES"), "{}", reason);
}

#[test]
fn test_forbidden_sheet_name_character_rejected() {
    let (part, _) = sheet_definition_error(Fixture::new().rows("Q1/Q2", ""));
    assert_eq!(part, "xl/workbook.xml");
}
