//! Tests for reading border records.

use crate::Fixture;
use quire_sheets_core::{BorderEdge, BorderLineStyle, BorderStyle, Color, Workbook};

const STYLES: &str = r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="4"><border><left/><right/><top/><bottom/><diagonal/></border><border><left style="thin"><color indexed="64"/></left><right style="thin"><color indexed="64"/></right><top style="thin"><color indexed="64"/></top><bottom style="thin"><color indexed="64"/></bottom><diagonal/></border><border><left/><right/><top style="medium"><color rgb="FF0070C0"/></top><bottom style="double"><color auto="1"/></bottom><diagonal/></border><border diagonalUp="1"><left style="none"/><right/><top/><bottom style="hair"/><diagonal style="dashDot"><color theme="1"/></diagonal></border></borders><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="2" xfId="0" applyBorder="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="3" xfId="0" applyBorder="1"/></cellXfs>"#;

fn workbook() -> Workbook {
    Fixture::new()
        .styles(STYLES)
        .rows(
            "Sheet1",
            r#"<row r="2"><c r="B2" s="1"/><c r="C2" s="2"/><c r="D2" s="3"/></row>"#,
        )
        .open()
}

fn border_of(workbook: &Workbook, address: &str) -> BorderStyle {
    let cell = workbook.sheet(0).unwrap().cell(address).unwrap().unwrap();
    workbook
        .styles()
        .style(cell.style_index().unwrap())
        .unwrap()
        .border
}

#[test]
fn test_thin_box() {
    let border = border_of(&workbook(), "B2");
    assert_eq!(
        border,
        BorderStyle::all(BorderLineStyle::Thin, Color::Indexed(64))
    );
    assert!(border.diagonal.is_none());
}

#[test]
fn test_mixed_edges() {
    let border = border_of(&workbook(), "C2");
    assert!(border.left.is_none());
    assert!(border.right.is_none());
    assert_eq!(
        border.top,
        Some(BorderEdge::new(
            BorderLineStyle::Medium,
            Color::rgb(0x00, 0x70, 0xC0)
        ))
    );
    assert_eq!(
        border.bottom,
        Some(BorderEdge::new(BorderLineStyle::Double, Color::Auto))
    );
}

#[test]
fn test_diagonal_and_hair() {
    let border = border_of(&workbook(), "D2");
    assert!(border.left.is_none());
    assert_eq!(
        border.bottom,
        Some(BorderEdge::new(BorderLineStyle::Hair, Color::Auto))
    );
    assert_eq!(
        border.diagonal,
        Some(BorderEdge::new(BorderLineStyle::DashDot, Color::theme(1)))
    );
}

#[test]
fn test_unstyled_cell_has_no_border() {
    let workbook = workbook();
    assert!(workbook.styles().border(0).unwrap().is_empty());
}
