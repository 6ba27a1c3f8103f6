//! Tests for reading fill records.

use crate::Fixture;
use quire_sheets_core::{Color, FillStyle, PatternType};

const STYLES: &str = r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="5"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/><bgColor indexed="64"/></patternFill></fill><fill><patternFill patternType="darkTrellis"><fgColor theme="5" tint="0.39997558519241921"/><bgColor rgb="FF00B050"/></patternFill></fill><fill><gradientFill degree="90"><stop position="0"><color theme="0"/></stop><stop position="1"><color theme="4"/></stop></gradientFill></fill></fills><borders count="1"><border/></borders><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="0" fillId="2" borderId="0" xfId="0" applyFill="1"/><xf numFmtId="0" fontId="0" fillId="3" borderId="0" xfId="0" applyFill="1"/><xf numFmtId="0" fontId="0" fillId="4" borderId="0" xfId="0" applyFill="1"/></cellXfs>"#;

fn fills() -> Vec<FillStyle> {
    let workbook = Fixture::new()
        .styles(STYLES)
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" s="1"/><c r="B1" s="2"/><c r="C1" s="3"/></row>"#,
        )
        .open();
    let sheet = workbook.sheet(0).unwrap();
    sheet
        .cells()
        .map(|c| {
            let format = workbook.styles().cell_format(c.style_index().unwrap()).unwrap();
            workbook.styles().fill(format.fill_id).unwrap().clone()
        })
        .collect()
}

#[test]
fn test_solid_fill() {
    assert_eq!(
        fills()[0],
        FillStyle::pattern(PatternType::Solid, Color::YELLOW, Color::Indexed(64))
    );
}

#[test]
fn test_pattern_fill_with_theme_tint() {
    assert_eq!(
        fills()[1],
        FillStyle::pattern(
            PatternType::DarkTrellis,
            Color::theme_tinted(5, 0.39997558519241921).unwrap(),
            Color::rgb(0x00, 0xB0, 0x50)
        )
    );
}

#[test]
fn test_gradient_fill_read_as_none() {
    assert_eq!(fills()[2], FillStyle::None);
}

#[test]
fn test_mandatory_fills() {
    let workbook = Fixture::new().styles(STYLES).rows("Sheet1", "").open();
    let fills = workbook.styles().fills();
    assert_eq!(fills.len(), 5);
    assert_eq!(fills[0], FillStyle::None);
    assert_eq!(fills[1], FillStyle::gray125());
}
