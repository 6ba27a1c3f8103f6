//! Tests for reading font records.

use crate::Fixture;
use quire_sheets_core::{Color, FontStyle, Underline, Workbook};

const FONTS: &str = r#"<fonts count="6"><font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font><font><b/><sz val="11"/><color theme="1"/><name val="Calibri"/></font><font><i/><u val="double"/><sz val="14"/><color rgb="FFFF0000"/><name val="Arial"/></font><font><strike/><u/><sz val="9.5"/><color theme="4" tint="-0.249977111117893"/><name val="Times New Roman"/></font><font><b val="0"/><sz val="11"/><color indexed="10"/><name val="Calibri"/></font><font><sz val="11"/><color auto="1"/><name val="宋体"/><charset val="134"/></font></fonts>"#;

const TAIL: &str = r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellXfs count="6"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="3" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="4" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="5" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs>"#;

fn styled_workbook() -> Workbook {
    Fixture::new()
        .styles(&format!("{}{}", FONTS, TAIL))
        .rows(
            "Sheet1",
            r#"<row r="1"><c r="A1" s="0"><v>0</v></c><c r="B1" s="1"><v>1</v></c><c r="C1" s="2"><v>2</v></c><c r="D1" s="3"><v>3</v></c><c r="E1" s="4"><v>4</v></c><c r="F1" s="5"><v>5</v></c></row>"#,
        )
        .open()
}

fn font_of(workbook: &Workbook, address: &str) -> FontStyle {
    let cell = workbook.sheet(0).unwrap().cell(address).unwrap().unwrap();
    let style = workbook.styles().style(cell.style_index().unwrap()).unwrap();
    style.font
}

#[test]
fn test_default_font() {
    let workbook = styled_workbook();
    let font = font_of(&workbook, "A1");
    assert_eq!(font.name, "Calibri");
    assert_eq!(font.size, 11.0);
    assert!(!font.bold);
    assert_eq!(font.color, Color::theme(1));
}

#[test]
fn test_bold() {
    let workbook = styled_workbook();
    assert!(font_of(&workbook, "B1").bold);
    assert!(!font_of(&workbook, "E1").bold);
}

#[test]
fn test_italic_double_underline_rgb() {
    let font = font_of(&styled_workbook(), "C1");
    assert!(font.italic);
    assert_eq!(font.underline, Underline::Double);
    assert_eq!(font.size, 14.0);
    assert_eq!(font.name, "Arial");
    assert_eq!(font.color, Color::RED);
}

#[test]
fn test_strike_single_underline_theme_tint() {
    let font = font_of(&styled_workbook(), "D1");
    assert!(font.strikethrough);
    assert_eq!(font.underline, Underline::Single);
    assert_eq!(font.size, 9.5);
    assert_eq!(font.name, "Times New Roman");
    assert_eq!(font.color, Color::theme_tinted(4, -0.249977111117893).unwrap());
}

#[test]
fn test_indexed_and_auto_colors() {
    let workbook = styled_workbook();
    assert_eq!(font_of(&workbook, "E1").color, Color::Indexed(10));

    let font = font_of(&workbook, "F1");
    assert_eq!(font.color, Color::Auto);
    assert_eq!(font.name, "宋体");
}

#[test]
fn test_font_table_kept_in_order() {
    let workbook = styled_workbook();
    let names: Vec<&str> = workbook
        .styles()
        .fonts()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Calibri", "Calibri", "Arial", "Times New Roman", "Calibri", "宋体"]
    );
}
