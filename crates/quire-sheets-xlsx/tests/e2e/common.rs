//! Package fixtures for E2E tests.

use std::io::Write;

use quire_sheets_core::Workbook;
use quire_sheets_xlsx::{ReadOptions, XlsxReader, XlsxResult};
use tempfile::TempPath;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Styles of a new Excel workbook: one font, the two mandatory fills, one
/// border and one cell format
pub const DEFAULT_STYLES: &str = r#"<fonts count="1" x14ac:knownFonts="1"><font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#;

/// A workbook package as written by a desktop spreadsheet application
pub struct Fixture {
    sheets: Vec<(String, String)>,
    strings: Vec<String>,
    styles: String,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            strings: Vec::new(),
            styles: DEFAULT_STYLES.to_string(),
        }
    }

    /// Add a sheet; `body` is everything between `<sheetFormatPr>` and
    /// `<pageMargins>` (columns, `sheetData`, `autoFilter`)
    pub fn sheet(mut self, name: &str, body: &str) -> Self {
        self.sheets.push((name.to_string(), body.to_string()));
        self
    }

    /// Add a sheet holding only the given rows
    pub fn rows(self, name: &str, rows: &str) -> Self {
        let body = format!("<sheetData>{}</sheetData>", rows);
        self.sheet(name, &body)
    }

    pub fn strings(mut self, strings: &[&str]) -> Self {
        self.strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replace the content of `<styleSheet>`
    pub fn styles(mut self, content: &str) -> Self {
        self.styles = content.to_string();
        self
    }

    /// Package entries in the order a producer writes them
    fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let n = self.sheets.len();

        let mut overrides = String::new();
        for i in 1..=n {
            overrides.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i
            ));
        }
        entries.push((
            "[Content_Types].xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}<Override PartName="/xl/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#,
                overrides
            ),
        ));

        entries.push((
            "_rels/.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
                PKG_REL_NS
            ),
        ));

        let mut sheet_rels = String::new();
        let mut sheet_list = String::new();
        for (i, (name, _)) in self.sheets.iter().enumerate() {
            let number = i + 1;
            sheet_rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                number, number
            ));
            sheet_list.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                name, number, number
            ));
        }
        entries.push((
            "xl/_rels/workbook.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">{}<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/><Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#,
                PKG_REL_NS,
                sheet_rels,
                n + 1,
                n + 2,
                n + 3
            ),
        ));

        entries.push((
            "xl/workbook.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" mc:Ignorable="x15"><fileVersion appName="xl" lastEdited="7" lowestEdited="7" rupBuild="22228"/><workbookPr defaultThemeVersion="166925"/><bookViews><workbookView xWindow="-120" yWindow="-120" windowWidth="29040" windowHeight="15840"/></bookViews><sheets>{}</sheets><calcPr calcId="191029"/></workbook>"#,
                MAIN_NS, REL_NS, sheet_list
            ),
        ));

        for (i, (_, body)) in self.sheets.iter().enumerate() {
            entries.push((
                format!("xl/worksheets/sheet{}.xml", i + 1),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}" xmlns:r="{}" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" mc:Ignorable="x14ac" xmlns:x14ac="http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac"><sheetViews><sheetView workbookViewId="0"/></sheetViews><sheetFormatPr defaultRowHeight="15" x14ac:dyDescent="0.25"/>{}<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/></worksheet>"#,
                    MAIN_NS, REL_NS, body
                ),
            ));
        }

        entries.push((
            "xl/theme/theme1.xml".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements/></a:theme>"#
                .to_string(),
        ));

        entries.push((
            "xl/styles.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{}" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" mc:Ignorable="x14ac" xmlns:x14ac="http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac">{}<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles><dxfs count="0"/><tableStyles count="0" defaultTableStyle="TableStyleMedium2" defaultPivotStyle="PivotStyleLight16"/></styleSheet>"#,
                MAIN_NS, self.styles
            ),
        ));

        let mut items = String::new();
        for s in &self.strings {
            let space = if s.starts_with(' ') || s.ends_with(' ') {
                r#" xml:space="preserve""#
            } else {
                ""
            };
            items.push_str(&format!("<si><t{}>{}</t></si>", space, s));
        }
        entries.push((
            "xl/sharedStrings.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{}" count="{}" uniqueCount="{}">{}</sst>"#,
                MAIN_NS,
                self.strings.len(),
                self.strings.len(),
                items
            ),
        ));

        entries.push((
            "docProps/app.xml".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>Microsoft Excel</Application></Properties>"#
                .to_string(),
        ));
        entries
    }

    /// Zip the package into memory
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, xml) in self.entries() {
            zip.start_file(name, options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// Save the package to a temporary `.xlsx` file, removed on drop
    pub fn save(&self) -> TempPath {
        let mut file = tempfile::Builder::new()
            .prefix("quire-e2e-")
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        file.write_all(&self.build()).unwrap();
        file.into_temp_path()
    }

    /// Save the package and read it back
    pub fn open(&self) -> Workbook {
        self.try_open(&ReadOptions::default()).unwrap()
    }

    pub fn try_open(&self, options: &ReadOptions) -> XlsxResult<Workbook> {
        let path = self.save();
        XlsxReader::read_file_with(&path, options)
    }
}
