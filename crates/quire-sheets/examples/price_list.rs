//! Example: write a small price list, then read it back and print every cell

use quire_sheets::prelude::*;

fn main() -> XlsxResult<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openxml2.xlsx".to_string());

    let mut workbook = Workbook::new();
    let idx = workbook.add_sheet("产品")?;
    let money = workbook
        .styles_mut()
        .intern_style(&Style::new().number_format("#,##0.00"))?;
    let header = workbook
        .styles_mut()
        .intern_style(&Style::new().bold(true).fill_color(Color::rgb(0xDD, 0xEB, 0xF7)))?;

    let mut sheet = workbook.sheet_mut(idx)?;
    let columns = ["产品ID", "产品说明", "订单说明", "折扣说明", "货币", "费用"];
    for (col, title) in columns.iter().enumerate() {
        sheet.set_cell_value_at(0, col as u16, *title)?;
        sheet.set_cell_style_at(0, col as u16, header)?;
    }
    sheet.set_cell_value("A2", "15D05473-742F-4691-8BF4-5124F2D66176")?;
    sheet.set_cell_value("B2", "Iced Lemon Tea")?;
    sheet.set_cell_value("C2", "Special Iced Lemon Tea")?;
    sheet.set_cell_value("D2", "Iced Lemon Tea (50% off)")?;
    sheet.set_cell_value("E2", "USD")?;
    sheet.set_cell_value("F2", 5.95)?;
    sheet.set_cell_style("F2", money)?;
    sheet.set_column_width(1, 1, 38.22)?;
    sheet.set_column_width(2, 4, 24.0)?;
    sheet.set_auto_filter("B1")?;

    save_workbook(&workbook, &path)?;
    println!("Created {}", path);

    let workbook = open_workbook(&path)?;
    for sheet in workbook.sheets() {
        println!("[{}]", sheet.name());
        for row in sheet.rows() {
            let values: Vec<String> = row
                .cells()
                .map(|c| workbook.display_value(c))
                .collect::<Result<_>>()?;
            println!("{:>4}  {}", row.number(), values.join("\t"));
        }
    }
    Ok(())
}
