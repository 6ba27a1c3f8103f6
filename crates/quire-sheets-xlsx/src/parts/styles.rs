//! `xl/styles.xml`
//!
//! The style sheet is decoded into a [`StyleTable`] with every record kept at
//! its position, so cell style indices stay valid across a read/write cycle.
//! Alignment, protection, gradient fills, named cell styles and differential
//! formats are not modelled; the writer emits the fixed `Normal` cell style
//! and empty `dxfs`/`tableStyles` blocks.

use quire_sheets_core::style::{
    BorderEdge, BorderLineStyle, BorderStyle, CellFormat, Color, FillStyle, FontStyle, PatternType,
    StyleTable, Underline,
};

use super::{flag, parsed, required, SPREADSHEETML_NS};
use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

/// Build the style sheet tree for a table
pub fn to_tree(styles: &StyleTable) -> XmlElement {
    let mut root = XmlElement::new("styleSheet").with_attr("xmlns", SPREADSHEETML_NS);

    let num_fmts = styles.numbering_formats();
    if !num_fmts.is_empty() {
        let mut list = XmlElement::new("numFmts").with_attr("count", num_fmts.len());
        for (id, code) in num_fmts {
            list.push_child(
                XmlElement::new("numFmt")
                    .with_attr("numFmtId", id)
                    .with_attr("formatCode", code),
            );
        }
        root.push_child(list);
    }

    let mut fonts = XmlElement::new("fonts").with_attr("count", styles.fonts().len());
    for font in styles.fonts() {
        fonts.push_child(font_element(font));
    }
    root.push_child(fonts);

    let mut fills = XmlElement::new("fills").with_attr("count", styles.fills().len());
    for fill in styles.fills() {
        fills.push_child(fill_element(fill));
    }
    root.push_child(fills);

    let mut borders = XmlElement::new("borders").with_attr("count", styles.borders().len());
    for border in styles.borders() {
        borders.push_child(border_element(border));
    }
    root.push_child(borders);

    root.push_child(
        XmlElement::new("cellStyleXfs")
            .with_attr("count", 1)
            .with_child(
                XmlElement::new("xf")
                    .with_attr("numFmtId", 0)
                    .with_attr("fontId", 0)
                    .with_attr("fillId", 0)
                    .with_attr("borderId", 0),
            ),
    );

    let mut cell_xfs = XmlElement::new("cellXfs").with_attr("count", styles.cell_formats().len());
    for format in styles.cell_formats() {
        cell_xfs.push_child(xf_element(format));
    }
    root.push_child(cell_xfs);

    root.push_child(
        XmlElement::new("cellStyles").with_attr("count", 1).with_child(
            XmlElement::new("cellStyle")
                .with_attr("name", "Normal")
                .with_attr("xfId", 0)
                .with_attr("builtinId", 0),
        ),
    );
    root.push_child(XmlElement::new("dxfs").with_attr("count", 0));
    root.push_child(
        XmlElement::new("tableStyles")
            .with_attr("count", 0)
            .with_attr("defaultTableStyle", "TableStyleMedium2")
            .with_attr("defaultPivotStyle", "PivotStyleLight16"),
    );
    root
}

/// Decode a style sheet tree
///
/// Component ids of the cell formats must point into the decoded tables;
/// a dangling id is reported as [`XlsxError::InconsistentReferences`].
pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<StyleTable> {
    let mut num_fmts = Vec::new();
    if let Some(list) = root.child("numFmts") {
        for el in list.children_named("numFmt") {
            let id = parsed(part, el, "numFmtId")?
                .ok_or_else(|| XlsxError::malformed(part, "<numFmt> is missing attribute 'numFmtId'"))?;
            num_fmts.push((id, required(part, el, "formatCode")?.to_string()));
        }
    }

    let mut fonts = Vec::new();
    if let Some(list) = root.child("fonts") {
        for el in list.children_named("font") {
            fonts.push(read_font(part, el)?);
        }
    }

    let mut fills = Vec::new();
    if let Some(list) = root.child("fills") {
        for el in list.children_named("fill") {
            fills.push(read_fill(part, el)?);
        }
    }

    let mut borders = Vec::new();
    if let Some(list) = root.child("borders") {
        for el in list.children_named("border") {
            borders.push(read_border(part, el)?);
        }
    }

    let mut cell_formats = Vec::new();
    if let Some(list) = root.child("cellXfs") {
        for el in list.children_named("xf") {
            cell_formats.push(read_xf(part, el)?);
        }
    }

    StyleTable::from_parts(fonts, fills, borders, num_fmts, cell_formats)
        .map_err(|e| XlsxError::InconsistentReferences(format!("{}: {}", part, e)))
}

// === Writing ===

fn color_element(tag: &str, color: &Color) -> Option<XmlElement> {
    let element = XmlElement::new(tag);
    match color {
        Color::Auto => None,
        Color::Argb { .. } => color
            .to_argb_hex()
            .map(|hex| element.with_attr("rgb", hex)),
        Color::Theme { index, tint } => {
            let element = element.with_attr("theme", index);
            if tint.is_none() {
                Some(element)
            } else {
                Some(element.with_attr("tint", tint))
            }
        }
        Color::Indexed(i) => Some(element.with_attr("indexed", i)),
    }
}

fn font_element(font: &FontStyle) -> XmlElement {
    let mut el = XmlElement::new("font");
    if font.bold {
        el.push_child(XmlElement::new("b"));
    }
    if font.italic {
        el.push_child(XmlElement::new("i"));
    }
    if font.strikethrough {
        el.push_child(XmlElement::new("strike"));
    }
    match font.underline {
        Underline::None => {}
        Underline::Single => el.push_child(XmlElement::new("u")),
        other => el.push_child(XmlElement::new("u").with_attr("val", other.as_str())),
    }
    el.push_child(XmlElement::new("sz").with_attr("val", font.size));
    if let Some(color) = color_element("color", &font.color) {
        el.push_child(color);
    }
    el.push_child(XmlElement::new("name").with_attr("val", &font.name));
    el
}

fn fill_element(fill: &FillStyle) -> XmlElement {
    let mut pattern =
        XmlElement::new("patternFill").with_attr("patternType", fill.pattern_type().as_str());
    if let FillStyle::Pattern {
        foreground,
        background,
        ..
    } = fill
    {
        if let Some(fg) = color_element("fgColor", foreground) {
            pattern.push_child(fg);
        }
        if let Some(bg) = color_element("bgColor", background) {
            pattern.push_child(bg);
        }
    }
    XmlElement::new("fill").with_child(pattern)
}

fn border_element(border: &BorderStyle) -> XmlElement {
    let mut el = XmlElement::new("border");
    for (tag, edge) in border.edges() {
        let mut edge_el = XmlElement::new(tag);
        if let Some(edge) = edge {
            edge_el.push_attr("style", edge.style.as_str());
            if let Some(color) = color_element("color", &edge.color) {
                edge_el.push_child(color);
            }
        }
        el.push_child(edge_el);
    }
    el
}

fn xf_element(format: &CellFormat) -> XmlElement {
    let mut el = XmlElement::new("xf")
        .with_attr("numFmtId", format.num_fmt_id)
        .with_attr("fontId", format.font_id)
        .with_attr("fillId", format.fill_id)
        .with_attr("borderId", format.border_id)
        .with_attr("xfId", 0);
    if format.apply_number_format {
        el.push_attr("applyNumberFormat", 1);
    }
    if format.apply_font {
        el.push_attr("applyFont", 1);
    }
    if format.apply_fill {
        el.push_attr("applyFill", 1);
    }
    if format.apply_border {
        el.push_attr("applyBorder", 1);
    }
    el
}

// === Reading ===

fn read_color(part: &str, el: &XmlElement) -> XlsxResult<Color> {
    if let Some(rgb) = el.attr("rgb") {
        return Color::from_hex(rgb).ok_or_else(|| {
            XlsxError::malformed(part, format!("<{}> has invalid rgb=\"{}\"", el.name, rgb))
        });
    }
    if let Some(index) = parsed::<u8>(part, el, "theme")? {
        let tint = parsed::<f64>(part, el, "tint")?.unwrap_or(0.0);
        return Color::theme_tinted(index, tint)
            .map_err(|e| XlsxError::malformed(part, format!("<{}>: {}", el.name, e)));
    }
    if let Some(index) = parsed::<u8>(part, el, "indexed")? {
        return Ok(Color::Indexed(index));
    }
    Ok(Color::Auto)
}

fn read_font(part: &str, el: &XmlElement) -> XlsxResult<FontStyle> {
    let mut font = FontStyle::default();
    for child in &el.children {
        match child.name.as_str() {
            "b" => font.bold = flag(part, child, "val")?.unwrap_or(true),
            "i" => font.italic = flag(part, child, "val")?.unwrap_or(true),
            "strike" => font.strikethrough = flag(part, child, "val")?.unwrap_or(true),
            "u" => font.underline = Underline::from_attr(child.attr("val")),
            "sz" => {
                if let Some(size) = parsed::<f64>(part, child, "val")? {
                    if !(size.is_finite() && size > 0.0) {
                        return Err(XlsxError::malformed(
                            part,
                            format!("<sz> has invalid val=\"{}\"", size),
                        ));
                    }
                    font.size = size;
                }
            }
            "color" => font.color = read_color(part, child)?,
            "name" => font.name = required(part, child, "val")?.to_string(),
            _ => {}
        }
    }
    Ok(font)
}

fn read_fill(part: &str, el: &XmlElement) -> XlsxResult<FillStyle> {
    let Some(pattern_el) = el.child("patternFill") else {
        return Ok(FillStyle::None);
    };
    let pattern = match pattern_el.attr("patternType") {
        None => PatternType::None,
        Some(raw) => PatternType::parse(raw).ok_or_else(|| {
            XlsxError::malformed(part, format!("unknown patternType \"{}\"", raw))
        })?,
    };
    let foreground = match pattern_el.child("fgColor") {
        Some(c) => read_color(part, c)?,
        None => Color::Auto,
    };
    let background = match pattern_el.child("bgColor") {
        Some(c) => read_color(part, c)?,
        None => Color::Auto,
    };
    Ok(FillStyle::pattern(pattern, foreground, background))
}

fn read_border(part: &str, el: &XmlElement) -> XlsxResult<BorderStyle> {
    let mut border = BorderStyle::default();
    for child in &el.children {
        let slot = match child.name.as_str() {
            "left" => &mut border.left,
            "right" => &mut border.right,
            "top" => &mut border.top,
            "bottom" => &mut border.bottom,
            "diagonal" => &mut border.diagonal,
            _ => continue,
        };
        let style = match child.attr("style") {
            None => BorderLineStyle::None,
            Some(raw) => BorderLineStyle::parse(raw).ok_or_else(|| {
                XlsxError::malformed(part, format!("unknown border style \"{}\"", raw))
            })?,
        };
        if style == BorderLineStyle::None {
            continue;
        }
        let color = match child.child("color") {
            Some(c) => read_color(part, c)?,
            None => Color::Auto,
        };
        *slot = Some(BorderEdge::new(style, color));
    }
    Ok(border)
}

fn read_xf(part: &str, el: &XmlElement) -> XlsxResult<CellFormat> {
    Ok(CellFormat {
        font_id: parsed(part, el, "fontId")?.unwrap_or(0),
        fill_id: parsed(part, el, "fillId")?.unwrap_or(0),
        border_id: parsed(part, el, "borderId")?.unwrap_or(0),
        num_fmt_id: parsed(part, el, "numFmtId")?.unwrap_or(0),
        apply_font: flag(part, el, "applyFont")?.unwrap_or(false),
        apply_fill: flag(part, el, "applyFill")?.unwrap_or(false),
        apply_border: flag(part, el, "applyBorder")?.unwrap_or(false),
        apply_number_format: flag(part, el, "applyNumberFormat")?.unwrap_or(false),
    })
}
