//! Printable table reports (US Letter, Helvetica).

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::CoreError;

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 12.7;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const ROW_HEIGHT: f32 = 5.6;
const COLUMN_GAP: f32 = 2.8;
/// Rough Helvetica advance at [`BODY_SIZE`], used to clip long cells.
const CHAR_WIDTH: f32 = 1.9;

/// A column heading and its width in millimetres.
#[derive(Debug, Clone, Copy)]
pub struct PdfColumn<'a> {
    pub heading: &'a str,
    pub width: f32,
}

/// Render `rows` as a paginated table under `title`.
///
/// The heading row repeats at the top of every page. Cells wider than
/// their column are clipped with `...`.
pub fn render_table(
    title: &str,
    columns: &[PdfColumn<'_>],
    rows: &[Vec<String>],
) -> Result<Vec<u8>, CoreError> {
    let pdf_err = |e: printpdf::Error| CoreError::Internal(format!("PDF encoding failed: {e}"));

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut canvas = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE * 0.35;
    canvas.use_text(title, TITLE_SIZE, Mm(MARGIN), Mm(y), &bold);
    y -= ROW_HEIGHT * 2.0;

    let headings: Vec<String> = columns.iter().map(|c| c.heading.to_string()).collect();
    draw_row(&canvas, columns, &headings, y, &bold);
    y -= ROW_HEIGHT;

    for row in rows {
        if y < MARGIN + ROW_HEIGHT {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
            canvas = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
            draw_row(&canvas, columns, &headings, y, &bold);
            y -= ROW_HEIGHT;
        }
        draw_row(&canvas, columns, row, y, &regular);
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn draw_row(
    canvas: &PdfLayerReference,
    columns: &[PdfColumn<'_>],
    cells: &[String],
    y: f32,
    font: &IndirectFontRef,
) {
    let mut x = MARGIN;
    for (column, cell) in columns.iter().zip(cells) {
        canvas.use_text(clip(cell, column.width), BODY_SIZE, Mm(x), Mm(y), font);
        x += column.width + COLUMN_GAP;
    }
}

fn clip(text: &str, width: f32) -> String {
    let max = (width / CHAR_WIDTH).floor().max(4.0) as usize;
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[PdfColumn<'static>] = &[
        PdfColumn { heading: "Name", width: 40.0 },
        PdfColumn { heading: "Status", width: 25.0 },
    ];

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("Employee {i}"), "active".to_string()])
            .collect()
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_table("Employees Export", COLUMNS, &rows(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn long_tables_spill_onto_more_pages() {
        let one_page = render_table("Employees Export", COLUMNS, &rows(5)).unwrap();
        // About 45 rows fit on a Letter page at this row height.
        let many = render_table("Employees Export", COLUMNS, &rows(150)).unwrap();
        assert!(many.len() > one_page.len());
    }

    #[test]
    fn empty_table_still_renders() {
        let bytes = render_table("Employees Export", COLUMNS, &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn long_cells_are_clipped() {
        assert_eq!(clip("short", 40.0), "short");
        let clipped = clip("a-very-long-department-name-indeed", 20.0);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), (20.0 / CHAR_WIDTH) as usize);
    }
}
