use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::ExportError;
use crate::grouped::GroupedTable;

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;

const TITLE_SIZE: i64 = 16;
const HEADER_SIZE: i64 = 12;
const BODY_SIZE: i64 = 11;
const ROW_HEIGHT: i64 = 20;

/// Render the grouped pending table as a single-column-set, multi-page PDF
/// with a title header. Same cells as the CSV variant.
pub fn grouped_to_pdf(table: &GroupedTable, title: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
            "F2" => bold_font_id,
        },
    });

    let col_width = (PAGE_WIDTH - 2 * MARGIN) / table.headers.len().max(1) as i64;

    // First page carries the title; every page repeats the header row.
    let mut kids: Vec<Object> = Vec::new();
    let mut remaining: &[Vec<String>] = &table.rows;
    let mut first = true;

    loop {
        let top = if first { PAGE_HEIGHT - MARGIN - TITLE_SIZE - 20 } else { PAGE_HEIGHT - MARGIN };
        let capacity = ((top - MARGIN) / ROW_HEIGHT - 1).max(1) as usize;
        let (page_rows, rest) = remaining.split_at(remaining.len().min(capacity));

        let mut operations = Vec::new();
        if first {
            operations.extend(text_at(
                "F2",
                TITLE_SIZE,
                MARGIN,
                PAGE_HEIGHT - MARGIN,
                title,
            ));
        }

        let mut y = top;
        for (i, header) in table.headers.iter().enumerate() {
            operations.extend(text_at(
                "F2",
                HEADER_SIZE,
                MARGIN + i as i64 * col_width,
                y,
                header,
            ));
        }

        // Rule under the header row
        operations.push(Operation::new("w", vec![1.into()]));
        operations.push(Operation::new("m", vec![MARGIN.into(), (y - 5).into()]));
        operations.push(Operation::new(
            "l",
            vec![(PAGE_WIDTH - MARGIN).into(), (y - 5).into()],
        ));
        operations.push(Operation::new("S", vec![]));

        for row in page_rows {
            y -= ROW_HEIGHT;
            for (i, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                operations.extend(text_at(
                    "F1",
                    BODY_SIZE,
                    MARGIN + i as i64 * col_width,
                    y,
                    cell,
                ));
            }
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());

        remaining = rest;
        first = false;
        if remaining.is_empty() {
            break;
        }
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(buffer)
}

fn text_at(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GroupedTable {
        GroupedTable {
            headers: vec!["Bloco 1".into(), "Bloco 2".into(), "Bloco 3".into()],
            rows: vec![
                vec!["9".into(), "202".into(), String::new()],
                vec!["101".into(), String::new(), String::new()],
            ],
        }
    }

    #[test]
    fn produces_a_pdf_with_the_table_text() {
        let bytes = grouped_to_pdf(&table(), "Encomendas Pendentes").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        // Content streams are uncompressed; the cell text must be embedded.
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("Encomendas Pendentes"));
        assert!(raw.contains("Bloco 1"));
        assert!(raw.contains("Bloco 3"));
        assert!(raw.contains("101"));
        assert!(raw.contains("202"));
    }

    #[test]
    fn long_tables_paginate() {
        let rows = (0..200)
            .map(|i| vec![i.to_string(), String::new(), String::new()])
            .collect();
        let t = GroupedTable { headers: table().headers, rows };
        let bytes = grouped_to_pdf(&t, "Encomendas Pendentes").unwrap();
        let raw = String::from_utf8_lossy(&bytes);

        let pages = raw.matches("/Parent").count();
        assert!(pages > 2, "expected multiple pages, got {pages}");
        assert!(raw.contains("199"), "last row must be present");
    }
}
