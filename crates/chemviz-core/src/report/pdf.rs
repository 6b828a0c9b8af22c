//! PDF serialization of laid-out pages

use super::layout::{Font, Page, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::{CoreError, CoreResult};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PDF_VERSION: &str = "1.5";

fn resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
    }
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F, indexed by `byte - 0x80`.
/// `None` marks the five unassigned codes.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

fn win_ansi_byte(c: char) -> u8 {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped == Some(c))
            .map_or(b'?', |index| 0x80 + index as u8),
    }
}

/// Encode for the standard fonts' WinAnsi encoding. Control characters and
/// anything the encoding lacks become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![resource_name(line.font).into(), line.size.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

/// Serialize `pages` into a complete PDF document.
///
/// Output depends only on the input pages: no timestamps or random document
/// ids are written.
pub fn write_pdf(pages: &[Page]) -> CoreResult<Vec<u8>> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            resource_name(Font::Helvetica) => regular_id,
            resource_name(Font::HelveticaBold) => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().map_err(CoreError::render)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
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

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(CoreError::render)?;
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::report::layout::PageLayout;

    #[test]
    fn test_win_ansi_replaces_unmappable() {
        assert_eq!(win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(win_ansi("泵"), vec![b'?']);
        assert_eq!(win_ansi("\u{0085}\u{009F}\t"), vec![b'?', b'?', b'?']);
    }

    #[test]
    fn test_win_ansi_maps_high_block() {
        assert_eq!(win_ansi("\u{20AC}5"), vec![0x80, b'5']);
        assert_eq!(win_ansi("A\u{2013}B"), vec![b'A', 0x96, b'B']);
        assert_eq!(win_ansi("pump\u{2019}s"), vec![b'p', b'u', b'm', b'p', 0x92, b's']);
        assert_eq!(win_ansi("\u{2122}\u{2014}\u{0178}"), vec![0x99, 0x97, 0x9F]);
        assert_eq!(win_ansi("\u{00A0}\u{00FF}"), vec![0xA0, 0xFF]);
    }

    #[test]
    fn test_page_count_matches_layout() {
        let mut layout = PageLayout::new();
        layout.emit_line(50, Font::HelveticaBold, 16, "first", 20);
        layout.new_page();
        layout.emit_line(50, Font::Helvetica, 12, "second (with parens)", 20);

        let bytes = write_pdf(&layout.finish()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
