//! Backend-independent text placement
//!
//! Coordinates are PDF user-space points with the origin at the bottom-left
//! of the page, so the cursor moves downward by decreasing `y`.

/// A4 width in points
pub const PAGE_WIDTH: i64 = 595;
/// A4 height in points
pub const PAGE_HEIGHT: i64 = 842;
/// Baseline of the first line on every page
pub const TOP_BASELINE: i64 = 800;
/// No line is placed below this baseline
pub const BOTTOM_MARGIN: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

/// One positioned line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub x: i64,
    pub y: i64,
    pub font: Font,
    pub size: i64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

/// Top-to-bottom line accumulator that breaks pages as it goes.
#[derive(Debug)]
pub struct PageLayout {
    pages: Vec<Page>,
    cursor: i64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: TOP_BASELINE,
        }
    }

    /// Current baseline
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Start a new page if the cursor has fallen below the bottom margin.
    pub fn ensure_space(&mut self) {
        if self.cursor < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = TOP_BASELINE;
    }

    /// Place `text` at the cursor, then move down by `advance`.
    pub fn emit_line(&mut self, x: i64, font: Font, size: i64, text: impl Into<String>, advance: i64) {
        self.ensure_space();
        let y = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                x,
                y,
                font,
                size,
                text: text.into(),
            });
        }
        self.cursor -= advance;
    }

    /// Move down without placing anything.
    pub fn skip(&mut self, gap: i64) {
        self.cursor -= gap;
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}
