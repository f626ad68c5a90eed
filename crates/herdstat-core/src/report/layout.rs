use crate::profile::schema::LayoutDef;
use crate::report::document::{Cell, Element, Page, TextStyle};

const EPSILON: f64 = 1e-9;
/// Horizontal padding inside a table cell.
const CELL_PADDING_MM: f64 = 2.0;

/// Column headers, relative column widths and row cells.
#[derive(Debug, Clone, Default)]
pub struct TableSpec {
    pub headers: Vec<String>,
    /// Relative widths, one per column. Equal widths when empty.
    pub widths: Vec<f64>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            widths: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_widths(mut self, widths: &[f64]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

/// Word-wrap `text` to at most `max_chars` characters per line.
///
/// Newlines start a new line; words longer than a line are hard-split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    // A trailing newline should not leave a blank last line.
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.len() == 1 && lines[0].is_empty() {
        lines.clear();
    }
    lines
}

/// Cut `text` to `max_chars`, ending with "..." when shortened.
pub fn truncate_to(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

/// Cursor over fixed-size pages. Blocks are placed top to bottom and a new
/// page starts before any block that would cross the bottom margin.
#[derive(Debug)]
pub struct PageWriter {
    layout: LayoutDef,
    pages: Vec<Page>,
    y: f64,
}

impl PageWriter {
    pub fn new(layout: LayoutDef) -> Self {
        let y = layout.margin_mm;
        Self {
            layout,
            pages: vec![Page::new(1)],
            y,
        }
    }

    pub fn layout(&self) -> &LayoutDef {
        &self.layout
    }

    pub fn page_number(&self) -> usize {
        self.pages.len()
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    fn top(&self) -> f64 {
        self.layout.margin_mm
    }

    fn bottom(&self) -> f64 {
        self.layout.page_height_mm - self.layout.margin_mm
    }

    pub fn remaining(&self) -> f64 {
        self.bottom() - self.y
    }

    fn at_page_top(&self) -> bool {
        (self.y - self.top()).abs() < EPSILON
    }

    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page::new(number));
        self.y = self.top();
        tracing::debug!(page = number, "page break");
    }

    /// Start a new page unless `height` fits below the cursor. A fresh page is
    /// never abandoned, so an oversized block cannot loop.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.y + height > self.bottom() + EPSILON && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Start a new page when less than `min_mm` remains below the cursor. A
    /// page with nothing on it yet is kept.
    pub fn break_if_below(&mut self, min_mm: f64) -> bool {
        if self.remaining() < min_mm && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Vertical gap; swallowed at the top of a page.
    pub fn gap(&mut self, mm: f64) {
        if !self.at_page_top() {
            self.y = (self.y + mm).min(self.bottom());
        }
    }

    fn push(&mut self, element: Element) {
        self.y = element.bottom();
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn chars_per_line(&self, style: TextStyle) -> usize {
        (self.layout.content_width() / style.char_width_mm()).floor() as usize
    }

    /// Height `text` would take in `style`.
    pub fn measure_text(&self, text: &str, style: TextStyle) -> f64 {
        wrap_text(text, self.chars_per_line(style)).len() as f64 * style.line_height_mm()
    }

    /// Write a wrapped text block, moving it whole to a new page if it does
    /// not fit. Only a block taller than an entire page is split.
    pub fn write_text(&mut self, text: &str, style: TextStyle) {
        let lines = wrap_text(text, self.chars_per_line(style));
        if lines.is_empty() {
            return;
        }
        let line_height = style.line_height_mm();
        let per_page = ((self.layout.content_height() / line_height).floor() as usize).max(1);
        let chunk_size = if lines.len() <= per_page {
            lines.len()
        } else {
            tracing::warn!(
                lines = lines.len(),
                per_page,
                "text block taller than a page, splitting"
            );
            per_page
        };

        for chunk in lines.chunks(chunk_size) {
            self.ensure_space(chunk.len() as f64 * line_height);
            self.push(Element::Text {
                x: self.layout.margin_mm,
                y: self.y,
                style,
                lines: chunk.to_vec(),
            });
        }
    }

    fn columns(&self, spec: &TableSpec) -> Vec<(f64, f64)> {
        let n = spec.headers.len().max(1);
        let weights: Vec<f64> = if spec.widths.len() == n {
            spec.widths.clone()
        } else {
            vec![1.0; n]
        };
        let total: f64 = weights.iter().sum();
        let content = self.layout.content_width();

        let mut x = self.layout.margin_mm;
        weights
            .iter()
            .map(|w| {
                let width = if total > 0.0 { content * w / total } else { content / n as f64 };
                let column = (x, width);
                x += width;
                column
            })
            .collect()
    }

    fn cells(&self, columns: &[(f64, f64)], texts: &[String]) -> Vec<Cell> {
        let char_width = TextStyle::Body.char_width_mm();
        columns
            .iter()
            .enumerate()
            .map(|(i, (x, width))| {
                let max_chars = ((width - 2.0 * CELL_PADDING_MM) / char_width).floor().max(1.0);
                let text = texts.get(i).map(String::as_str).unwrap_or("");
                Cell {
                    x: *x,
                    width: *width,
                    text: truncate_to(text, max_chars as usize),
                }
            })
            .collect()
    }

    /// Write a table: one header band, then fixed-height rows. A row that would
    /// cross the bottom margin starts a new page; the header is not repeated.
    pub fn write_table(&mut self, spec: &TableSpec) {
        let header_height = self.layout.table_header_height_mm;
        let row_height = self.layout.table_row_height_mm;
        let columns = self.columns(spec);

        let first_band = if spec.rows.is_empty() {
            header_height
        } else {
            header_height + row_height
        };
        self.ensure_space(first_band);
        self.push(Element::TableHeader {
            y: self.y,
            height: header_height,
            cells: self.cells(&columns, &spec.headers),
        });

        for row in &spec.rows {
            self.ensure_space(row_height);
            self.push(Element::TableRow {
                y: self.y,
                height: row_height,
                cells: self.cells(&columns, row),
            });
        }
    }

    /// Close the document, stamping a footer on every page.
    pub fn finish(mut self, footer: impl Fn(usize, usize) -> String) -> Vec<Page> {
        let total = self.pages.len();
        let y = self.layout.page_height_mm - self.layout.margin_mm / 2.0;
        for page in &mut self.pages {
            page.elements.push(Element::Footer {
                y,
                text: footer(page.number, total),
            });
        }
        self.pages
    }
}
