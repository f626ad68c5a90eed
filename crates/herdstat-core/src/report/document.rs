use serde::{Deserialize, Serialize};

/// Points to millimetres.
pub const PT_TO_MM: f64 = 25.4 / 72.0;
/// Line pitch as a multiple of the font size.
pub const LINE_SPACING: f64 = 1.15;
/// Average glyph advance as a fraction of the font size (proportional sans).
pub const AVG_CHAR_WIDTH_EM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Heading,
    Body,
    Small,
}

impl TextStyle {
    pub fn font_size_pt(&self) -> f64 {
        match self {
            TextStyle::Title => 18.0,
            TextStyle::Heading => 14.0,
            TextStyle::Body => 10.0,
            TextStyle::Small => 8.0,
        }
    }

    pub fn bold(&self) -> bool {
        matches!(self, TextStyle::Title | TextStyle::Heading)
    }

    pub fn line_height_mm(&self) -> f64 {
        self.font_size_pt() * PT_TO_MM * LINE_SPACING
    }

    pub fn char_width_mm(&self) -> f64 {
        self.font_size_pt() * PT_TO_MM * AVG_CHAR_WIDTH_EM
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: f64,
    pub width: f64,
    pub text: String,
}

/// A positioned block on a page. `y` is the top edge in mm from the page top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Text {
        x: f64,
        y: f64,
        style: TextStyle,
        lines: Vec<String>,
    },
    TableHeader {
        y: f64,
        height: f64,
        cells: Vec<Cell>,
    },
    TableRow {
        y: f64,
        height: f64,
        cells: Vec<Cell>,
    },
    Footer {
        y: f64,
        text: String,
    },
}

impl Element {
    pub fn top(&self) -> f64 {
        match self {
            Element::Text { y, .. }
            | Element::TableHeader { y, .. }
            | Element::TableRow { y, .. }
            | Element::Footer { y, .. } => *y,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Element::Text { style, lines, .. } => lines.len() as f64 * style.line_height_mm(),
            Element::TableHeader { height, .. } | Element::TableRow { height, .. } => *height,
            Element::Footer { .. } => TextStyle::Small.line_height_mm(),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top() + self.height()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Elements in the content area (everything but the footer).
    pub fn body(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| !matches!(e, Element::Footer { .. }))
    }
}

/// A laid-out, page-size-aware document. Rendering it to a file format is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub title: String,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
