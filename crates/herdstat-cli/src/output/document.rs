use herdstat_core::report::{Cell, Element, PaginatedDocument, TextStyle};

/// Body-text columns across the content area.
fn columns_for(mm: f64) -> usize {
    (mm / TextStyle::Body.char_width_mm()).round().max(1.0) as usize
}

fn render_cells(cells: &[Cell], margin_mm: f64) -> String {
    let mut line = String::new();
    for cell in cells {
        let start = ((cell.x - margin_mm) / TextStyle::Body.char_width_mm()).round() as usize;
        while line.chars().count() < start {
            line.push(' ');
        }
        line.push_str(&cell.text);
        line.push(' ');
    }
    line.trim_end().to_string()
}

/// Render a laid-out document as plain text, one block per page.
pub fn render_text(doc: &PaginatedDocument) -> String {
    let width = columns_for(doc.page_width_mm - 2.0 * doc.margin_mm);
    let mut out = String::new();

    for page in &doc.pages {
        if page.number > 1 {
            out.push('\u{c}');
            out.push('\n');
        }
        for element in &page.elements {
            match element {
                Element::Text { style, lines, .. } => {
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                    let rule = match style {
                        TextStyle::Title => Some('='),
                        TextStyle::Heading => Some('-'),
                        TextStyle::Body | TextStyle::Small => None,
                    };
                    if let Some(ch) = rule {
                        let len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                        out.push_str(&ch.to_string().repeat(len));
                        out.push('\n');
                    }
                }
                Element::TableHeader { cells, .. } => {
                    out.push_str(&render_cells(cells, doc.margin_mm));
                    out.push('\n');
                    out.push_str(&"-".repeat(width));
                    out.push('\n');
                }
                Element::TableRow { cells, .. } => {
                    out.push_str(&render_cells(cells, doc.margin_mm));
                    out.push('\n');
                }
                Element::Footer { text, .. } => {
                    out.push('\n');
                    let pad = width.saturating_sub(text.chars().count()) / 2;
                    out.push_str(&" ".repeat(pad));
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdstat_core::report::Page;

    fn doc(pages: Vec<Page>) -> PaginatedDocument {
        PaginatedDocument {
            title: "Test".into(),
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            pages,
        }
    }

    #[test]
    fn test_heading_is_underlined() {
        let mut page = Page::new(1);
        page.elements.push(Element::Text {
            x: 20.0,
            y: 20.0,
            style: TextStyle::Heading,
            lines: vec!["Milk Production".into()],
        });
        let text = render_text(&doc(vec![page]));
        assert_eq!(text, "Milk Production\n---------------\n");
    }

    #[test]
    fn test_cells_are_aligned_to_columns() {
        let mut page = Page::new(1);
        page.elements.push(Element::TableRow {
            y: 20.0,
            height: 8.0,
            cells: vec![
                Cell { x: 20.0, width: 85.0, text: "Milking Cows".into() },
                Cell { x: 105.0, width: 85.0, text: "12".into() },
            ],
        });
        let text = render_text(&doc(vec![page]));
        let line = text.lines().next().unwrap();
        assert!(line.starts_with("Milking Cows "));
        let value_col = line.find("12").unwrap();
        assert_eq!(value_col, columns_for(85.0));
    }

    #[test]
    fn test_pages_separated_by_form_feed() {
        let mut first = Page::new(1);
        first.elements.push(Element::Footer { y: 287.0, text: "Page 1 of 2".into() });
        let mut second = Page::new(2);
        second.elements.push(Element::Footer { y: 287.0, text: "Page 2 of 2".into() });
        let text = render_text(&doc(vec![first, second]));
        assert_eq!(text.matches('\u{c}').count(), 1);
        assert!(text.trim_end().ends_with("Page 2 of 2"));
    }
}
