//! Minimal PDF 1.4 writer for plain text listings.
//!
//! Produces A4 pages with a title, an optional subtitle and one line of
//! Helvetica text per record, paginating as needed. Text is encoded with
//! `WinAnsiEncoding`; characters outside Latin-1 are replaced by `?`.

use std::fmt::Write as _;

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 50;
const TITLE_SIZE: u32 = 16;
const BODY_SIZE: u32 = 9;
const LEADING: u32 = 13;
const HEADER_HEIGHT: u32 = 50;
const FOOTER_HEIGHT: u32 = 20;
const MAX_LINE_CHARS: usize = 110;

/// A text document that renders to PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    title: String,
    subtitle: Option<String>,
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines_per_page() -> usize {
        ((PAGE_HEIGHT - 2 * MARGIN - HEADER_HEIGHT - FOOTER_HEIGHT) / LEADING) as usize
    }

    /// Number of pages `render` will emit (always at least one).
    pub fn page_count(&self) -> usize {
        self.lines.len().div_ceil(Self::lines_per_page()).max(1)
    }

    pub fn render(&self) -> Vec<u8> {
        let pages: Vec<&[String]> = if self.lines.is_empty() {
            vec![&self.lines[..]]
        } else {
            self.lines.chunks(Self::lines_per_page()).collect()
        };
        let page_count = pages.len();

        // 1 catalog, 2 page tree, 3 regular font, 4 bold font, then (page, content) pairs
        let page_ids: Vec<usize> = (0..page_count).map(|i| 5 + 2 * i).collect();
        let mut objects: Vec<Vec<u8>> = Vec::with_capacity(4 + 2 * page_count);

        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count).into_bytes());

        objects.push(font("Helvetica"));
        objects.push(font("Helvetica-Bold"));

        for (index, lines) in pages.iter().enumerate() {
            let content_id = page_ids[index] + 1;
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH, PAGE_HEIGHT, content_id
                )
                .into_bytes(),
            );

            let content = self.page_content(lines, index + 1, page_count);
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
        }

        assemble(&objects)
    }

    fn page_content(&self, lines: &[String], page: usize, total: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let top = PAGE_HEIGHT - MARGIN;

        out.extend_from_slice(b"BT\n");
        show_text(&mut out, "F2", TITLE_SIZE, MARGIN, top, &self.title);
        if let Some(subtitle) = &self.subtitle {
            show_text(&mut out, "F1", BODY_SIZE, MARGIN, top - 22, subtitle);
        }

        let mut y = top - HEADER_HEIGHT;
        for line in lines {
            show_text(&mut out, "F1", BODY_SIZE, MARGIN, y, &truncate(line));
            y -= LEADING;
        }

        let footer = format!("Página {} de {}", page, total);
        show_text(&mut out, "F1", 8, MARGIN, MARGIN - 20, &footer);
        out.extend_from_slice(b"ET");
        out
    }
}

fn font(base: &str) -> Vec<u8> {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base
    )
    .into_bytes()
}

fn show_text(out: &mut Vec<u8>, font: &str, size: u32, x: u32, y: u32, text: &str) {
    out.extend_from_slice(format!("/{} {} Tf\n1 0 0 1 {} {} Tm\n(", font, size, x, y).as_bytes());
    out.extend_from_slice(&encode_text(text));
    out.extend_from_slice(b") Tj\n");
}

fn truncate(line: &str) -> String {
    if line.chars().count() <= MAX_LINE_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(MAX_LINE_CHARS - 3).collect();
    cut.push_str("...");
    cut
}

/// Encodes text for a PDF literal string: escapes delimiters and writes
/// Latin-1 characters as octal escapes.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            ' '..='~' => out.push(ch as u8),
            '\t' => out.push(b' '),
            '\u{a0}'..='\u{ff}' => {
                out.extend_from_slice(format!("\\{:03o}", ch as u32).as_bytes());
            }
            _ => out.push(b'?'),
        }
    }
    out
}

fn assemble(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut pdf: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = pdf.len();
    let mut xref = String::new();
    let _ = writeln!(xref, "xref\n0 {}", objects.len() + 1);
    xref.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        let _ = writeln!(xref, "{:010} 00000 n ", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(pdf: &[u8]) -> String {
        String::from_utf8_lossy(pdf).into_owned()
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let doc = TextDocument::new("Reporte de Equipos");
        let pdf = doc.render();
        let text = as_text(&pdf);

        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Count 1"));
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_long_listing_paginates() {
        let mut doc = TextDocument::new("Reporte").with_subtitle("Generado: 2025-03-01 10:00");
        let per_page = TextDocument::lines_per_page();
        for i in 0..(per_page * 2 + 1) {
            doc.push_line(format!("EQ-{:04}", i));
        }

        let text = as_text(&doc.render());
        assert_eq!(doc.page_count(), 3);
        assert!(text.contains("/Count 3"));
        assert!(text.contains("/Kids [5 0 R 7 0 R 9 0 R]"));
        assert!(text.contains("(EQ-0000) Tj"));
        assert!(text.contains(&format!("(EQ-{:04}) Tj", per_page * 2)));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut doc = TextDocument::new("Reporte");
        doc.push_line("LAP-001 | Laptop");
        let pdf = doc.render();

        let marker = b"startxref\n";
        let pos = pdf
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap();
        let startxref: usize = std::str::from_utf8(&pdf[pos + marker.len()..])
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[startxref..].starts_with(b"xref"));

        let entries: Vec<&str> = std::str::from_utf8(&pdf[startxref..])
            .unwrap()
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .collect();
        assert_eq!(entries.len(), 6);
        for (index, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", index + 1);
            assert!(pdf[offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("Año"), b"A\\361o".to_vec());
        assert_eq!(encode_text("→"), b"?".to_vec());
    }

    #[test]
    fn test_long_lines_are_truncated() {
        let line = "x".repeat(200);
        let cut = truncate(&line);
        assert_eq!(cut.chars().count(), MAX_LINE_CHARS);
        assert!(cut.ends_with("..."));
    }
}
