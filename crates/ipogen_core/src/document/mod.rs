//! Styled block model for assembled documents.
//!
//! # Responsibility
//! - Define the paragraph/run/blank-line block sequence a document is made of.
//! - Provide the low-level append operations section builders compose.
//!
//! # Invariants
//! - Appending is pure data-structure mutation; it cannot fail.
//! - Vertical rhythm is structural: spacing between paragraphs is expressed
//!   with explicit `Block::BlankLine` entries, not style attributes.
//! - A built document is serialized once and discarded, never mutated after.

pub mod rtf;

/// Font family used throughout the standard document.
pub const DEFAULT_FONT: &str = "Calibri";

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

/// A fixed tab stop measured from the left margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStop {
    /// Position in inches from the left margin.
    pub position_in: f32,
    pub alignment: Alignment,
}

impl TabStop {
    /// Left-aligned tab stop at `position_in` inches.
    pub fn left(position_in: f32) -> Self {
        Self {
            position_in,
            alignment: Alignment::Left,
        }
    }
}

/// One contiguous styled run of text within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font_family: String,
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Run {
    /// Creates a run carrying the character attributes of `style`.
    pub fn styled(text: impl Into<String>, style: &ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            font_family: style.font_family.clone(),
            size_pt: style.size_pt,
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
        }
    }
}

/// Formatting options recognized by the append operations.
///
/// Character attributes (`font_family` through `underline`) seed the runs of
/// single-run paragraphs; paragraph attributes (`alignment` and below) always
/// apply to the whole block.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font_family: String,
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub alignment: Alignment,
    /// Extra space after the paragraph, in points. The standard document
    /// keeps this at 0 and spaces structurally with blank-line blocks.
    pub spacing_after_pt: u32,
    /// Line spacing multiple (1.0 = single).
    pub line_spacing: f32,
    pub tab_stops: Vec<TabStop>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT.to_string(),
            size_pt: 11,
            bold: false,
            italic: false,
            underline: false,
            alignment: Alignment::Left,
            spacing_after_pt: 0,
            line_spacing: 1.0,
            tab_stops: Vec::new(),
        }
    }
}

/// One paragraph block: styled runs plus paragraph-level formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub spacing_after_pt: u32,
    pub line_spacing: f32,
    pub tab_stops: Vec<TabStop>,
}

impl Paragraph {
    /// Builds a paragraph from runs and the paragraph attributes of `style`.
    pub fn from_runs(runs: Vec<Run>, style: &ParagraphStyle) -> Self {
        Self {
            runs,
            alignment: style.alignment,
            spacing_after_pt: style.spacing_after_pt,
            line_spacing: style.line_spacing,
            tab_stops: style.tab_stops.clone(),
        }
    }
}

/// One entry in the document block sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// Structural empty-spacing separator.
    BlankLine,
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top_in: f32,
    pub bottom_in: f32,
    pub left_in: f32,
    pub right_in: f32,
}

impl PageMargins {
    /// One inch on all four sides, the standard order layout.
    pub fn uniform_one_inch() -> Self {
        Self {
            top_in: 1.0,
            bottom_in: 1.0,
            left_in: 1.0,
            right_in: 1.0,
        }
    }
}

/// The output artifact: ordered blocks, page geometry and a footer paragraph.
///
/// Exclusively owned by the call stack that builds it, from creation through
/// serialization; there is no shared state across generations.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub margins: PageMargins,
    blocks: Vec<Block>,
    footer: Option<Paragraph>,
}

impl Document {
    /// Creates an empty document with the given page geometry.
    pub fn new(margins: PageMargins) -> Self {
        Self {
            margins,
            blocks: Vec::new(),
            footer: None,
        }
    }

    /// Appends one single-run paragraph styled by `style`.
    pub fn append_paragraph(&mut self, text: impl Into<String>, style: &ParagraphStyle) {
        let run = Run::styled(text, style);
        self.append_runs(vec![run], style);
    }

    /// Appends one paragraph from pre-built runs.
    ///
    /// Used for label/value lines where runs differ within the paragraph;
    /// `style` contributes the paragraph-level attributes only.
    pub fn append_runs(&mut self, runs: Vec<Run>, style: &ParagraphStyle) {
        self.blocks.push(Block::Paragraph(Paragraph {
            runs,
            alignment: style.alignment,
            spacing_after_pt: style.spacing_after_pt,
            line_spacing: style.line_spacing,
            tab_stops: style.tab_stops.clone(),
        }));
    }

    /// Appends a structural blank-line separator.
    pub fn append_blank_line(&mut self) {
        self.blocks.push(Block::BlankLine);
    }

    /// Sets the footer paragraph, replacing any previous one.
    pub fn set_footer(&mut self, paragraph: Paragraph) {
        self.footer = Some(paragraph);
    }

    /// Ordered block sequence.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Footer paragraph, when set.
    pub fn footer(&self) -> Option<&Paragraph> {
        self.footer.as_ref()
    }

    /// Number of paragraph blocks (blank separators excluded).
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::Paragraph(_)))
            .count()
    }

    /// Concatenated text of the paragraph at `index` into the block
    /// sequence, or `None` for blank lines / out of range.
    pub fn paragraph_text(&self, index: usize) -> Option<String> {
        match self.blocks.get(index)? {
            Block::Paragraph(paragraph) => Some(
                paragraph
                    .runs
                    .iter()
                    .map(|run| run.text.as_str())
                    .collect::<String>(),
            ),
            Block::BlankLine => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Alignment, Block, Document, PageMargins, ParagraphStyle, Run, TabStop};

    #[test]
    fn append_paragraph_carries_style_into_run() {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        let style = ParagraphStyle {
            size_pt: 12,
            bold: true,
            alignment: Alignment::Center,
            ..ParagraphStyle::default()
        };
        doc.append_paragraph("TITLE", &style);

        let Block::Paragraph(paragraph) = &doc.blocks()[0] else {
            panic!("expected a paragraph block");
        };
        assert_eq!(paragraph.alignment, Alignment::Center);
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].text, "TITLE");
        assert_eq!(paragraph.runs[0].size_pt, 12);
        assert!(paragraph.runs[0].bold);
        assert!(!paragraph.runs[0].italic);
    }

    #[test]
    fn blank_lines_are_distinct_blocks() {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        doc.append_paragraph("body", &ParagraphStyle::default());
        doc.append_blank_line();

        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.paragraph_text(0).as_deref(), Some("body"));
        assert_eq!(doc.paragraph_text(1), None);
    }

    #[test]
    fn append_runs_keeps_per_run_attributes() {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        let style = ParagraphStyle {
            bold: true,
            tab_stops: vec![TabStop::left(2.5)],
            ..ParagraphStyle::default()
        };
        let label = Run::styled("Project Number:\t", &style);
        let value = Run::styled("100000001", &style);
        doc.append_runs(vec![label, value], &style);

        let Block::Paragraph(paragraph) = &doc.blocks()[0] else {
            panic!("expected a paragraph block");
        };
        assert_eq!(paragraph.tab_stops, vec![TabStop::left(2.5)]);
        assert_eq!(
            doc.paragraph_text(0).as_deref(),
            Some("Project Number:\t100000001")
        );
    }
}
