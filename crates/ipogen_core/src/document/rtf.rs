//! RTF serialization of the block model.
//!
//! # Responsibility
//! - Encode a built `Document` into a byte-exact RTF artifact.
//! - Keep output deterministic: identical documents yield identical bytes.
//!
//! # Invariants
//! - Output is pure ASCII; non-ASCII text is escaped as `\uN` units.
//! - No partial artifact escapes on failure; callers discard the sink.
//! - Block order and structural blank lines map 1:1 onto RTF paragraphs.

use crate::document::{Alignment, Block, Document, Paragraph, Run};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Result type for serialization.
pub type SerializeResult<T> = Result<T, SerializeError>;

/// Error raised when the artifact cannot be written or encoded.
#[derive(Debug)]
pub enum SerializeError {
    Io(io::Error),
}

impl Display for SerializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write document artifact: {err}"),
        }
    }
}

impl Error for SerializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for SerializeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Serializes `document` into an in-memory byte buffer.
///
/// # Errors
/// - `SerializeError::Io` is structurally possible but a `Vec<u8>` sink does
///   not fail in practice; the `Result` keeps one signature for all sinks.
pub fn to_rtf_bytes(document: &Document) -> SerializeResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_rtf(document, &mut buffer)?;
    Ok(buffer)
}

/// Serializes `document` as RTF into `sink`.
///
/// # Contract
/// - One RTF paragraph per block, in block order.
/// - Page margins and the footer region are emitted in the document header.
/// - Output depends only on the document value.
///
/// # Errors
/// - `SerializeError::Io` when the sink rejects a write. The sink may hold a
///   truncated prefix in that case; the caller must discard it.
pub fn write_rtf<W: Write>(document: &Document, sink: &mut W) -> SerializeResult<()> {
    let fonts = FontTable::collect(document);

    write!(sink, "{{\\rtf1\\ansi\\ansicpg1252\\deff0")?;
    fonts.write(sink)?;
    writeln!(sink)?;
    writeln!(
        sink,
        "\\margl{}\\margr{}\\margt{}\\margb{}",
        twips_from_inches(document.margins.left_in),
        twips_from_inches(document.margins.right_in),
        twips_from_inches(document.margins.top_in),
        twips_from_inches(document.margins.bottom_in),
    )?;

    if let Some(footer) = document.footer() {
        write!(sink, "{{\\footer ")?;
        write_paragraph(sink, footer, &fonts)?;
        writeln!(sink, "}}")?;
    }

    for block in document.blocks() {
        match block {
            Block::Paragraph(paragraph) => {
                write_paragraph(sink, paragraph, &fonts)?;
                writeln!(sink)?;
            }
            Block::BlankLine => writeln!(sink, "\\pard\\par")?,
        }
    }

    writeln!(sink, "}}")?;
    Ok(())
}

/// Font table in first-use order, so indices are stable for a given document.
struct FontTable {
    families: Vec<String>,
}

impl FontTable {
    fn collect(document: &Document) -> Self {
        let mut families: Vec<String> = Vec::new();
        let mut note = |run: &Run| {
            if !families.iter().any(|family| family == &run.font_family) {
                families.push(run.font_family.clone());
            }
        };
        for block in document.blocks() {
            if let Block::Paragraph(paragraph) = block {
                paragraph.runs.iter().for_each(&mut note);
            }
        }
        if let Some(footer) = document.footer() {
            footer.runs.iter().for_each(&mut note);
        }
        if families.is_empty() {
            // \deff0 must resolve even for an all-blank document.
            families.push(crate::document::DEFAULT_FONT.to_string());
        }
        Self { families }
    }

    fn index_of(&self, family: &str) -> usize {
        self.families
            .iter()
            .position(|known| known == family)
            .unwrap_or(0)
    }

    fn write<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{{\\fonttbl")?;
        for (index, family) in self.families.iter().enumerate() {
            write!(sink, "{{\\f{index}\\fnil\\fcharset0 ")?;
            write_escaped(sink, family)?;
            write!(sink, ";}}")?;
        }
        write!(sink, "}}")
    }
}

fn write_paragraph<W: Write>(
    sink: &mut W,
    paragraph: &Paragraph,
    fonts: &FontTable,
) -> SerializeResult<()> {
    write!(sink, "\\pard")?;
    write!(sink, "{}", alignment_control(paragraph.alignment))?;
    for tab_stop in &paragraph.tab_stops {
        write!(sink, "\\tx{}", twips_from_inches(tab_stop.position_in))?;
    }
    if paragraph.spacing_after_pt > 0 {
        write!(sink, "\\sa{}", paragraph.spacing_after_pt * 20)?;
    }
    if (paragraph.line_spacing - 1.0).abs() > f32::EPSILON {
        write!(
            sink,
            "\\sl{}\\slmult1",
            (240.0 * paragraph.line_spacing).round() as i32
        )?;
    }
    for run in &paragraph.runs {
        write_run(sink, run, fonts)?;
    }
    write!(sink, "\\par")?;
    Ok(())
}

fn write_run<W: Write>(sink: &mut W, run: &Run, fonts: &FontTable) -> SerializeResult<()> {
    write!(
        sink,
        "{{\\f{}\\fs{}",
        fonts.index_of(&run.font_family),
        run.size_pt * 2
    )?;
    if run.bold {
        write!(sink, "\\b")?;
    }
    if run.italic {
        write!(sink, "\\i")?;
    }
    if run.underline {
        write!(sink, "\\ul")?;
    }
    write!(sink, " ")?;
    write_escaped(sink, &run.text)?;
    write!(sink, "}}")?;
    Ok(())
}

fn alignment_control(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "\\ql",
        Alignment::Center => "\\qc",
        Alignment::Justify => "\\qj",
    }
}

/// 1 inch = 1440 twips.
fn twips_from_inches(inches: f32) -> i32 {
    (inches * 1440.0).round() as i32
}

/// Escapes text for an RTF group body.
///
/// `\`, `{`, `}` are escaped, tabs become `\tab`, and non-ASCII characters
/// are emitted as signed 16-bit `\uN?` units (surrogate pairs for characters
/// beyond the BMP), keeping the artifact pure ASCII.
fn write_escaped<W: Write>(sink: &mut W, text: &str) -> io::Result<()> {
    for ch in text.chars() {
        match ch {
            '\\' => write!(sink, "\\\\")?,
            '{' => write!(sink, "\\{{")?,
            '}' => write!(sink, "\\}}")?,
            '\t' => write!(sink, "\\tab ")?,
            '\n' => write!(sink, "\\line ")?,
            _ if ch.is_ascii() => write!(sink, "{ch}")?,
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(sink, "\\u{}?", *unit as i16)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{to_rtf_bytes, write_rtf};
    use crate::document::{Alignment, Document, PageMargins, ParagraphStyle, TabStop};
    use std::io::{self, Write};

    fn sample_document() -> Document {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        let style = ParagraphStyle {
            bold: true,
            alignment: Alignment::Center,
            size_pt: 12,
            ..ParagraphStyle::default()
        };
        doc.append_paragraph("EXAMPLE PROJECT", &style);
        doc.append_blank_line();
        doc
    }

    #[test]
    fn output_is_ascii_and_deterministic() {
        let doc = sample_document();
        let first = to_rtf_bytes(&doc).unwrap();
        let second = to_rtf_bytes(&doc).unwrap();
        assert_eq!(first, second);
        assert!(first.is_ascii());
    }

    #[test]
    fn margins_are_emitted_in_twips() {
        let bytes = to_rtf_bytes(&sample_document()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\\margl1440\\margr1440\\margt1440\\margb1440"));
    }

    #[test]
    fn centered_bold_run_uses_expected_controls() {
        let bytes = to_rtf_bytes(&sample_document()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\\pard\\qc{\\f0\\fs24\\b EXAMPLE PROJECT}\\par"));
    }

    #[test]
    fn tab_stop_position_is_converted() {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        let style = ParagraphStyle {
            tab_stops: vec![TabStop::left(2.5)],
            ..ParagraphStyle::default()
        };
        doc.append_paragraph("Project Number:\t100000001", &style);

        let text = String::from_utf8(to_rtf_bytes(&doc).unwrap()).unwrap();
        assert!(text.contains("\\tx3600"));
        assert!(text.contains("Project Number:\\tab 100000001"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut doc = Document::new(PageMargins::uniform_one_inch());
        doc.append_paragraph("brace { back \\ dash \u{2013}", &ParagraphStyle::default());

        let text = String::from_utf8(to_rtf_bytes(&doc).unwrap()).unwrap();
        assert!(text.contains("brace \\{ back \\\\ dash \\u8211?"));
    }

    #[test]
    fn sink_failure_surfaces_as_serialize_error() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_rtf(&sample_document(), &mut FailingSink).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
