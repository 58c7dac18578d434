//! Section builders and document assembly.
//!
//! # Responsibility
//! - Map a validated order request onto the fixed sequence of styled blocks
//!   that make up an Individual Project Order document.
//! - Keep the sub-heading classification heuristic behind one named function.
//!
//! # Invariants
//! - Builders run in a fixed order; output depends only on the input record
//!   and the catalog.
//! - Tasks render in ascending code order regardless of selection order.
//! - An unknown task code aborts assembly wholesale; no partial document
//!   survives.

use crate::catalog::{CatalogError, TaskCatalog};
use crate::document::{
    Alignment, Document, PageMargins, Paragraph, ParagraphStyle, Run, TabStop,
};
use crate::model::order::{OrderRequest, OrderValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Horizontal offset of the value column in the identification block.
const LABEL_TAB_STOP_IN: f32 = 2.5;

/// Fragments shorter than this may classify as sub-headings.
const SUB_HEADING_MAX_LEN: usize = 100;

/// Caption keywords matched case-insensitively inside a fragment.
const SUB_HEADING_KEYWORDS: &[&str] = &[
    "cover sheet",
    "utility plan",
    "site layout",
    "site plan",
    "grading plan",
    "drainage plan",
    "paving",
    "erosion control",
    "detail",
    "existing conditions",
    "demolition",
];

/// Fixed caption rendered in the page footer region.
const FOOTER_CAPTION: &str = "rev 07/2024";

/// Result type for assembly.
pub type AssembleResult<T> = Result<T, AssembleError>;

/// Error raised while assembling a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// The input record failed the fail-fast structural check.
    Invalid(OrderValidationError),
    /// A selected task code has no catalog entry (configuration fault).
    Catalog(CatalogError),
}

impl Display for AssembleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "invalid order request: {err}"),
            Self::Catalog(err) => write!(f, "catalog configuration fault: {err}"),
        }
    }
}

impl Error for AssembleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<OrderValidationError> for AssembleError {
    fn from(value: OrderValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<CatalogError> for AssembleError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Render-time classification of one description fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Short caption rendered in italics, with no trailing blank line.
    SubHeading,
    /// Normal justified paragraph followed by a blank line.
    Body,
}

/// Classifies a description fragment as sub-heading or body text.
///
/// A fragment is a sub-heading only if all three hold: it is shorter than
/// 100 characters, it contains a caption keyword (case-insensitive
/// substring), and it does not end with a sentence-terminating period.
///
/// The rule is an accidental property of the legacy data table, kept exactly
/// for output compatibility and isolated here so a future per-fragment tag
/// can replace it without touching the builders.
pub fn classify_fragment(fragment: &str) -> FragmentKind {
    let lowered = fragment.to_lowercase();
    // The threshold counts characters, not bytes; fragments may carry
    // typographic dashes.
    let is_sub_heading = fragment.chars().count() < SUB_HEADING_MAX_LEN
        && SUB_HEADING_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        && !fragment.ends_with('.');
    if is_sub_heading {
        FragmentKind::SubHeading
    } else {
        FragmentKind::Body
    }
}

fn heading_style() -> ParagraphStyle {
    ParagraphStyle {
        bold: true,
        underline: true,
        ..ParagraphStyle::default()
    }
}

fn body_style() -> ParagraphStyle {
    ParagraphStyle {
        alignment: Alignment::Justify,
        ..ParagraphStyle::default()
    }
}

fn label_style() -> ParagraphStyle {
    ParagraphStyle {
        bold: true,
        tab_stops: vec![TabStop::left(LABEL_TAB_STOP_IN)],
        ..ParagraphStyle::default()
    }
}

/// Title block: upper-cased project title and the IPO number line, both
/// centered bold, followed by two structural blank lines.
fn build_title_block(doc: &mut Document, title: &str, ipo_number: &str) {
    let title_style = ParagraphStyle {
        size_pt: 12,
        bold: true,
        alignment: Alignment::Center,
        ..ParagraphStyle::default()
    };
    doc.append_paragraph(title.to_uppercase(), &title_style);

    let subtitle_style = ParagraphStyle {
        size_pt: 10,
        ..title_style
    };
    doc.append_paragraph(
        format!("INDIVIDUAL PROJECT ORDER NUMBER {ipo_number}"),
        &subtitle_style,
    );

    doc.append_blank_line();
    doc.append_blank_line();
}

/// Opening clause referencing the master agreement.
fn build_opening_clause(doc: &mut Document, client_name: &str, master_agreement_date: &str) {
    doc.append_paragraph(
        format!(
            "Describing a specific agreement between Kimley-Horn and Associates, Inc. \
             (the Consultant), and {client_name} (the Client) in accordance with the terms of the \
             Master Agreement for Continuing Professional Services dated {master_agreement_date}, \
             which is incorporated herein by reference."
        ),
        &body_style(),
    );
    doc.append_blank_line();
}

/// Identification block: heading plus tab-aligned label/value lines.
///
/// The optional second name line carries a tab-only prefix instead of a
/// repeated label; when absent, nothing is emitted in its place.
fn build_project_identification(
    doc: &mut Document,
    name: &str,
    name_line2: Option<&str>,
    project_manager: &str,
    project_number: &str,
) {
    doc.append_paragraph("Identification of Project:", &heading_style());
    doc.append_blank_line();

    let style = label_style();
    doc.append_runs(
        vec![
            Run::styled("Project Name:\t", &style),
            Run::styled(name, &style),
        ],
        &style,
    );
    if let Some(second_line) = name_line2 {
        doc.append_runs(
            vec![Run::styled(format!("\t{second_line}"), &style)],
            &style,
        );
    }
    doc.append_runs(
        vec![
            Run::styled("KH Project Manager:\t", &style),
            Run::styled(project_manager, &style),
        ],
        &style,
    );
    doc.append_runs(
        vec![
            Run::styled("Project Number:\t", &style),
            Run::styled(project_number, &style),
        ],
        &style,
    );
    doc.append_blank_line();
}

/// Labeled free-text section: heading, blank line, then one justified
/// paragraph per text block with a blank line after each.
fn build_labeled_section(doc: &mut Document, heading: &str, paragraphs: &[&str]) {
    doc.append_paragraph(heading, &heading_style());
    doc.append_blank_line();
    for text in paragraphs {
        doc.append_paragraph(*text, &body_style());
        doc.append_blank_line();
    }
}

/// Scope-of-services section: per-task headings and classified fragments.
fn build_scope_of_services(
    doc: &mut Document,
    catalog: &TaskCatalog,
    request: &OrderRequest,
) -> AssembleResult<()> {
    doc.append_paragraph("Specific scope of basic Services:", &heading_style());
    doc.append_blank_line();

    // BTreeMap key order gives ascending task codes.
    for code in request.tasks.keys() {
        let definition = catalog.lookup_task(code)?;
        let fragments = catalog.lookup_description(code)?;

        let display_name = definition
            .name
            .strip_prefix("Civil ")
            .unwrap_or(definition.name);
        let task_heading_style = ParagraphStyle {
            alignment: Alignment::Justify,
            ..heading_style()
        };
        doc.append_paragraph(
            format!("Task {code} \u{2013} {display_name}"),
            &task_heading_style,
        );
        doc.append_blank_line();

        for fragment in fragments {
            match classify_fragment(fragment) {
                FragmentKind::SubHeading => {
                    let style = ParagraphStyle {
                        italic: true,
                        ..body_style()
                    };
                    doc.append_paragraph(*fragment, &style);
                }
                FragmentKind::Body => {
                    doc.append_paragraph(*fragment, &body_style());
                    doc.append_blank_line();
                }
            }
        }
    }
    Ok(())
}

/// Fixed 9pt caption placed in the page footer region, not the body flow.
fn build_footer(doc: &mut Document) {
    let style = ParagraphStyle {
        size_pt: 9,
        ..ParagraphStyle::default()
    };
    let runs = vec![Run::styled(FOOTER_CAPTION, &style)];
    doc.set_footer(Paragraph::from_runs(runs, &style));
}

/// Assembles the complete document for one validated order request.
///
/// # Contract
/// - Page margins are 1 inch on all four sides.
/// - Sections run in fixed order: title, opening clause, identification,
///   overall understanding (when non-empty), lot understanding (when
///   non-empty), scope of services, footer.
/// - On any error the partially built document is dropped; callers never see
///   a partial artifact.
///
/// # Errors
/// - `AssembleError::Invalid` when the record fails fail-fast validation.
/// - `AssembleError::Catalog` when a selected task code has no catalog entry.
pub fn assemble(catalog: &TaskCatalog, request: &OrderRequest) -> AssembleResult<Document> {
    request.validate()?;

    let mut doc = Document::new(PageMargins::uniform_one_inch());

    build_title_block(&mut doc, &request.project.title, &request.project.ipo_number);
    build_opening_clause(&mut doc, &request.client.name, &request.client.master_agreement_date);
    build_project_identification(
        &mut doc,
        &request.project.name,
        request.project.name_line2.as_deref(),
        &request.project.project_manager,
        &request.project.project_number,
    );

    if let Some(text) = non_empty(request.project.overall_understanding.as_deref()) {
        build_labeled_section(&mut doc, "Overall Project Understanding:", &[text]);
    }
    if let Some(text) = non_empty(request.project.lot_understanding.as_deref()) {
        build_labeled_section(&mut doc, "Lot Specific Project Understanding:", &[text]);
    }

    build_scope_of_services(&mut doc, catalog, request)?;
    build_footer(&mut doc);

    Ok(doc)
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|value| !value.trim().is_empty())
}
