//! Core document-assembly logic for the IPO generator.
//! This crate is the single source of truth for document structure and styling.

pub mod assemble;
pub mod catalog;
pub mod document;
pub mod logging;
pub mod model;
pub mod service;

pub use assemble::{assemble, classify_fragment, AssembleError, FragmentKind};
pub use catalog::{CatalogError, TaskCatalog, TaskDefinition};
pub use document::rtf::{to_rtf_bytes, write_rtf, SerializeError};
pub use document::{Alignment, Block, Document, PageMargins, Paragraph, Run, TabStop};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::order::{
    ClientInfo, OrderRequest, OrderValidationError, ProjectInfo, SelectedTask,
};
pub use service::order_service::{GenerateError, GeneratedDocument, OrderService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
