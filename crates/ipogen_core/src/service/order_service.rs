//! Order generation use-case service.
//!
//! # Responsibility
//! - Orchestrate assemble -> serialize -> name for one order request.
//! - Emit metadata-only diagnostic events; never log document text.
//!
//! # Invariants
//! - A failed generation yields no artifact bytes at all.
//! - Output is deterministic for identical requests.

use crate::assemble::{assemble, AssembleError};
use crate::catalog::TaskCatalog;
use crate::document::rtf::{to_rtf_bytes, SerializeError};
use crate::model::order::OrderRequest;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File extension of the serialized artifact.
const ARTIFACT_EXTENSION: &str = "rtf";

/// Maximum project-name characters carried into the artifact file name.
const FILE_NAME_PROJECT_CHARS: usize = 30;

/// Result type for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error raised by [`OrderService::generate`].
#[derive(Debug)]
pub enum GenerateError {
    Assemble(AssembleError),
    Serialize(SerializeError),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assemble(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Assemble(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<AssembleError> for GenerateError {
    fn from(value: AssembleError) -> Self {
        Self::Assemble(value)
    }
}

impl From<SerializeError> for GenerateError {
    fn from(value: SerializeError) -> Self {
        Self::Serialize(value)
    }
}

/// A finished artifact: suggested file name plus serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Use-case service wrapping catalog, assembly and serialization.
pub struct OrderService {
    catalog: TaskCatalog,
}

impl OrderService {
    /// Creates a service over an explicit catalog value.
    pub fn new(catalog: TaskCatalog) -> Self {
        Self { catalog }
    }

    /// Creates a service over the standard catalog.
    pub fn standard() -> Self {
        Self::new(TaskCatalog::standard())
    }

    /// Catalog this service generates against.
    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Generates the serialized artifact for one validated order request.
    ///
    /// # Contract
    /// - On success, `GeneratedDocument.bytes` is the complete artifact and
    ///   `file_name` follows `IPO_{ipo}_{name}.rtf` with the name truncated
    ///   to 30 characters and spaces replaced by underscores.
    /// - On error no artifact escapes; the partially built document is
    ///   dropped.
    ///
    /// # Errors
    /// - `GenerateError::Assemble` for validation or catalog faults.
    /// - `GenerateError::Serialize` when encoding fails.
    pub fn generate(&self, request: &OrderRequest) -> GenerateResult<GeneratedDocument> {
        let document = assemble(&self.catalog, request).map_err(|err| {
            warn!(
                "event=assembly_failed module=service ipo={} error={err}",
                request.project.ipo_number
            );
            err
        })?;
        let bytes = to_rtf_bytes(&document)?;
        let file_name =
            download_file_name(&request.project.ipo_number, &request.project.name);
        info!(
            "event=document_generated module=service ipo={} tasks={} blocks={} bytes={}",
            request.project.ipo_number,
            request.tasks.len(),
            document.blocks().len(),
            bytes.len()
        );
        Ok(GeneratedDocument { file_name, bytes })
    }
}

/// Builds the suggested download file name for an artifact.
///
/// Pattern: `IPO_{ipo}_{first 30 chars of project name, spaces ->
/// underscores}.rtf`. Truncation counts characters, not bytes.
pub fn download_file_name(ipo_number: &str, project_name: &str) -> String {
    let mangled: String = project_name
        .chars()
        .take(FILE_NAME_PROJECT_CHARS)
        .map(|ch| if ch == ' ' { '_' } else { ch })
        .collect();
    format!("IPO_{ipo_number}_{mangled}.{ARTIFACT_EXTENSION}")
}
