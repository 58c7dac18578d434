//! Order request domain model.
//!
//! # Responsibility
//! - Define the project/client/task-selection record consumed by assembly.
//! - Provide the fail-fast validation gate for mandatory fields.
//!
//! # Invariants
//! - `ClientInfo::master_agreement_date` is opaque display text, never parsed.
//! - Task iteration order is ascending by task code (`BTreeMap` key order).
//! - A `SelectedTask` fee of `Some(0)` is an explicit override, not "unset".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Project identification and narrative fields for one order.
///
/// All fields are plain display strings. `name_line2` is an optional second
/// line of the project name; when absent the identification block emits one
/// fewer paragraph and no extra spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Main document title, upper-cased when rendered.
    pub title: String,
    /// Individual Project Order number (display text, e.g. "01").
    pub ipo_number: String,
    /// Project name shown in the identification block.
    pub name: String,
    /// Optional second project-name line, tab-aligned under the first.
    #[serde(default)]
    pub name_line2: Option<String>,
    /// Consultant-side project manager (name and credentials).
    pub project_manager: String,
    /// Internal project number (display text).
    pub project_number: String,
    /// Overall project narrative; section is omitted when empty/absent.
    #[serde(default)]
    pub overall_understanding: Option<String>,
    /// Lot-specific narrative; section is omitted when empty/absent.
    #[serde(default)]
    pub lot_understanding: Option<String>,
}

/// Client identity for the opening clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    /// Date of the master agreement, kept as opaque display text.
    pub master_agreement_date: String,
}

/// One selected billable task.
///
/// `fee` is the user-entered amount in whole dollars. `None` means the
/// catalog default applies; `Some(0)` is honored as a genuine zero-fee
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedTask {
    #[serde(default)]
    pub fee: Option<u64>,
}

/// Fully populated input record for one document generation.
///
/// The boundary layer owns field collection and fee defaulting; this type
/// only guards against being invoked with a structurally invalid record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub project: ProjectInfo,
    pub client: ClientInfo,
    /// Selected tasks keyed by catalog task code. `BTreeMap` keeps rendering
    /// order ascending by code regardless of selection order.
    pub tasks: BTreeMap<String, SelectedTask>,
}

/// Validation error for structurally invalid order requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    /// A mandatory field is empty or whitespace-only.
    EmptyField(&'static str),
    /// No task was selected.
    NoTasksSelected,
}

impl Display for OrderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "mandatory field `{field}` is empty"),
            Self::NoTasksSelected => write!(f, "at least one task must be selected"),
        }
    }
}

impl Error for OrderValidationError {}

impl OrderRequest {
    /// Fail-fast structural validation.
    ///
    /// The selection surface is expected to reject incomplete input before
    /// the core is invoked; this gate exists so an invalid record fails
    /// loudly instead of producing a malformed document.
    ///
    /// # Contract
    /// - Every mandatory field must contain non-whitespace text.
    /// - At least one task must be selected.
    /// - Optional fields (`name_line2`, the two understanding narratives)
    ///   are not checked here.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        let mandatory: [(&'static str, &str); 7] = [
            ("project.title", &self.project.title),
            ("project.ipo_number", &self.project.ipo_number),
            ("project.name", &self.project.name),
            ("project.project_manager", &self.project.project_manager),
            ("project.project_number", &self.project.project_number),
            ("client.name", &self.client.name),
            (
                "client.master_agreement_date",
                &self.client.master_agreement_date,
            ),
        ];
        for (field, value) in mandatory {
            if value.trim().is_empty() {
                return Err(OrderValidationError::EmptyField(field));
            }
        }
        if self.tasks.is_empty() {
            return Err(OrderValidationError::NoTasksSelected);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientInfo, OrderRequest, OrderValidationError, ProjectInfo, SelectedTask};
    use std::collections::BTreeMap;

    fn sample_request() -> OrderRequest {
        let mut tasks = BTreeMap::new();
        tasks.insert("110".to_string(), SelectedTask { fee: Some(40_000) });
        OrderRequest {
            project: ProjectInfo {
                title: "Example Project".to_string(),
                ipo_number: "01".to_string(),
                name: "Example Project".to_string(),
                name_line2: None,
                project_manager: "J. Doe, PE".to_string(),
                project_number: "100000001".to_string(),
                overall_understanding: Some("Overall text.".to_string()),
                lot_understanding: Some("Lot text.".to_string()),
            },
            client: ClientInfo {
                name: "ACE Fletcher LLC".to_string(),
                master_agreement_date: "August 15, 2024".to_string(),
            },
            tasks,
        }
    }

    #[test]
    fn validate_accepts_complete_request() {
        assert_eq!(sample_request().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_mandatory_field() {
        let mut request = sample_request();
        request.project.ipo_number = "   ".to_string();
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::EmptyField("project.ipo_number"))
        );
    }

    #[test]
    fn validate_rejects_empty_selection() {
        let mut request = sample_request();
        request.tasks.clear();
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::NoTasksSelected)
        );
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = sample_request();
        let json = serde_json::to_string(&request).unwrap();
        let decoded: OrderRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn selected_task_fee_defaults_to_none_in_json() {
        let decoded: SelectedTask = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded.fee, None);
    }
}
