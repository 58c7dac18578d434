//! Static task catalog.
//!
//! # Responsibility
//! - Hold the fixed table of billable task definitions and their scope
//!   description fragments.
//! - Resolve the default fee for a selection that left the fee blank.
//!
//! # Invariants
//! - The catalog is an immutable value built once and passed explicitly;
//!   there is no ambient/global catalog state.
//! - Lookup failure means the selection surface and the catalog disagree,
//!   which is a configuration fault, not user error.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Configuration-consistency error for catalog access.
///
/// The selection surface only ever offers catalog-resident codes, so an
/// unknown code here is fatal: assembly must abort, no artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownTask(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTask(code) => {
                write!(f, "task code `{code}` has no catalog entry")
            }
        }
    }
}

impl Error for CatalogError {}

/// One billable scope-of-work category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    /// Stable short identifier, e.g. "110".
    pub code: &'static str,
    /// Display name as offered on the selection surface.
    pub name: &'static str,
    /// Default fee in whole dollars, applied when the user leaves the fee blank.
    pub default_fee: u64,
    /// Billing arrangement label, e.g. "Hourly, Not-to-Exceed".
    pub fee_type: &'static str,
}

/// Read-only lookup tables for task definitions and descriptions.
///
/// Built once at startup from the fixed literal table below and passed
/// explicitly into assembly. The table is open to extension; callers must
/// not assume a particular entry count.
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    definitions: BTreeMap<&'static str, TaskDefinition>,
    descriptions: BTreeMap<&'static str, &'static [&'static str]>,
}

impl TaskCatalog {
    /// Builds the standard catalog instance.
    pub fn standard() -> Self {
        let mut definitions = BTreeMap::new();
        for definition in STANDARD_TASKS {
            definitions.insert(definition.code, definition.clone());
        }
        let mut descriptions = BTreeMap::new();
        for (code, fragments) in STANDARD_DESCRIPTIONS {
            descriptions.insert(*code, *fragments);
        }
        Self {
            definitions,
            descriptions,
        }
    }

    /// Looks up one task definition by code.
    ///
    /// # Errors
    /// - `CatalogError::UnknownTask` when the code has no entry.
    pub fn lookup_task(&self, code: &str) -> CatalogResult<&TaskDefinition> {
        self.definitions
            .get(code)
            .ok_or_else(|| CatalogError::UnknownTask(code.to_string()))
    }

    /// Looks up the ordered description fragments for a task code.
    ///
    /// Fragments are classified at render time, not here; the catalog stores
    /// plain text only.
    ///
    /// # Errors
    /// - `CatalogError::UnknownTask` when the code has no entry.
    pub fn lookup_description(&self, code: &str) -> CatalogResult<&'static [&'static str]> {
        self.descriptions
            .get(code)
            .copied()
            .ok_or_else(|| CatalogError::UnknownTask(code.to_string()))
    }

    /// Resolves the final fee for a selection.
    ///
    /// # Contract
    /// - `None` -> the catalog default for `code`.
    /// - `Some(v)` -> `v`, including an explicit `Some(0)`.
    ///
    /// This rule belongs to the boundary layer (the core never reads fees
    /// during assembly); it lives here so boundary and tests share one
    /// implementation.
    pub fn resolve_fee(&self, code: &str, entered: Option<u64>) -> CatalogResult<u64> {
        let definition = self.lookup_task(code)?;
        Ok(entered.unwrap_or(definition.default_fee))
    }

    /// Iterates all task definitions in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.definitions.values()
    }
}

const STANDARD_TASKS: &[TaskDefinition] = &[
    TaskDefinition {
        code: "110",
        name: "Civil Engineering Design",
        default_fee: 40_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
    TaskDefinition {
        code: "120",
        name: "Civil Schematic Design",
        default_fee: 35_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
    TaskDefinition {
        code: "130",
        name: "Civil Design Development",
        default_fee: 45_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
    TaskDefinition {
        code: "140",
        name: "Civil Construction Documents",
        default_fee: 50_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
    TaskDefinition {
        code: "150",
        name: "Civil Permitting",
        default_fee: 40_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
    TaskDefinition {
        code: "210",
        name: "Meetings and Coordination",
        default_fee: 20_000,
        fee_type: "Hourly, Not-to-Exceed",
    },
];

const STANDARD_DESCRIPTIONS: &[(&str, &[&str])] = &[
    (
        "110",
        &[
            "Kimley-Horn will prepare an onsite drainage report with supporting calculations showing the proposed development plan is consistent with the Southwest Florida Water Management District Basis of Review. This design will account for the stormwater design to support the development of the project site. The drainage report will include limited stormwater modeling to demonstrate that the Lot A site development will maintain the existing discharge rate and provide the required stormwater attenuation.",
            "The onsite drainage report will include calculations for 25-year 24-hour and 100-year 24-hour design storm conditions in accordance with Southwest Florida Water Management District Guidelines. A base stormwater design will be provided for the project site showing reasonable locations for stormwater conveyance features and stormwater management pond sizing.",
        ],
    ),
    (
        "120",
        &[
            "Kimley-Horn will prepare Civil Schematic Design deliverables in accordance with the Client's Design Project Deliverables Checklist. For the Civil Schematic Design task, the deliverables that Kimley-Horn will provide consist of Civil Site Plan, Establish Finish Floor Elevations, Utility Will Serve Letters and Points of Service, Utility Routing and Easement Requirements.",
        ],
    ),
    (
        "130",
        &[
            "Upon Client approval of the Schematic Design task, Kimley-Horn will prepare Design Development Plans of the civil design in accordance with the Client's Design Project Deliverables Checklist for Civil Design Development Deliverables. These documents will be approximately 50% complete and will include detail for City code review and preliminary pricing but will not include enough detail for construction bidding.",
        ],
    ),
    (
        "140",
        &[
            "Based on the approved Development Plan, Kimley-Horn will provide engineering and design services for the preparation of site construction plans for on-site improvements.",
            "Cover Sheet",
            "The cover sheet includes plan contents, vicinity map, legal description and team identification.",
            "Existing Conditions Plan/Demolition Plan",
            "This sheet will include and identify the required demolition of the existing items on the project site.",
            "Site Layout Plan",
            "This sheet will include building setback lines, property lines, outline of building footprint, parking areas, handicap access ramps, sidewalks, crosswalks, driveways, and traffic lanes.",
            "Grading and Drainage Plan",
            "This sheet will include existing and proposed spot elevations and contours, building finish floor elevations, parking area drainage patterns, and stormwater inlet and pipe locations and sizes.",
            "Utility Plan",
            "This sheet will show the location and size of all water, sanitary sewer and reclaimed water facilities required to serve the development.",
            "Erosion and Sediment Control Plan",
            "This sheet will include erosion and sediment control measures designed to be implemented during construction.",
            "Details",
            "Standard and modified typical construction details will be provided.",
        ],
    ),
    (
        "150",
        &[
            "Prepare and submit on the Client's behalf the following permitting packages for review/approval of construction documents, and attend meetings required to obtain the following Agency approvals:",
            "USF Site Development Permit",
            "Southwest Florida Water Management District Environmental Resource Permit \u{2013} Minor Modification",
            "City of Tampa Water Department Commitment / Construction Plan Approval",
            "Hillsborough County Environmental Protection Commission",
            "Kimley-Horn will coordinate with the City of Tampa Development Review and coordination with the Florida Department of Transportation and the Hillsborough County departments as needed to obtain the necessary regulatory and utility approval of the site plans and associated drainage facilities. We will assist the Client with meetings necessary to gain site plan approval.",
            "This scope does not anticipate a Geotechnical or Environmental Assessment Report, Survey, Topographic Survey, or Arborist Report be required for this permit application.",
            "It is assumed Client will provide the needed information regarding the development program and requirements. Kimley-Horn will work with the Owner and their team to integrate the necessary design requirements into the Civil design to support entitlement, platting, and development approvals.",
            "These permit applications will be submitted using the electronic permitting submittal system (web-based system) for the respective jurisdictions where applicable.",
        ],
    ),
    (
        "210",
        &[
            "Kimley-Horn will be available to provide miscellaneous project support at the direction of the Client. This task may include design meetings, additional permit support, permit research, or other miscellaneous tasks associated with the initial and future development of the project site. This task will also cover tasks such as design coordination meetings, scheduling, coordination with other client consultants, responses to additional rounds of agency comments.",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::{CatalogError, TaskCatalog};

    #[test]
    fn standard_catalog_has_descriptions_for_every_task() {
        let catalog = TaskCatalog::standard();
        for definition in catalog.iter() {
            let fragments = catalog.lookup_description(definition.code).unwrap();
            assert!(
                !fragments.is_empty(),
                "task {} has no description fragments",
                definition.code
            );
        }
    }

    #[test]
    fn lookup_unknown_code_is_a_configuration_error() {
        let catalog = TaskCatalog::standard();
        assert_eq!(
            catalog.lookup_task("999").unwrap_err(),
            CatalogError::UnknownTask("999".to_string())
        );
        assert_eq!(
            catalog.lookup_description("999").unwrap_err(),
            CatalogError::UnknownTask("999".to_string())
        );
    }

    #[test]
    fn resolve_fee_substitutes_default_only_when_absent() {
        let catalog = TaskCatalog::standard();
        assert_eq!(catalog.resolve_fee("210", None).unwrap(), 20_000);
        assert_eq!(catalog.resolve_fee("210", Some(25_500)).unwrap(), 25_500);
        // An explicit zero is a real override, not "unset".
        assert_eq!(catalog.resolve_fee("210", Some(0)).unwrap(), 0);
    }

    #[test]
    fn iteration_is_ascending_by_code() {
        let catalog = TaskCatalog::standard();
        let codes: Vec<&str> = catalog.iter().map(|d| d.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
