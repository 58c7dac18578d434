//! Input data model for order generation.
//!
//! # Responsibility
//! - Define the validated record handed to the assembler by the boundary layer.
//! - Keep field semantics identical to the selection surface contract.
//!
//! # Invariants
//! - Mandatory fields are non-empty once `OrderRequest::validate` passes.
//! - Task selection is keyed by catalog task code; codes are never invented here.

pub mod order;
