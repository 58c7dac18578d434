//! Use-case services exposed to boundary adapters.
//!
//! # Responsibility
//! - Provide the one-call generation entry point over assembly and
//!   serialization.
//!
//! # Invariants
//! - Services never bypass assembly validation or catalog contracts.
//! - Services hold no mutable state across calls.

pub mod order_service;
