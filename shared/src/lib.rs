//! Shared types and models for the Provincial Agriculture Management Platform
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system, including the pure report aggregation
//! core used to build printable municipal statistics.

pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
