//! Shared types and models for the Wastewater Operations Platform
//!
//! This crate contains the pure domain layer shared between the backend,
//! the map frontend (via WASM), and other components of the system: map
//! coordinate types, emission source and weather models, validation
//! helpers, and the odour dispersion prediction engine.

pub mod dispersion;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
