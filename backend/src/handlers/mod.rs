//! HTTP handlers for the Wastewater Operations Platform

pub mod health;
pub mod incident;
pub mod prediction;
pub mod source;
pub mod weather;

pub use health::*;
pub use incident::*;
pub use prediction::*;
pub use source::*;
pub use weather::*;
