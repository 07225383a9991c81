//! Domain models for the Wastewater Operations Platform

mod prediction;
mod source;
mod weather;

pub use prediction::*;
pub use source::*;
pub use weather::*;
