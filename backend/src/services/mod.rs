//! Business logic services for the Wastewater Operations Platform

pub mod incident;
pub mod prediction;
pub mod source;
pub mod weather;

pub use incident::OdourIncidentService;
pub use prediction::PredictionService;
pub use source::EmissionSourceService;
pub use weather::WeatherObservationService;
