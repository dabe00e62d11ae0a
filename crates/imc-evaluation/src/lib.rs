//! Core library of the IMC organizational-health evaluation platform:
//! the theme catalog and questionnaire engine, the session service and
//! its HTTP router, the back-office directory model, and the shared
//! configuration and telemetry plumbing.

pub mod assessment;
pub mod config;
pub mod directory;
pub mod error;
pub mod telemetry;

pub use error::AppError;
