//! Services Layer
//!
//! The facades between HTTP handlers and repositories: validation,
//! reference resolution and mapping to view-facing shapes.

pub mod catalog_service;
pub mod hunter_service;
pub mod visit_service;

pub use visit_service::{VisitError, VisitForm};
