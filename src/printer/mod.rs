//! # Printer Module
//!
//! Brother QL hardware tables.
//!
//! ## Modules
//!
//! - [`models`]: Printer models and their protocol capabilities
//! - [`labels`]: Label stock geometry

pub mod labels;
pub mod models;

pub use labels::{FormFactor, Label, LABELS};
pub use models::{Model, MODELS};
