//! Core business logic for farmtrack.

pub mod services;

pub use services::*;
