//! Error handling for the dice engine.

pub mod domain;

pub use domain::{DomainError, IllegalActionKind};
