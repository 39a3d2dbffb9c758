//! Engine test support utilities
//!
//! Scripted and misbehaving decision providers for integration tests, plus
//! the shared logging initialization.

pub mod logging;
pub mod providers;

pub use providers::{BlockingProvider, CallLog, FailingProvider, ScriptedProvider, SlowProvider};
