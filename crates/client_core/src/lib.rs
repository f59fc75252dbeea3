//! Request lifecycle controllers for the news search client.
//!
//! [`SearchController`] and [`RebuildController`] each own an independent
//! [`RequestLifecycle`]; [`presenter`] turns their state into a view model.

pub mod backend;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod presenter;
pub mod rebuild;
pub mod search;

pub use backend::{HttpBackend, RebuildBackend, SearchBackend};
pub use config::{load_settings, load_settings_from, Settings};
pub use error::ClientError;
pub use lifecycle::{LifecyclePhase, LifecycleState, RequestLifecycle, Ticket};
pub use presenter::{present, present_phases, View};
pub use rebuild::RebuildController;
pub use search::SearchController;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
