//! Backend worker hosting the async runtime that controller requests run on.

pub mod runtime;

pub use runtime::BackendRuntime;
