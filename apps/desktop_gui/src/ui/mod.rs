//! UI layer for the desktop search window: app shell and theme.

pub mod app;
pub mod theme;

pub use app::NewsSearchApp;
