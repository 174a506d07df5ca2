//! `pcec console` - interactive terminal UI.

mod app;

pub use app::execute;
