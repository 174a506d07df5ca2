pub mod client;
pub mod commands;
pub mod config;
pub mod path;
pub mod render;
pub mod session;
pub mod topology;
pub mod validation;

/// ASCII art logo for the pcec CLI
pub const LOGO: &str = "\
┌─┐┌─┐┌─┐┌─┐
├─┘│  ├┤ │
╵  └─┘└─┘└─┘";
