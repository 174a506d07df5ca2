//! Command implementations for the pcec CLI.
//!
//! Each subcommand lives in its own module with an `execute` entry point
//! (`server` groups its actions as separate functions). Commands own all
//! I/O: they read files, talk to the controller, and print; the core
//! modules they drive never do.

pub mod completions;
pub mod console;
pub mod fetch;
pub mod logs;
pub mod request;
pub mod server;
pub mod show;
