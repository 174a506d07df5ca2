//! Server control commands.
//!
//! Commands:
//! - `pcec server status` - Report whether the PCE server is running
//! - `pcec server start <TOPOLOGY>` - Start it on a named topology
//! - `pcec server stop` - Stop it

use anyhow::{bail, Result};
use colored::Colorize;

use crate::client::client_for;

pub fn status(url: Option<String>) -> Result<()> {
    let client = client_for(url)?;
    let status = client.server_status()?;

    if status.running {
        println!(
            "{} PCE server at {} is running",
            "✓".green(),
            client.base_url().cyan()
        );
    } else {
        println!(
            "{} PCE server at {} is stopped",
            "○".yellow(),
            client.base_url().cyan()
        );
    }
    Ok(())
}

/// Starts the server on the named topology file (without its extension).
pub fn start(topology: &str, url: Option<String>) -> Result<()> {
    if topology.trim().is_empty() {
        bail!("Topology name cannot be empty");
    }

    let client = client_for(url)?;
    let status = client.start_server(topology)?;
    if !status.running {
        bail!("PCE server did not start on topology '{topology}'");
    }

    println!(
        "{} PCE server started on topology '{}'",
        "✓".green(),
        topology.cyan()
    );
    Ok(())
}

pub fn stop(url: Option<String>) -> Result<()> {
    let client = client_for(url)?;
    let status = client.stop_server()?;
    if status.running {
        bail!("PCE server is still running after stop request");
    }

    println!("{} PCE server stopped", "✓".green());
    Ok(())
}
