//! `pcec request` - request a path and render it highlighted.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::{client_for, PceClient};
use crate::render::printer::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::render::GridRenderer;
use crate::session::Session;

pub fn execute(source: &str, target: &str, url: Option<String>) -> Result<()> {
    let client = client_for(url)?;
    client.connect().context("Failed to connect to the PCE")?;

    let result = request_and_render(&client, source, target);

    // The controller tracks a single client slot; always give it back.
    if let Err(err) = client.disconnect() {
        eprintln!("{} Failed to disconnect: {err:#}", "⚠".yellow());
    }
    result
}

fn request_and_render(client: &PceClient, source: &str, target: &str) -> Result<()> {
    let (nodes, links) = client.fetch_topology()?;

    let mut session = Session::new(GridRenderer::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT));
    session.load(&nodes, &links)?;

    let path = client.request_path(source, target)?;
    if path.is_empty() {
        print!("{}", session.renderer().display());
        println!("{} No path from '{source}' to '{target}'", "✗".red());
        return Ok(());
    }

    session
        .highlight_path(&path)
        .with_context(|| format!("Failed to highlight path {path:?}"))?;

    print!("{}", session.renderer().display());
    println!("{} Path: {}", "✓".green(), path.join(" → ").red());
    println!(
        "  {} {} hops, session={}, state={}",
        "→".dimmed(),
        path.len().saturating_sub(1),
        session.id().to_string().dimmed(),
        session.state().to_string().dimmed()
    );
    Ok(())
}
