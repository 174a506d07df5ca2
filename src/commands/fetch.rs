//! `pcec fetch` - fetch the controller's topology and render it.

use anyhow::Result;
use colored::Colorize;

use crate::client::client_for;
use crate::render::printer::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::render::GridRenderer;
use crate::session::Session;

pub fn execute(url: Option<String>) -> Result<()> {
    let client = client_for(url)?;
    let (nodes, links) = client.fetch_topology()?;

    let mut session = Session::new(GridRenderer::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT));
    session.load(&nodes, &links)?;

    print!("{}", session.renderer().display());
    println!(
        "{} {} nodes, {} links from {}",
        "✓".green(),
        session.topology().node_count(),
        session.topology().edge_count() / 2,
        client.base_url()
    );
    Ok(())
}
