//! `pcec show` - render a topology file to stdout.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::render::GridRenderer;
use crate::session::Session;
use crate::topology::{import, Topology};

/// Renders `file` as a character map followed by node and link tables.
pub fn execute(file: &Path, width: usize, height: usize) -> Result<()> {
    let (nodes, links) = import::parse_file(file)?;

    let mut session = Session::new(GridRenderer::new(width, height));
    session.load(&nodes, &links)?;

    print!("{}", session.renderer().display());
    println!();
    print_tables(session.topology());

    println!(
        "{} {} nodes, {} links",
        "✓".green(),
        session.topology().node_count(),
        session.topology().edge_count() / 2
    );
    Ok(())
}

fn print_tables(topology: &Topology) {
    println!("{:24} {:>10} {:>10}", "NODE".bold(), "X".bold(), "Y".bold());
    println!("{}", "─".repeat(46));
    for node in topology.sorted_nodes() {
        println!("{:24} {:>10.2} {:>10.2}", node.id.cyan(), node.x, node.y);
    }
    println!();

    println!(
        "{:24} {:24} {:>10} {:>10}",
        "SOURCE".bold(),
        "TARGET".bold(),
        "DELAY".bold(),
        "CAPACITY".bold()
    );
    println!("{}", "─".repeat(72));
    for edge in topology.undirected_edges() {
        println!(
            "{:24} {:24} {:>7.3} ms {:>5} Gbps",
            edge.source.cyan(),
            edge.target.cyan(),
            edge.delay_ms,
            edge.capacity_gbps
        );
    }
    println!();
}
