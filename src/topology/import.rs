//! SNDLib-style topology file import.
//!
//! The PCE server ships its topologies as sectioned text files:
//!
//! ```text
//! NODES (
//!   vienna ( 16.37 48.21 )
//!   graz ( 15.44 47.07 )
//! )
//! LINKS (
//!   L1 ( vienna graz ) 1.00 40.00
//! )
//! ```
//!
//! Node lines carry the identifier followed by two coordinates, link lines a
//! link identifier followed by the two endpoint identifiers; trailing fields
//! are ignored. Tokens match `[A-Za-z0-9.]+`, so parentheses and commas act
//! as separators. Each section body ends at a lone `)`.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use super::record::{LinkRecord, NodeRecord};
use super::{RecordKind, TopologyError};

const NODES_HEADER: &str = "NODES (";
const LINKS_HEADER: &str = "LINKS (";

/// Reads a topology file into raw records, ready for a session load.
pub fn parse_file(path: &Path) -> Result<(Vec<NodeRecord>, Vec<LinkRecord>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file: {}", path.display()))?;

    parse(&content).with_context(|| format!("Failed to parse topology file: {}", path.display()))
}

/// Parses sectioned topology text into raw records.
pub fn parse(content: &str) -> Result<(Vec<NodeRecord>, Vec<LinkRecord>), TopologyError> {
    let token = Regex::new(r"[A-Za-z0-9.]+").expect("Invalid regex pattern");

    let mut lines = content.lines();

    seek_section(&mut lines, NODES_HEADER, RecordKind::Node)?;
    let mut nodes = Vec::new();
    for line in lines.by_ref() {
        let line = line.trim();
        if line == ")" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = token.find_iter(line).map(|m| m.as_str()).collect();
        if tokens.len() < 3 {
            return Err(TopologyError::malformed(
                RecordKind::Node,
                line,
                format!("expected id and 2 coordinates, found {} tokens", tokens.len()),
            ));
        }

        let x: f64 = tokens[1].parse().map_err(|_| {
            TopologyError::malformed(
                RecordKind::Node,
                line,
                format!("invalid x coordinate '{}'", tokens[1]),
            )
        })?;
        let y: f64 = tokens[2].parse().map_err(|_| {
            TopologyError::malformed(
                RecordKind::Node,
                line,
                format!("invalid y coordinate '{}'", tokens[2]),
            )
        })?;

        nodes.push(NodeRecord::new(tokens[0], x, y));
    }

    seek_section(&mut lines, LINKS_HEADER, RecordKind::Link)?;
    let mut links = Vec::new();
    for line in lines {
        let line = line.trim();
        if line == ")" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = token.find_iter(line).map(|m| m.as_str()).collect();
        if tokens.len() < 3 {
            return Err(TopologyError::malformed(
                RecordKind::Link,
                line,
                format!(
                    "expected link id and 2 endpoints, found {} tokens",
                    tokens.len()
                ),
            ));
        }

        // tokens[0] is the file's link identifier; edges are keyed by their
        // endpoint pair, so it only orders the line.
        links.push(LinkRecord::new(tokens[1], tokens[2]));
    }

    Ok((nodes, links))
}

fn seek_section<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    header: &str,
    kind: RecordKind,
) -> Result<(), TopologyError> {
    for line in lines {
        if line.trim() == header {
            return Ok(());
        }
    }
    Err(TopologyError::malformed(
        kind,
        header,
        "section not found before end of file",
    ))
}
