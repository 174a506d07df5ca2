//! Raw topology records and their wire encoding.
//!
//! The PCE control server delivers topology as flat strings: one
//! `"<id> <x> <y>"` record per node and one `"<source> <target>"` record per
//! link. `FromStr` parses that wire form (extra whitespace tolerated) and
//! `Display` reproduces it. The topology-file importer constructs the same
//! structs directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{RecordKind, TopologyError};

/// A raw node record: identifier plus declared 2-D position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Display label; the identifier stands in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional marker reference for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            label: None,
            icon: None,
        }
    }
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.x, self.y)
    }
}

impl FromStr for NodeRecord {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(TopologyError::malformed(
                RecordKind::Node,
                s,
                format!("expected 3 fields (id, x, y), found {}", fields.len()),
            ));
        }

        let x: f64 = fields[1].parse().map_err(|_| {
            TopologyError::malformed(
                RecordKind::Node,
                s,
                format!("invalid x coordinate '{}'", fields[1]),
            )
        })?;
        let y: f64 = fields[2].parse().map_err(|_| {
            TopologyError::malformed(
                RecordKind::Node,
                s,
                format!("invalid y coordinate '{}'", fields[2]),
            )
        })?;

        Ok(NodeRecord::new(fields[0], x, y))
    }
}

/// A raw link record: one undirected adjacency between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    /// Display label for both directed edges; a capacity label is derived
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LinkRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }
}

impl fmt::Display for LinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.target)
    }
}

impl FromStr for LinkRecord {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(TopologyError::malformed(
                RecordKind::Link,
                s,
                format!("expected 2 fields (source, target), found {}", fields.len()),
            ));
        }

        Ok(LinkRecord::new(fields[0], fields[1]))
    }
}
