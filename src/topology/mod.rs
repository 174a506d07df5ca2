//! Topology graph model.
//!
//! A `Topology` is built once per load from raw node/link records and torn
//! down on disconnect. Undirected input links are stored as two directed
//! [`Edge`] entries (source→target and target→source) so that resolving a
//! directed hop during path highlighting is a single map lookup and never
//! has to test both orders.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::validate_node_id;

pub mod import;
pub mod record;


pub use record::{LinkRecord, NodeRecord};

/// Coordinate units covered per millisecond when deriving propagation delay
/// from the euclidean distance between link endpoints.
pub const PROPAGATION_SPEED: f64 = 29.9792458;

/// Link capacity in Gbps assumed when a record does not declare one.
pub const DEFAULT_CAPACITY_GBPS: f64 = 40.0;

/// Which kind of raw record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Link,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Node => write!(f, "node"),
            RecordKind::Link => write!(f, "link"),
        }
    }
}

/// Errors raised while parsing records or loading a topology.
///
/// A failed load leaves the caller's previous topology untouched; `load` is
/// a constructor and never mutates shared state before it succeeds.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// A raw record had the wrong shape or referenced data missing from the
    /// record set (unknown endpoint, duplicate identifier, duplicate pair).
    #[error("malformed {kind} record '{record}': {reason}")]
    MalformedRecord {
        kind: RecordKind,
        record: String,
        reason: String,
    },
}

impl TopologyError {
    pub(crate) fn malformed(
        kind: RecordKind,
        record: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            kind,
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// A network element at a declared 2-D position.
///
/// Immutable after load; highlight membership lives in the session's
/// highlight set, not on the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Optional marker override; a single-character reference replaces the
    /// default node glyph when drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Node {
    fn from_record(record: &NodeRecord) -> Self {
        Self {
            id: record.id.clone(),
            label: record
                .label
                .clone()
                .unwrap_or_else(|| record.id.clone()),
            x: record.x,
            y: record.y,
            icon: record.icon.clone(),
        }
    }
}

/// One directed half of an undirected topology link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Canonical directed identifier, `source:target`.
    pub id: String,
    pub source: String,
    pub target: String,
    /// Display label, e.g. `40 Gbps`.
    pub label: String,
    pub capacity_gbps: f64,
    /// Propagation delay in milliseconds, derived from endpoint distance.
    pub delay_ms: f64,
}

/// The in-memory graph: one node map and one directed-edge map.
///
/// Invariants upheld by [`Topology::load`]: every edge endpoint names an
/// existing node, and no two edges share the same (source, target) pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
}

impl Topology {
    /// Builds a topology from raw records.
    ///
    /// Every undirected link record inserts both directed edges. Fails with
    /// [`TopologyError::MalformedRecord`] on a bad identifier, an endpoint
    /// that names no node, a self-loop, or a duplicate node/pair; nothing of
    /// the partially built graph escapes on failure.
    pub fn load(nodes: &[NodeRecord], links: &[LinkRecord]) -> Result<Self, TopologyError> {
        let mut topology = Topology::default();

        for record in nodes {
            if let Err(e) = validate_node_id(&record.id) {
                return Err(TopologyError::malformed(
                    RecordKind::Node,
                    record.to_string(),
                    e.to_string(),
                ));
            }
            // f64 parsing accepts "NaN" and "inf"; neither survives the
            // layout fit transform.
            if !record.x.is_finite() || !record.y.is_finite() {
                return Err(TopologyError::malformed(
                    RecordKind::Node,
                    record.to_string(),
                    "coordinates must be finite",
                ));
            }
            if topology.nodes.contains_key(&record.id) {
                return Err(TopologyError::malformed(
                    RecordKind::Node,
                    record.to_string(),
                    format!("duplicate node identifier '{}'", record.id),
                ));
            }
            topology
                .nodes
                .insert(record.id.clone(), Node::from_record(record));
        }

        for record in links {
            if record.source == record.target {
                return Err(TopologyError::malformed(
                    RecordKind::Link,
                    record.to_string(),
                    "link endpoints are the same node",
                ));
            }
            topology.insert_directed(record, &record.source, &record.target)?;
            topology.insert_directed(record, &record.target, &record.source)?;
        }

        Ok(topology)
    }

    fn insert_directed(
        &mut self,
        record: &LinkRecord,
        source: &str,
        target: &str,
    ) -> Result<(), TopologyError> {
        let (sx, sy) = match self.nodes.get(source) {
            Some(node) => (node.x, node.y),
            None => {
                return Err(TopologyError::malformed(
                    RecordKind::Link,
                    record.to_string(),
                    format!("references unknown node '{source}'"),
                ));
            }
        };
        let (tx, ty) = match self.nodes.get(target) {
            Some(node) => (node.x, node.y),
            None => {
                return Err(TopologyError::malformed(
                    RecordKind::Link,
                    record.to_string(),
                    format!("references unknown node '{target}'"),
                ));
            }
        };

        let id = Self::edge_id(source, target);
        if self.edges.contains_key(&id) {
            return Err(TopologyError::malformed(
                RecordKind::Link,
                record.to_string(),
                format!("duplicate link {source} -> {target}"),
            ));
        }

        let distance = ((sx - tx).powi(2) + (sy - ty).powi(2)).sqrt();
        let label = record
            .label
            .clone()
            .unwrap_or_else(|| format!("{DEFAULT_CAPACITY_GBPS} Gbps"));

        self.edges.insert(
            id.clone(),
            Edge {
                id,
                source: source.to_string(),
                target: target.to_string(),
                label,
                capacity_gbps: DEFAULT_CAPACITY_GBPS,
                delay_ms: distance / PROPAGATION_SPEED,
            },
        );
        Ok(())
    }

    /// Canonical identifier of the directed edge `source -> target`.
    pub fn edge_id(source: &str, target: &str) -> String {
        format!("{source}:{target}")
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Directed lookup of the edge `source -> target`, O(1).
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.get(&Self::edge_id(source, target))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Nodes sorted by identifier, for deterministic output.
    pub fn sorted_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// One representative per undirected pair (the direction whose source
    /// sorts first), sorted by identifier. The reverse edge always exists
    /// and can be derived with [`Topology::edge_id`].
    pub fn undirected_edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self
            .edges
            .values()
            .filter(|e| e.source < e.target)
            .collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        edges
    }

    /// Discards all nodes and edges. Idempotent; safe on an empty graph.
    pub fn teardown(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
