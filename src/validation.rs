//! Input validation for node identifiers supplied on the command line.
//!
//! Node identifiers end up embedded in wire payloads (`"<src> <dst>"` path
//! requests are space-delimited) and in directed-edge keys (`source:target`),
//! so whitespace and the `:` separator must be rejected before an identifier
//! reaches either place.

use anyhow::{bail, Result};

/// Maximum allowed length for node identifiers.
pub const MAX_NODE_ID_LENGTH: usize = 128;

/// Validates a node identifier.
///
/// An identifier is valid if:
/// - It is not empty
/// - It is no longer than MAX_NODE_ID_LENGTH characters
/// - It contains only alphanumeric characters, dots, dashes, and underscores
///
/// Dots are allowed because PCE topologies commonly name nodes after their
/// router addresses (`192.169.2.1`).
///
/// # Examples
///
/// ```
/// use pcec::validation::validate_node_id;
///
/// assert!(validate_node_id("vienna").is_ok());
/// assert!(validate_node_id("192.169.2.1").is_ok());
/// assert!(validate_node_id("").is_err());
/// assert!(validate_node_id("a:b").is_err());
/// ```
pub fn validate_node_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("Node identifier cannot be empty");
    }

    if id.len() > MAX_NODE_ID_LENGTH {
        bail!(
            "Node identifier too long: {} characters (max {})",
            id.len(),
            MAX_NODE_ID_LENGTH
        );
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if !valid_chars {
        bail!("Node identifier '{id}' contains invalid characters. Use only alphanumeric characters, dots (.), dashes (-), and underscores (_)");
    }

    Ok(())
}

/// Clap value parser for validating node identifier arguments.
///
/// Use this with clap's `value_parser` attribute to validate identifiers at
/// parse time.
///
/// # Examples
///
/// ```ignore
/// #[arg(value_parser = clap_node_id_validator)]
/// source: String,
/// ```
pub fn clap_node_id_validator(s: &str) -> Result<String, String> {
    validate_node_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
