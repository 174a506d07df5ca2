//! Blocking HTTP client for the PCE control endpoints.
//!
//! The controller speaks plain JSON: node and link records travel as arrays
//! of whitespace-delimited strings, a path request is a `"<src> <dst>"`
//! string and the response an ordered array of node ids. Parsing into
//! typed records happens here so the rest of the crate never sees wire
//! strings.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::ConsoleConfig;
use crate::topology::{LinkRecord, NodeRecord};
use crate::validation::validate_node_id;

/// Controller-side server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub running: bool,
}

/// One server log record; `time` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: String,
    pub time: i64,
    pub message: String,
}

impl LogRecord {
    /// The record's timestamp, when `time` is within chrono's range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

pub struct PceClient {
    base_url: String,
    http: Client,
}

impl PceClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(format!("pcec/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.controller_url.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn server_status(&self) -> Result<ServerStatus> {
        let response = self.get("ctrl/server/status")?;
        response
            .json()
            .context("Failed to parse server status response")
    }

    /// Starts the PCE server on the named topology.
    pub fn start_server(&self, topology: &str) -> Result<ServerStatus> {
        let url = self.endpoint("ctrl/server/start");
        let response = self
            .http
            .post(&url)
            .json(&topology)
            .send()
            .with_context(|| format!("Failed to reach PCE controller at {url}"))?;
        Self::validate_response_status(&response, "Server start")?;
        response
            .json()
            .context("Failed to parse server start response")
    }

    pub fn stop_server(&self) -> Result<ServerStatus> {
        let response = self.get("ctrl/server/stop")?;
        response
            .json()
            .context("Failed to parse server stop response")
    }

    /// Fetches and parses the server's node records.
    pub fn fetch_nodes(&self) -> Result<Vec<NodeRecord>> {
        let raw: Vec<String> = self
            .get("ctrl/server/topology/nodes")?
            .json()
            .context("Failed to parse node list response")?;
        raw.iter()
            .map(|line| line.parse::<NodeRecord>())
            .collect::<Result<_, _>>()
            .context("Controller returned a malformed node record")
    }

    /// Fetches and parses the server's link records.
    pub fn fetch_links(&self) -> Result<Vec<LinkRecord>> {
        let raw: Vec<String> = self
            .get("ctrl/server/topology/links")?
            .json()
            .context("Failed to parse link list response")?;
        raw.iter()
            .map(|line| line.parse::<LinkRecord>())
            .collect::<Result<_, _>>()
            .context("Controller returned a malformed link record")
    }

    pub fn fetch_topology(&self) -> Result<(Vec<NodeRecord>, Vec<LinkRecord>)> {
        Ok((self.fetch_nodes()?, self.fetch_links()?))
    }

    /// Registers this console as the PCE's client.
    pub fn connect(&self) -> Result<()> {
        self.get("ctrl/client/connect").map(|_| ())
    }

    pub fn disconnect(&self) -> Result<()> {
        self.get("ctrl/client/disconnect").map(|_| ())
    }

    /// Requests a path from `source` to `target`; the response is the
    /// ordered node id sequence, empty when no path exists.
    pub fn request_path(&self, source: &str, target: &str) -> Result<Vec<String>> {
        validate_node_id(source).context("Invalid source node id")?;
        validate_node_id(target).context("Invalid target node id")?;

        let url = self.endpoint("ctrl/client/request");
        let payload = format!("{source} {target}");
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .with_context(|| format!("Failed to reach PCE controller at {url}"))?;
        Self::validate_response_status(&response, "Path request")?;
        response.json().context("Failed to parse path response")
    }

    pub fn fetch_logs(&self) -> Result<Vec<LogRecord>> {
        let response = self.get("ctrl/logs")?;
        response.json().context("Failed to parse log response")
    }

    fn get(&self, path: &str) -> Result<Response> {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach PCE controller at {url}"))?;
        Self::validate_response_status(&response, "Controller request")?;
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn validate_response_status(response: &Response, action: &str) -> Result<()> {
        if !response.status().is_success() {
            bail!("{} failed with status: {}", action, response.status());
        }
        Ok(())
    }
}

/// Shared client-construction helper for commands that take a `--url` flag.
pub fn client_for(url_override: Option<String>) -> Result<PceClient> {
    let config = ConsoleConfig::load()?.with_url_override(url_override);
    PceClient::new(&config)
}
