//! Data models for the menu plugin.
//!
//! Wire types decoded from the Redmine REST API, and the per-instance
//! hierarchy the aggregator builds from them.

use crate::analysis::OrderedMap;
use serde::{Deserialize, Serialize};

/// One configured Redmine endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Base URL of the Redmine installation, e.g. `http://192.168.1.10/`.
    pub url: String,
    /// API access key sent as the `key` query parameter.
    pub token: String,
}

/// An `{id, name}` pair as Redmine embeds it for projects, trackers and statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
    pub name: String,
}

impl Reference {
    #[cfg(test)]
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A single issue assigned to the current user.
///
/// Decoding is strict: every field below must be present with the right
/// type. Any other fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub subject: String,
    pub project: Reference,
    pub tracker: Reference,
    pub status: Reference,
}

/// Body of `GET /issues.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesResponse {
    pub issues: Vec<Issue>,
}

/// All issues of one instance, grouped by project, tracker and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedInstance {
    /// Instance base URL, used for the header link and issue links.
    pub url: String,
    /// Number of issues fed into the aggregator.
    pub issue_count: usize,
    /// Projects in first-seen order.
    pub projects: OrderedMap<u64, ProjectGroup>,
}

impl AggregatedInstance {
    /// Creates an empty instance tree.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            issue_count: 0,
            projects: OrderedMap::new(),
        }
    }
}

/// Issues of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup {
    pub id: u64,
    pub name: String,
    /// Sum of the lengths of every status bucket below this project.
    pub issue_count: usize,
    /// Trackers in first-seen order.
    pub trackers: OrderedMap<u64, TrackerGroup>,
}

impl ProjectGroup {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            issue_count: 0,
            trackers: OrderedMap::new(),
        }
    }
}

/// Issues of one tracker inside a project, bucketed by status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerGroup {
    pub id: u64,
    pub name: String,
    /// Status buckets in first-seen order; each keeps arrival order.
    pub issues_by_status: OrderedMap<u64, Vec<Issue>>,
}

impl TrackerGroup {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            issues_by_status: OrderedMap::new(),
        }
    }

    /// Number of issues across all status buckets. Not stored; derived on demand.
    pub fn issue_count(&self) -> usize {
        self.issues_by_status.values().map(Vec::len).sum()
    }
}
