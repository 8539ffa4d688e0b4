//! Values handed back to callers of the engine

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::StatusLine;

/// Which way a queue toggle went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueChange {
    Joined,
    Left,
}

/// A successful pass: the baton moved from `from` to `to` at `at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub from: String,
    pub to: String,
    pub at: DateTime<Utc>,
}

/// Upcoming holders in the order they would receive the baton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextInLine {
    pub next: Option<String>,
    pub rest: Vec<String>,
}

impl NextInLine {
    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }
}

/// Complete copy of the engine state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub queue: Vec<String>,
    pub eligible: BTreeMap<String, bool>,
    pub status: BTreeMap<String, StatusLine>,
    pub holder: Option<String>,
    pub hold_start: Option<DateTime<Utc>>,
    pub hold_counts: BTreeMap<String, u32>,
}

impl Snapshot {
    /// Members whose status carries `Holding`
    pub fn holders(&self) -> Vec<&str> {
        self.status
            .iter()
            .filter(|(_, status)| status.is_holding())
            .map(|(member, _)| member.as_str())
            .collect()
    }

    pub fn is_eligible(&self, member: &str) -> bool {
        self.eligible.get(member).copied().unwrap_or(false)
    }

    pub fn is_queued(&self, member: &str) -> bool {
        self.queue.iter().any(|m| m == member)
    }
}
