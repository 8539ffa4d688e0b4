//! Roster board
//!
//! Groups every roster member into exactly one section for display:
//! queued members first, then the exclusive statuses, then members busy
//! with regular activities, then everyone unavailable.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::engine::RotationEngine;
use crate::models::StatusTag;

/// A queued member as shown on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub member: String,
    pub holding: bool,
    pub eligible: bool,
}

/// A member outside the queue with regular activities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyEntry {
    pub member: String,
    pub status: String,
}

/// The roster split by availability, each section in roster order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub queue: Vec<QueueEntry>,
    pub lunch: Vec<String>,
    pub quick_exit: Vec<String>,
    pub away: Vec<String>,
    pub busy: Vec<BusyEntry>,
    pub unavailable: Vec<String>,
}

impl Board {
    pub fn build<C: Clock>(engine: &RotationEngine<C>) -> Self {
        let mut board = Board::default();

        for member in engine.roster().iter() {
            let status = engine.status(member).cloned().unwrap_or_default();

            if engine.is_queued(member) {
                board.queue.push(QueueEntry {
                    member: member.to_string(),
                    holding: status.is_holding(),
                    eligible: engine.is_eligible(member),
                });
                continue;
            }

            match status.exclusive() {
                Some(StatusTag::Lunch) => board.lunch.push(member.to_string()),
                Some(StatusTag::QuickExit) => board.quick_exit.push(member.to_string()),
                Some(StatusTag::Away) => board.away.push(member.to_string()),
                _ if status.is_empty() || status.is_unavailable() => {
                    board.unavailable.push(member.to_string())
                }
                _ => board.busy.push(BusyEntry {
                    member: member.to_string(),
                    status: status.to_string(),
                }),
            }
        }

        // queue section follows queue order, not roster order
        board.queue.sort_by_key(|entry| engine.queue().position(&entry.member));
        board
    }
}
