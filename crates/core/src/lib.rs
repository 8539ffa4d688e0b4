//! Baton Core Library
//!
//! Rotation engine, status models, configuration and display helpers for
//! tracking who holds the team's baton.

pub mod board;
pub mod clock;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod models;

pub use board::{Board, BusyEntry, QueueEntry};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BatonConfig, ConfigError};
pub use display::{format_hold_duration, RefreshPolicy};
pub use engine::{Handoff, NextInLine, Queue, QueueChange, RotationEngine, Snapshot};
pub use error::{Error, Result};
pub use models::*;
