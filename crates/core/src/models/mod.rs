//! Data models for Baton

mod roster;
mod status;

pub use roster::*;
pub use status::*;
