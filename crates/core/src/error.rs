//! Error types for Baton Core
//!
//! Every variant is advisory: the engine rejects the request and leaves its
//! state untouched. The one exception is `NoEligibleSuccessor`, which is
//! reported after the engine has already run its reconcile pass.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No member selected")]
    InvalidSelection,

    #[error("{requester} does not hold the baton (holder: {})", .holder.as_deref().unwrap_or("nobody"))]
    NotHolder {
        requester: String,
        holder: Option<String>,
    },

    #[error("No eligible member in the queue after {requester}")]
    NoEligibleSuccessor { requester: String },

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Unknown status tag: {0}")]
    UnknownTag(String),

    #[error("Status tag is reserved: {0}")]
    ReservedTag(String),
}

pub type Result<T> = std::result::Result<T, Error>;
