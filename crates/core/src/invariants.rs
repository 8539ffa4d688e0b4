//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::engine::Snapshot;
use crate::models::StatusTag;

/// Validate that a rotation state is internally consistent
pub fn assert_rotation_invariants(snapshot: &Snapshot) {
    assert_single_holder(snapshot);
    assert_status_invariants(snapshot);
    assert_queue_invariants(snapshot);
}

/// At most one holder, and the hold timestamp tracks whether there is one
pub fn assert_single_holder(snapshot: &Snapshot) {
    let holders = snapshot.holders();
    debug_assert!(
        holders.len() <= 1,
        "Baton held by {} members: {:?}",
        holders.len(),
        holders
    );

    debug_assert!(
        holders.is_empty() == snapshot.hold_start.is_none(),
        "Hold start {:?} does not match holders {:?}",
        snapshot.hold_start,
        holders
    );

    if let Some(holder) = holders.first() {
        debug_assert!(
            snapshot.is_queued(holder) && snapshot.is_eligible(holder),
            "Holder {} is not a queued, eligible member",
            holder
        );
    }
}

/// `Holding` leads the line, and nobody outside the queue is left blank
pub fn assert_status_invariants(snapshot: &Snapshot) {
    for (member, status) in &snapshot.status {
        if status.is_holding() {
            debug_assert!(
                status.tags().first() == Some(&StatusTag::Holding),
                "Member {} holds the baton but Holding is not first: {}",
                member,
                status
            );
        }

        debug_assert!(
            snapshot.is_queued(member) || !status.is_empty(),
            "Member {} is outside the queue with an empty status",
            member
        );
    }
}

/// No duplicates, no exclusive statuses in the queue, and an eligible queue has a holder
pub fn assert_queue_invariants(snapshot: &Snapshot) {
    for (i, member) in snapshot.queue.iter().enumerate() {
        debug_assert!(
            !snapshot.queue[..i].contains(member),
            "Member {} is queued twice",
            member
        );

        let exclusive = snapshot
            .status
            .get(member)
            .and_then(|status| status.exclusive());
        debug_assert!(
            exclusive.is_none(),
            "Member {} is queued with exclusive status {:?}",
            member,
            exclusive
        );
    }

    let any_eligible = snapshot.queue.iter().any(|m| snapshot.is_eligible(m));
    debug_assert!(
        !any_eligible || snapshot.holder.is_some(),
        "Queue has eligible members but nobody holds the baton"
    );
}
