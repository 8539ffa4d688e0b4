//! Rotation engine
//!
//! Owns the queue, per-member status and eligibility, the hold timestamp
//! and the hold counters. Every mutating operation runs to completion and
//! leaves the state reconciled: at most one holder, and the holder is a
//! queued, eligible member whenever one exists.

mod queue;
mod snapshot;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::BatonConfig;
use crate::error::{Error, Result};
use crate::models::{Roster, StatusLine, StatusTag, TagCatalog};

pub use queue::Queue;
pub use snapshot::{Handoff, NextInLine, QueueChange, Snapshot};

#[derive(Debug)]
pub struct RotationEngine<C: Clock = SystemClock> {
    roster: Roster,
    catalog: TagCatalog,
    queue: Queue,
    eligible: BTreeMap<String, bool>,
    status: BTreeMap<String, StatusLine>,
    hold_start: Option<DateTime<Utc>>,
    hold_counts: BTreeMap<String, u32>,
    clock: C,
}

impl RotationEngine<SystemClock> {
    pub fn new(roster: Roster, catalog: TagCatalog) -> Self {
        Self::with_clock(roster, catalog, SystemClock)
    }

    pub fn from_config(config: &BatonConfig) -> Self {
        Self::new(config.roster(), config.catalog())
    }
}

impl<C: Clock> RotationEngine<C> {
    /// Everyone starts unavailable, outside the queue, with a zero count
    pub fn with_clock(roster: Roster, catalog: TagCatalog, clock: C) -> Self {
        let status = roster
            .iter()
            .map(|m| (m.to_string(), StatusLine::unavailable()))
            .collect();
        let eligible = roster.iter().map(|m| (m.to_string(), false)).collect();
        let hold_counts = roster.iter().map(|m| (m.to_string(), 0)).collect();

        Self {
            roster,
            catalog,
            queue: Queue::new(),
            eligible,
            status,
            hold_start: None,
            hold_counts,
            clock,
        }
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Toggle queue membership.
    ///
    /// Leaving clears eligibility and falls back to `Unavailable` when the
    /// member has nothing else going on. Joining sets eligibility and clears
    /// the `Unavailable` sentinel along with any exclusive tag.
    pub fn join_queue(&mut self, member: &str) -> Result<QueueChange> {
        let member = self.member(member)?;

        let change = if self.queue.remove(&member) {
            self.eligible.insert(member.clone(), false);
            let status = self.status_mut(&member);
            if status.is_empty() || status.is_holding_only() {
                *status = StatusLine::unavailable();
            }
            QueueChange::Left
        } else {
            self.queue.push(&member);
            self.eligible.insert(member.clone(), true);
            self.status_mut(&member).clear_absence();
            QueueChange::Joined
        };

        debug!(member = %member, ?change, queue_len = self.queue.len(), "Queue membership toggled");
        self.reconcile();
        self.check_invariants();
        Ok(change)
    }

    /// Hand the baton from its holder to the next eligible member in queue order
    #[instrument(skip(self), level = "debug")]
    pub fn pass_token(&mut self, selection: Option<&str>) -> Result<Handoff> {
        let requester = self.selected(selection)?;

        let holder = self.current_holder().map(str::to_owned);
        if holder.as_deref() != Some(requester.as_str()) {
            warn!(requester = %requester, holder = ?holder, "Pass rejected: not the holder");
            return Err(Error::NotHolder { requester, holder });
        }

        let successor = self
            .queue
            .position(&requester)
            .and_then(|index| self.queue.next_after(index, |m| self.is_eligible(m)))
            .map(str::to_owned);

        let Some(successor) = successor else {
            info!(requester = %requester, "No eligible successor in the queue");
            self.reconcile();
            self.check_invariants();
            return Err(Error::NoEligibleSuccessor { requester });
        };

        let now = self.clock.now();
        self.status_mut(&requester).drop_baton();
        self.status_mut(&successor).take_baton();
        self.hold_start = Some(now);
        *self.hold_counts.entry(requester.clone()).or_insert(0) += 1;

        info!(from = %requester, to = %successor, "Baton passed");
        self.check_invariants();

        Ok(Handoff {
            from: requester,
            to: successor,
            at: now,
        })
    }

    /// Set a status tag on the selected member.
    ///
    /// Exclusive tags replace the whole status, take the member out of the
    /// queue and give up the baton. Regular tags are appended behind
    /// `Holding`.
    pub fn set_status(&mut self, selection: Option<&str>, tag: StatusTag) -> Result<()> {
        let member = self.selected(selection)?;

        if tag.is_reserved() {
            return Err(Error::ReservedTag(tag.to_string()));
        }
        let Some(tag) = self.catalog.canonical(&tag) else {
            return Err(Error::UnknownTag(tag.to_string()));
        };

        if tag.is_exclusive() {
            let was_holder = self.holds(&member);
            self.eligible.insert(member.clone(), false);
            self.queue.remove(&member);
            *self.status_mut(&member) = StatusLine::only(tag);
            debug!(member = %member, was_holder, "Exclusive status set");
            self.reconcile();
        } else {
            let status = self.status_mut(&member);
            status.push_activity(tag);
            debug!(member = %member, status = %status, "Activity added");
        }

        self.check_invariants();
        Ok(())
    }

    /// Remove every occurrence of `tag` from a member's status
    pub fn remove_status_tag(&mut self, member: &str, tag: &StatusTag) -> Result<()> {
        let member = self.member(member)?;
        let queued = self.queue.contains(&member);
        let tag = self.catalog.canonical(tag).unwrap_or_else(|| tag.clone());

        let status = self.status_mut(&member);
        let removed = status.remove(&tag);
        if status.is_empty() && !queued {
            *status = StatusLine::unavailable();
        }

        debug!(member = %member, tag = %tag, removed, "Status tag removed");
        self.reconcile();
        self.check_invariants();
        Ok(())
    }

    /// Put a member straight into the queue with a clean status.
    ///
    /// The status is wiped, `Holding` included, and the baton goes to
    /// whoever reconcile picks.
    pub fn enter_from_unavailable(&mut self, member: &str) -> Result<()> {
        let member = self.member(member)?;

        self.queue.push(&member);
        self.eligible.insert(member.clone(), true);
        self.status_mut(&member).clear();

        debug!(member = %member, "Entered the queue");
        self.reconcile();
        self.check_invariants();
        Ok(())
    }

    /// Flip the eligibility flag without touching queue membership
    pub fn set_eligible(&mut self, member: &str, eligible: bool) -> Result<()> {
        let member = self.member(member)?;
        self.eligible.insert(member.clone(), eligible);

        debug!(member = %member, eligible, "Eligibility changed");
        self.reconcile();
        self.check_invariants();
        Ok(())
    }

    /// Enforce "one valid holder or none".
    ///
    /// The current holder keeps the baton while queued and eligible;
    /// otherwise it goes to the first eligible member in queue order.
    /// Returns whether anything changed.
    pub fn reconcile(&mut self) -> bool {
        let current = self.current_holder().map(str::to_owned);
        let current_valid = current
            .as_deref()
            .is_some_and(|h| self.queue.contains(h) && self.is_eligible(h));

        let target = if current_valid {
            current
        } else {
            self.queue
                .first_where(|m| self.is_eligible(m))
                .map(str::to_owned)
        };

        let mut changed = false;

        let members: Vec<String> = self.roster.iter().map(str::to_owned).collect();
        for member in members {
            if target.as_deref() == Some(member.as_str()) {
                continue;
            }
            let queued = self.queue.contains(&member);
            let status = self.status_mut(&member);
            if status.is_holding() {
                status.drop_baton();
                if status.is_empty() && !queued {
                    *status = StatusLine::unavailable();
                }
                debug!(member = %member, "Baton stripped");
                changed = true;
            }
        }

        match target {
            Some(target) => {
                if !self.holds(&target) {
                    let now = self.clock.now();
                    self.status_mut(&target).take_baton();
                    self.hold_start = Some(now);
                    info!(member = %target, "Baton assigned");
                    changed = true;
                }
            }
            None => {
                if self.hold_start.take().is_some() {
                    debug!("Baton released, nobody eligible");
                    changed = true;
                }
            }
        }

        changed
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// The member whose status carries `Holding`
    pub fn current_holder(&self) -> Option<&str> {
        self.roster.iter().find(|m| self.holds(m))
    }

    pub fn hold_started_at(&self) -> Option<DateTime<Utc>> {
        self.hold_start
    }

    /// How long the current holder has had the baton
    pub fn hold_duration(&self) -> Option<Duration> {
        self.hold_start
            .map(|start| (self.clock.now() - start).max(Duration::zero()))
    }

    /// Next eligible member after `member` in wrap order.
    ///
    /// For a member outside the queue this is the first eligible member.
    pub fn next_eligible(&self, member: &str) -> Option<&str> {
        match self.queue.position(member.trim()) {
            Some(index) => self.queue.next_after(index, |m| self.is_eligible(m)),
            None => self.queue.first_where(|m| self.is_eligible(m)),
        }
    }

    /// Who gets the baton next, and who follows
    pub fn next_in_line(&self) -> NextInLine {
        let holder_index = self
            .current_holder()
            .and_then(|holder| self.queue.position(holder));

        let mut line: Vec<String> = match holder_index {
            Some(index) => self
                .queue
                .after(index)
                .filter(|m| self.is_eligible(m))
                .map(str::to_owned)
                .collect(),
            None => self.queue.iter().map(str::to_owned).collect(),
        };

        let next = if line.is_empty() {
            None
        } else {
            Some(line.remove(0))
        };
        NextInLine { next, rest: line }
    }

    /// Members with a non-zero count, highest first. Ties keep roster order.
    pub fn top_counts(&self, n: usize) -> Vec<(&str, u32)> {
        let mut counts: Vec<(&str, u32)> = self
            .roster
            .iter()
            .map(|m| (m, self.hold_count(m)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }

    pub fn hold_count(&self, member: &str) -> u32 {
        self.hold_counts.get(member).copied().unwrap_or(0)
    }

    pub fn status(&self, member: &str) -> Option<&StatusLine> {
        self.status.get(member)
    }

    pub fn is_queued(&self, member: &str) -> bool {
        self.queue.contains(member)
    }

    pub fn is_eligible(&self, member: &str) -> bool {
        self.eligible.get(member).copied().unwrap_or(false)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Full copy of the engine state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            queue: self.queue.as_slice().to_vec(),
            eligible: self.eligible.clone(),
            status: self.status.clone(),
            holder: self.current_holder().map(str::to_owned),
            hold_start: self.hold_start,
            hold_counts: self.hold_counts.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn member(&self, name: &str) -> Result<String> {
        self.roster
            .resolve(name)
            .map(str::to_owned)
            .ok_or_else(|| Error::UnknownMember(name.trim().to_string()))
    }

    fn selected(&self, selection: Option<&str>) -> Result<String> {
        match selection.map(str::trim) {
            None | Some("") => Err(Error::InvalidSelection),
            Some(name) => self.member(name),
        }
    }

    fn holds(&self, member: &str) -> bool {
        self.status.get(member).is_some_and(StatusLine::is_holding)
    }

    fn status_mut(&mut self, member: &str) -> &mut StatusLine {
        self.status
            .entry(member.to_string())
            .or_insert_with(StatusLine::unavailable)
    }

    fn check_invariants(&self) {
        #[cfg(debug_assertions)]
        crate::invariants::assert_rotation_invariants(&self.snapshot());
    }
}
