//! Text rendering of the board
//!
//! Reads engine state only. Everything shown here can be recomputed from
//! the engine at any time.

use std::fmt::Write;

use baton_core::{format_hold_duration, Board, Clock, RotationEngine};

use crate::state::AppState;

/// Full board: holder, next in line, queue and the other sections
pub fn board<C: Clock>(state: &AppState<C>) -> String {
    let engine = &state.engine;
    let mut out = String::new();

    let _ = writeln!(out, "==================== Baton ====================");
    if state.is_celebrating() {
        let _ = writeln!(out, "*** Baton passed! ***");
    }
    if state.warning() {
        let _ = writeln!(out, "!!! Invalid action: only the holder can pass the baton.");
    }

    match engine.current_holder() {
        Some(holder) => {
            let _ = writeln!(
                out,
                "Holder: {}  (held for {})",
                holder,
                format_hold_duration(engine.hold_duration())
            );
        }
        None => {
            let _ = writeln!(out, "Nobody holds the baton right now.");
        }
    }

    let line = engine.next_in_line();
    match (&line.next, engine.current_holder()) {
        (Some(next), _) => {
            let _ = write!(out, "Next: {}", next);
            if !line.rest.is_empty() {
                let _ = write!(out, "  then: {}", line.rest.join(", "));
            }
            let _ = writeln!(out);
        }
        (None, Some(_)) => {
            let _ = writeln!(out, "Only the current holder is eligible.");
        }
        (None, None) => {
            let _ = writeln!(out, "Nobody in the queue.");
        }
    }

    let _ = writeln!(out);
    out.push_str(&sections(engine));
    let _ = writeln!(out);
    out.push_str(&leaderboard(engine, state.leaderboard_size));

    let refresh = state
        .policy
        .refresh_interval(state.celebration_since(), engine.now());
    let _ = writeln!(out, "(refresh every {}s)", refresh.num_seconds());
    out
}

/// Roster grouped by availability
pub fn sections<C: Clock>(engine: &RotationEngine<C>) -> String {
    let board = Board::build(engine);
    let mut out = String::new();

    let _ = writeln!(out, "In queue ({}):", board.queue.len());
    if board.queue.is_empty() {
        let _ = writeln!(out, "  nobody");
    }
    for entry in &board.queue {
        let marker = if entry.holding { "*" } else { " " };
        let status = engine
            .status(&entry.member)
            .map(|s| s.to_string())
            .unwrap_or_default();
        let paused = if entry.eligible { "" } else { " (paused)" };
        if status.is_empty() {
            let _ = writeln!(out, "  {} {}{}", marker, entry.member, paused);
        } else {
            let _ = writeln!(out, "  {} {} [{}]{}", marker, entry.member, status, paused);
        }
    }

    for (title, members) in [
        ("Lunch", &board.lunch),
        ("Quick Exit", &board.quick_exit),
        ("Away", &board.away),
    ] {
        if !members.is_empty() {
            let _ = writeln!(out, "{} ({}): {}", title, members.len(), members.join(", "));
        }
    }

    if !board.busy.is_empty() {
        let _ = writeln!(out, "Busy ({}):", board.busy.len());
        for entry in &board.busy {
            let _ = writeln!(out, "  {}: {}", entry.member, entry.status);
        }
    }

    if board.unavailable.is_empty() {
        let _ = writeln!(out, "Unavailable: none");
    } else {
        let _ = writeln!(
            out,
            "Unavailable ({}): {}",
            board.unavailable.len(),
            board.unavailable.join(", ")
        );
    }
    out
}

/// Hold counts for the session, highest first
pub fn leaderboard<C: Clock>(engine: &RotationEngine<C>, n: usize) -> String {
    let top = engine.top_counts(n);
    if top.is_empty() {
        return "No passes recorded today.\n".to_string();
    }

    let mut out = String::from("Today:\n");
    for (member, count) in top {
        let plural = if count == 1 { "" } else { "s" };
        let _ = writeln!(out, "  {}: passed {} time{}", member, count, plural);
    }
    out
}
