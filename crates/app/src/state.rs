//! Application state management

use baton_core::{
    BatonConfig, Clock, Error, QueueChange, RefreshPolicy, RotationEngine, SystemClock,
};
use chrono::{DateTime, Utc};

use crate::console::{Command, HELP};
use crate::render;

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the board, with an optional one-line notice above it
    Board(Option<String>),
    /// Print text as-is
    Text(String),
    Quit,
}

/// Main application state: the engine plus transient presentation flags
pub struct AppState<C: Clock = SystemClock> {
    pub engine: RotationEngine<C>,
    pub policy: RefreshPolicy,
    pub leaderboard_size: usize,
    /// When the last successful pass happened, while it is still celebrated
    celebration_since: Option<DateTime<Utc>>,
    /// Set after someone other than the holder tried to pass
    warning: bool,
}

impl AppState<SystemClock> {
    pub fn new(config: &BatonConfig) -> Self {
        Self::with_engine(
            RotationEngine::from_config(config),
            config.refresh_policy(),
            config.leaderboard_size(),
        )
    }
}

impl<C: Clock> AppState<C> {
    pub fn with_engine(engine: RotationEngine<C>, policy: RefreshPolicy, leaderboard_size: usize) -> Self {
        Self {
            engine,
            policy,
            leaderboard_size,
            celebration_since: None,
            warning: false,
        }
    }

    pub fn is_celebrating(&self) -> bool {
        self.policy
            .is_celebrating(self.celebration_since, self.engine.now())
    }

    pub fn celebration_since(&self) -> Option<DateTime<Utc>> {
        self.celebration_since
    }

    pub fn warning(&self) -> bool {
        self.warning
    }

    /// Drop the celebration once its window has passed
    pub fn tick(&mut self) {
        let now = self.engine.now();
        self.policy.expire(&mut self.celebration_since, now);
    }

    /// Apply one command to the engine
    pub fn handle(&mut self, command: Command) -> Reply {
        let result = match command {
            Command::Show => return Reply::Board(None),
            Command::Help => return Reply::Text(HELP.to_string()),
            Command::Quit => return Reply::Quit,
            Command::Top(n) => {
                return Reply::Text(render::leaderboard(
                    &self.engine,
                    n.unwrap_or(self.leaderboard_size),
                ))
            }
            Command::Json => {
                return match serde_json::to_string_pretty(&self.engine.snapshot()) {
                    Ok(json) => Reply::Text(json),
                    Err(e) => Reply::Board(Some(format!("Could not serialize state: {}", e))),
                }
            }
            command => {
                self.warning = false;
                self.celebration_since = None;
                self.apply(command)
            }
        };

        match result {
            Ok(notice) => Reply::Board(notice),
            Err(e) => {
                if matches!(e, Error::NotHolder { .. }) {
                    self.warning = true;
                }
                tracing::debug!(error = %e, "Action rejected");
                Reply::Board(Some(notice_for(&e)))
            }
        }
    }

    fn apply(&mut self, command: Command) -> baton_core::Result<Option<String>> {
        match command {
            Command::Join(member) => {
                let notice = match self.engine.join_queue(&member)? {
                    QueueChange::Joined => format!("{} joined the queue.", member),
                    QueueChange::Left => format!("{} left the queue.", member),
                };
                Ok(Some(notice))
            }
            Command::Enter(member) => {
                self.engine.enter_from_unavailable(&member)?;
                Ok(Some(format!("{} is back in the queue.", member)))
            }
            Command::Pass(selection) => {
                let handoff = self.engine.pass_token(selection.as_deref())?;
                self.celebration_since = Some(handoff.at);
                Ok(Some(format!(
                    "Baton passed from {} to {}!",
                    handoff.from, handoff.to
                )))
            }
            Command::Status { member, tag } => {
                self.engine.set_status(member.as_deref(), tag)?;
                Ok(None)
            }
            Command::Clear { member, tag } => {
                self.engine.remove_status_tag(&member, &tag)?;
                Ok(None)
            }
            Command::Eligible { member, eligible } => {
                self.engine.set_eligible(&member, eligible)?;
                Ok(None)
            }
            Command::Show | Command::Top(_) | Command::Json | Command::Help | Command::Quit => {
                Ok(None)
            }
        }
    }
}

fn notice_for(error: &Error) -> String {
    match error {
        Error::InvalidSelection => "Select a member first.".to_string(),
        Error::NotHolder { .. } => "Only the member holding the baton can pass it.".to_string(),
        Error::NoEligibleSuccessor { .. } => {
            "There is no other eligible member in the queue right now.".to_string()
        }
        other => other.to_string(),
    }
}
