//! Console input parsing
//!
//! Turns one input line into one `Command`. Member names may contain spaces,
//! so they are matched against the roster rather than split on whitespace.

use baton_core::{Roster, StatusTag};

/// A single user action or read request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle queue membership
    Join(String),
    /// Enter the queue from any state
    Enter(String),
    /// Pass the baton on behalf of the selected member
    Pass(Option<String>),
    /// Set a status tag on the selected member
    Status {
        member: Option<String>,
        tag: StatusTag,
    },
    /// Remove a status tag from a member
    Clear { member: String, tag: StatusTag },
    /// Flip the eligibility flag without leaving the queue
    Eligible { member: String, eligible: bool },
    Show,
    Top(Option<usize>),
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  join <name>               join or leave the queue
  enter <name>              enter the queue from any status
  pass <name>               pass the baton (only the holder can)
  status <name> <tag>       set a status (Lunch, Away, Quick Exit or an activity)
  clear <name> <tag>        remove a status
  eligible <name> on|off    pause or resume without leaving the queue
  show                      redraw the board
  top [n]                   hold-count leaderboard
  json                      dump the full state as JSON
  help                      this text
  quit                      exit
Names can also be given by roster position (1, 2, ...).";

/// Parse one input line. Blank lines parse to `Show`.
pub fn parse(line: &str, roster: &Roster) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "join" | "leave" => required_name(rest, roster).map(Command::Join),
        "enter" => required_name(rest, roster).map(Command::Enter),
        "pass" => Ok(Command::Pass(optional_name(rest, roster))),
        "status" | "set" => {
            let (member, tag) = member_and_tag(rest, roster);
            let tag = tag.ok_or_else(|| "Usage: status <name> <tag>".to_string())?;
            Ok(Command::Status { member, tag })
        }
        "clear" => match member_and_tag(rest, roster) {
            (Some(member), Some(tag)) => Ok(Command::Clear { member, tag }),
            _ => Err("Usage: clear <name> <tag>".to_string()),
        },
        "eligible" => {
            let (name, flag) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| "Usage: eligible <name> on|off".to_string())?;
            let eligible = match flag.to_ascii_lowercase().as_str() {
                "on" | "yes" | "true" => true,
                "off" | "no" | "false" => false,
                other => return Err(format!("Expected on or off, got '{}'", other)),
            };
            let member = required_name(name.trim(), roster)?;
            Ok(Command::Eligible { member, eligible })
        }
        "show" | "board" => Ok(Command::Show),
        "top" => {
            if rest.is_empty() {
                return Ok(Command::Top(None));
            }
            rest.parse()
                .map(|n| Command::Top(Some(n)))
                .map_err(|_| format!("Not a number: {}", rest))
        }
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

fn required_name(text: &str, roster: &Roster) -> Result<String, String> {
    optional_name(text, roster).ok_or_else(|| "A member name is required".to_string())
}

/// The whole text as a member name. Unknown names pass through for the engine to reject.
fn optional_name(text: &str, roster: &Roster) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    match split_member(text, roster) {
        Some((member, "")) => Some(member.to_string()),
        _ => Some(text.to_string()),
    }
}

/// Split `<name> <tag>`. With no recognizable name and a single word, the word is the tag.
fn member_and_tag(text: &str, roster: &Roster) -> (Option<String>, Option<StatusTag>) {
    if let Some((member, rest)) = split_member(text, roster) {
        let tag = (!rest.is_empty()).then(|| StatusTag::parse(rest));
        return (Some(member.to_string()), tag);
    }

    match text.split_once(char::is_whitespace) {
        Some((name, tag)) => (Some(name.to_string()), Some(StatusTag::parse(tag))),
        None if text.is_empty() => (None, None),
        None => (None, Some(StatusTag::parse(text))),
    }
}

/// Longest roster name (or 1-based position) at the start of `text`, plus what follows
fn split_member<'a>(text: &'a str, roster: &'a Roster) -> Option<(&'a str, &'a str)> {
    let (head, tail) = match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    };
    if let Ok(position) = head.parse::<usize>() {
        return roster.by_position(position).map(|member| (member, tail));
    }

    roster
        .iter()
        .filter(|name| {
            text.strip_prefix(name)
                .is_some_and(|after| after.is_empty() || after.starts_with(char::is_whitespace))
        })
        .max_by_key(|name| name.len())
        .map(|name| (name, text[name.len()..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(["Ana", "Ana Maria Silva", "Bob"])
    }

    #[test]
    fn test_blank_line_shows_board() {
        assert_eq!(parse("   ", &roster()), Ok(Command::Show));
    }

    #[test]
    fn test_join_with_spaced_name() {
        assert_eq!(
            parse("join Ana Maria Silva", &roster()),
            Ok(Command::Join("Ana Maria Silva".into()))
        );
        assert_eq!(parse("JOIN Ana", &roster()), Ok(Command::Join("Ana".into())));
    }

    #[test]
    fn test_join_by_position() {
        assert_eq!(parse("join 3", &roster()), Ok(Command::Join("Bob".into())));
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(
            parse("join Mallory", &roster()),
            Ok(Command::Join("Mallory".into()))
        );
    }

    #[test]
    fn test_pass_without_name() {
        assert_eq!(parse("pass", &roster()), Ok(Command::Pass(None)));
        assert_eq!(parse("pass Bob", &roster()), Ok(Command::Pass(Some("Bob".into()))));
    }

    #[test]
    fn test_status_prefers_longest_name() {
        assert_eq!(
            parse("status Ana Maria Silva Quick Exit", &roster()),
            Ok(Command::Status {
                member: Some("Ana Maria Silva".into()),
                tag: StatusTag::QuickExit
            })
        );
        assert_eq!(
            parse("status Ana Meeting", &roster()),
            Ok(Command::Status {
                member: Some("Ana".into()),
                tag: StatusTag::Activity("Meeting".into())
            })
        );
    }

    #[test]
    fn test_status_without_member() {
        assert_eq!(
            parse("status Lunch", &roster()),
            Ok(Command::Status {
                member: None,
                tag: StatusTag::Lunch
            })
        );
        assert!(parse("status", &roster()).is_err());
    }

    #[test]
    fn test_clear_requires_both_parts() {
        assert_eq!(
            parse("clear 1 lunch", &roster()),
            Ok(Command::Clear {
                member: "Ana".into(),
                tag: StatusTag::Lunch
            })
        );
        assert!(parse("clear Lunch", &roster()).is_err());
    }

    #[test]
    fn test_eligible() {
        assert_eq!(
            parse("eligible Ana Maria Silva off", &roster()),
            Ok(Command::Eligible {
                member: "Ana Maria Silva".into(),
                eligible: false
            })
        );
        assert!(parse("eligible Bob maybe", &roster()).is_err());
        assert!(parse("eligible", &roster()).is_err());
    }

    #[test]
    fn test_top() {
        assert_eq!(parse("top", &roster()), Ok(Command::Top(None)));
        assert_eq!(parse("top 3", &roster()), Ok(Command::Top(Some(3))));
        assert!(parse("top many", &roster()).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse("dance Bob", &roster()).is_err());
    }
}
