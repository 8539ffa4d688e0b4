//! Status tags and the composite status line

use serde::{Deserialize, Serialize};

/// Separator used when a status line is rendered as text
pub const STATUS_SEPARATOR: &str = " | ";

/// A single element of a member's status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTag {
    /// Member currently holds the baton (reserved)
    Holding,
    /// Sentinel for a member outside the queue with nothing else going on (reserved)
    Unavailable,
    /// Out to lunch - exclusive
    Lunch,
    /// Away from the desk - exclusive
    Away,
    /// Stepped out briefly - exclusive
    QuickExit,
    /// A regular activity that can be combined with others (e.g. "Meeting")
    Activity(String),
}

impl StatusTag {
    /// Parse a user-supplied label. Unrecognized labels become activities.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "holding" => StatusTag::Holding,
            "unavailable" => StatusTag::Unavailable,
            "lunch" => StatusTag::Lunch,
            "away" => StatusTag::Away,
            "quickexit" | "quick exit" | "quick-exit" => StatusTag::QuickExit,
            _ => StatusTag::Activity(label.to_string()),
        }
    }

    /// Exclusive tags replace every other tag and force the member out of the queue
    pub fn is_exclusive(&self) -> bool {
        matches!(self, StatusTag::Lunch | StatusTag::Away | StatusTag::QuickExit)
    }

    /// Reserved tags are managed by the engine and cannot be set directly
    pub fn is_reserved(&self) -> bool {
        matches!(self, StatusTag::Holding | StatusTag::Unavailable)
    }

    pub fn label(&self) -> &str {
        match self {
            StatusTag::Holding => "Holding",
            StatusTag::Unavailable => "Unavailable",
            StatusTag::Lunch => "Lunch",
            StatusTag::Away => "Away",
            StatusTag::QuickExit => "Quick Exit",
            StatusTag::Activity(name) => name,
        }
    }
}

impl std::fmt::Display for StatusTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A member's composite status.
///
/// `Holding`, when present, is always the first tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLine {
    tags: Vec<StatusTag>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `Unavailable` sentinel on its own
    pub fn unavailable() -> Self {
        Self::only(StatusTag::Unavailable)
    }

    /// A line holding exactly one tag
    pub fn only(tag: StatusTag) -> Self {
        Self { tags: vec![tag] }
    }

    pub fn tags(&self) -> &[StatusTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &StatusTag) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_holding(&self) -> bool {
        self.contains(&StatusTag::Holding)
    }

    /// True when the line is exactly the `Unavailable` sentinel
    pub fn is_unavailable(&self) -> bool {
        self.tags == [StatusTag::Unavailable]
    }

    /// True when the line is exactly `Holding` and nothing else
    pub fn is_holding_only(&self) -> bool {
        self.tags == [StatusTag::Holding]
    }

    /// The exclusive tag this line is set to, if any
    pub fn exclusive(&self) -> Option<&StatusTag> {
        match self.tags.as_slice() {
            [tag] if tag.is_exclusive() => Some(tag),
            _ => None,
        }
    }

    /// Put `Holding` in front, dropping the `Unavailable` sentinel
    pub fn take_baton(&mut self) {
        if self.is_holding() {
            return;
        }
        self.tags.retain(|t| *t != StatusTag::Unavailable);
        self.tags.insert(0, StatusTag::Holding);
    }

    /// Remove `Holding`, leaving the other tags in place
    pub fn drop_baton(&mut self) {
        self.tags.retain(|t| *t != StatusTag::Holding);
    }

    /// Append a regular tag, keeping `Holding` in front.
    ///
    /// Repeated tags are kept as-is.
    pub fn push_activity(&mut self, tag: StatusTag) {
        self.tags.retain(|t| *t != StatusTag::Unavailable);
        self.tags.push(tag);
        // stable: the other tags keep their order
        self.tags.sort_by_key(|t| *t != StatusTag::Holding);
    }

    /// Drop `Unavailable` and the exclusive tags, keeping activities and `Holding`
    pub fn clear_absence(&mut self) {
        self.tags
            .retain(|t| *t != StatusTag::Unavailable && !t.is_exclusive());
    }

    /// Remove every occurrence of `tag`, returning whether anything was removed
    pub fn remove(&mut self, tag: &StatusTag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(STATUS_SEPARATOR)?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str) -> StatusTag {
        StatusTag::Activity(name.to_string())
    }

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(StatusTag::parse("Lunch"), StatusTag::Lunch);
        assert_eq!(StatusTag::parse(" away "), StatusTag::Away);
        assert_eq!(StatusTag::parse("Quick Exit"), StatusTag::QuickExit);
        assert_eq!(StatusTag::parse("QuickExit"), StatusTag::QuickExit);
        assert_eq!(StatusTag::parse("holding"), StatusTag::Holding);
        assert_eq!(StatusTag::parse("Meeting"), activity("Meeting"));
    }

    #[test]
    fn test_exclusive_and_reserved() {
        assert!(StatusTag::Lunch.is_exclusive());
        assert!(StatusTag::QuickExit.is_exclusive());
        assert!(!activity("Meeting").is_exclusive());
        assert!(StatusTag::Holding.is_reserved());
        assert!(StatusTag::Unavailable.is_reserved());
        assert!(!StatusTag::Away.is_reserved());
    }

    #[test]
    fn test_activity_keeps_holding_first() {
        let mut line = StatusLine::only(StatusTag::Holding);
        line.push_activity(activity("Meeting"));
        line.push_activity(activity("HP/Email"));
        assert_eq!(line.to_string(), "Holding | Meeting | HP/Email");
        assert_eq!(line.tags()[0], StatusTag::Holding);
    }

    #[test]
    fn test_activity_replaces_unavailable() {
        let mut line = StatusLine::unavailable();
        line.push_activity(activity("Training"));
        assert_eq!(line.tags(), &[activity("Training")]);
    }

    #[test]
    fn test_repeated_activity_is_kept() {
        let mut line = StatusLine::new();
        line.push_activity(activity("Meeting"));
        line.push_activity(activity("Meeting"));
        assert_eq!(line.tags().len(), 2);
    }

    #[test]
    fn test_take_and_drop_baton() {
        let mut line = StatusLine::only(activity("Meeting"));
        line.take_baton();
        assert_eq!(line.to_string(), "Holding | Meeting");

        // taking twice is a no-op
        line.take_baton();
        assert_eq!(line.tags().len(), 2);

        line.drop_baton();
        assert_eq!(line.to_string(), "Meeting");

        let mut sentinel = StatusLine::unavailable();
        sentinel.take_baton();
        assert!(sentinel.is_holding_only());
    }

    #[test]
    fn test_remove_is_structural() {
        let mut line = StatusLine::new();
        line.push_activity(activity("Meeting"));
        line.push_activity(activity("Meeting prep"));
        assert!(line.remove(&activity("Meeting")));
        assert_eq!(line.tags(), &[activity("Meeting prep")]);
        assert!(!line.remove(&StatusTag::Lunch));
    }

    #[test]
    fn test_clear_absence() {
        let mut line = StatusLine::only(StatusTag::Lunch);
        line.push_activity(activity("Meeting"));
        line.clear_absence();
        assert_eq!(line.tags(), &[activity("Meeting")]);

        let mut sentinel = StatusLine::unavailable();
        sentinel.clear_absence();
        assert!(sentinel.is_empty());
    }

    #[test]
    fn test_exclusive_accessor() {
        assert_eq!(StatusLine::only(StatusTag::Away).exclusive(), Some(&StatusTag::Away));
        assert_eq!(StatusLine::unavailable().exclusive(), None);
    }
}
