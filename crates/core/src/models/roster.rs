//! Roster and activity catalog models

use serde::Serialize;

use super::StatusTag;

/// The fixed, ordered list of members configured at startup.
///
/// Serialize-only; build it with `Roster::new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// Build a roster, dropping blank and repeated names.
    ///
    /// Use `BatonConfig` when these should be reported instead.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::default();
        for name in members {
            let name: String = name.into();
            let name = name.trim();
            if !name.is_empty() && !roster.contains(name) {
                roster.members.push(name.to_string());
            }
        }
        roster
    }

    /// Map an input name to the roster's own entry
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.members
            .iter()
            .find(|m| m.as_str() == name)
            .map(|m| m.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.as_str())
    }

    /// Member at a 1-based position
    pub fn by_position(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.members.get(i))
            .map(|m| m.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Regular activities members may combine with the baton
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagCatalog {
    activities: Vec<String>,
}

impl TagCatalog {
    pub fn new<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self {
            activities: Vec::new(),
        };
        for name in activities {
            let name: String = name.into();
            let name = name.trim();
            if !name.is_empty() && catalog.lookup(name).is_none() {
                catalog.activities.push(name.to_string());
            }
        }
        catalog
    }

    /// Activities offered out of the box
    pub fn default_activities() -> &'static [&'static str] {
        &["HP/Email", "WhatsApp", "Training", "Meeting"]
    }

    /// Whether `tag` may be set through the status operation
    pub fn allows(&self, tag: &StatusTag) -> bool {
        self.canonical(tag).is_some()
    }

    /// The tag as the catalog spells it, or `None` when it may not be set.
    ///
    /// Activities match regardless of case.
    pub fn canonical(&self, tag: &StatusTag) -> Option<StatusTag> {
        match tag {
            StatusTag::Holding | StatusTag::Unavailable => None,
            StatusTag::Activity(name) => self
                .lookup(name)
                .map(|a| StatusTag::Activity(a.to_string())),
            exclusive => Some(exclusive.clone()),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        self.activities
            .iter()
            .find(|a| a.to_lowercase() == name)
            .map(|a| a.as_str())
    }

    pub fn activities(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|a| a.as_str())
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::new(Self::default_activities().iter().copied())
    }
}
