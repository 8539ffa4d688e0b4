//! Insertion-ordered, duplicate-free queue of member names

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queue {
    members: Vec<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.position(member).is_some()
    }

    pub fn position(&self, member: &str) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }

    /// Append to the back. Returns false if already queued.
    pub fn push(&mut self, member: &str) -> bool {
        if self.contains(member) {
            return false;
        }
        self.members.push(member.to_string());
        true
    }

    /// Remove a member. Returns false if not queued.
    pub fn remove(&mut self, member: &str) -> bool {
        match self.position(member) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Members after `index` in wrap order, stopping before `index` comes round again
    pub fn after(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        let len = self.members.len();
        (1..len).map(move |step| self.members[(index + step) % len].as_str())
    }

    /// First member after `index` (wrapping) accepted by `pred`; never `index` itself
    pub fn next_after<F>(&self, index: usize, pred: F) -> Option<&str>
    where
        F: FnMut(&&str) -> bool,
    {
        self.after(index).find(pred)
    }

    /// First member from the front accepted by `pred`
    pub fn first_where<F>(&self, pred: F) -> Option<&str>
    where
        F: FnMut(&&str) -> bool,
    {
        self.iter().find(pred)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(names: &[&str]) -> Queue {
        let mut q = Queue::new();
        for name in names {
            q.push(name);
        }
        q
    }

    #[test]
    fn test_push_rejects_duplicates() {
        let mut q = queue(&["Alice", "Bob"]);
        assert!(!q.push("Alice"));
        assert_eq!(q.len(), 2);
        assert!(q.remove("Alice"));
        assert!(!q.remove("Alice"));
        assert_eq!(q.as_slice(), &["Bob".to_string()]);
    }

    #[test]
    fn test_after_wraps_and_skips_start() {
        let q = queue(&["Alice", "Bob", "Carol", "Dave"]);
        let order: Vec<_> = q.after(2).collect();
        assert_eq!(order, vec!["Dave", "Alice", "Bob"]);
    }

    #[test]
    fn test_after_single_member_is_empty() {
        let q = queue(&["Alice"]);
        assert_eq!(q.after(0).count(), 0);
        assert_eq!(Queue::new().after(0).count(), 0);
    }

    #[test]
    fn test_next_after_with_predicate() {
        let q = queue(&["Alice", "Bob", "Carol"]);
        assert_eq!(q.next_after(0, |m| *m != "Bob"), Some("Carol"));
        assert_eq!(q.next_after(2, |_| true), Some("Alice"));
        assert_eq!(q.next_after(1, |m| *m == "Bob"), None);
    }

    #[test]
    fn test_first_where() {
        let q = queue(&["Alice", "Bob", "Carol"]);
        assert_eq!(q.first_where(|m| m.starts_with('C')), Some("Carol"));
        assert_eq!(q.first_where(|_| false), None);
    }
}
