//! Reveal states
//!
//! `Pending -> Visible`, and nothing leaves `Visible`.

/// Animation state of a reveal element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealState {
    Pending,
    /// Terminal
    Visible,
}

/// The reveal elements found at setup, with their states.
#[derive(Debug)]
pub struct RevealSet<N> {
    entries: Vec<(N, RevealState)>,
}

impl<N> Default for RevealSet<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N: PartialEq> RevealSet<N> {
    /// Track `nodes`, all pending.
    pub fn new(nodes: impl IntoIterator<Item = N>) -> Self {
        Self {
            entries: nodes
                .into_iter()
                .map(|n| (n, RevealState::Pending))
                .collect(),
        }
    }

    /// Track `nodes`, keeping the state of those already tracked here.
    ///
    /// Nodes no longer present are dropped; new ones start pending.
    pub fn refreshed(&self, nodes: impl IntoIterator<Item = N>) -> Self {
        Self {
            entries: nodes
                .into_iter()
                .map(|n| {
                    let state = self.state_of(&n).unwrap_or(RevealState::Pending);
                    (n, state)
                })
                .collect(),
        }
    }

    pub fn state_of(&self, node: &N) -> Option<RevealState> {
        self.entries
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, state)| *state)
    }

    /// Move `node` to `Visible`.
    ///
    /// Returns `true` only for an actual `Pending -> Visible` transition;
    /// unknown or already visible nodes return `false`.
    pub fn mark_visible(&mut self, node: &N) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == node) {
            Some((_, state @ RevealState::Pending)) => {
                *state = RevealState::Visible;
                true
            }
            _ => false,
        }
    }

    /// Tracked nodes currently in `state`, in document order.
    pub fn nodes_in(&self, state: RevealState) -> impl Iterator<Item = &N> {
        self.entries
            .iter()
            .filter(move |(_, s)| *s == state)
            .map(|(n, _)| n)
    }

    pub fn pending_count(&self) -> usize {
        self.count(RevealState::Pending)
    }

    pub fn visible_count(&self) -> usize {
        self.count(RevealState::Visible)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, wanted: RevealState) -> usize {
        self.entries.iter().filter(|(_, s)| *s == wanted).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_once() {
        let mut set = RevealSet::new([1, 2, 3]);
        assert_eq!(set.pending_count(), 3);

        assert!(set.mark_visible(&2));
        assert!(!set.mark_visible(&2));
        assert_eq!(set.state_of(&2), Some(RevealState::Visible));
        assert_eq!(set.state_of(&1), Some(RevealState::Pending));
        assert_eq!(set.visible_count(), 1);
    }

    #[test]
    fn refreshing_keeps_visible_nodes_visible() {
        let mut set = RevealSet::new([1, 2]);
        set.mark_visible(&1);

        let set = set.refreshed([1, 3]);
        assert_eq!(set.state_of(&1), Some(RevealState::Visible));
        assert_eq!(set.state_of(&2), None);
        assert_eq!(set.state_of(&3), Some(RevealState::Pending));
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut set = RevealSet::new([1]);
        assert!(!set.mark_visible(&9));
        assert_eq!(set.state_of(&9), None);
        assert_eq!(set.len(), 1);
    }
}
