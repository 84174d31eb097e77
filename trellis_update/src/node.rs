// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The memoized derivation with a commit-on-change callback.

use alloc::boxed::Box;

/// Outcome of pulling an [`Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulled {
    /// The recomputed value equalled the last committed one; no commit ran.
    Unchanged,
    /// At least one commit callback ran during this pull.
    Committed,
}

impl Pulled {
    /// Combines two outcomes; `Committed` wins.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unchanged, Self::Unchanged) => Self::Unchanged,
            _ => Self::Committed,
        }
    }

    /// Returns `true` if a commit ran.
    #[must_use]
    pub const fn committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Something that can be pulled as part of an update cycle.
///
/// Implemented by [`UpdateNode`] and [`crate::UpdateGroup`]; hosts can
/// implement it directly for bespoke members.
pub trait Update<Cx: ?Sized> {
    /// Recomputes this member against `cx`, committing on change.
    fn pull(&mut self, cx: &mut Cx) -> Pulled;
}

/// A lazily recomputed value with a commit callback invoked only on change.
///
/// `compute` derives the current value from the context; `commit` applies it
/// back to the context (store a field, replace a stylesheet, arm an emitter).
/// The node stores the last committed value and compares with `==`, so a
/// pull with unchanged inputs is a pure no-op apart from the recompute
/// itself.
pub struct UpdateNode<Cx: ?Sized, V> {
    compute: Box<dyn FnMut(&mut Cx) -> V>,
    commit: Box<dyn FnMut(&mut Cx, &V)>,
    committed: Option<V>,
}

impl<Cx: ?Sized, V> core::fmt::Debug for UpdateNode<Cx, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpdateNode")
            .field("has_committed", &self.committed.is_some())
            .finish_non_exhaustive()
    }
}

impl<Cx: ?Sized, V> UpdateNode<Cx, V> {
    /// Creates a node from a compute and a commit callback.
    #[must_use]
    pub fn new(
        compute: impl FnMut(&mut Cx) -> V + 'static,
        commit: impl FnMut(&mut Cx, &V) + 'static,
    ) -> Self {
        Self {
            compute: Box::new(compute),
            commit: Box::new(commit),
            committed: None,
        }
    }

    /// The last committed value, if any pull has committed yet.
    #[must_use]
    pub fn last_committed(&self) -> Option<&V> {
        self.committed.as_ref()
    }
}

impl<Cx: ?Sized, V: PartialEq> Update<Cx> for UpdateNode<Cx, V> {
    fn pull(&mut self, cx: &mut Cx) -> Pulled {
        let value = (self.compute)(cx);
        if self.committed.as_ref() == Some(&value) {
            return Pulled::Unchanged;
        }
        (self.commit)(cx, &value);
        self.committed = Some(value);
        Pulled::Committed
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Pulled, Update, UpdateNode};

    #[derive(Default)]
    struct Cx {
        input: i32,
        computes: usize,
        commits: Vec<i32>,
    }

    fn doubling_node() -> UpdateNode<Cx, i32> {
        UpdateNode::new(
            |cx: &mut Cx| {
                cx.computes += 1;
                cx.input * 2
            },
            |cx, value| cx.commits.push(*value),
        )
    }

    #[test]
    fn commits_only_on_change() {
        let mut cx = Cx::default();
        let mut node = doubling_node();

        assert_eq!(node.pull(&mut cx), Pulled::Committed);
        assert_eq!(node.pull(&mut cx), Pulled::Unchanged);
        assert_eq!(node.pull(&mut cx), Pulled::Unchanged);
        // Every pull recomputes, only the first committed.
        assert_eq!(cx.computes, 3);
        assert_eq!(cx.commits, vec![0]);

        cx.input = 21;
        assert_eq!(node.pull(&mut cx), Pulled::Committed);
        assert_eq!(cx.commits, vec![0, 42]);
        assert_eq!(node.last_committed(), Some(&42));
    }

    #[test]
    fn pulled_or_prefers_committed() {
        assert_eq!(Pulled::Unchanged.or(Pulled::Unchanged), Pulled::Unchanged);
        assert_eq!(Pulled::Unchanged.or(Pulled::Committed), Pulled::Committed);
        assert_eq!(Pulled::Committed.or(Pulled::Unchanged), Pulled::Committed);
        assert!(Pulled::Committed.committed());
        assert!(!Pulled::Unchanged.committed());
    }
}
