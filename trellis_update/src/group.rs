// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered collections of update members.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{Pulled, Update};

/// An ordered list of [`Update`] members pulled together.
///
/// `pull` forwards to each member in registration order. The order is part
/// of the contract: a later member's `compute` may read context state set by
/// an earlier member's `commit` (for example, a notifier node reading the
/// range a previous node just stored).
///
/// Groups implement [`Update`] themselves, so they nest.
pub struct UpdateGroup<Cx: ?Sized> {
    members: Vec<Box<dyn Update<Cx>>>,
}

impl<Cx: ?Sized> core::fmt::Debug for UpdateGroup<Cx> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpdateGroup")
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl<Cx: ?Sized> Default for UpdateGroup<Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx: ?Sized> UpdateGroup<Cx> {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Appends a member; it will be pulled after all existing members.
    pub fn add(&mut self, member: impl Update<Cx> + 'static) {
        self.members.push(Box::new(member));
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no members are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pulls every member in registration order.
    pub fn pull(&mut self, cx: &mut Cx) -> Pulled {
        let mut outcome = Pulled::Unchanged;
        for member in &mut self.members {
            outcome = outcome.or(member.pull(cx));
        }
        outcome
    }
}

impl<Cx: ?Sized> Update<Cx> for UpdateGroup<Cx> {
    fn pull(&mut self, cx: &mut Cx) -> Pulled {
        Self::pull(self, cx)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::UpdateGroup;
    use crate::{Pulled, UpdateNode};

    #[derive(Default)]
    struct Cx {
        input: u32,
        stored: u32,
        log: Vec<&'static str>,
    }

    #[test]
    fn members_run_in_registration_order() {
        let mut group = UpdateGroup::new();
        // First node commits a derived value into the context…
        group.add(UpdateNode::new(
            |cx: &mut Cx| cx.input + 1,
            |cx, value| {
                cx.stored = *value;
                cx.log.push("store");
            },
        ));
        // …and the second node's compute reads what the first committed.
        group.add(UpdateNode::new(
            |cx: &mut Cx| cx.stored * 10,
            |cx, _| cx.log.push("notify"),
        ));

        let mut cx = Cx::default();
        assert_eq!(group.pull(&mut cx), Pulled::Committed);
        assert_eq!(cx.stored, 1);
        assert_eq!(cx.log, vec!["store", "notify"]);

        // Idempotence: a second pull with unchanged inputs commits nothing.
        assert_eq!(group.pull(&mut cx), Pulled::Unchanged);
        assert_eq!(cx.log, vec!["store", "notify"]);
    }

    #[test]
    fn groups_nest() {
        let mut inner = UpdateGroup::new();
        inner.add(UpdateNode::new(
            |cx: &mut Cx| cx.input,
            |cx, _| cx.log.push("inner"),
        ));

        let mut outer = UpdateGroup::new();
        outer.add(inner);
        outer.add(UpdateNode::new(
            |cx: &mut Cx| cx.input,
            |cx, _| cx.log.push("outer"),
        ));
        assert_eq!(outer.len(), 2);
        assert!(!outer.is_empty());

        let mut cx = Cx::default();
        assert_eq!(outer.pull(&mut cx), Pulled::Committed);
        assert_eq!(cx.log, vec!["inner", "outer"]);
    }
}
