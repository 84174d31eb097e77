// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Update: dependency-ordered, commit-on-change recomputation.
//!
//! This crate provides the small reactive layer used by the Trellis grid
//! renderer to keep derived artifacts (stylesheets, the visible range) in
//! sync with their inputs without ever recomputing them redundantly:
//!
//! - [`UpdateNode`]: wraps a `compute` closure and a `commit` closure. A pull
//!   recomputes the value, compares it with the last committed value using
//!   value equality, and runs `commit` only on change.
//! - [`UpdateGroup`]: an ordered collection of nodes (or nested groups),
//!   pulled in registration order. Order matters: a later member's `compute`
//!   may read context state written by an earlier member's `commit`.
//! - [`DebouncedEmitter`]: coalesces a high-frequency trigger into a single
//!   notification after a quiet period of one animation-frame interval.
//!
//! Every compute and commit receives one explicit `&mut Cx` context instead
//! of capturing shared state. This keeps the data flow one-directional —
//! invalidation, recomputation, and observation are separate steps owned by
//! the caller — and makes re-entrant pulls unrepresentable: while a pull
//! borrows the context, nothing else can start another one. Callers that
//! receive invalidations *during* a pull are expected to defer them until
//! the pull returns rather than recursing.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_update::{Pulled, Update, UpdateGroup, UpdateNode};
//!
//! #[derive(Default)]
//! struct Cx {
//!     input: i32,
//!     committed: Vec<i32>,
//! }
//!
//! let mut group = UpdateGroup::new();
//! group.add(UpdateNode::new(
//!     |cx: &mut Cx| cx.input * 2,
//!     |cx, value| cx.committed.push(*value),
//! ));
//!
//! let mut cx = Cx::default();
//! assert_eq!(group.pull(&mut cx), Pulled::Committed);
//! // Unchanged inputs: the second pull commits nothing.
//! assert_eq!(group.pull(&mut cx), Pulled::Unchanged);
//! assert_eq!(cx.committed, vec![0]);
//! ```
//!
//! Timestamps for [`DebouncedEmitter`] are caller-supplied monotonic
//! milliseconds; the crate never reads a clock of its own.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod group;
mod node;

pub use debounce::{DebouncedEmitter, FRAME_INTERVAL_MS};
pub use group::UpdateGroup;
pub use node::{Pulled, Update, UpdateNode};
