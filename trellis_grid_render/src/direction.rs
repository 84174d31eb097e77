// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing-direction awareness.
//!
//! The grid is laid out along a direction-aware *front/end* axis rather than
//! hardcoded left/right: front is the leading edge (left in left-to-right
//! layout, right in right-to-left layout). Stylesheet derivation and padding
//! selection are the only places that need the concrete CSS side names.

/// The widget's writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left-to-right: front is `left`, end is `right`.
    #[default]
    Ltr,
    /// Right-to-left: front is `right`, end is `left`.
    Rtl,
}

impl Direction {
    /// CSS-side name of the leading edge.
    #[must_use]
    pub const fn front(&self) -> &'static str {
        match self {
            Self::Ltr => "left",
            Self::Rtl => "right",
        }
    }

    /// CSS-side name of the trailing edge.
    #[must_use]
    pub const fn end(&self) -> &'static str {
        match self {
            Self::Ltr => "right",
            Self::Rtl => "left",
        }
    }

    /// Returns `true` under right-to-left layout.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Self::Rtl)
    }
}
