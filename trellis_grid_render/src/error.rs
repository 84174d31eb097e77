// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration-error taxonomy.
//!
//! Only malformed configuration is an error. Transient data absence (a row
//! deleted between range computation and paint) is recovered locally by
//! skipping and never surfaces here.

use thiserror::Error;

use crate::source::ColumnId;
use crate::theme::Token;

/// A fatal configuration error, propagated to the host.
///
/// There is no retry policy: a failed render cycle is simply followed by the
/// next one, which re-derives everything from current inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The theme has no value for a token the renderer needs.
    #[error("theme is missing a value for token `{0:?}`")]
    MissingToken(Token),
    /// The theme value for a token has the wrong shape.
    #[error("theme token `{token:?}` is not a {expected} value")]
    TokenType {
        /// The token that was looked up.
        token: Token,
        /// The shape the renderer expected.
        expected: &'static str,
    },
    /// A column id from the visible set has no column definition.
    #[error("no column is defined for id `{0}`")]
    UnknownColumn(ColumnId),
    /// A column index inside the computed range has no column id.
    #[error("no column id is defined for visible index {0}")]
    UnknownColumnIndex(usize),
}
