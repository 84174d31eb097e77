// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The theme/token lookup contract.
//!
//! The renderer never hardcodes geometry or colors; everything layout-derived
//! comes from a [`Theme`] keyed by [`Token`]. A missing or wrongly-shaped
//! token is a fatal configuration error (it indicates a malformed theme),
//! propagated with `?` and never caught.

use hashbrown::HashMap;

use crate::direction::Direction;
use crate::error::RenderError;

/// The theme tokens the grid renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Uniform data-row height.
    RowHeight,
    /// Header row height.
    HeaderRowHeight,
    /// Horizontal border drawn between rows.
    CellHBorder,
    /// Vertical border drawn between cells.
    CellVBorder,
    /// Vertical border drawn between header cells.
    HeaderCellVBorder,
    /// Border drawn under the header row.
    HeaderBottomBorder,
    /// Cell content padding, split by writing direction.
    CellPadding,
    /// Header cell content padding, split by writing direction.
    HeaderCellPadding,
    /// Background color of odd rows.
    OddRowBackgroundColor,
    /// Background color of even rows.
    EvenRowBackgroundColor,
    /// Cell text color.
    CellColor,
    /// Header row background color.
    HeaderRowBackgroundColor,
    /// Header cell text color.
    HeaderCellColor,
    /// Cursor over body cells.
    CellCursor,
    /// Cursor over header cells.
    HeaderCursor,
    /// Body cell font family.
    CellFontFamily,
    /// Body cell font size.
    CellFontSize,
    /// Header cell font family.
    HeaderCellFontFamily,
    /// Header cell font size.
    HeaderCellFontSize,
    /// Widget background color.
    BackgroundColor,
}

/// A border token value: numeric width plus the raw CSS shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyle {
    /// Border width in logical pixels.
    pub width: f64,
    /// Raw CSS border shorthand, e.g. `1px solid #e0e0e0`.
    pub raw: String,
}

/// A padding token value, split by writing direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalPadding {
    /// CSS padding shorthand for left-to-right layout.
    pub ltr: String,
    /// CSS padding shorthand for right-to-left layout.
    pub rtl: String,
}

impl DirectionalPadding {
    /// The shorthand for the given direction.
    #[must_use]
    pub fn for_direction(&self, direction: Direction) -> &str {
        if direction.is_rtl() {
            &self.rtl
        } else {
            &self.ltr
        }
    }
}

/// A theme token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A numeric value in logical pixels.
    Number(f64),
    /// A textual value (color, cursor, font family, CSS size).
    Text(String),
    /// A border value.
    Border(BorderStyle),
    /// A direction-split padding value.
    Padding(DirectionalPadding),
}

/// The theme lookup contract.
///
/// Object-safe so the renderer can hold `Box<dyn Theme>` and thread
/// `&dyn Theme` into cell renderers.
pub trait Theme {
    /// Returns the value for `token`, or `None` if the theme does not
    /// define it.
    fn value(&self, token: Token) -> Option<TokenValue>;
}

/// Looks up a numeric token.
pub fn metric(theme: &dyn Theme, token: Token) -> Result<f64, RenderError> {
    match theme.value(token) {
        Some(TokenValue::Number(value)) => Ok(value),
        Some(_) => Err(RenderError::TokenType {
            token,
            expected: "numeric",
        }),
        None => Err(RenderError::MissingToken(token)),
    }
}

/// Looks up a textual token.
pub fn text(theme: &dyn Theme, token: Token) -> Result<String, RenderError> {
    match theme.value(token) {
        Some(TokenValue::Text(value)) => Ok(value),
        Some(_) => Err(RenderError::TokenType {
            token,
            expected: "textual",
        }),
        None => Err(RenderError::MissingToken(token)),
    }
}

/// Looks up a border token.
pub fn border(theme: &dyn Theme, token: Token) -> Result<BorderStyle, RenderError> {
    match theme.value(token) {
        Some(TokenValue::Border(value)) => Ok(value),
        Some(_) => Err(RenderError::TokenType {
            token,
            expected: "border",
        }),
        None => Err(RenderError::MissingToken(token)),
    }
}

/// Looks up a padding token.
pub fn padding(theme: &dyn Theme, token: Token) -> Result<DirectionalPadding, RenderError> {
    match theme.value(token) {
        Some(TokenValue::Padding(value)) => Ok(value),
        Some(_) => Err(RenderError::TokenType {
            token,
            expected: "padding",
        }),
        None => Err(RenderError::MissingToken(token)),
    }
}

/// A map-backed [`Theme`], convenient for hosts with static themes and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MapTheme {
    values: HashMap<Token, TokenValue>,
}

impl MapTheme {
    /// Creates an empty theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a token value, replacing any previous one.
    pub fn set(&mut self, token: Token, value: TokenValue) -> &mut Self {
        self.values.insert(token, value);
        self
    }

    /// Removes a token value.
    pub fn unset(&mut self, token: Token) -> &mut Self {
        self.values.remove(&token);
        self
    }
}

impl Theme for MapTheme {
    fn value(&self, token: Token) -> Option<TokenValue> {
        self.values.get(&token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{MapTheme, Token, TokenValue, border, metric, text};
    use crate::error::RenderError;

    #[test]
    fn typed_lookups_enforce_shape() {
        let mut theme = MapTheme::new();
        theme
            .set(Token::RowHeight, TokenValue::Number(20.0))
            .set(Token::CellColor, TokenValue::Text("#333".into()));

        assert_eq!(metric(&theme, Token::RowHeight), Ok(20.0));
        assert_eq!(text(&theme, Token::CellColor), Ok("#333".into()));

        assert_eq!(
            metric(&theme, Token::CellColor),
            Err(RenderError::TokenType {
                token: Token::CellColor,
                expected: "numeric",
            })
        );
        assert_eq!(
            border(&theme, Token::CellHBorder),
            Err(RenderError::MissingToken(Token::CellHBorder))
        );
    }
}
