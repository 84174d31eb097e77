// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivation of the two injected style rule sets.
//!
//! Both stylesheets are derived values: pure functions of the theme, the
//! writing direction, the column set, and the row count. The update graph
//! recomputes them on every pull and replaces the injected rule text only
//! when the derived CSS actually changed.

use std::fmt::Write as _;

use kurbo::Size;

use crate::direction::Direction;
use crate::error::RenderError;
use crate::source::ColumnId;
use crate::theme::{Theme, Token, border, metric, padding, text};

/// Incremental builder for compact CSS rule text.
#[derive(Debug, Default)]
pub struct CssBuilder {
    out: String,
    open: bool,
}

impl CssBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new rule, closing the previous one.
    pub fn rule(&mut self, selector: &str) -> &mut Self {
        self.close();
        self.out.push_str(selector);
        self.out.push('{');
        self.open = true;
        self
    }

    /// Appends a `name:value;` declaration to the open rule.
    pub fn property(&mut self, name: &str, value: &str) -> &mut Self {
        debug_assert!(self.open, "property() before any rule()");
        let _ = write!(self.out, "{name}:{value};");
        self
    }

    /// Appends a `name:<value>px;` declaration to the open rule.
    pub fn property_px(&mut self, name: &str, value: f64) -> &mut Self {
        debug_assert!(self.open, "property_px() before any rule()");
        let _ = write!(self.out, "{name}:{value}px;");
        self
    }

    /// Closes any open rule and returns the accumulated CSS text.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.close();
        self.out
    }

    fn close(&mut self) {
        if self.open {
            self.out.push('}');
            self.open = false;
        }
    }
}

/// Sizes of the header and content canvases, derived from theme and data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// Header canvas size: total column width by header row height.
    pub header: Size,
    /// Content canvas size: total column width by total row extent.
    pub content: Size,
}

/// Computes the canvas sizes.
///
/// Content height is `rows * row_height + (rows - 1) * h_border` — borders
/// sit between rows, so the last row has none.
pub fn compute_canvas_rect(
    theme: &dyn Theme,
    row_count: usize,
    column_widths: impl IntoIterator<Item = f64>,
) -> Result<CanvasRect, RenderError> {
    let row_height = metric(theme, Token::RowHeight)?;
    let header_row_height = metric(theme, Token::HeaderRowHeight)?;
    let h_border = border(theme, Token::CellHBorder)?;

    let width: f64 = column_widths.into_iter().sum();
    let height = if row_count == 0 {
        0.0
    } else {
        let rows = row_count as f64;
        rows * row_height + (rows - 1.0) * h_border.width
    };

    Ok(CanvasRect {
        header: Size::new(width, header_row_height),
        content: Size::new(width, height),
    })
}

/// Derives the layout stylesheet: widget frame, viewport, and canvas
/// geometry.
pub fn layout_stylesheet(
    theme: &dyn Theme,
    direction: Direction,
    root_class: &str,
    widget_size: Size,
    canvas: &CanvasRect,
) -> Result<String, RenderError> {
    let header_bottom = border(theme, Token::HeaderBottomBorder)?;
    let background = text(theme, Token::BackgroundColor)?;

    let mut css = CssBuilder::new();

    css.rule(&format!(".{root_class}"))
        .property_px("width", widget_size.width)
        .property_px("height", widget_size.height)
        .property("background-color", &background);

    css.rule(&format!(".{root_class} .trellis-content-viewport"))
        .property("overflow", "auto")
        .property("position", "absolute")
        .property_px("top", canvas.header.height + header_bottom.width)
        .property_px(direction.front(), 0.0)
        .property_px(direction.end(), 0.0)
        .property_px("bottom", 0.0);

    css.rule(&format!(
        ".{root_class} .trellis-content-viewport .trellis-canvas-container"
    ))
    .property("overflow", "hidden")
    .property("position", "relative")
    .property_px("width", canvas.content.width)
    .property_px("height", canvas.content.height);

    css.rule(&format!(".{root_class} .trellis-header-viewport"))
        .property("overflow", "hidden")
        .property("position", "absolute")
        .property("width", "100%")
        .property_px("height", canvas.header.height + header_bottom.width);

    css.rule(&format!(
        ".{root_class} .trellis-header-viewport .trellis-canvas-container"
    ))
    .property("overflow", "hidden")
    .property("position", "relative")
    .property_px("width", canvas.header.width)
    .property_px("height", canvas.header.height);

    Ok(css.finish())
}

/// Derives the cell stylesheet: static header/row/cell rules plus one
/// offset/width rule pair per visible column.
///
/// `columns` is the visible column set in display order, paired with each
/// column's effective width.
pub fn cell_stylesheet(
    theme: &dyn Theme,
    direction: Direction,
    root_class: &str,
    columns: &[(&ColumnId, f64)],
) -> Result<String, RenderError> {
    let row_height = metric(theme, Token::RowHeight)?;
    let header_row_height = metric(theme, Token::HeaderRowHeight)?;
    let cell_h_border = border(theme, Token::CellHBorder)?;
    let cell_v_border = border(theme, Token::CellVBorder)?;
    let header_v_border = border(theme, Token::HeaderCellVBorder)?;
    let header_bottom = border(theme, Token::HeaderBottomBorder)?;
    let cell_padding = padding(theme, Token::CellPadding)?;
    let header_padding = padding(theme, Token::HeaderCellPadding)?;

    let scoped = |class: &str| format!(".{root_class} {class}");
    let mut css = CssBuilder::new();

    css.rule(&scoped(".trellis-header-cell"))
        .property("cursor", &text(theme, Token::HeaderCursor)?)
        .property("font-family", &text(theme, Token::HeaderCellFontFamily)?)
        .property("font-size", &text(theme, Token::HeaderCellFontSize)?)
        .property(
            "background-color",
            &text(theme, Token::HeaderRowBackgroundColor)?,
        )
        .property("color", &text(theme, Token::HeaderCellColor)?)
        .property_px("height", header_row_height);

    css.rule(&scoped(".trellis-header-cell-content"))
        .property_px("top", 0.0)
        .property_px(direction.front(), 0.0)
        .property_px(direction.end(), 0.0)
        .property("padding", header_padding.for_direction(direction))
        .property_px("height", header_row_height)
        .property_px("line-height", header_row_height);

    css.rule(&scoped(".trellis-row"))
        .property_px("height", row_height)
        .property_px("line-height", row_height)
        .property("width", "100%");

    css.rule(&scoped(".trellis-row-border"))
        .property_px("height", cell_h_border.width)
        .property("width", "100%")
        .property("border-bottom", &cell_h_border.raw)
        .property_px("top", row_height);

    css.rule(&scoped(".trellis-cell"))
        .property("cursor", &text(theme, Token::CellCursor)?)
        .property("font-family", &text(theme, Token::CellFontFamily)?)
        .property("font-size", &text(theme, Token::CellFontSize)?)
        .property("color", &text(theme, Token::CellColor)?)
        .property_px("height", row_height);

    css.rule(&scoped(".trellis-row.trellis-row-odd")).property(
        "background-color",
        &text(theme, Token::OddRowBackgroundColor)?,
    );

    css.rule(&scoped(".trellis-row.trellis-row-even")).property(
        "background-color",
        &text(theme, Token::EvenRowBackgroundColor)?,
    );

    css.rule(&scoped(".trellis-header-bottom-border"))
        .property_px("height", header_bottom.width)
        .property("border-bottom", &header_bottom.raw);

    // Column-resize handles on the header cell edges. The first visible
    // column has no preceding edge to drag, so its front handle is hidden.
    css.rule(&scoped(".trellis-header-cell-splitter-front"))
        .property_px(direction.front(), 0.0)
        .property_px("width", 2.0);
    if let Some((first_id, _)) = columns.first() {
        css.rule(&scoped(&format!(
            ".trellis-header-cell-{first_id} > .trellis-header-cell-splitter-front"
        )))
        .property("display", "none");
    }
    css.rule(&scoped(".trellis-header-cell-splitter-end"))
        .property_px(direction.end(), -cell_v_border.width)
        .property_px("width", cell_v_border.width + 2.0);

    css.rule(&scoped(".trellis-cell-content"))
        .property_px("top", 0.0)
        .property_px(direction.front(), 0.0)
        .property_px(direction.end(), 0.0)
        .property("padding", cell_padding.for_direction(direction))
        .property_px("height", row_height)
        .property_px("line-height", row_height);

    let mut front = 0.0;
    for (index, (id, width)) in columns.iter().enumerate() {
        css.rule(&scoped(&format!(
            ".trellis-header-cell.trellis-header-cell-{id}"
        )))
        .property_px(direction.front(), front)
        .property_px("width", *width)
        .property("display", "block");

        if index != columns.len() - 1 {
            css.rule(&scoped(&format!(".trellis-header-cell-border-{id}")))
                .property_px(direction.front(), *width)
                .property_px("width", cell_v_border.width)
                .property(&format!("border-{}", direction.end()), &header_v_border.raw);
        }

        css.rule(&scoped(&format!(".trellis-cell-{id}")))
            .property_px(direction.front(), front)
            .property_px("width", *width);

        front += width;
    }

    Ok(css.finish())
}
