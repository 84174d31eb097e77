// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget-facing controller: invalidation intake, the update graph, and
//! frame driving.
//!
//! [`GridRender`] wires three update nodes (layout stylesheet, cell
//! stylesheet, visible range) into one dependency-ordered graph and two
//! paint workers (header, body) into one scheduler, all over a shared
//! [`GridCx`]. Hosts feed it three things: invalidation notifications when
//! inputs change, scroll offsets, and a frame callback with a monotonic
//! clock. Everything else is derived.

use kurbo::Size;
use trellis_range::{GridRange, RangeInputs, compute_range};
use trellis_schedule::{RenderScheduler, Turn};
use trellis_update::{UpdateGroup, UpdateNode};

use crate::error::RenderError;
use crate::host::{GridHost, ScrollCoordinate};
use crate::paint::GridCx;
use crate::source::{ColumnSource, RowId, RowSource};
use crate::stylesheet::{cell_stylesheet, compute_canvas_rect, layout_stylesheet};
use crate::theme::{Theme, Token, border, metric};

bitflags::bitflags! {
    /// Which external inputs changed since the last refresh.
    ///
    /// Carried for diagnostics; the update graph re-derives everything on
    /// each refresh and memoization keeps unchanged derivations from
    /// committing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Invalidation: u8 {
        /// The widget was resized.
        const GEOMETRY = 1;
        /// The visible column set or a column definition changed.
        const COLUMNS = 1 << 1;
        /// The row count or row identity changed.
        const ROWS = 1 << 2;
        /// The scroll offset changed.
        const SCROLL = 1 << 3;
    }
}

/// What one frame callback accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// At least one paint worker performed work this frame.
    pub painted: bool,
    /// The scheduler has converged; further frames are no-ops until the
    /// next invalidation.
    pub idle: bool,
    /// The debounced range-changed emission fired this frame.
    pub range_changed: bool,
}

/// The range node's committed value.
///
/// Includes the sorted in-range row ids so that a data mutation which keeps
/// the window's indices but replaces the rows under them (same window,
/// different rows) still compares unequal and re-commits.
#[derive(Debug, Clone, PartialEq)]
struct RangeSnapshot {
    range: GridRange,
    row_ids: Vec<RowId>,
}

impl Default for RangeSnapshot {
    fn default() -> Self {
        Self {
            range: GridRange::Empty,
            row_ids: Vec::new(),
        }
    }
}

fn derive_layout<H, R, C>(cx: &GridCx<H, R, C>) -> Result<String, RenderError>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    let rect = compute_canvas_rect(cx.theme.as_ref(), cx.rows.row_count(), cx.column_widths()?)?;
    layout_stylesheet(
        cx.theme.as_ref(),
        cx.direction,
        &cx.root_class,
        cx.widget_size,
        &rect,
    )
}

fn derive_cell<H, R, C>(cx: &GridCx<H, R, C>) -> Result<String, RenderError>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    let ids = cx.columns.visible_column_ids();
    let mut pairs = Vec::with_capacity(ids.len());
    for id in ids {
        let spec = cx
            .columns
            .column_by_id(id)
            .ok_or_else(|| RenderError::UnknownColumn(id.clone()))?;
        pairs.push((id, spec.effective_width()));
    }
    cell_stylesheet(cx.theme.as_ref(), cx.direction, &cx.root_class, &pairs)
}

fn derive_range<H, R, C>(cx: &GridCx<H, R, C>) -> Result<RangeSnapshot, RenderError>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    // Unmeasurable viewport (not attached yet): nothing is visible.
    let Some(metrics) = cx.metrics else {
        return Ok(RangeSnapshot::default());
    };
    let inputs = RangeInputs {
        scroll_top: cx.scroll.top,
        scroll_front: cx.scroll.front,
        viewport_height: metrics.outer.height,
        viewport_client_width: metrics.client.width,
        row_height: metric(cx.theme.as_ref(), Token::RowHeight)?,
        row_border_width: border(cx.theme.as_ref(), Token::CellHBorder)?.width,
        row_count: cx.rows.row_count(),
    };
    let range = compute_range(&inputs, cx.column_widths()?);
    let mut row_ids: Vec<RowId> = range
        .rows()
        .map(|rows| {
            rows.filter_map(|index| cx.rows.row_id_by_index(index))
                .collect()
        })
        .unwrap_or_default();
    row_ids.sort_unstable();
    Ok(RangeSnapshot { range, row_ids })
}

/// The incremental grid renderer.
///
/// Owns the host and data sources for its lifetime. Constructing one mounts
/// the widget structure and performs the initial refresh; dropping (or
/// [`GridRender::stop`]) releases nothing host-side — elements stay with the
/// host.
pub struct GridRender<H, R, C>
where
    H: GridHost + 'static,
    R: RowSource + 'static,
    C: ColumnSource<H> + 'static,
{
    cx: GridCx<H, R, C>,
    graph: UpdateGroup<GridCx<H, R, C>>,
    scheduler: RenderScheduler<GridCx<H, R, C>>,
    pending: Invalidation,
}

impl<H, R, C> std::fmt::Debug for GridRender<H, R, C>
where
    H: GridHost + 'static,
    R: RowSource + 'static,
    C: ColumnSource<H> + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridRender")
            .field("cx", &self.cx)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<H, R, C> GridRender<H, R, C>
where
    H: GridHost + 'static,
    R: RowSource + 'static,
    C: ColumnSource<H> + 'static,
{
    /// Mounts the grid on `host` and performs the initial refresh.
    ///
    /// `root_class` scopes every derived CSS rule to this widget instance
    /// and must be unique among concurrently mounted grids.
    pub fn new(
        host: H,
        rows: R,
        columns: C,
        theme: Box<dyn Theme>,
        direction: crate::Direction,
        root_class: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let cx = GridCx::new(host, rows, columns, theme, direction, root_class);

        let mut graph = UpdateGroup::new();
        // Dependency order: both stylesheets first, then the range node
        // whose commit arms the emitter and re-targets the workers.
        graph.add(UpdateNode::new(
            |cx: &mut GridCx<H, R, C>| {
                let css = derive_layout(cx);
                cx.guard_value(css)
            },
            |cx: &mut GridCx<H, R, C>, css: &Option<String>| {
                if let Some(css) = css {
                    cx.host.replace_stylesheet(&cx.layout_sheet, css);
                    tracing::debug!(bytes = css.len(), "layout stylesheet replaced");
                }
            },
        ));
        graph.add(UpdateNode::new(
            |cx: &mut GridCx<H, R, C>| {
                let css = derive_cell(cx);
                cx.guard_value(css)
            },
            |cx: &mut GridCx<H, R, C>, css: &Option<String>| {
                if let Some(css) = css {
                    cx.host.replace_stylesheet(&cx.cell_sheet, css);
                    tracing::debug!(bytes = css.len(), "cell stylesheet replaced");
                }
            },
        ));
        graph.add(UpdateNode::new(
            |cx: &mut GridCx<H, R, C>| {
                let snapshot = derive_range(cx);
                cx.guard_value(snapshot).unwrap_or_default()
            },
            |cx: &mut GridCx<H, R, C>, snapshot: &RangeSnapshot| {
                cx.range = snapshot.range;
                cx.emitter.invoke(cx.clock_ms);
                tracing::debug!(range = ?snapshot.range, "range committed");
            },
        ));

        let mut scheduler = RenderScheduler::new();
        scheduler.add_worker(800, |cx: &mut GridCx<H, R, C>| {
            let result = cx.render_header_cells();
            cx.guard(result)
        });
        scheduler.add_worker(1000, |cx: &mut GridCx<H, R, C>| {
            let result = cx.render_body_cells();
            cx.guard(result)
        });

        let mut this = Self {
            cx,
            graph,
            scheduler,
            pending: Invalidation::all(),
        };
        this.refresh()?;
        this.scheduler.start();
        Ok(this)
    }

    /// The host, for reading back what was painted.
    pub fn host(&self) -> &H {
        &self.cx.host
    }

    /// Mutable host access, for hosts that carry state of their own.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.cx.host
    }

    /// Mutable row-source access. Callers mutate the data and then call
    /// [`GridRender::notify_row_count_changed`].
    pub fn rows_mut(&mut self) -> &mut R {
        &mut self.cx.rows
    }

    /// Mutable column-source access. Callers mutate the columns and then
    /// call [`GridRender::notify_visible_columns_changed`].
    pub fn columns_mut(&mut self) -> &mut C {
        &mut self.cx.columns
    }

    /// The currently committed visible range.
    #[must_use]
    pub fn range(&self) -> GridRange {
        self.cx.range
    }

    /// Returns `true` once [`GridRender::stop`] has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_stopped()
    }

    /// The widget was resized. A no-op after [`GridRender::stop`].
    ///
    /// As with every notification, `now_ms` is the host's monotonic clock;
    /// a range commit arms the debounce one quiet period after it.
    pub fn notify_resized(&mut self, size: Size, now_ms: f64) -> Result<(), RenderError> {
        self.cx.clock_ms = now_ms;
        self.cx.widget_size = size;
        self.pending |= Invalidation::GEOMETRY;
        self.refresh()
    }

    /// The visible column set or a column definition changed. A no-op after
    /// [`GridRender::stop`].
    pub fn notify_visible_columns_changed(&mut self, now_ms: f64) -> Result<(), RenderError> {
        self.cx.clock_ms = now_ms;
        self.pending |= Invalidation::COLUMNS;
        self.refresh()
    }

    /// The row count or row identity changed. A no-op after
    /// [`GridRender::stop`].
    pub fn notify_row_count_changed(&mut self, now_ms: f64) -> Result<(), RenderError> {
        self.cx.clock_ms = now_ms;
        self.pending |= Invalidation::ROWS;
        self.refresh()
    }

    /// The scroll offset changed. `now_ms` is the host's monotonic clock;
    /// it advances the debounce deadline armed by a range commit.
    pub fn set_scroll(
        &mut self,
        scroll: ScrollCoordinate,
        now_ms: f64,
    ) -> Result<(), RenderError> {
        self.cx.clock_ms = now_ms;
        self.cx.scroll = scroll;
        self.pending |= Invalidation::SCROLL;
        self.refresh()
    }

    /// One frame callback: runs one scheduling turn and polls the debounced
    /// range-changed emission.
    pub fn on_frame(&mut self, now_ms: f64) -> Result<FrameReport, RenderError> {
        self.cx.clock_ms = now_ms;
        if self.scheduler.is_stopped() {
            return Ok(FrameReport {
                painted: false,
                idle: true,
                range_changed: false,
            });
        }
        let turn = self.scheduler.run_turn(&mut self.cx);
        self.cx.take_failure()?;
        let range_changed = self.cx.emitter.poll(now_ms);
        Ok(FrameReport {
            painted: turn == Turn::Worked,
            idle: !self.scheduler.is_armed(),
            range_changed,
        })
    }

    /// Permanently halts the renderer: no further refreshes, turns, or
    /// emissions. Host-side elements are left in place.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.cx.emitter.cancel();
        tracing::debug!(root_class = %self.cx.root_class, "renderer stopped");
    }

    /// Re-measures the viewport and pulls the update graph; re-arms the
    /// scheduler if anything committed.
    fn refresh(&mut self) -> Result<(), RenderError> {
        if self.scheduler.is_stopped() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        tracing::trace!(?pending, "refresh");
        // Measure once per cycle so the range never mixes fresh scroll
        // state with stale geometry.
        self.cx.metrics = self.cx.host.viewport_metrics();
        let pulled = self.graph.pull(&mut self.cx);
        self.cx.take_failure()?;
        if pulled.committed() {
            self.scheduler.invalidate();
        }
        Ok(())
    }
}
