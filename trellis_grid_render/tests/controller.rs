// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end controller tests against a recording in-memory host.

use std::collections::HashMap;

use kurbo::Size;
use trellis_grid_render::{
    BorderStyle, ColumnId, ColumnSource, ColumnSpec, Direction, DirectionalPadding, ElementKind,
    GridHost, GridRange, GridRender, GridSurfaces, MapTheme, RenderError, RowData, RowId,
    RowParity, RowSource, ScrollCoordinate, SplitterEdge, Token, TokenValue, ViewportMetrics,
};

/// Records every host call; elements are interned ids with a kind label.
#[derive(Debug, Default)]
struct MockHost {
    next_id: usize,
    kinds: Vec<String>,
    children: HashMap<usize, Vec<usize>>,
    append_calls: Vec<(usize, Vec<usize>)>,
    texts: HashMap<usize, String>,
    stylesheets: Vec<(String, String)>,
    metrics: Option<ViewportMetrics>,
}

impl MockHost {
    fn with_metrics(outer: Size, client: Size) -> Self {
        Self {
            metrics: Some(ViewportMetrics {
                outer,
                client,
                canvas: Size::ZERO,
            }),
            ..Self::default()
        }
    }

    fn intern(&mut self, kind: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.kinds.push(kind);
        id
    }

    fn count_kind(&self, prefix: &str) -> usize {
        self.kinds
            .iter()
            .filter(|kind| kind.starts_with(prefix))
            .count()
    }

    fn texts_sorted(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self.texts.values().map(String::as_str).collect();
        texts.sort_unstable();
        texts
    }
}

fn kind_label(kind: &ElementKind<'_>) -> String {
    match kind {
        ElementKind::HeaderCell { column } => format!("header-cell:{column}"),
        ElementKind::HeaderCellContent { column } => format!("header-content:{column}"),
        ElementKind::HeaderCellBorder { column } => format!("header-border:{column}"),
        ElementKind::HeaderCellSplitter { edge } => {
            let edge = match edge {
                SplitterEdge::Front => "front",
                SplitterEdge::End => "end",
            };
            format!("header-splitter:{edge}")
        }
        ElementKind::Row { row, parity } => {
            let parity = match parity {
                RowParity::Even => "even",
                RowParity::Odd => "odd",
            };
            format!("row:{row}:{parity}")
        }
        ElementKind::RowBorder => "row-border".to_owned(),
        ElementKind::Cell { row, column } => format!("cell:{row}:{column}"),
        ElementKind::CellContent { column } => format!("cell-content:{column}"),
    }
}

impl GridHost for MockHost {
    type Element = usize;
    type Stylesheet = usize;

    fn mount_surfaces(&mut self) -> GridSurfaces<usize> {
        GridSurfaces {
            header_canvas: self.intern("surface:header".to_owned()),
            content_canvas: self.intern("surface:content".to_owned()),
        }
    }

    fn create_stylesheet(&mut self, name: &str) -> usize {
        self.stylesheets.push((name.to_owned(), String::new()));
        self.stylesheets.len() - 1
    }

    fn replace_stylesheet(&mut self, sheet: &usize, css: &str) {
        self.stylesheets[*sheet].1 = css.to_owned();
    }

    fn viewport_metrics(&self) -> Option<ViewportMetrics> {
        self.metrics
    }

    fn create_element(&mut self, kind: ElementKind<'_>) -> usize {
        self.intern(kind_label(&kind))
    }

    fn append_children(&mut self, parent: &usize, children: &[usize]) {
        self.children
            .entry(*parent)
            .or_default()
            .extend_from_slice(children);
        self.append_calls.push((*parent, children.to_vec()));
    }

    fn set_text(&mut self, element: &usize, text: &str) {
        self.texts.insert(*element, text.to_owned());
    }
}

struct MockRow(Vec<(String, String)>);

impl RowData for MockRow {
    fn field(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Rows keyed by an explicit id so identity survives removals.
struct MockRows(Vec<(String, MockRow)>);

impl MockRows {
    fn numbered(count: usize) -> Self {
        Self(
            (0..count)
                .map(|index| {
                    let row = MockRow(vec![
                        ("name".to_owned(), format!("name-{index}")),
                        ("age".to_owned(), format!("{index}")),
                    ]);
                    (format!("id-{index}"), row)
                })
                .collect(),
        )
    }
}

impl RowSource for MockRows {
    type Row = MockRow;

    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn row_by_index(&self, index: usize) -> Option<&MockRow> {
        self.0.get(index).map(|(_, row)| row)
    }

    fn row_id_by_index(&self, index: usize) -> Option<RowId> {
        self.0.get(index).map(|(id, _)| RowId(id.clone()))
    }
}

struct MockColumns {
    ids: Vec<ColumnId>,
    specs: HashMap<ColumnId, ColumnSpec<MockHost>>,
}

impl MockColumns {
    fn new(columns: &[(&str, f64)]) -> Self {
        let ids: Vec<ColumnId> = columns.iter().map(|(id, _)| ColumnId::from(*id)).collect();
        let specs = columns
            .iter()
            .map(|(id, width)| {
                let mut spec = ColumnSpec::new(*width, *id);
                spec.header_data = Some(id.to_uppercase());
                (ColumnId::from(*id), spec)
            })
            .collect();
        Self { ids, specs }
    }
}

impl ColumnSource<MockHost> for MockColumns {
    fn visible_column_ids(&self) -> &[ColumnId] {
        &self.ids
    }

    fn column_by_id(&self, id: &ColumnId) -> Option<&ColumnSpec<MockHost>> {
        self.specs.get(id)
    }
}

fn test_theme() -> MapTheme {
    let mut theme = MapTheme::new();
    let border = |width: f64| {
        TokenValue::Border(BorderStyle {
            width,
            raw: format!("{width}px solid #ccc"),
        })
    };
    let padding = || {
        TokenValue::Padding(DirectionalPadding {
            ltr: "0 0 0 4px".into(),
            rtl: "0 4px 0 0".into(),
        })
    };
    theme
        .set(Token::RowHeight, TokenValue::Number(20.0))
        .set(Token::HeaderRowHeight, TokenValue::Number(24.0))
        .set(Token::CellHBorder, border(1.0))
        .set(Token::CellVBorder, border(1.0))
        .set(Token::HeaderCellVBorder, border(1.0))
        .set(Token::HeaderBottomBorder, border(2.0))
        .set(Token::CellPadding, padding())
        .set(Token::HeaderCellPadding, padding())
        .set(Token::OddRowBackgroundColor, TokenValue::Text("#fafafa".into()))
        .set(Token::EvenRowBackgroundColor, TokenValue::Text("#fff".into()))
        .set(Token::CellColor, TokenValue::Text("#333".into()))
        .set(
            Token::HeaderRowBackgroundColor,
            TokenValue::Text("#f0f0f0".into()),
        )
        .set(Token::HeaderCellColor, TokenValue::Text("#000".into()))
        .set(Token::CellCursor, TokenValue::Text("default".into()))
        .set(Token::HeaderCursor, TokenValue::Text("pointer".into()))
        .set(Token::CellFontFamily, TokenValue::Text("sans-serif".into()))
        .set(Token::CellFontSize, TokenValue::Text("12px".into()))
        .set(
            Token::HeaderCellFontFamily,
            TokenValue::Text("sans-serif".into()),
        )
        .set(Token::HeaderCellFontSize, TokenValue::Text("12px".into()))
        .set(Token::BackgroundColor, TokenValue::Text("#fff".into()));
    theme
}

type Grid = GridRender<MockHost, MockRows, MockColumns>;

/// Pitch 21 and a 100px-high viewport: rows 0..=4 visible at scroll 0.
/// Client width 190 over columns 50/70/60/80: columns 0..=2 visible.
fn mounted_grid(row_count: usize) -> Grid {
    let host = MockHost::with_metrics(Size::new(200.0, 100.0), Size::new(190.0, 100.0));
    let rows = MockRows::numbered(row_count);
    let columns = MockColumns::new(&[("name", 50.0), ("age", 70.0), ("city", 60.0), ("zip", 80.0)]);
    let mut grid = GridRender::new(
        host,
        rows,
        columns,
        Box::new(test_theme()),
        Direction::Ltr,
        "trellis-0",
    )
    .expect("mount succeeds");
    grid.notify_resized(Size::new(200.0, 126.0), 0.0).expect("resize succeeds");
    grid
}

/// Runs frames until the scheduler converges; returns the frame count and
/// whether the debounced range emission fired along the way.
fn drive_to_idle(grid: &mut Grid, start_ms: f64) -> (usize, bool) {
    let mut frames = 0;
    let mut range_changed = false;
    loop {
        let report = grid
            .on_frame(start_ms + frames as f64 * 17.0)
            .expect("frame succeeds");
        frames += 1;
        range_changed |= report.range_changed;
        if !report.painted {
            break (frames, range_changed);
        }
        assert!(frames < 100, "scheduler failed to converge");
    }
}

#[test]
fn initial_mount_realizes_exactly_the_visible_window() {
    let mut grid = mounted_grid(10);
    assert_eq!(grid.range(), GridRange::window(0, 4, 0, 2));

    let (frames, range_changed) = drive_to_idle(&mut grid, 0.0);
    // One turn paints all headers plus the first row, then one per row,
    // then the converging no-work turn.
    assert_eq!(frames, 6);
    assert!(range_changed);

    let host = grid.host();
    assert_eq!(host.count_kind("header-cell:"), 3);
    assert_eq!(host.count_kind("row:"), 5);
    assert_eq!(host.count_kind("cell:"), 15);
    // All five visible rows sit above the last data row, so each has a
    // trailing border.
    assert_eq!(host.count_kind("row-border"), 5);

    // Header texts come from header_data, cell texts from row fields.
    let texts = host.texts_sorted();
    assert!(texts.contains(&"AGE"));
    assert!(texts.contains(&"name-0"));
    assert!(texts.contains(&"4"));
    // 3 headers + 15 cells.
    assert_eq!(texts.len(), 18);
}

#[test]
fn header_cells_are_appended_in_one_batch() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);

    let host = grid.host();
    // Surface id 0 is the header canvas; exactly one append call targeted
    // it, carrying all three header cells.
    let batches: Vec<&Vec<usize>> = host
        .append_calls
        .iter()
        .filter(|(parent, _)| *parent == 0)
        .map(|(_, children)| children)
        .collect();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
}

#[test]
fn unchanged_inputs_repaint_nothing() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);
    let created = grid.host().kinds.len();
    let texts = grid.host().texts.len();

    grid.notify_row_count_changed(1000.0).expect("notify succeeds");
    grid.notify_visible_columns_changed(1000.0).expect("notify succeeds");
    let report = grid.on_frame(1000.0).expect("frame succeeds");
    assert!(!report.painted);
    assert!(report.idle);

    assert_eq!(grid.host().kinds.len(), created);
    assert_eq!(grid.host().texts.len(), texts);
}

#[test]
fn scroll_within_the_same_window_commits_nothing() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);

    // 4px of scroll stays inside rows 0..=4 (pitch 21: top stays 0 and
    // the bottom edge 104 still floors to row 4).
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 4.0 }, 500.0)
        .expect("scroll succeeds");
    let report = grid.on_frame(500.0).expect("frame succeeds");
    assert!(!report.painted);
    assert_eq!(grid.range(), GridRange::window(0, 4, 0, 2));

    // No emission either: the range node never committed.
    let report = grid.on_frame(600.0).expect("frame succeeds");
    assert!(!report.range_changed);
}

#[test]
fn scrolling_to_new_rows_paints_only_the_new_records() {
    let mut grid = mounted_grid(20);
    drive_to_idle(&mut grid, 0.0);
    let cells_before = grid.host().count_kind("cell:");

    // scroll_top 63 → top = 3, bottom = min(19, floor(163/21)) = 7:
    // rows 3..=4 are already cached, rows 5..=7 are new.
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 63.0 }, 1000.0)
        .expect("scroll succeeds");
    assert_eq!(grid.range(), GridRange::window(3, 7, 0, 2));
    drive_to_idle(&mut grid, 1000.0);

    let host = grid.host();
    assert_eq!(host.count_kind("row:"), 8);
    assert_eq!(host.count_kind("cell:") - cells_before, 9);
    // Cached rows were not recreated.
    assert_eq!(host.count_kind("row:id-0:"), 1);
    assert_eq!(host.count_kind("row:id-3:"), 1);
}

#[test]
fn scrolling_back_over_cached_rows_is_paint_free() {
    let mut grid = mounted_grid(20);
    drive_to_idle(&mut grid, 0.0);
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 63.0 }, 1000.0)
        .expect("scroll succeeds");
    drive_to_idle(&mut grid, 1000.0);
    let created = grid.host().kinds.len();

    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 0.0 }, 2000.0)
        .expect("scroll succeeds");
    let (frames, _) = drive_to_idle(&mut grid, 2000.0);
    // One converging turn, no paint work.
    assert_eq!(frames, 1);
    assert_eq!(grid.host().kinds.len(), created);
}

#[test]
fn scrolling_front_realizes_only_new_columns() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);
    let created = grid.host().kinds.len();

    // scroll_front 120 → front column 2 (leads 0/50/120/180), and the
    // remaining columns never reach the 310px bound, so `zip` enters the
    // window.
    grid.set_scroll(ScrollCoordinate { front: 120.0, top: 0.0 }, 1000.0)
        .expect("scroll succeeds");
    assert_eq!(grid.range(), GridRange::window(0, 4, 2, 3));
    drive_to_idle(&mut grid, 1000.0);

    let host = grid.host();
    assert_eq!(host.count_kind("header-cell:"), 4);
    assert_eq!(host.count_kind("cell:"), 20);
    // Only `zip` is new: one header cell (element, content, border, two
    // splitters) and one cell + content per visible row.
    assert_eq!(host.kinds.len() - created, 15);
    assert_eq!(host.count_kind("cell:id-0:zip"), 1);
    // The cached `city` column was not recreated.
    assert_eq!(host.count_kind("header-cell:city"), 1);

    // Scrolling back over cached columns is paint-free.
    let created = grid.host().kinds.len();
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 0.0 }, 2000.0)
        .expect("scroll succeeds");
    let (frames, _) = drive_to_idle(&mut grid, 2000.0);
    assert_eq!(frames, 1);
    assert_eq!(grid.host().kinds.len(), created);
}

#[test]
fn notifications_arm_the_debounce_from_their_own_clock() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);

    // A data change long after the last frame: the emission waits one
    // quiet period from the notification's clock, not from the stale
    // frame clock.
    grid.rows_mut().0.remove(2);
    grid.notify_row_count_changed(5000.0).expect("notify succeeds");
    let report = grid.on_frame(5000.0).expect("frame succeeds");
    assert!(!report.range_changed);
    let report = grid.on_frame(5016.0).expect("frame succeeds");
    assert!(!report.range_changed);
    let report = grid.on_frame(5017.0).expect("frame succeeds");
    assert!(report.range_changed);
}

#[test]
fn range_emission_is_debounced_to_one_quiet_period() {
    let mut grid = mounted_grid(20);
    drive_to_idle(&mut grid, 0.0);

    // Two range-changing scrolls 10ms apart: one emission, timed from the
    // second commit.
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 63.0 }, 1000.0)
        .expect("scroll succeeds");
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 84.0 }, 1010.0)
        .expect("scroll succeeds");

    let report = grid.on_frame(1020.0).expect("frame succeeds");
    assert!(!report.range_changed);
    let report = grid.on_frame(1027.0).expect("frame succeeds");
    assert!(report.range_changed);
    let report = grid.on_frame(1100.0).expect("frame succeeds");
    assert!(!report.range_changed);
}

#[test]
fn empty_sources_realize_nothing() {
    let host = MockHost::with_metrics(Size::new(200.0, 100.0), Size::new(190.0, 100.0));
    let rows = MockRows::numbered(0);
    let columns = MockColumns::new(&[("name", 50.0)]);
    let mut grid = GridRender::new(
        host,
        rows,
        columns,
        Box::new(test_theme()),
        Direction::Ltr,
        "trellis-0",
    )
    .expect("mount succeeds");

    assert_eq!(grid.range(), GridRange::Empty);
    let report = grid.on_frame(0.0).expect("frame succeeds");
    assert!(!report.painted);
    assert_eq!(grid.host().count_kind("row:"), 0);
    assert_eq!(grid.host().count_kind("header-cell:"), 0);
}

#[test]
fn unmeasurable_viewport_keeps_the_range_empty() {
    let host = MockHost::default();
    let rows = MockRows::numbered(10);
    let columns = MockColumns::new(&[("name", 50.0)]);
    let grid = GridRender::new(
        host,
        rows,
        columns,
        Box::new(test_theme()),
        Direction::Ltr,
        "trellis-0",
    )
    .expect("mount succeeds");
    assert_eq!(grid.range(), GridRange::Empty);
}

#[test]
fn row_removal_recommits_even_when_the_window_is_unchanged() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);

    // Dropping row id-2 shifts ids 3.. up one index; the window stays
    // 0..=4 but its row-id set changes, so the range re-commits and the
    // newly exposed row id-5 gets painted.
    grid.rows_mut().0.remove(2);
    grid.notify_row_count_changed(500.0).expect("notify succeeds");
    assert_eq!(grid.range(), GridRange::window(0, 4, 0, 2));

    drive_to_idle(&mut grid, 500.0);
    assert_eq!(grid.host().count_kind("row:id-5:"), 1);
}

#[test]
fn stylesheets_are_scoped_and_replaced_on_change() {
    let mut grid = mounted_grid(10);
    drive_to_idle(&mut grid, 0.0);

    {
        let host = grid.host();
        assert_eq!(host.stylesheets.len(), 2);
        assert_eq!(host.stylesheets[0].0, "trellis-0-layout");
        assert_eq!(host.stylesheets[1].0, "trellis-0-cell");
        assert!(host.stylesheets[0].1.contains(".trellis-0{"));
        assert!(host.stylesheets[1].1.contains(".trellis-0 .trellis-cell-name{"));
    }
    let layout_before = grid.host().stylesheets[0].1.clone();
    let cell_before = grid.host().stylesheets[1].1.clone();

    // A pure resize re-derives the layout sheet only.
    grid.notify_resized(Size::new(300.0, 126.0), 100.0).expect("resize succeeds");
    assert_ne!(grid.host().stylesheets[0].1, layout_before);
    assert_eq!(grid.host().stylesheets[1].1, cell_before);
}

#[test]
fn missing_theme_tokens_fail_the_mount() {
    let mut theme = test_theme();
    theme.unset(Token::RowHeight);
    let host = MockHost::with_metrics(Size::new(200.0, 100.0), Size::new(190.0, 100.0));
    let err = GridRender::new(
        host,
        MockRows::numbered(10),
        MockColumns::new(&[("name", 50.0)]),
        Box::new(theme),
        Direction::Ltr,
        "trellis-0",
    )
    .unwrap_err();
    assert_eq!(err, RenderError::MissingToken(Token::RowHeight));
}

#[test]
fn undefined_visible_columns_fail_the_mount() {
    let host = MockHost::with_metrics(Size::new(200.0, 100.0), Size::new(190.0, 100.0));
    let mut columns = MockColumns::new(&[("name", 50.0)]);
    columns.specs.clear();
    let err = GridRender::new(
        host,
        MockRows::numbered(10),
        columns,
        Box::new(test_theme()),
        Direction::Ltr,
        "trellis-0",
    )
    .unwrap_err();
    assert_eq!(err, RenderError::UnknownColumn(ColumnId::from("name")));
}

#[test]
fn stop_is_permanent_and_silences_emissions() {
    let mut grid = mounted_grid(20);
    drive_to_idle(&mut grid, 0.0);

    // Arm an emission, then stop before it fires.
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 63.0 }, 1000.0)
        .expect("scroll succeeds");
    grid.stop();
    assert!(grid.is_stopped());

    let created = grid.host().kinds.len();
    grid.notify_row_count_changed(2000.0).expect("notify is a no-op");
    let report = grid.on_frame(2000.0).expect("frame succeeds");
    assert!(report.idle);
    assert!(!report.painted);
    assert!(!report.range_changed);
    assert_eq!(grid.host().kinds.len(), created);
}

#[test]
fn rtl_grids_derive_right_anchored_rules() {
    let host = MockHost::with_metrics(Size::new(200.0, 100.0), Size::new(190.0, 100.0));
    let mut grid = GridRender::new(
        host,
        MockRows::numbered(5),
        MockColumns::new(&[("name", 50.0), ("age", 70.0)]),
        Box::new(test_theme()),
        Direction::Rtl,
        "trellis-rtl",
    )
    .expect("mount succeeds");
    grid.notify_resized(Size::new(200.0, 126.0), 0.0).expect("resize succeeds");

    let cell_css = &grid.host().stylesheets[1].1;
    assert!(cell_css.contains(".trellis-rtl .trellis-cell-name{right:0px;"));
    assert!(cell_css.contains("padding:0 4px 0 0;"));
}
