// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless grid render session against an in-memory host.
//!
//! Mounts a 10,000-row grid, drives the frame loop until the first paint
//! converges, then scrolls and shows that only newly exposed rows get
//! painted while revisited rows come from the cache.
//!
//! Run:
//! - `cargo run -p trellis_demos --example scrolling_grid`

use std::collections::HashMap;

use kurbo::Size;
use trellis_grid_render::{
    BorderStyle, ColumnId, ColumnSource, ColumnSpec, Direction, DirectionalPadding, ElementKind,
    GridHost, GridRender, GridSurfaces, MapTheme, RenderError, RowData, RowId, RowSource,
    ScrollCoordinate, Token, TokenValue, ViewportMetrics,
};

/// An element arena standing in for a retained visual tree.
#[derive(Debug, Default)]
struct ArenaHost {
    elements: usize,
    appends: usize,
    text_writes: usize,
    stylesheets: Vec<String>,
    metrics: Option<ViewportMetrics>,
}

impl GridHost for ArenaHost {
    type Element = usize;
    type Stylesheet = usize;

    fn mount_surfaces(&mut self) -> GridSurfaces<usize> {
        self.elements += 2;
        GridSurfaces {
            header_canvas: 0,
            content_canvas: 1,
        }
    }

    fn create_stylesheet(&mut self, _name: &str) -> usize {
        self.stylesheets.push(String::new());
        self.stylesheets.len() - 1
    }

    fn replace_stylesheet(&mut self, sheet: &usize, css: &str) {
        self.stylesheets[*sheet] = css.to_owned();
    }

    fn viewport_metrics(&self) -> Option<ViewportMetrics> {
        self.metrics
    }

    fn create_element(&mut self, _kind: ElementKind<'_>) -> usize {
        self.elements += 1;
        self.elements - 1
    }

    fn append_children(&mut self, _parent: &usize, _children: &[usize]) {
        self.appends += 1;
    }

    fn set_text(&mut self, _element: &usize, _text: &str) {
        self.text_writes += 1;
    }
}

struct Record(HashMap<String, String>);

impl RowData for Record {
    fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

struct Records(Vec<Record>);

impl RowSource for Records {
    type Row = Record;

    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn row_by_index(&self, index: usize) -> Option<&Record> {
        self.0.get(index)
    }

    fn row_id_by_index(&self, index: usize) -> Option<RowId> {
        (index < self.0.len()).then(|| RowId(format!("record-{index}")))
    }
}

struct Columns {
    ids: Vec<ColumnId>,
    specs: HashMap<ColumnId, ColumnSpec<ArenaHost>>,
}

impl ColumnSource<ArenaHost> for Columns {
    fn visible_column_ids(&self) -> &[ColumnId] {
        &self.ids
    }

    fn column_by_id(&self, id: &ColumnId) -> Option<&ColumnSpec<ArenaHost>> {
        self.specs.get(id)
    }
}

fn demo_theme() -> MapTheme {
    let border = |width: f64| {
        TokenValue::Border(BorderStyle {
            width,
            raw: format!("{width}px solid #e0e0e0"),
        })
    };
    let padding = DirectionalPadding {
        ltr: "0 0 0 8px".into(),
        rtl: "0 8px 0 0".into(),
    };
    let mut theme = MapTheme::new();
    theme
        .set(Token::RowHeight, TokenValue::Number(24.0))
        .set(Token::HeaderRowHeight, TokenValue::Number(28.0))
        .set(Token::CellHBorder, border(1.0))
        .set(Token::CellVBorder, border(1.0))
        .set(Token::HeaderCellVBorder, border(1.0))
        .set(Token::HeaderBottomBorder, border(2.0))
        .set(Token::CellPadding, TokenValue::Padding(padding.clone()))
        .set(Token::HeaderCellPadding, TokenValue::Padding(padding))
        .set(Token::OddRowBackgroundColor, TokenValue::Text("#f7f7f7".into()))
        .set(Token::EvenRowBackgroundColor, TokenValue::Text("#ffffff".into()))
        .set(Token::CellColor, TokenValue::Text("#222".into()))
        .set(
            Token::HeaderRowBackgroundColor,
            TokenValue::Text("#eaeaea".into()),
        )
        .set(Token::HeaderCellColor, TokenValue::Text("#000".into()))
        .set(Token::CellCursor, TokenValue::Text("default".into()))
        .set(Token::HeaderCursor, TokenValue::Text("pointer".into()))
        .set(Token::CellFontFamily, TokenValue::Text("system-ui".into()))
        .set(Token::CellFontSize, TokenValue::Text("13px".into()))
        .set(
            Token::HeaderCellFontFamily,
            TokenValue::Text("system-ui".into()),
        )
        .set(Token::HeaderCellFontSize, TokenValue::Text("13px".into()))
        .set(Token::BackgroundColor, TokenValue::Text("#ffffff".into()));
    theme
}

fn main() -> Result<(), RenderError> {
    let host = ArenaHost {
        metrics: Some(ViewportMetrics {
            outer: Size::new(640.0, 400.0),
            client: Size::new(624.0, 400.0),
            canvas: Size::ZERO,
        }),
        ..ArenaHost::default()
    };

    let rows = Records(
        (0..10_000)
            .map(|index| {
                Record(HashMap::from([
                    ("name".to_owned(), format!("Item {index}")),
                    ("qty".to_owned(), format!("{}", index % 97)),
                    ("price".to_owned(), format!("{}.99", index % 500)),
                ]))
            })
            .collect(),
    );

    let fields = [("name", 260.0), ("qty", 120.0), ("price", 160.0)];
    let columns = Columns {
        ids: fields.iter().map(|(id, _)| ColumnId::from(*id)).collect(),
        specs: fields
            .iter()
            .map(|(id, width)| {
                let mut spec = ColumnSpec::new(*width, *id);
                spec.header_data = Some(id.to_uppercase());
                (ColumnId::from(*id), spec)
            })
            .collect(),
    };

    let mut grid = GridRender::new(
        host,
        rows,
        columns,
        Box::new(demo_theme()),
        Direction::Ltr,
        "demo-grid",
    )?;
    grid.notify_resized(Size::new(640.0, 430.0), 0.0)?;

    let mut now_ms = 0.0;
    let frame = |grid: &mut GridRender<ArenaHost, Records, Columns>,
                 now_ms: &mut f64|
     -> Result<(), RenderError> {
        loop {
            let report = grid.on_frame(*now_ms)?;
            *now_ms += 16.67;
            if report.range_changed {
                println!("  range changed -> {:?}", grid.range());
            }
            if !report.painted {
                // One more frame to drain a debounced emission that is
                // still pending after the paint converged.
                let report = grid.on_frame(*now_ms)?;
                *now_ms += 16.67;
                if report.range_changed {
                    println!("  range changed -> {:?}", grid.range());
                }
                break Ok(());
            }
        }
    };

    println!("initial paint of {:?}:", grid.range());
    frame(&mut grid, &mut now_ms)?;
    println!(
        "  {} elements, {} text writes, {} appends",
        grid.host().elements,
        grid.host().text_writes,
        grid.host().appends
    );

    println!("scroll to 10,000px:");
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 10_000.0 }, now_ms)?;
    frame(&mut grid, &mut now_ms)?;
    println!(
        "  {} elements, {} text writes",
        grid.host().elements,
        grid.host().text_writes
    );

    println!("scroll back to the top (all cached):");
    let writes_before = grid.host().text_writes;
    grid.set_scroll(ScrollCoordinate { front: 0.0, top: 0.0 }, now_ms)?;
    frame(&mut grid, &mut now_ms)?;
    println!(
        "  {} new text writes",
        grid.host().text_writes - writes_before
    );

    grid.stop();
    Ok(())
}
