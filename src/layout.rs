//! # Column-Flow Packer
//!
//! This is the heart of the typesetter and the reason it exists.
//!
//! ## The Problem
//!
//! A price list is hundreds of short rows grouped under category headers,
//! typeset into two columns per page. Laying that out on an infinite canvas
//! and slicing afterwards produces orphaned headers, lost rows at slice
//! points, and columns of wildly different heights. The packer instead
//! makes every placement decision with the column bottom as a hard
//! constraint: content flows *into* columns, and a new page opens only when
//! both columns of the current page are genuinely full.
//!
//! ## How it works
//!
//! The packer is an explicit state machine over a small named state tuple
//! ([`PackerState`]). A pure transition function ([`next_step`]) inspects
//! the state and answers one question per iteration:
//!
//! 1. Current bucket fully placed? Advance to the next bucket.
//! 2. Otherwise pick the *shorter* column (left wins ties) and ask how many
//!    of the bucket's remaining rows fit there.
//! 3. If not even one row fits — or only a category header would fit with no
//!    row beneath it — the column is exhausted: its cursor jumps to the
//!    bottom and the other column gets the next try.
//! 4. When both columns are exhausted, a new page starts and the page-chrome
//!    callback fires.
//! 5. Otherwise a [`RenderChunk`] is emitted for the rows that fit and the
//!    bucket's cursor advances.
//!
//! Every emitted chunk strictly advances a bucket cursor, and exhaustion /
//! page starts are themselves bounded, so the loop always terminates.
//! Keeping the transition function pure means every branch — column-full,
//! both-full, header-orphan guard — is unit-testable without rendering
//! anything.

use std::ops::Range;

use crate::error::TarifaError;
use crate::group::CategoryBucket;
use crate::metrics::Metrics;
use crate::model::PageGeometry;

/// Slack used by the column-full test, in item-row units.
///
/// A column whose free space is below the header height plus this slack is
/// treated as full rather than receiving a header with no (or nearly no)
/// room for rows beneath it. One row's worth is the natural choice: it makes
/// the column-full test and the "at least one row fits" test agree. Packing
/// results are insensitive to reasonable variation here — anything in
/// (0, 1] only shifts *which* test rejects a nearly-full column, not the
/// emitted chunks.
pub const COLUMN_FULL_SLACK_ROWS: f64 = 1.0;

/// Which of the two columns a chunk lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// The packer's complete mutable state. Two column cursors, the bucket walk
/// position, and the current page — nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct PackerState {
    pub bucket_index: usize,
    /// Next free vertical offset in the left column (top-left coordinates).
    pub left_y: f64,
    pub right_y: f64,
    /// 1-based.
    pub page_number: usize,
}

impl PackerState {
    pub fn new(geom: &PageGeometry) -> Self {
        PackerState {
            bucket_index: 0,
            left_y: geom.start_y(),
            right_y: geom.start_y(),
            page_number: 1,
        }
    }

    fn column_y(&self, column: Column) -> f64 {
        match column {
            Column::Left => self.left_y,
            Column::Right => self.right_y,
        }
    }

    fn set_column_y(&mut self, column: Column, y: f64) {
        match column {
            Column::Left => self.left_y = y,
            Column::Right => self.right_y = y,
        }
    }
}

/// One contiguous run of a category's items assigned to a column/page slot.
/// Items are addressed as a range into the bucket, so no row is ever copied
/// or re-ordered on its way to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderChunk {
    /// Index into the bucket list.
    pub bucket: usize,
    /// The run of items, as indexes into the bucket's sorted item list.
    pub items: Range<usize>,
    /// True only for the chunk that opens its category (cursor was 0).
    pub include_header: bool,
    pub column: Column,
    /// 1-based page this chunk lands on.
    pub page: usize,
    pub x: f64,
    pub y: f64,
}

/// One decision of the transition function.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Current bucket is fully placed; move to the next one.
    AdvanceBucket,
    /// The chosen column cannot usefully hold anything more on this page.
    ExhaustColumn(Column),
    /// Both columns are exhausted; open a new page.
    StartPage,
    /// Place `fit` rows of the current bucket into `column`.
    Place {
        column: Column,
        fit: usize,
        include_header: bool,
    },
    /// Every bucket is fully placed.
    Done,
}

/// Pure transition function: inspect the state, decide the next step.
/// Mutates nothing.
pub fn next_step(
    state: &PackerState,
    buckets: &[CategoryBucket],
    metrics: &Metrics,
    geom: &PageGeometry,
) -> Step {
    next_step_with_slack(state, buckets, metrics, geom, COLUMN_FULL_SLACK_ROWS)
}

fn next_step_with_slack(
    state: &PackerState,
    buckets: &[CategoryBucket],
    metrics: &Metrics,
    geom: &PageGeometry,
    slack_rows: f64,
) -> Step {
    if state.bucket_index >= buckets.len() {
        return Step::Done;
    }
    let bucket = &buckets[state.bucket_index];
    if bucket.is_complete() {
        return Step::AdvanceBucket;
    }

    let max_y = geom.max_y();
    if state.left_y >= max_y && state.right_y >= max_y {
        return Step::StartPage;
    }

    // Shorter column first; left wins exact ties for reproducible output.
    let column = if state.left_y <= state.right_y {
        Column::Left
    } else {
        Column::Right
    };
    let current_y = state.column_y(column);

    let include_header = bucket.cursor == 0;
    let header_h = if include_header {
        metrics.category_header_height
    } else {
        0.0
    };

    let available = max_y - current_y;
    let min_needed = header_h + metrics.item_row_height;
    let slack = slack_rows * metrics.item_row_height;

    if available < min_needed && available < header_h + slack {
        return Step::ExhaustColumn(column);
    }

    let fit = ((available - header_h) / metrics.item_row_height).floor() as usize;
    let fit = fit.min(bucket.remaining());

    // Orphan guard: a header with zero rows beneath it is never emitted; the
    // same applies to a sub-row sliver of space when the slack constant is
    // set below one row.
    if fit == 0 {
        return Step::ExhaustColumn(column);
    }

    Step::Place {
        column,
        fit,
        include_header,
    }
}

/// Walk the buckets and emit placement chunks. `on_new_page` fires once per
/// page — including page 1, before any chunk is placed — so the caller can
/// draw the page chrome.
///
/// Fails with [`TarifaError::UnplaceableItem`] before the first callback if
/// a category's opening row (header plus one item) can never fit an empty
/// column: no number of pages would help, and failing early leaves no
/// partial artifact.
pub fn pack(
    buckets: &mut [CategoryBucket],
    metrics: &Metrics,
    geom: &PageGeometry,
    on_new_page: impl FnMut(usize),
) -> Result<Vec<RenderChunk>, TarifaError> {
    pack_with_slack(buckets, metrics, geom, COLUMN_FULL_SLACK_ROWS, on_new_page)
}

fn pack_with_slack(
    buckets: &mut [CategoryBucket],
    metrics: &Metrics,
    geom: &PageGeometry,
    slack_rows: f64,
    mut on_new_page: impl FnMut(usize),
) -> Result<Vec<RenderChunk>, TarifaError> {
    let usable = geom.max_y() - geom.start_y();
    if let Some(bucket) = buckets.iter().find(|b| !b.items.is_empty()) {
        let opening = metrics.category_header_height + metrics.item_row_height;
        if opening > usable {
            return Err(TarifaError::UnplaceableItem {
                name: bucket.items[0].name.clone(),
                row_height: opening,
                column_height: usable,
            });
        }
    }

    let mut state = PackerState::new(geom);
    let mut chunks: Vec<RenderChunk> = Vec::new();
    on_new_page(state.page_number);

    loop {
        match next_step_with_slack(&state, buckets, metrics, geom, slack_rows) {
            Step::Done => break,
            Step::AdvanceBucket => state.bucket_index += 1,
            Step::ExhaustColumn(column) => state.set_column_y(column, geom.max_y()),
            Step::StartPage => {
                state.page_number += 1;
                state.left_y = geom.start_y();
                state.right_y = geom.start_y();
                on_new_page(state.page_number);
            }
            Step::Place {
                column,
                fit,
                include_header,
            } => {
                let bucket = &mut buckets[state.bucket_index];
                let header_h = if include_header {
                    metrics.category_header_height
                } else {
                    0.0
                };
                let y = state.column_y(column);
                chunks.push(RenderChunk {
                    bucket: state.bucket_index,
                    items: bucket.cursor..bucket.cursor + fit,
                    include_header,
                    column,
                    page: state.page_number,
                    x: geom.column_x(column == Column::Left),
                    y,
                });
                bucket.cursor += fit;

                // Advance past the chunk plus the inter-chunk gap, clamped so
                // the cursor never passes the column bottom.
                let bottom = y + header_h + fit as f64 * metrics.item_row_height;
                state.set_column_y(column, (bottom + geom.chunk_gap).min(geom.max_y()));
            }
        }
    }

    Ok(chunks)
}
