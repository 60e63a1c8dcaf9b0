//! Justified row packing.
//!
//! Items are placed greedily, one pass, no backtracking. Each item gets a
//! working width at the nominal row height; items accumulate into the
//! current row while the row is still narrower than the container or could
//! be shrunk to fit within [`maximum_shrink_factor`]. When a row closes it
//! is rescaled to the container width if the required change is within the
//! shrink or stretch tolerance, otherwise it keeps its working geometry.
//!
//! A lone item wider than the container is never rejected: it takes a row
//! of its own.
//!
//! In uniform mode the first row's first item, after justification, fixes
//! the aspect ratio and height for every item in every later row, and later
//! rows are never rescaled.
//!
//! # Example
//!
//! ```
//! use justgrid::{Item, LayoutConfig, compute_layout};
//!
//! let items = [Item::new(300.0, 200.0), Item::new(300.0, 200.0), Item::new(200.0, 200.0)];
//! let config = LayoutConfig::new(200.0);
//! let result = compute_layout(1000.0, &items, &config);
//!
//! assert_eq!(result.rects.len(), 3);
//! assert_eq!(result.row_count(), 1);
//! // 300 + 300 + 200 = 800 wide at 200 tall, stretched by 25% to 1000.
//! assert_eq!(result.rects[0].width, 375.0);
//! assert_eq!(result.rects[2].x, 750.0);
//! assert_eq!(result.container_height, 250.0);
//! ```
//!
//! [`maximum_shrink_factor`]: crate::LayoutConfig::maximum_shrink_factor

use alloc::vec::Vec;
use core::ops::Range;

use num_traits::Float;

use crate::config::LayoutConfig;
use crate::item::GridItem;

/// Axis-aligned rectangle in container coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width times height.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// One closed row of the layout.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Index of the row's first item.
    pub start: usize,
    /// One past the index of the row's last item.
    pub end: usize,
    /// Top edge of the row.
    pub y: f64,
    /// Height shared by every item in the row.
    pub height: f64,
    /// Whether the row was rescaled to the container width.
    pub justified: bool,
}

impl Row {
    /// Item indices covered by this row.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of items in the row.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the row covers no items. Rows produced by
    /// [`compute_layout`] never are.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Output of [`compute_layout`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    /// One rect per input item, in input order.
    pub rects: Vec<Rect>,
    /// Rows in top-to-bottom order. Their ranges partition `0..rects.len()`.
    pub rows: Vec<Row>,
    /// Sum of row heights plus one gap per row.
    pub container_height: f64,
}

impl LayoutResult {
    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rects belonging to `row`.
    ///
    /// Empty when `row` reaches past this result's rects, as a row taken
    /// from another layout can.
    pub fn row_rects(&self, row: &Row) -> &[Rect] {
        self.rects.get(row.range()).unwrap_or(&[])
    }

    /// Pair each caller item with its rect.
    ///
    /// `items` should be the slice the layout was computed from. Returns
    /// `None` when its length differs from the number of rects.
    pub fn placed<'a, T>(
        &'a self,
        items: &'a [T],
    ) -> Option<impl Iterator<Item = (&'a T, &'a Rect)>> {
        if items.len() != self.rects.len() {
            return None;
        }
        Some(items.iter().zip(self.rects.iter()))
    }
}

/// Compute a justified layout of `items` for a container `container_width` wide.
///
/// Pure and deterministic. Returns the empty result when `items` is empty or
/// `container_width` is not positive. Config values are not validated; see
/// [`LayoutConfig::validate`].
pub fn compute_layout<T: GridItem>(
    container_width: f64,
    items: &[T],
    config: &LayoutConfig,
) -> LayoutResult {
    if items.is_empty() || !(container_width > 0.0) {
        return LayoutResult::default();
    }

    let tolerance = Tolerance::new(container_width, config);
    let mut state = LayoutState::with_capacity(items.len());

    // The index only advances when an item is committed; a rejected item is
    // retried against the fresh row left behind by `close_row`.
    let mut index = 0;
    while index < items.len() {
        let (width, height) = working_size(&items[index], config, state.baseline);
        let is_last = index + 1 == items.len();

        match place(&state.row, width, config.gap, &tolerance) {
            Placement::Commit => {
                state.row.commit(width, height, config.gap);
                index += 1;
                if is_last {
                    close_row(&mut state, config, &tolerance);
                }
            }
            Placement::CommitAlone => {
                state.row.commit(width, height, config.gap);
                index += 1;
                close_row(&mut state, config, &tolerance);
            }
            Placement::CloseAndRetry => close_row(&mut state, config, &tolerance),
        }
    }

    state.result
}

// ============================================================================
// Accumulator state
// ============================================================================

/// Geometry fixed by the first row in uniform mode.
#[derive(Copy, Clone, Debug, PartialEq)]
struct UniformBaseline {
    aspect_ratio: f64,
    row_height: f64,
}

/// The row currently being filled.
#[derive(Clone, Debug, Default)]
struct RowState {
    /// Index of the first item in this row.
    start: usize,
    /// Working geometry of committed items; `y` is assigned on close.
    rects: Vec<Rect>,
    /// Running width including one trailing gap per item.
    accumulated: f64,
}

impl RowState {
    fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    fn end(&self) -> usize {
        self.start + self.rects.len()
    }

    fn commit(&mut self, width: f64, height: f64, gap: f64) {
        self.rects.push(Rect::new(self.accumulated, 0.0, width, height));
        self.accumulated += width + gap;
    }

    /// Width without the trailing gap.
    fn natural_width(&self, gap: f64) -> f64 {
        self.accumulated - gap
    }
}

#[derive(Debug)]
struct LayoutState {
    row: RowState,
    baseline: Option<UniformBaseline>,
    result: LayoutResult,
}

impl LayoutState {
    fn with_capacity(n: usize) -> Self {
        Self {
            row: RowState::default(),
            baseline: None,
            result: LayoutResult {
                rects: Vec::with_capacity(n),
                rows: Vec::new(),
                container_height: 0.0,
            },
        }
    }
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Shrink/stretch eligibility for a given container width.
///
/// The scale factor's sign is not checked: both tests compare its absolute
/// value against their own maximum.
#[derive(Copy, Clone, Debug)]
struct Tolerance {
    container_width: f64,
    max_shrink: f64,
    max_stretch: f64,
}

impl Tolerance {
    fn new(container_width: f64, config: &LayoutConfig) -> Self {
        Self {
            container_width,
            max_shrink: config.maximum_shrink_factor,
            max_stretch: config.maximum_stretch_factor,
        }
    }

    /// Fractional change taking `width` to the container width.
    /// Negative shrinks, positive stretches. Infinite or NaN for zero width.
    fn scale_factor(&self, width: f64) -> f64 {
        (self.container_width - width) / width
    }

    fn is_shrinkable(&self, width: f64) -> bool {
        Float::abs(self.scale_factor(width)) <= self.max_shrink
    }

    fn is_stretchable(&self, width: f64) -> bool {
        Float::abs(self.scale_factor(width)) <= self.max_stretch
    }
}

/// Outcome of offering one item to the current row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Placement {
    /// Item joins the row.
    Commit,
    /// Row is empty and the item overflows: it joins and the row closes.
    CommitAlone,
    /// Row closes without the item; the item is offered again.
    CloseAndRetry,
}

fn place(row: &RowState, width: f64, gap: f64, tolerance: &Tolerance) -> Placement {
    let provisional = row.accumulated + width + gap;
    if provisional < tolerance.container_width || tolerance.is_shrinkable(provisional - gap) {
        Placement::Commit
    } else if row.is_empty() {
        Placement::CommitAlone
    } else {
        Placement::CloseAndRetry
    }
}

/// Height every item starts at before justification.
fn working_height(config: &LayoutConfig, baseline: Option<UniformBaseline>) -> f64 {
    match baseline {
        Some(b) if config.uniform => b.row_height,
        _ => config.row_height,
    }
}

/// Pre-justification `(width, height)` of one item.
fn working_size<T: GridItem>(
    item: &T,
    config: &LayoutConfig,
    baseline: Option<UniformBaseline>,
) -> (f64, f64) {
    let aspect_ratio = match baseline {
        Some(b) if config.uniform => b.aspect_ratio,
        _ => item
            .aspect_ratio()
            .unwrap_or(config.default_aspect_ratio),
    };
    let height = working_height(config, baseline);
    (aspect_ratio * height, height)
}

/// Justify the current row, move it to the output, and start a fresh row.
fn close_row(state: &mut LayoutState, config: &LayoutConfig, tolerance: &Tolerance) {
    let LayoutState {
        row,
        baseline,
        result,
    } = state;
    let gap = config.gap;
    let natural_width = row.natural_width(gap);
    let may_rescale = !config.uniform || baseline.is_none();

    let mut row_height = working_height(config, *baseline);
    let mut justified = false;
    if may_rescale
        && (tolerance.is_shrinkable(natural_width) || tolerance.is_stretchable(natural_width))
    {
        let factor = tolerance.scale_factor(natural_width);
        row_height = config.row_height / natural_width * tolerance.container_width;
        let mut x = 0.0;
        for rect in &mut row.rects {
            rect.width += factor * rect.width;
            rect.height = row_height;
            rect.x = x;
            x += rect.width + gap;
        }
        justified = true;
    }

    if config.uniform
        && baseline.is_none()
        && let Some(first) = row.rects.first()
    {
        *baseline = Some(UniformBaseline {
            aspect_ratio: first.width / first.height,
            row_height: first.height,
        });
    }

    let y = result.container_height;
    let start = row.start;
    let end = row.end();
    log::trace!(
        "row {start}..{end}: natural width {natural_width}, height {row_height}, y {y}, justified {justified}"
    );

    result
        .rects
        .extend(row.rects.drain(..).map(|rect| Rect { y, ..rect }));
    result.rows.push(Row {
        start,
        end,
        y,
        height: row_height,
        justified,
    });
    result.container_height += row_height + gap;

    row.start = end;
    row.accumulated = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn squares(n: usize) -> Vec<Item> {
        (0..n).map(|_| Item::new(1.0, 1.0)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── tolerance ───────────────────────────────────────────────────────

    #[test]
    fn scale_factor_sign() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        assert!(approx(t.scale_factor(800.0), 0.25));
        assert!(approx(t.scale_factor(1250.0), -0.2));
        assert_eq!(t.scale_factor(1000.0), 0.0);
    }

    #[test]
    fn tolerance_uses_absolute_value() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        // +0.25 is within the stretch limit but beyond the shrink limit.
        assert!(t.is_stretchable(800.0));
        assert!(!t.is_shrinkable(800.0));
        // +0.1 passes the shrink test even though it is a stretch.
        assert!(t.is_shrinkable(1000.0 / 1.1));
        assert!(t.is_shrinkable(1250.0));
        assert!(!t.is_shrinkable(1300.0));
    }

    #[test]
    fn zero_width_fails_both_tests() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        assert!(!t.is_shrinkable(0.0));
        assert!(!t.is_stretchable(0.0));
    }

    // ── placement ───────────────────────────────────────────────────────

    #[test]
    fn place_commits_while_narrower() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        let row = RowState::default();
        assert_eq!(place(&row, 400.0, 10.0, &t), Placement::Commit);
    }

    #[test]
    fn place_commits_when_shrinkable() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        let mut row = RowState::default();
        row.commit(600.0, 200.0, 0.0);
        // 600 + 500 = 1100, factor -0.09
        assert_eq!(place(&row, 500.0, 0.0, &t), Placement::Commit);
    }

    #[test]
    fn place_lone_overflow() {
        let t = Tolerance::new(500.0, &LayoutConfig::default());
        let row = RowState::default();
        assert_eq!(place(&row, 5000.0, 0.0, &t), Placement::CommitAlone);
    }

    #[test]
    fn place_rejects_into_occupied_row() {
        let t = Tolerance::new(1000.0, &LayoutConfig::default());
        let mut row = RowState::default();
        row.commit(600.0, 200.0, 0.0);
        assert_eq!(place(&row, 800.0, 0.0, &t), Placement::CloseAndRetry);
    }

    #[test]
    fn shrink_test_excludes_trailing_gap() {
        // 1190 + 10 gap = 1200 provisional; natural 1190 → factor -0.1597
        let t = Tolerance::new(1000.0, &LayoutConfig::default().maximum_shrink_factor(0.16));
        let row = RowState::default();
        assert_eq!(place(&row, 1190.0, 10.0, &t), Placement::Commit);
    }

    // ── working size ────────────────────────────────────────────────────

    #[test]
    fn working_size_declared_and_default() {
        let c = LayoutConfig::new(100.0);
        assert_eq!(working_size(&Item::new(300.0, 150.0), &c, None), (200.0, 100.0));
        let (w, h) = working_size(&Item::unknown(), &c, None);
        assert!(approx(w, 400.0 / 3.0));
        assert_eq!(h, 100.0);
    }

    #[test]
    fn working_size_uses_baseline_only_in_uniform_mode() {
        let b = Some(UniformBaseline {
            aspect_ratio: 1.5,
            row_height: 80.0,
        });
        let item = Item::new(100.0, 100.0);
        let uniform = LayoutConfig::new(100.0).uniform(true);
        assert_eq!(working_size(&item, &uniform, b), (120.0, 80.0));
        let free = LayoutConfig::new(100.0);
        assert_eq!(working_size(&item, &free, b), (100.0, 100.0));
    }

    // ── compute_layout ──────────────────────────────────────────────────

    #[test]
    fn empty_items() {
        let r = compute_layout(1000.0, &[] as &[Item], &LayoutConfig::default());
        assert_eq!(r, LayoutResult::default());
        assert_eq!(r.container_height, 0.0);
    }

    #[test]
    fn zero_or_invalid_container_width() {
        let items = squares(3);
        let c = LayoutConfig::default();
        assert!(compute_layout(0.0, &items, &c).is_empty());
        assert!(compute_layout(-5.0, &items, &c).is_empty());
        assert!(compute_layout(f64::NAN, &items, &c).is_empty());
    }

    #[test]
    fn row_closes_and_retries_overflowing_item() {
        // Four 300-wide items at height 200 in 1000: the third lands at 900
        // (<1000), the fourth would make 1200 (factor -0.167, shrinkable).
        // A fifth would make 1500, beyond tolerance, and starts row two.
        let items: Vec<Item> = (0..5).map(|_| Item::new(300.0, 200.0)).collect();
        let c = LayoutConfig::new(200.0);
        let r = compute_layout(1000.0, &items, &c);

        assert_eq!(r.row_count(), 2);
        assert_eq!(r.rows[0].range(), 0..4);
        assert_eq!(r.rows[1].range(), 4..5);

        // Row one: 1200 → 1000, height 200/1200*1000.
        let h = 200.0 / 1200.0 * 1000.0;
        assert!(r.rows[0].justified);
        assert!(approx(r.rows[0].height, h));
        for (i, rect) in r.row_rects(&r.rows[0]).iter().enumerate() {
            assert!(approx(rect.width, 250.0));
            assert!(approx(rect.x, 250.0 * i as f64));
            assert_eq!(rect.y, 0.0);
        }

        // Row two: a lone 300 needs +2.33, beyond stretch. Stays nominal.
        assert!(!r.rows[1].justified);
        assert_eq!(r.rects[4], Rect::new(0.0, r.rows[0].height, 300.0, 200.0));
        assert!(approx(r.container_height, h + 200.0));
    }

    #[test]
    fn gap_offsets_items_and_rows() {
        let items = squares(2);
        let c = LayoutConfig::new(100.0).gap(10.0);
        // 100 + 10 + 100 = 210 natural in 220: factor +0.0476 → justified.
        let r = compute_layout(220.0, &items, &c);
        let f = (220.0 - 210.0) / 210.0;
        let w = 100.0 + f * 100.0;
        assert!(approx(r.rects[0].width, w));
        assert_eq!(r.rects[0].x, 0.0);
        assert!(approx(r.rects[1].x, w + 10.0));
        let h = 100.0 / 210.0 * 220.0;
        assert!(approx(r.container_height, h + 10.0));
    }

    #[test]
    fn unjustified_row_keeps_commit_positions() {
        let items = squares(2);
        let c = LayoutConfig::new(100.0).gap(5.0);
        let r = compute_layout(1000.0, &items, &c);
        assert!(!r.rows[0].justified);
        assert_eq!(r.rects[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(r.rects[1], Rect::new(105.0, 0.0, 100.0, 100.0));
        assert_eq!(r.container_height, 105.0);
    }

    #[test]
    fn lone_oversized_item_between_rows() {
        let items = [
            Item::new(1.0, 1.0),
            Item::new(50.0, 1.0),
            Item::new(1.0, 1.0),
        ];
        let c = LayoutConfig::new(100.0);
        let r = compute_layout(1000.0, &items, &c);
        assert_eq!(r.row_count(), 3);
        assert_eq!(r.rows[1].range(), 1..2);
        assert_eq!(r.rects[1].width, 5000.0);
        assert_eq!(r.rects[1].y, 100.0);
        assert_eq!(r.rects[2].y, 200.0);
    }

    #[test]
    fn zero_ratio_item_keeps_nominal_height() {
        let c = LayoutConfig::new(100.0).default_aspect_ratio(0.0);
        let r = compute_layout(500.0, &[Item::unknown()], &c);
        assert_eq!(r.rects[0], Rect::new(0.0, 0.0, 0.0, 100.0));
        assert!(!r.rows[0].justified);
        assert_eq!(r.container_height, 100.0);
    }

    #[test]
    fn uniform_baseline_is_taken_after_justification() {
        // Row one: two 2:1 items, 400 each at height 200 → 800, stretched
        // by 0.25 to 500×250. The baseline is 2.0 at height 250, not 200.
        let items = [
            Item::new(400.0, 200.0),
            Item::new(400.0, 200.0),
            Item::new(4000.0, 100.0),
        ];
        let c = LayoutConfig::new(200.0).uniform(true);
        let r = compute_layout(1000.0, &items, &c);
        assert_eq!(r.row_count(), 2);
        assert_eq!(r.rects[0], Rect::new(0.0, 0.0, 500.0, 250.0));
        assert_eq!(r.rects[2], Rect::new(0.0, 250.0, 500.0, 250.0));
        assert!(!r.rows[1].justified);
        assert_eq!(r.container_height, 500.0);
    }

    #[test]
    fn uniform_later_rows_are_not_rescaled() {
        let items = [
            Item::new(200.0, 200.0),
            Item::new(400.0, 200.0),
            Item::new(300.0, 200.0),
            Item::new(400.0, 100.0),
            Item::new(1000.0, 10.0),
            Item::new(1.0, 9.0),
            Item::unknown(),
        ];
        let c = LayoutConfig::new(200.0).uniform(true);
        let r = compute_layout(1000.0, &items, &c);

        // Row one: 900 → 1000, height 222.2; the first item stays square.
        let h = 200.0 / 900.0 * 1000.0;
        assert_eq!(r.row_count(), 2);
        assert!(r.rows[0].justified);
        assert!(approx(r.rects[0].width, h));

        // Row two: four squares at 222.2 make 888.9. A +0.125 stretch is
        // within tolerance, but the locked row is left alone.
        assert_eq!(r.rows[1].range(), 3..7);
        assert!(!r.rows[1].justified);
        assert!(approx(r.rows[1].height, h));
        for (i, rect) in r.row_rects(&r.rows[1]).iter().enumerate() {
            assert!(approx(rect.width, h));
            assert!(approx(rect.height, h));
            assert!(approx(rect.x, h * i as f64));
            assert!(approx(rect.y, h));
        }
        assert!(approx(r.container_height, 2.0 * h));
    }

    #[test]
    fn rows_partition_items() {
        let items: Vec<Item> = (0..17)
            .map(|i| Item::new(100.0 + (i * 37 % 200) as f64, 100.0))
            .collect();
        let r = compute_layout(640.0, &items, &LayoutConfig::new(120.0).gap(4.0));
        let mut next = 0;
        for row in &r.rows {
            assert_eq!(row.start, next);
            assert!(!row.is_empty());
            next = row.end;
        }
        assert_eq!(next, items.len());
    }

    #[test]
    fn placed_pairs_items_with_rects() {
        let items: [(f64, f64); 2] = [(300.0, 200.0), (200.0, 200.0)];
        let r = compute_layout(1000.0, &items, &LayoutConfig::default());
        let pairs: Vec<_> = r.placed(&items).expect("same length").collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(*pairs[1].0, (200.0, 200.0));
        assert_eq!(pairs[1].1, &r.rects[1]);
    }

    #[test]
    fn placed_rejects_mismatched_items() {
        let items: [(f64, f64); 3] = [(300.0, 200.0), (200.0, 200.0), (100.0, 100.0)];
        let r = compute_layout(1000.0, &items, &LayoutConfig::default());
        assert!(r.placed(&items[..2]).is_none());
        let more = [(1.0_f64, 1.0_f64); 4];
        assert!(r.placed(&more).is_none());
    }

    #[test]
    fn row_rects_of_foreign_row_is_empty() {
        let items = [(1.0_f64, 1.0_f64); 2];
        let small = compute_layout(400.0, &items, &LayoutConfig::new(100.0));
        let large = compute_layout(400.0, &[(1.0_f64, 1.0_f64); 9], &LayoutConfig::new(100.0));
        let last = large.rows.last().expect("rows");
        assert!(last.end > small.rects.len());
        assert!(small.row_rects(last).is_empty());
        assert_eq!(small.row_rects(&small.rows[0]).len(), 2);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.area(), 1200.0);
    }
}
