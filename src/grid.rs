//! Layout cache tying the pieces together.
//!
//! [`JustifiedGrid`] recomputes the whole layout when the container width,
//! the item count or the config changes and otherwise hands back the cached result. The
//! host pairs it with a [`WidthObserver`](crate::WidthObserver) for the
//! width and a [`HeightSink`] for the container height.
//!
//! ```
//! use justgrid::{Item, JustifiedGrid, LayoutConfig};
//!
//! let items = vec![Item::new(4.0, 3.0); 5];
//! let mut grid = JustifiedGrid::new(LayoutConfig::new(150.0).gap(6.0));
//!
//! let rows = grid.layout(900, &items).row_count();
//! assert!(rows >= 1);
//! assert_eq!(grid.cached_width(), Some(900));
//! ```

use crate::config::LayoutConfig;
use crate::item::GridItem;
use crate::layout::{LayoutResult, compute_layout};
use crate::sink::{HeightSink, HeightTarget};

/// What a cached layout was computed for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CacheKey {
    width: u32,
    items: usize,
}

/// Layout config plus the result for the last width and item count it was
/// computed at.
#[derive(Clone, Debug, Default)]
pub struct JustifiedGrid {
    config: LayoutConfig,
    cache: Option<(CacheKey, LayoutResult)>,
}

impl JustifiedGrid {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the config, dropping the cached layout if it changed.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if config != self.config {
            self.config = config;
            self.cache = None;
        }
    }

    /// Drop the cached layout. Call after items change in place without
    /// changing their count.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Width the cached layout was computed at.
    pub fn cached_width(&self) -> Option<u32> {
        self.cache.as_ref().map(|(key, _)| key.width)
    }

    /// Last computed layout, if any.
    pub fn cached(&self) -> Option<&LayoutResult> {
        self.cache.as_ref().map(|(_, r)| r)
    }

    /// Layout for `width`, recomputed only when the width or the number of
    /// items differs from the cached one.
    ///
    /// The returned result always has one rect per item. Item dimensions are
    /// not compared; call [`invalidate`](Self::invalidate) when they change.
    pub fn layout<T: GridItem>(&mut self, width: u32, items: &[T]) -> &LayoutResult {
        let key = CacheKey {
            width,
            items: items.len(),
        };
        if self.cache.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.cache = None;
        }
        let config = &self.config;
        let (_, result) = self.cache.get_or_insert_with(|| {
            log::debug!("laying out {} items at width {width}", items.len());
            (key, compute_layout(f64::from(width), items, config))
        });
        result
    }

    /// Push the cached container height through `sink`.
    ///
    /// Returns whether the sink wrote a new height. Nothing is written
    /// before the first layout.
    pub fn sync_height<H: HeightTarget>(&self, sink: &mut HeightSink<H>) -> bool {
        match self.cached() {
            Some(result) => sink.sync(result.container_height),
            None => false,
        }
    }
}
