//! Layout configuration and upstream validation.
//!
//! [`LayoutConfig`] is a plain `Copy` value built with chained setters. The
//! layout engine never validates it; callers that accept configs from
//! outside can run [`LayoutConfig::validate`] first.
//!
//! # Example
//!
//! ```
//! use justgrid::LayoutConfig;
//!
//! let config = LayoutConfig::new(180.0).gap(8.0).uniform(true);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.maximum_shrink_factor, 0.2);
//! ```

use crate::item::GridItem;
use crate::layout::{LayoutResult, compute_layout};

/// Nominal row height used by [`LayoutConfig::default`].
pub const DEFAULT_ROW_HEIGHT: f64 = 200.0;
/// Default bound on how far a row may be compressed.
pub const DEFAULT_MAXIMUM_SHRINK_FACTOR: f64 = 0.2;
/// Default bound on how far a row may be expanded.
pub const DEFAULT_MAXIMUM_STRETCH_FACTOR: f64 = 0.5;
/// Aspect ratio for items that don't declare both dimensions.
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Parameters for justified row packing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Nominal row height before justification.
    pub row_height: f64,
    /// Spacing between adjacent items in a row and between rows.
    pub gap: f64,
    /// Largest fractional change allowed when compressing a row.
    pub maximum_shrink_factor: f64,
    /// Largest fractional change allowed when expanding a row.
    pub maximum_stretch_factor: f64,
    /// Width / height ratio for items lacking declared dimensions.
    pub default_aspect_ratio: f64,
    /// Lock every row after the first to the first row's aspect ratio and height.
    pub uniform: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            gap: 0.0,
            maximum_shrink_factor: DEFAULT_MAXIMUM_SHRINK_FACTOR,
            maximum_stretch_factor: DEFAULT_MAXIMUM_STRETCH_FACTOR,
            default_aspect_ratio: DEFAULT_ASPECT_RATIO,
            uniform: false,
        }
    }
}

impl LayoutConfig {
    /// Create a config with the given nominal row height and defaults elsewhere.
    pub fn new(row_height: f64) -> Self {
        Self {
            row_height,
            ..Self::default()
        }
    }

    /// Set the nominal row height.
    pub fn row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the gap between items and between rows.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the maximum shrink factor.
    pub fn maximum_shrink_factor(mut self, factor: f64) -> Self {
        self.maximum_shrink_factor = factor;
        self
    }

    /// Set the maximum stretch factor.
    pub fn maximum_stretch_factor(mut self, factor: f64) -> Self {
        self.maximum_stretch_factor = factor;
        self
    }

    /// Set the fallback aspect ratio.
    pub fn default_aspect_ratio(mut self, ratio: f64) -> Self {
        self.default_aspect_ratio = ratio;
        self
    }

    /// Enable or disable uniform rows.
    pub fn uniform(mut self, uniform: bool) -> Self {
        self.uniform = uniform;
        self
    }

    /// Lay out `items` in a container `container_width` wide.
    ///
    /// Shorthand for [`compute_layout`].
    pub fn compute<T: GridItem>(&self, container_width: f64, items: &[T]) -> LayoutResult {
        compute_layout(container_width, items, self)
    }

    /// Check that every field is in its documented range.
    ///
    /// The engine accepts any config and degrades to odd geometry on bad
    /// values; this is for callers that want to reject them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::RowHeight);
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(ConfigError::Gap);
        }
        if !in_unit_interval(self.maximum_shrink_factor) {
            return Err(ConfigError::ShrinkFactor);
        }
        if !in_unit_interval(self.maximum_stretch_factor) {
            return Err(ConfigError::StretchFactor);
        }
        if !(self.default_aspect_ratio.is_finite() && self.default_aspect_ratio > 0.0) {
            return Err(ConfigError::AspectRatio);
        }
        Ok(())
    }
}

/// `(0, 1]`
fn in_unit_interval(v: f64) -> bool {
    v > 0.0 && v <= 1.0
}

/// Config validation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Row height is zero, negative, or not finite.
    RowHeight,
    /// Gap is negative or not finite.
    Gap,
    /// Shrink factor outside `(0, 1]`.
    ShrinkFactor,
    /// Stretch factor outside `(0, 1]`.
    StretchFactor,
    /// Default aspect ratio is zero, negative, or not finite.
    AspectRatio,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::RowHeight => "row height must be a positive finite number",
            Self::Gap => "gap must be a non-negative finite number",
            Self::ShrinkFactor => "maximum shrink factor must be in (0, 1]",
            Self::StretchFactor => "maximum stretch factor must be in (0, 1]",
            Self::AspectRatio => "default aspect ratio must be a positive finite number",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}
