//! Items to be laid out.
//!
//! The engine only needs an item's natural dimensions, so any caller type
//! can be laid out by implementing [`GridItem`]. Caller fields stay on the
//! caller's type; results line up with the input slice by index.

/// Something with optional natural dimensions.
///
/// A dimension counts as declared only when it is present and strictly
/// positive. Items that don't declare both fall back to
/// [`LayoutConfig::default_aspect_ratio`](crate::LayoutConfig::default_aspect_ratio).
pub trait GridItem {
    /// Natural width, if known.
    fn width(&self) -> Option<f64> {
        None
    }

    /// Natural height, if known.
    fn height(&self) -> Option<f64> {
        None
    }

    /// `width / height` when both are declared.
    fn aspect_ratio(&self) -> Option<f64> {
        match (self.width(), self.height()) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(w / h),
            _ => None,
        }
    }
}

/// Plain item record with optional dimensions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<f64>,
}

impl Item {
    /// Item with both natural dimensions.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Item with no known dimensions.
    pub const fn unknown() -> Self {
        Self {
            width: None,
            height: None,
        }
    }
}

impl GridItem for Item {
    fn width(&self) -> Option<f64> {
        self.width
    }

    fn height(&self) -> Option<f64> {
        self.height
    }
}

impl GridItem for (f64, f64) {
    fn width(&self) -> Option<f64> {
        Some(self.0)
    }

    fn height(&self) -> Option<f64> {
        Some(self.1)
    }
}

impl GridItem for Option<(f64, f64)> {
    fn width(&self) -> Option<f64> {
        self.map(|(w, _)| w)
    }

    fn height(&self) -> Option<f64> {
        self.map(|(_, h)| h)
    }
}

impl<T: GridItem + ?Sized> GridItem for &T {
    fn width(&self) -> Option<f64> {
        (**self).width()
    }

    fn height(&self) -> Option<f64> {
        (**self).height()
    }

    fn aspect_ratio(&self) -> Option<f64> {
        (**self).aspect_ratio()
    }
}
