//! Applying the computed container height to a rendered element.
//!
//! Sub-pixel differences between successive layouts can make a host bounce
//! between two heights, each resize triggering another layout. [`HeightSink`]
//! only writes a new height when it moves by more than a threshold.

/// Element whose layout height can be read and set.
pub trait HeightTarget {
    /// Height currently applied.
    fn applied_height(&self) -> f64;
    fn apply_height(&mut self, height: f64);
}

impl<T: HeightTarget + ?Sized> HeightTarget for &mut T {
    fn applied_height(&self) -> f64 {
        (**self).applied_height()
    }

    fn apply_height(&mut self, height: f64) {
        (**self).apply_height(height)
    }
}

/// Minimum change written by [`HeightSink::new`].
pub const DEFAULT_HEIGHT_THRESHOLD: f64 = 10.0;

/// Writes container heights to a [`HeightTarget`], skipping small changes.
#[derive(Clone, Debug)]
pub struct HeightSink<T> {
    target: T,
    threshold: f64,
}

impl<T: HeightTarget> HeightSink<T> {
    pub fn new(target: T) -> Self {
        Self::with_threshold(target, DEFAULT_HEIGHT_THRESHOLD)
    }

    pub fn with_threshold(target: T, threshold: f64) -> Self {
        Self { target, threshold }
    }

    /// Apply `height` if it differs from the applied height by more than the
    /// threshold. Returns whether the target was written.
    pub fn sync(&mut self, height: f64) -> bool {
        let applied = self.target.applied_height();
        let delta = height - applied;
        if !(num_traits::Float::abs(delta) > self.threshold) {
            log::trace!("container height {height} within {} of {applied}", self.threshold);
            return false;
        }
        self.target.apply_height(height);
        true
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}
