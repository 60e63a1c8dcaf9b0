//! Justified grid layout: rows of items scaled to fill a container width.
//!
//! The layout engine is pure geometry with no I/O or clocks.
//! The remaining modules are small framework-independent pieces a host UI
//! wires around it.
//!
//! # Modules
//!
//! - [`layout`]: Greedy row packing, justification, uniform rows
//! - [`config`]: Layout parameters and upstream validation
//! - [`item`]: The [`GridItem`] trait for caller item types
//! - [`debounce`]: Trailing-edge debounce driven by caller timestamps
//! - [`observer`]: Debounced container width observation
//! - [`sink`]: Threshold-gated container height application
//! - [`grid`]: Layout cache keyed on width and item count

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod debounce;
pub mod grid;
pub mod item;
pub mod layout;
pub mod observer;
pub mod sink;

pub use config::{ConfigError, LayoutConfig};
#[cfg(feature = "std")]
pub use debounce::MonotonicClock;
pub use debounce::Debouncer;
pub use grid::JustifiedGrid;
pub use item::{GridItem, Item};
pub use layout::{LayoutResult, Rect, Row, compute_layout};
pub use observer::{EventKind, ObserverEvent, WidthObserver, WidthSource};
pub use sink::{HeightSink, HeightTarget};
