//! A headless nested-scroll coordinator for collapsing-header layouts.
//!
//! For adapter-level utilities (pointer-event wiring, frame ticking), see the
//! `coordinator-adapter` crate.
//!
//! This crate implements the arbitration and physics behind the classic
//! "collapsing header" interaction: a header region that folds away as the
//! content below it scrolls, with drags and flings transferring seamlessly
//! across the boundary. It covers:
//! - touch-slop based drag recognition from raw pointer samples
//! - gesture velocity tracking over a bounded time window
//! - per-delta arbitration of how much motion the header consumes versus how
//!   much passes through to the content
//! - an exponential-decay fling simulation that continues the same
//!   consumption policy after release
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - pointer samples (`y` position + timestamp)
//! - header/hover extents from its own measurement pass
//! - a resolver for the currently front-facing scrollable content
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod coordinator;
mod fling;
mod gesture;
mod options;
mod types;
mod velocity;

#[cfg(test)]
mod tests;

pub use coordinator::Coordinator;
pub use fling::{DEFAULT_DECAY_PER_MS, DEFAULT_SETTLE_VELOCITY, DecayCurve};
pub use gesture::{DEFAULT_TOUCH_SLOP, GestureEvent, GestureTracker};
pub use options::{ContentResolver, CoordinatorOptions, OnChangeCallback, ScrollableContent};
pub use types::{CoordinatorState, Extents, PointerSample, ScrollOrigin};
pub use velocity::{DEFAULT_VELOCITY_WINDOW_MS, VelocityTracker};
