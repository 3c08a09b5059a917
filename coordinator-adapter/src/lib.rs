//! Adapter utilities for the `coordinator` crate.
//!
//! The `coordinator` crate is UI-agnostic and focuses on the core arbitration
//! and fling physics. This crate provides the small, framework-neutral glue a
//! host toolkit typically needs on top:
//!
//! - Wiring raw pointer events for the header drag surface through a
//!   [`coordinator::GestureTracker`] into the coordinator's pre-/post-scroll
//!   pipeline
//! - Routing content-origin scroll deltas and release velocities into the
//!   shared arbitration, so drags and flings behave identically no matter
//!   which surface they started on
//! - Frame ticking for the fling simulation
//!
//! This crate is intentionally framework-agnostic (no winit/ratatui bindings).
#![forbid(unsafe_code)]

mod controller;


pub use controller::Controller;
