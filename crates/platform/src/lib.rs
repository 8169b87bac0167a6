//! Hardware Abstraction Layer (HAL) for small LCD panel drivers
//!
//! This crate provides the trait seam between panel drivers and the bus
//! that reaches the controller, so that driver logic can be developed and
//! tested without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application code
//!         ↓
//! Panel driver (gc9203 crate - framebuffer, refresh, raster)
//!         ↓
//! Platform HAL (this crate - PanelInterface / PanelControl)
//!         ↓
//! Bus transport (embedded-hal SPI + GPIO)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{PanelInterface, Rotation};
//!
//! fn paint_corner<P: PanelInterface>(panel: &mut P) -> Result<(), P::Error> {
//!     panel.set_window(0, 0, 0, 0, Rotation::Deg0)?;
//!     panel.send_data(0xFFFF)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod display;
pub mod mocks;

pub use display::{DisplayError, PanelControl, PanelInterface, Rotation};
