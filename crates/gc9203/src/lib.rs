//! GC9203 LCD driver with partial refresh
//!
//! Driver for the 128×220 GC9203 TFT controller. All drawing lands in an
//! off-screen framebuffer that tracks which pixels changed; a refresh sends
//! only those pixels, grouped into short horizontal windows.
//!
//! # Architecture
//!
//! ```text
//! Application code (or embedded-graphics primitives)
//!         ↓
//! Gc9203 driver (display::driver)
//!         ↓
//! FrameBuffer + RowIndex ──► refresh ──► ColorLut
//!         ↓
//! PanelInterface (platform crate) ── SpiPanel on hardware
//! ```
//!
//! # Features
//!
//! - `defmt` - `defmt` log statements and `defmt::Format` derives (embedded)
//! - `tracing` - `tracing` events (desktop and host tests)
//! - `std` - Enable standard library and the platform mocks
//!
//! # Example
//!
//! ```no_run
//! use gc9203::{Color, DisplayConfig, Gc9203, Rotation, SpiPanel};
//! # fn demo<SPI, DC, RST, D>(spi: SPI, dc: DC, rst: RST, delay: D)
//! # where
//! #     SPI: embedded_hal::spi::SpiDevice,
//! #     DC: embedded_hal::digital::OutputPin,
//! #     RST: embedded_hal::digital::OutputPin,
//! #     D: embedded_hal::delay::DelayNs,
//! # {
//! let panel = SpiPanel::new(spi, dc, rst, delay);
//! let mut display = Gc9203::new(panel, DisplayConfig::with_rotation(Rotation::Deg90));
//! display.init().ok();
//! display.rect(4, 4, 60, 30, Color::WHITE);
//! display.refresh().ok();
//! # }
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)] // x0/y0/x1/y1 drawing arguments
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod display;
pub mod hal;

pub use display::{
    ColorLut, FrameBuffer, Gc9203, RefreshStats, SpiPanel, DISPLAY_HEIGHT, DISPLAY_WIDTH,
    SEPARATION_THRESHOLD,
};
pub use hal::{Color, DisplayConfig};
pub use platform::{DisplayError, PanelControl, PanelInterface, Rotation};
