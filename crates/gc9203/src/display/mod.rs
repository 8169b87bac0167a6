//! GC9203 display driver
//!
//! The panel is 128 columns × 220 rows, driven over a 16-bit command/data
//! serial link. Drawing happens in an off-screen framebuffer; only cells
//! that changed since the last refresh are sent to the panel.
//!
//! ```text
//! raster ──► framebuffer (cells + row index) ──► refresh ──► PanelInterface
//!                                                  ▲
//!                                                 lut
//! ```

pub mod driver;
pub mod framebuffer;
pub mod lut;
pub mod raster;
pub mod refresh;
pub mod spi;

pub use driver::Gc9203;
pub use framebuffer::{FrameBuffer, RowIndex};
pub use lut::ColorLut;
pub use refresh::{RefreshStats, SEPARATION_THRESHOLD};
pub use spi::SpiPanel;

/// Display width in pixels (columns)
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels (rows)
pub const DISPLAY_HEIGHT: u32 = 220;

/// Framebuffer columns
pub const WIDTH: usize = DISPLAY_WIDTH as usize;

/// Framebuffer rows
pub const HEIGHT: usize = DISPLAY_HEIGHT as usize;

/// Bytes in the row index (one bit per row): 220 rows → 28 bytes.
pub const ROW_INDEX_BYTES: usize = HEIGHT.div_ceil(8);
