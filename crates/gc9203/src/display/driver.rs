//! GC9203 partial-refresh driver
//!
//! [`Gc9203`] owns the framebuffer, the colour table and the transport.
//! Drawing calls only touch the framebuffer; [`Gc9203::refresh`] sends what
//! changed.
//!
//! # Example
//!
//! ```
//! use gc9203::{Color, DisplayConfig, Gc9203};
//! use platform::mocks::RecordingPanel;
//!
//! let mut display = Gc9203::new(RecordingPanel::new(), DisplayConfig::default());
//! display.init().unwrap();
//!
//! display.fill_rect(10, 10, 20, 4, Color::RED);
//! display.line(0, 0, 127, 219, Color::WHITE);
//! let stats = display.refresh().unwrap();
//! assert_eq!(stats.rows_scanned, 220);
//! assert!(!display.framebuffer().has_pending());
//! ```

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use platform::{DisplayError, PanelControl, PanelInterface, Rotation};

use super::framebuffer::FrameBuffer;
use super::lut::ColorLut;
use super::refresh::{self, RefreshStats};
use super::{raster, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::hal::{Color, DisplayConfig};

/// GC9203 display driver.
///
/// Generic over the transport `P`: [`SpiPanel`](super::SpiPanel) on
/// hardware, [`platform::mocks::RecordingPanel`] in tests.
pub struct Gc9203<P> {
    panel: P,
    framebuffer: FrameBuffer,
    lut: ColorLut,
    rotation: Rotation,
}

impl<P: PanelInterface> Gc9203<P> {
    /// Create a driver. The framebuffer starts black and clean; nothing is
    /// sent until [`init`](Self::init) or [`refresh`](Self::refresh).
    #[allow(clippy::large_stack_arrays)] // framebuffer is 28 KB
    pub fn new(panel: P, config: DisplayConfig) -> Self {
        Self {
            panel,
            framebuffer: FrameBuffer::new(),
            lut: ColorLut::build(),
            rotation: config.rotation,
        }
    }

    /// Change orientation. Takes effect on the next window addressed.
    pub fn set_rotation(&mut self, rotation: impl Into<Rotation>) {
        self.rotation = rotation.into();
        #[cfg(feature = "defmt")]
        defmt::debug!("GC9203 rotation set to {}", self.rotation);
        #[cfg(feature = "tracing")]
        tracing::debug!(rotation = ?self.rotation, "GC9203 rotation set");
    }

    /// Current orientation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Send every pending change to the panel.
    ///
    /// On a transport error the pass stops and the unsent cells stay dirty,
    /// so calling `refresh` again resumes where it failed.
    pub fn refresh(&mut self) -> Result<RefreshStats, DisplayError> {
        let result = refresh::refresh(
            &mut self.framebuffer,
            &self.lut,
            &mut self.panel,
            self.rotation,
        );
        match result {
            Ok(stats) if !stats.transmitted() => {
                #[cfg(feature = "defmt")]
                defmt::trace!("GC9203 refresh: nothing to send");
                #[cfg(feature = "tracing")]
                tracing::trace!(rows = stats.rows_scanned, "GC9203 refresh: nothing to send");
                Ok(stats)
            }
            Ok(stats) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "GC9203 refresh: rows={=u16} windows={=u16} pixels={=u32}",
                    stats.rows_scanned,
                    stats.windows,
                    stats.pixels
                );
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    rows = stats.rows_scanned,
                    windows = stats.windows,
                    pixels = stats.pixels,
                    "GC9203 refresh"
                );
                Ok(stats)
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("GC9203 refresh aborted by transport error");
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?_e, "GC9203 refresh aborted by transport error");
                Err(DisplayError::Transport)
            }
        }
    }

    /// Zero the framebuffer and mark every row for the next refresh.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Paint the whole framebuffer with `color`.
    pub fn fill(&mut self, color: impl Into<Color>) {
        self.framebuffer.fill(color.into());
    }

    /// Set one pixel. Off-screen coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: impl Into<Color>) {
        self.framebuffer.set_pixel(x, y, color.into());
    }

    /// Set one pixel, returning [`DisplayError::OutOfBounds`] off-screen.
    pub fn try_set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: impl Into<Color>,
    ) -> Result<(), DisplayError> {
        self.framebuffer.try_set_pixel(x, y, color.into())
    }

    /// Draw a line, both endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: impl Into<Color>) {
        raster::line(&mut self.framebuffer, x0, y0, x1, y1, color.into());
    }

    /// Draw a rectangle outline.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: impl Into<Color>) {
        raster::rect(&mut self.framebuffer, x, y, w, h, color.into());
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: impl Into<Color>) {
        raster::fill_rect(&mut self.framebuffer, x, y, w, h, color.into());
    }

    /// The framebuffer.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// The colour table.
    pub fn lut(&self) -> &ColorLut {
        &self.lut
    }

    /// The transport.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The transport, mutably.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Consume the driver and return the transport.
    pub fn release(self) -> P {
        self.panel
    }
}

impl<P: PanelControl> Gc9203<P> {
    /// Bring the panel up and blank it.
    ///
    /// Resets the controller, runs its register setup for the current
    /// rotation, clears the framebuffer and refreshes once.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Initialising GC9203 ({=u32}x{=u32})", DISPLAY_WIDTH, DISPLAY_HEIGHT);
        #[cfg(feature = "tracing")]
        tracing::info!(
            width = DISPLAY_WIDTH,
            height = DISPLAY_HEIGHT,
            "Initialising GC9203"
        );

        self.panel.reset().map_err(|_| DisplayError::Transport)?;
        self.panel
            .configure(self.rotation)
            .map_err(|_| DisplayError::Transport)?;

        self.clear();
        self.refresh()?;

        #[cfg(feature = "defmt")]
        defmt::info!("GC9203 initialisation complete");
        #[cfg(feature = "tracing")]
        tracing::info!("GC9203 initialisation complete");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DrawTarget — embedded-graphics renders through set_pixel
// ---------------------------------------------------------------------------

impl<P: PanelInterface> DrawTarget for Gc9203<P> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.framebuffer.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let h = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.fill_rect(area.top_left.x, area.top_left.y, w, h, color);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<P: PanelInterface> OriginDimensions for Gc9203<P> {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
