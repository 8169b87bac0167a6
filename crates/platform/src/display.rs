//! Display abstraction layer
//!
//! The panel transport is split in two traits:
//!
//! - [`PanelInterface`] is everything the partial-refresh engine needs:
//!   command words, data words, and a window-addressing primitive.
//! - [`PanelControl`] adds the lifecycle a physical transport owns (reset
//!   pulse, vendor register sequence). Only driver initialisation needs it.
//!
//! Both are blocking. The transport enforces its own electrical timing and
//! has no timeout or cancellation.

/// Panel orientation.
///
/// Rotation never changes how the framebuffer is stored. It is applied only
/// when a window is addressed on the panel and when the entry-mode register
/// is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native portrait orientation.
    #[default]
    Deg0,
    /// Landscape, axes swapped.
    Deg90,
    /// Portrait, upside down.
    Deg180,
    /// Landscape, axes swapped, upside down.
    Deg270,
}

impl Rotation {
    /// Build a rotation from any quarter-turn count; wraps modulo 4.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Quarter-turn count in `0..=3`.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// `true` for 90° and 270°, where panel X/Y addressing is swapped.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl From<u8> for Rotation {
    fn from(turns: u8) -> Self {
        Self::from_quarter_turns(turns)
    }
}

/// Command/data transport to a panel controller.
pub trait PanelInterface {
    /// Transport error type
    type Error: core::fmt::Debug;

    /// Select a controller register or operation.
    fn send_command(&mut self, code: u16) -> Result<(), Self::Error>;

    /// Write one data word to the currently selected register.
    fn send_data(&mut self, word: u16) -> Result<(), Self::Error>;

    /// Open an inclusive `(x1, y1)..=(x2, y2)` window in native framebuffer
    /// coordinates. Subsequent [`send_data`](Self::send_data) calls stream
    /// pixels into it.
    ///
    /// Implementations re-encode the coordinates for `rotation`.
    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        rotation: Rotation,
    ) -> Result<(), Self::Error>;
}

/// Panel lifecycle on top of [`PanelInterface`].
pub trait PanelControl: PanelInterface {
    /// Hardware reset pulse.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Run the controller's register initialisation for `rotation` and turn
    /// the display on.
    fn configure(&mut self, rotation: Rotation) -> Result<(), Self::Error>;
}

impl<T: PanelInterface + ?Sized> PanelInterface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, code: u16) -> Result<(), Self::Error> {
        (**self).send_command(code)
    }

    fn send_data(&mut self, word: u16) -> Result<(), Self::Error> {
        (**self).send_data(word)
    }

    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        rotation: Rotation,
    ) -> Result<(), Self::Error> {
        (**self).set_window(x1, y1, x2, y2, rotation)
    }
}

impl<T: PanelControl + ?Sized> PanelControl for &mut T {
    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn configure(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        (**self).configure(rotation)
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    #[error("display transport error")]
    Transport,
    /// GPIO operation failed
    #[error("display GPIO error")]
    Gpio,
    /// Coordinate outside the framebuffer
    #[error("coordinate out of bounds")]
    OutOfBounds,
}
