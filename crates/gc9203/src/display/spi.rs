//! GC9203 SPI transport
//!
//! Implements [`PanelInterface`] and [`PanelControl`] over `embedded-hal`
//! blocking traits.
//!
//! # Wiring
//!
//! | Signal | Direction |
//! |--------|-----------|
//! | SCK    | Host → Display |
//! | MOSI   | Host → Display |
//! | CS     | Managed by `SpiDevice` |
//! | DC     | Host → Display (low = command, high = data) |
//! | RST    | Host → Display |
//!
//! Every command and data item is one 16-bit word sent MSB-first in its own
//! SPI transaction, so chip select toggles around each word.
//!
//! # Window addressing
//!
//! The controller's horizontal window registers start at column 24 of its
//! GRAM. In portrait (0°/180°) framebuffer columns go to the horizontal
//! registers; in landscape (90°/270°) the axes are swapped and framebuffer
//! rows go there instead. The offset always applies to the horizontal pair.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use platform::{DisplayError, PanelControl, PanelInterface, Rotation};

/// First addressable GRAM column of the panel.
pub const DEFAULT_COLUMN_OFFSET: u16 = 24;

/// GC9203 register / command codes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Driver output control
    DriverOutput = 0x0001,
    /// Entry mode (scan direction, see [`entry_mode`])
    EntryMode = 0x0003,
    /// SPI 2-data-lane control
    Spi2Data = 0x0005,
    /// Display control 1 (display on/off)
    DisplayControl1 = 0x0007,
    /// Display control 2 (porches)
    DisplayControl2 = 0x0008,
    /// Oscillator control
    Oscillator = 0x000F,
    /// Power control 1 (standby)
    PowerControl1 = 0x0010,
    /// Power control 2 (boost)
    PowerControl2 = 0x0011,
    /// Start writing pixel data to GRAM
    WriteGram = 0x0022,
    /// Gate scan control
    GateScan = 0x0030,
    /// Horizontal window end
    HorizontalEnd = 0x0036,
    /// Horizontal window start
    HorizontalStart = 0x0037,
    /// Vertical window end
    VerticalEnd = 0x0038,
    /// Vertical window start
    VerticalStart = 0x0039,
    /// Inter-register enable 1
    InterRegisterEnable1 = 0x00FE,
    /// Inter-register enable 2
    InterRegisterEnable2 = 0x00FF,
}

/// Entry-mode register value for a rotation.
pub const fn entry_mode(rotation: Rotation) -> u16 {
    match rotation {
        Rotation::Deg0 => 0x1000,
        Rotation::Deg90 => 0x1030,
        Rotation::Deg180 => 0x1028,
        Rotation::Deg270 => 0x1018,
    }
}

/// GC9203 panel on an SPI bus.
///
/// Generic over:
/// - `SPI` — an [`embedded_hal::spi::SpiDevice`] (manages CS).
/// - `DC`  — Data/Command [`embedded_hal::digital::OutputPin`].
/// - `RST` — Reset [`embedded_hal::digital::OutputPin`].
/// - `DELAY` — [`embedded_hal::delay::DelayNs`] for reset and power-up timing.
///
/// Clock rate is set by whoever builds the `SpiDevice`; the panel is known
/// to be stable at 40 MHz.
pub struct SpiPanel<SPI, DC, RST, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: DELAY,
    column_offset: u16,
}

impl<SPI, DC, RST, DELAY> SpiPanel<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create a transport with the default column offset.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
            column_offset: DEFAULT_COLUMN_OFFSET,
        }
    }

    /// Override the horizontal GRAM offset for panels with a different glass.
    #[must_use]
    pub fn with_offset(mut self, column_offset: u16) -> Self {
        self.column_offset = column_offset;
        self
    }

    /// Horizontal GRAM offset in use.
    pub fn column_offset(&self) -> u16 {
        self.column_offset
    }

    /// Give the bus and pins back.
    pub fn release(self) -> (SPI, DC, RST, DELAY) {
        (self.spi, self.dc, self.rst, self.delay)
    }

    // -----------------------------------------------------------------------
    // Low-level SPI helpers
    // -----------------------------------------------------------------------

    /// Send one 16-bit word, MSB first.
    fn write_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.spi
            .write(&word.to_be_bytes())
            .map_err(|_| DisplayError::Transport)
    }

    /// Assert DC low (command mode) and send a command word.
    fn command(&mut self, code: u16) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Gpio)?;
        self.write_word(code)
    }

    /// Assert DC high (data mode) and send a data word.
    fn data(&mut self, word: u16) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
        self.write_word(word)
    }

    /// Select `reg` and write one value to it.
    fn write_register(&mut self, reg: Register, value: u16) -> Result<(), DisplayError> {
        self.command(reg as u16)?;
        self.data(value)
    }
}

impl<SPI, DC, RST, DELAY> PanelInterface for SpiPanel<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Error = DisplayError;

    fn send_command(&mut self, code: u16) -> Result<(), Self::Error> {
        self.command(code)
    }

    fn send_data(&mut self, word: u16) -> Result<(), Self::Error> {
        self.data(word)
    }

    /// Re-send the entry mode, program the window, then open GRAM for writing.
    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        rotation: Rotation,
    ) -> Result<(), Self::Error> {
        self.write_register(Register::EntryMode, entry_mode(rotation))?;

        let (h1, h2, v1, v2) = if rotation.swaps_axes() {
            (y1, y2, x1, x2)
        } else {
            (x1, x2, y1, y2)
        };
        let offset = self.column_offset;
        self.write_register(Register::HorizontalStart, h1.saturating_add(offset))?;
        self.write_register(Register::HorizontalEnd, h2.saturating_add(offset))?;
        self.write_register(Register::VerticalStart, v1)?;
        self.write_register(Register::VerticalEnd, v2)?;

        self.command(Register::WriteGram as u16)
    }
}

impl<SPI, DC, RST, DELAY> PanelControl for SpiPanel<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// RST HIGH 5 ms → LOW 10 ms → HIGH 120 ms.
    fn reset(&mut self) -> Result<(), Self::Error> {
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(5);
        self.rst.set_low().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(10);
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(120);
        Ok(())
    }

    /// Register bring-up, ending with the display switched on.
    fn configure(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        // 1. Unlock the extended register set
        self.command(Register::InterRegisterEnable1 as u16)?;
        self.command(Register::InterRegisterEnable2 as u16)?;

        // 2. Scan geometry
        self.write_register(Register::DriverOutput, 0x001C)?;
        self.write_register(Register::EntryMode, entry_mode(rotation))?;
        self.write_register(Register::Spi2Data, 0x0000)?;
        self.write_register(Register::DisplayControl2, 0x0404)?;
        self.write_register(Register::Oscillator, 0x0701)?;

        // 3. Leave standby and start the booster
        self.write_register(Register::PowerControl1, 0x0000)?;
        self.write_register(Register::PowerControl2, 0x1000)?;
        self.delay.delay_ms(120);

        self.write_register(Register::GateScan, 0x0000)?;

        // 4. Display on, then let the panel settle
        self.write_register(Register::DisplayControl1, 0x0013)?;
        self.delay.delay_ms(200);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// The three SPI expectations for one `SpiDevice::write` of a 16-bit word:
    /// TransactionStart + Write([hi, lo]) + TransactionEnd.
    fn spi_word(word: u16) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(word.to_be_bytes().to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    /// Tagged words: `(is_data, word)`.
    fn spi_words(words: &[(bool, u16)]) -> Vec<SpiTransaction<u8>> {
        words.iter().flat_map(|&(_, w)| spi_word(w)).collect()
    }

    /// DC expectations matching tagged words.
    fn dc_levels(words: &[(bool, u16)]) -> Vec<PinTransaction> {
        words
            .iter()
            .map(|&(is_data, _)| {
                PinTransaction::set(if is_data {
                    PinState::High
                } else {
                    PinState::Low
                })
            })
            .collect()
    }

    fn cmd(code: u16) -> (bool, u16) {
        (false, code)
    }

    fn dat(word: u16) -> (bool, u16) {
        (true, word)
    }

    fn reg(r: Register, value: u16) -> [(bool, u16); 2] {
        [cmd(r as u16), dat(value)]
    }

    fn window_words(
        rotation: Rotation,
        h: (u16, u16),
        v: (u16, u16),
    ) -> Vec<(bool, u16)> {
        let mut words = Vec::new();
        words.extend(reg(Register::EntryMode, entry_mode(rotation)));
        words.extend(reg(Register::HorizontalStart, h.0));
        words.extend(reg(Register::HorizontalEnd, h.1));
        words.extend(reg(Register::VerticalStart, v.0));
        words.extend(reg(Register::VerticalEnd, v.1));
        words.push(cmd(Register::WriteGram as u16));
        words
    }

    fn idle_pin() -> PinMock {
        PinMock::new(&[])
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_register_codes() {
        assert_eq!(Register::EntryMode as u16, 0x0003);
        assert_eq!(Register::WriteGram as u16, 0x0022);
        assert_eq!(Register::HorizontalStart as u16, 0x0037);
        assert_eq!(Register::HorizontalEnd as u16, 0x0036);
        assert_eq!(Register::VerticalStart as u16, 0x0039);
        assert_eq!(Register::VerticalEnd as u16, 0x0038);
    }

    #[test]
    fn test_entry_mode_per_rotation() {
        assert_eq!(entry_mode(Rotation::Deg0), 0x1000);
        assert_eq!(entry_mode(Rotation::Deg90), 0x1030);
        assert_eq!(entry_mode(Rotation::Deg180), 0x1028);
        assert_eq!(entry_mode(Rotation::Deg270), 0x1018);
    }

    /// A data word goes out MSB first with DC high.
    #[test]
    fn test_send_data_word() {
        let words = [dat(0xC618)];
        let mut spi = SpiMock::new(&spi_words(&words));
        let mut dc = PinMock::new(&dc_levels(&words));
        let mut rst = idle_pin();

        let mut panel = SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay);
        panel.send_data(0xC618).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    /// Portrait: columns go to the horizontal registers with the offset.
    #[test]
    fn test_set_window_portrait() {
        let words = window_words(Rotation::Deg180, (10 + 24, 20 + 24), (5, 5));
        let mut spi = SpiMock::new(&spi_words(&words));
        let mut dc = PinMock::new(&dc_levels(&words));
        let mut rst = idle_pin();

        let mut panel = SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay);
        panel.set_window(10, 5, 20, 5, Rotation::Deg180).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    /// Landscape: rows go to the horizontal registers with the offset.
    #[test]
    fn test_set_window_landscape_swaps_axes() {
        let words = window_words(Rotation::Deg90, (5 + 24, 5 + 24), (10, 20));
        let mut spi = SpiMock::new(&spi_words(&words));
        let mut dc = PinMock::new(&dc_levels(&words));
        let mut rst = idle_pin();

        let mut panel = SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay);
        panel.set_window(10, 5, 20, 5, Rotation::Deg90).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn test_custom_offset() {
        let words = window_words(Rotation::Deg0, (0, 3), (0, 0));
        let mut spi = SpiMock::new(&spi_words(&words));
        let mut dc = PinMock::new(&dc_levels(&words));
        let mut rst = idle_pin();

        let mut panel =
            SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay).with_offset(0);
        assert_eq!(panel.column_offset(), 0);
        panel.set_window(0, 0, 3, 0, Rotation::Deg0).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    /// RST HIGH → LOW → HIGH, no bus traffic.
    #[test]
    fn test_reset_sequence() {
        let mut spi = SpiMock::new(&[]);
        let mut dc = idle_pin();
        let mut rst = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut panel = SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay);
        panel.reset().unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    /// Every word of the bring-up sequence, in order.
    #[test]
    fn test_configure_sequence() {
        let mut words = vec![cmd(0x00FE), cmd(0x00FF)];
        words.extend(reg(Register::DriverOutput, 0x001C));
        words.extend(reg(Register::EntryMode, 0x1018));
        words.extend(reg(Register::Spi2Data, 0x0000));
        words.extend(reg(Register::DisplayControl2, 0x0404));
        words.extend(reg(Register::Oscillator, 0x0701));
        words.extend(reg(Register::PowerControl1, 0x0000));
        words.extend(reg(Register::PowerControl2, 0x1000));
        words.extend(reg(Register::GateScan, 0x0000));
        words.extend(reg(Register::DisplayControl1, 0x0013));

        let mut spi = SpiMock::new(&spi_words(&words));
        let mut dc = PinMock::new(&dc_levels(&words));
        let mut rst = idle_pin();

        let mut panel = SpiPanel::new(spi.clone(), dc.clone(), rst.clone(), NoopDelay);
        panel.configure(Rotation::Deg270).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }
}
