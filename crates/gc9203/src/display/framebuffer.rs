//! Dirty-tracked framebuffer
//!
//! One byte per pixel: bits 7..1 hold the colour index, bit 0 is the dirty
//! flag. A companion [`RowIndex`] keeps one bit per row so the refresh scan
//! can skip untouched rows without reading their cells.
//!
//! Invariant: a row is marked whenever any of its cells is dirty. The
//! converse does not hold after [`FrameBuffer::clear`], which marks every
//! row with no dirty cells so the next refresh rescans the whole panel.

use platform::DisplayError;

use super::{HEIGHT, ROW_INDEX_BYTES, WIDTH};
use crate::hal::Color;

/// Bit 0 of a cell: colour not yet transmitted.
pub const DIRTY_BIT: u8 = 0x01;

/// Mask of valid row bits in the last index byte (220 % 8 = 4 → `0x0F`).
const LAST_BYTE_MASK: u8 = match HEIGHT % 8 {
    0 => 0xFF,
    rem => (1u8 << rem) - 1,
};

/// One bit per row, 8 rows per byte, LSB = lowest row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowIndex {
    bits: [u8; ROW_INDEX_BYTES],
}

// Row numbers passed here are always < HEIGHT, so y / 8 < ROW_INDEX_BYTES.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
impl RowIndex {
    /// Index with no rows marked.
    pub const fn new() -> Self {
        Self {
            bits: [0; ROW_INDEX_BYTES],
        }
    }

    /// Mark row `y`.
    #[inline]
    pub fn mark(&mut self, y: usize) {
        self.bits[y / 8] |= 1 << (y % 8);
    }

    /// Unmark row `y`.
    #[inline]
    pub fn unmark(&mut self, y: usize) {
        self.bits[y / 8] &= !(1 << (y % 8));
    }

    /// Whether row `y` is marked.
    #[inline]
    pub fn is_marked(&self, y: usize) -> bool {
        self.bits[y / 8] & (1 << (y % 8)) != 0
    }

    /// Mark every row of the panel.
    pub fn mark_all(&mut self) {
        self.bits = [0xFF; ROW_INDEX_BYTES];
        self.bits[ROW_INDEX_BYTES - 1] = LAST_BYTE_MASK;
    }

    /// `true` when no row is marked.
    pub fn is_clear(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Number of marked rows.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Raw bitmap bytes.
    pub fn as_bytes(&self) -> &[u8; ROW_INDEX_BYTES] {
        &self.bits
    }
}

/// Off-screen pixel grid in native (unrotated) panel coordinates.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [[u8; WIDTH]; HEIGHT],
    rows: RowIndex,
}

impl FrameBuffer {
    /// All cells black and clean, no rows marked.
    #[allow(clippy::large_stack_arrays)] // 28 KB; owned by the driver for its whole life
    pub const fn new() -> Self {
        Self {
            cells: [[0; WIDTH]; HEIGHT],
            rows: RowIndex::new(),
        }
    }

    /// Zero every cell and mark every row for rescan.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
        self.rows.mark_all();
    }

    /// Set every cell to `color`, dirty, and mark every row.
    pub fn fill(&mut self, color: Color) {
        let cell = color.to_cell() | DIRTY_BIT;
        for row in &mut self.cells {
            row.fill(cell);
        }
        self.rows.mark_all();
    }

    /// Write one pixel; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = Self::locate(x, y) {
            self.write(x, y, color);
        }
    }

    /// Write one pixel, reporting out-of-range coordinates.
    pub fn try_set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        let (x, y) = Self::locate(x, y).ok_or(DisplayError::OutOfBounds)?;
        self.write(x, y, color);
        Ok(())
    }

    /// Colour stored at `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (x, y) = Self::locate(x, y)?;
        Some(Color::from_cell(self.cell(x, y)))
    }

    /// Whether `(x, y)` holds a colour not yet sent. `false` off-screen.
    pub fn is_dirty(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(x, y)| self.cell(x, y) & DIRTY_BIT != 0)
    }

    /// Whether row `y` will be scanned by the next refresh.
    pub fn is_row_marked(&self, y: i32) -> bool {
        usize::try_from(y)
            .ok()
            .filter(|&y| y < HEIGHT)
            .is_some_and(|y| self.rows.is_marked(y))
    }

    /// `true` when a refresh would visit at least one row.
    pub fn has_pending(&self) -> bool {
        !self.rows.is_clear()
    }

    /// Number of dirty cells.
    pub fn dirty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c & DIRTY_BIT != 0)
            .count()
    }

    /// The row index.
    pub fn rows(&self) -> &RowIndex {
        &self.rows
    }

    /// Map signed coordinates to cell indices.
    fn locate(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < HEIGHT)?;
        Some((x, y))
    }

    #[allow(clippy::indexing_slicing)] // located: x < WIDTH, y < HEIGHT
    fn write(&mut self, x: usize, y: usize, color: Color) {
        self.cells[y][x] = color.to_cell() | DIRTY_BIT;
        self.rows.mark(y);
    }

    /// Write `color` to columns `x0..x1` of row `y`. Callers clip first.
    #[allow(clippy::indexing_slicing)] // x0 <= x1 <= WIDTH, y < HEIGHT
    pub(crate) fn fill_span(&mut self, y: usize, x0: usize, x1: usize, color: Color) {
        if x0 >= x1 {
            return;
        }
        self.cells[y][x0..x1].fill(color.to_cell() | DIRTY_BIT);
        self.rows.mark(y);
    }

    /// Cells of row `y`.
    #[allow(clippy::indexing_slicing)] // y < HEIGHT
    pub(crate) fn row_cells(&self, y: usize) -> &[u8; WIDTH] {
        &self.cells[y]
    }

    #[allow(clippy::indexing_slicing)] // x < WIDTH, y < HEIGHT
    pub(crate) fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }

    #[allow(clippy::indexing_slicing)] // x < WIDTH, y < HEIGHT
    pub(crate) fn mark_clean(&mut self, x: usize, y: usize) {
        self.cells[y][x] &= !DIRTY_BIT;
    }

    pub(crate) fn row_index_mut(&mut self) -> &mut RowIndex {
        &mut self.rows
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("marked_rows", &self.rows.count())
            .finish_non_exhaustive()
    }
}
