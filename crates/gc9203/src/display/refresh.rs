//! Partial refresh
//!
//! Walks the row index, and for every marked row finds runs of dirty cells.
//! A run keeps growing across clean cells while the next dirty cell is at
//! most [`SEPARATION_THRESHOLD`] columns past the previous one; the clean
//! cells in between are re-sent with their current colour. Each run costs
//! one window setup plus one data word per cell.

use platform::{PanelInterface, Rotation};

use super::framebuffer::{FrameBuffer, DIRTY_BIT};
use super::lut::ColorLut;
use super::{HEIGHT, WIDTH};

/// Largest column distance between two dirty cells that still share a run.
pub const SEPARATION_THRESHOLD: usize = 5;

/// What one refresh pass sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshStats {
    /// Marked rows visited
    pub rows_scanned: u16,
    /// Windows opened
    pub windows: u16,
    /// Data words streamed
    pub pixels: u32,
}

impl RefreshStats {
    /// `true` when the pass touched the transport.
    pub fn transmitted(&self) -> bool {
        self.windows > 0
    }
}

/// Find the next run in `row` at or after column `from`.
///
/// Returns the inclusive `(start, end)` columns; both ends are dirty.
#[allow(clippy::arithmetic_side_effects)] // column indices are < WIDTH
pub fn next_run(row: &[u8; WIDTH], from: usize) -> Option<(usize, usize)> {
    let start = row
        .iter()
        .enumerate()
        .skip(from)
        .find(|&(_, &cell)| cell & DIRTY_BIT != 0)?
        .0;

    let mut end = start;
    for (x, &cell) in row.iter().enumerate().skip(start + 1) {
        if x - end > SEPARATION_THRESHOLD {
            break;
        }
        if cell & DIRTY_BIT != 0 {
            end = x;
        }
    }
    Some((start, end))
}

/// Send every marked row of `fb` to `panel`.
///
/// On a transport error the pass stops: the cell that failed, every cell
/// after it and the current row mark are left as they were.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)] // counts are bounded by HEIGHT and WIDTH * HEIGHT; coordinates fit u16
pub fn refresh<P: PanelInterface>(
    fb: &mut FrameBuffer,
    lut: &ColorLut,
    panel: &mut P,
    rotation: Rotation,
) -> Result<RefreshStats, P::Error> {
    let mut stats = RefreshStats::default();

    for y in 0..HEIGHT {
        if !fb.rows().is_marked(y) {
            continue;
        }
        stats.rows_scanned += 1;

        let mut from = 0;
        while let Some((start, end)) = next_run(fb.row_cells(y), from) {
            panel.set_window(start as u16, y as u16, end as u16, y as u16, rotation)?;
            stats.windows += 1;
            for x in start..=end {
                panel.send_data(lut.resolve(fb.cell(x, y)))?;
                fb.mark_clean(x, y);
            }
            stats.pixels += (end - start + 1) as u32;
            from = end + 1;
        }

        fb.row_index_mut().unmark(y);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::Color;
    use platform::mocks::{PanelOp, RecordingPanel};

    fn row_with(dirty: &[usize]) -> [u8; WIDTH] {
        let mut row = [0u8; WIDTH];
        for &x in dirty {
            row[x] = DIRTY_BIT;
        }
        row
    }

    #[test]
    fn next_run_on_clean_row() {
        assert_eq!(next_run(&[0; WIDTH], 0), None);
    }

    #[test]
    fn next_run_merges_within_threshold() {
        // distance 5 from the previous dirty column still merges
        let row = row_with(&[10, 15]);
        assert_eq!(next_run(&row, 0), Some((10, 15)));
        assert_eq!(next_run(&row, 16), None);
    }

    #[test]
    fn next_run_splits_past_threshold() {
        let row = row_with(&[10, 16]);
        assert_eq!(next_run(&row, 0), Some((10, 10)));
        assert_eq!(next_run(&row, 11), Some((16, 16)));
    }

    #[test]
    fn next_run_chains_small_gaps() {
        let row = row_with(&[0, 4, 9, 14, 25]);
        assert_eq!(next_run(&row, 0), Some((0, 14)));
        assert_eq!(next_run(&row, 15), Some((25, 25)));
    }

    #[test]
    fn next_run_reaches_last_column() {
        let row = row_with(&[WIDTH - 3, WIDTH - 1]);
        assert_eq!(next_run(&row, 0), Some((WIDTH - 3, WIDTH - 1)));
    }

    #[test]
    fn nothing_marked_sends_nothing() {
        let mut fb = FrameBuffer::new();
        let lut = ColorLut::build();
        let mut panel = RecordingPanel::new();

        let stats = refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).unwrap();
        assert_eq!(stats, RefreshStats::default());
        assert_eq!(panel.transaction_count(), 0);
    }

    #[test]
    fn single_pixel_round() {
        let mut fb = FrameBuffer::new();
        let lut = ColorLut::build();
        let mut panel = RecordingPanel::new();

        fb.set_pixel(7, 3, Color::RED);
        let stats = refresh(&mut fb, &lut, &mut panel, Rotation::Deg90).unwrap();

        assert_eq!(
            panel.ops(),
            &[
                PanelOp::Window {
                    x1: 7,
                    y1: 3,
                    x2: 7,
                    y2: 3,
                    rotation: Rotation::Deg90,
                },
                PanelOp::Data(0xF000),
            ]
        );
        assert_eq!(
            stats,
            RefreshStats {
                rows_scanned: 1,
                windows: 1,
                pixels: 1
            }
        );
        assert!(!fb.is_dirty(7, 3));
        assert!(!fb.has_pending());
    }

    #[test]
    fn gap_pixels_are_resent_with_current_colour() {
        let mut fb = FrameBuffer::new();
        let lut = ColorLut::build();
        let mut panel = RecordingPanel::new();

        fb.set_pixel(2, 0, Color::BLUE);
        refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).unwrap();
        panel.clear();

        fb.set_pixel(0, 0, Color::WHITE);
        fb.set_pixel(4, 0, Color::WHITE);
        refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).unwrap();

        let white = lut.resolve(Color::WHITE.to_cell());
        let blue = lut.resolve(Color::BLUE.to_cell());
        assert_eq!(white, 0xF7FE);
        assert_eq!(panel.windows(), vec![(0, 0, 4, 0)]);
        assert_eq!(panel.data_words(), vec![white, 0x0000, blue, 0x0000, white]);
    }

    #[test]
    fn clear_visits_rows_without_data() {
        let mut fb = FrameBuffer::new();
        let lut = ColorLut::build();
        let mut panel = RecordingPanel::new();

        fb.clear();
        let stats = refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).unwrap();
        assert_eq!(stats.rows_scanned as usize, HEIGHT);
        assert!(!stats.transmitted());
        assert_eq!(panel.transaction_count(), 0);
        assert!(fb.rows().is_clear());
    }

    #[test]
    fn transport_error_keeps_unsent_cells_dirty() {
        let mut fb = FrameBuffer::new();
        let lut = ColorLut::build();
        let mut panel = RecordingPanel::new();

        fb.set_pixel(0, 1, Color::GREEN);
        fb.set_pixel(1, 1, Color::GREEN);
        fb.set_pixel(2, 1, Color::GREEN);
        // window + first data word succeed
        panel.fail_after(2);
        assert!(refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).is_err());

        assert!(!fb.is_dirty(0, 1));
        assert!(fb.is_dirty(1, 1));
        assert!(fb.is_dirty(2, 1));
        assert!(fb.is_row_marked(1));

        panel.heal();
        panel.clear();
        refresh(&mut fb, &lut, &mut panel, Rotation::Deg0).unwrap();
        assert_eq!(panel.windows(), vec![(1, 1, 2, 1)]);
        assert_eq!(fb.dirty_count(), 0);
        assert!(!fb.has_pending());
    }
}
