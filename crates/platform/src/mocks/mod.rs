//! Mock implementations for testing
//!
//! [`RecordingPanel`] implements [`PanelInterface`] and [`PanelControl`] by
//! appending every call to an in-memory log, so refresh behaviour can be
//! asserted without hardware.

#![cfg(any(test, feature = "std"))]

use std::vec::Vec;

use crate::{PanelControl, PanelInterface, Rotation};

/// One recorded transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOp {
    /// `send_command(code)`
    Command(u16),
    /// `send_data(word)`
    Data(u16),
    /// `set_window(..)`
    Window {
        /// Left column (inclusive)
        x1: u16,
        /// Top row (inclusive)
        y1: u16,
        /// Right column (inclusive)
        x2: u16,
        /// Bottom row (inclusive)
        y2: u16,
        /// Rotation passed by the caller
        rotation: Rotation,
    },
    /// `reset()`
    Reset,
    /// `configure(rotation)`
    Configure(Rotation),
}

/// Error injected by [`RecordingPanel::fail_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedFault;

/// Recording panel transport
#[derive(Debug, Default)]
pub struct RecordingPanel {
    ops: Vec<PanelOp>,
    fail_after: Option<usize>,
}

impl RecordingPanel {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail once `calls` more calls have succeeded.
    pub fn fail_after(&mut self, calls: usize) {
        self.fail_after = Some(self.ops.len() + calls);
    }

    /// Stop injecting faults
    pub fn heal(&mut self) {
        self.fail_after = None;
    }

    /// Every recorded call, in order
    pub fn ops(&self) -> &[PanelOp] {
        &self.ops
    }

    /// Number of recorded calls
    pub fn transaction_count(&self) -> usize {
        self.ops.len()
    }

    /// Recorded windows as `(x1, y1, x2, y2)`
    pub fn windows(&self) -> Vec<(u16, u16, u16, u16)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                PanelOp::Window { x1, y1, x2, y2, .. } => Some((x1, y1, x2, y2)),
                _ => None,
            })
            .collect()
    }

    /// Recorded data words
    pub fn data_words(&self) -> Vec<u16> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                PanelOp::Data(word) => Some(word),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    fn record(&mut self, op: PanelOp) -> Result<(), InjectedFault> {
        if self.fail_after.is_some_and(|limit| self.ops.len() >= limit) {
            return Err(InjectedFault);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl PanelInterface for RecordingPanel {
    type Error = InjectedFault;

    fn send_command(&mut self, code: u16) -> Result<(), Self::Error> {
        self.record(PanelOp::Command(code))
    }

    fn send_data(&mut self, word: u16) -> Result<(), Self::Error> {
        self.record(PanelOp::Data(word))
    }

    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        rotation: Rotation,
    ) -> Result<(), Self::Error> {
        self.record(PanelOp::Window {
            x1,
            y1,
            x2,
            y2,
            rotation,
        })
    }
}

impl PanelControl for RecordingPanel {
    fn reset(&mut self) -> Result<(), Self::Error> {
        self.record(PanelOp::Reset)
    }

    fn configure(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        self.record(PanelOp::Configure(rotation))
    }
}
