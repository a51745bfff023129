//! Report policy
//!
//! Decides whether a completed scan goes out on the wire. Under
//! [`ReportMode::EveryScan`] every scan is sent. Under
//! [`ReportMode::OnChange`] a scan is sent when nothing has been sent yet,
//! when any cell differs from the last line sent, or when
//! `heartbeat_scans` cycles have passed without a transmission.

use crate::config::{ReportMode, ScanConfig};
use crate::grid::GridState;

/// Why a scan was transmitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitReason {
    /// Every-scan policy
    Scan,
    /// First transmission since boot
    Initial,
    /// Grid differs from the last line sent
    Changed,
    /// Unchanged grid resent after the heartbeat period
    Heartbeat,
}

/// Tracks what was last sent and applies the report policy
#[derive(Debug, Clone)]
pub struct Reporter<const ROWS: usize, const COLS: usize> {
    mode: ReportMode,
    heartbeat_scans: u16,
    last_sent: GridState<ROWS, COLS>,
    has_sent: bool,
    scans_since_send: u16,
}

impl<const ROWS: usize, const COLS: usize> Reporter<ROWS, COLS> {
    pub fn new(mode: ReportMode, heartbeat_scans: u16) -> Self {
        Self {
            mode,
            heartbeat_scans: heartbeat_scans.max(1),
            last_sent: GridState::new(),
            has_sent: false,
            scans_since_send: 0,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.report, config.heartbeat_scans)
    }

    /// Decide whether the scan in `grid` should be transmitted
    ///
    /// Call once per completed scan. Follow a `Some` with
    /// [`Reporter::mark_sent`] once the line actually went out; until then
    /// the scan keeps counting as unsent.
    pub fn decide(&mut self, grid: &GridState<ROWS, COLS>) -> Option<EmitReason> {
        self.scans_since_send = self.scans_since_send.saturating_add(1);

        match self.mode {
            ReportMode::EveryScan => Some(EmitReason::Scan),
            ReportMode::OnChange => {
                if !self.has_sent {
                    Some(EmitReason::Initial)
                } else if *grid != self.last_sent {
                    Some(EmitReason::Changed)
                } else if self.scans_since_send >= self.heartbeat_scans {
                    Some(EmitReason::Heartbeat)
                } else {
                    None
                }
            }
        }
    }

    /// Record that `grid` was transmitted
    pub fn mark_sent(&mut self, grid: &GridState<ROWS, COLS>) {
        self.last_sent.copy_from(grid);
        self.has_sent = true;
        self.scans_since_send = 0;
    }
}
