//! One scan cycle: scan, decide, encode, transmit.
//!
//! The pause between cycles belongs to the caller, so the same cycle runs
//! under the firmware's timer and under host tests. A write failure is
//! returned to the caller rather than retried; the next cycle proceeds as
//! usual.

use embedded_hal::delay::DelayNs;
use softsense_hal::{InputPin, OutputPin, UartTx};
use softsense_protocol::{encode_line, LineError, MAX_LINE_LEN};

use crate::config::ScanConfig;
use crate::grid::{TouchGrid, COL_COUNT, ROW_COUNT};
use crate::report::{EmitReason, Reporter};
use crate::scanner::MatrixScanner;

/// Result of a completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// A line of `len` bytes was written and flushed
    Sent { len: usize, reason: EmitReason },
    /// Report policy held the line back
    Skipped,
}

/// Errors surfaced by a cycle
///
/// The scan itself cannot fail; the grid state is updated either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError<E> {
    /// Line did not fit the buffer
    Encode(LineError),
    /// Serial write or flush failed
    Write(E),
}

/// The sensor-sized scan cycle
pub struct ScanCycle<R, C> {
    scanner: MatrixScanner<R, C, ROW_COUNT, COL_COUNT>,
    reporter: Reporter<ROW_COUNT, COL_COUNT>,
    line: [u8; MAX_LINE_LEN],
    line_len: usize,
    cycles: u32,
}

impl<R, C> ScanCycle<R, C>
where
    R: OutputPin,
    C: InputPin,
{
    pub fn new(
        scanner: MatrixScanner<R, C, ROW_COUNT, COL_COUNT>,
        reporter: Reporter<ROW_COUNT, COL_COUNT>,
    ) -> Self {
        Self {
            scanner,
            reporter,
            line: [0; MAX_LINE_LEN],
            line_len: 0,
            cycles: 0,
        }
    }

    /// Build the scanner and reporter from config
    pub fn from_config(
        rows: [R; ROW_COUNT],
        cols: [C; COL_COUNT],
        config: &ScanConfig,
    ) -> Self {
        let scanner = MatrixScanner::new(rows, cols).with_settle_us(config.settle_us);
        Self::new(scanner, Reporter::from_config(config))
    }

    /// Run one cycle
    ///
    /// Scans the whole matrix, applies the report policy and, if the line
    /// is due, writes it and flushes `tx`. A line only counts as sent once
    /// both the write and the flush succeed.
    pub fn run<D, T>(
        &mut self,
        delay: &mut D,
        tx: &mut T,
    ) -> Result<CycleOutcome, CycleError<T::Error>>
    where
        D: DelayNs,
        T: UartTx,
    {
        self.cycles = self.cycles.wrapping_add(1);
        let grid = self.scanner.scan(delay);

        let reason = match self.reporter.decide(grid) {
            Some(reason) => reason,
            None => return Ok(CycleOutcome::Skipped),
        };

        let len = encode_line(grid.iter(), &mut self.line).map_err(CycleError::Encode)?;
        self.line_len = len;

        tx.write_blocking(&self.line[..len])
            .map_err(CycleError::Write)?;
        tx.flush().map_err(CycleError::Write)?;

        self.reporter.mark_sent(grid);
        Ok(CycleOutcome::Sent { len, reason })
    }

    /// State from the most recent scan
    pub fn grid(&self) -> &TouchGrid {
        self.scanner.state()
    }

    /// Most recently encoded line, terminator included
    pub fn last_line(&self) -> &[u8] {
        &self.line[..self.line_len]
    }

    /// Cycles run since boot (wrapping)
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportMode;
    use crate::scanner::sim::{Panel, RecordingDelay};
    use softsense_protocol::{GridFrame, LineDecoder};

    const IDLE_LINE: &[u8] = b"1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1\n";

    /// UART that records every byte and can be told to fail
    #[derive(Default)]
    struct MockUart {
        sent: Vec<u8>,
        flushes: usize,
        fail_writes: bool,
    }

    impl MockUart {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.sent.clone())
                .unwrap()
                .lines()
                .map(String::from)
                .collect()
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct WriteFailed;

    impl UartTx for MockUart {
        type Error = WriteFailed;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(WriteFailed);
            }
            self.sent.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn every_scan() -> ScanConfig {
        ScanConfig::default()
    }

    fn on_change(heartbeat_scans: u16) -> ScanConfig {
        ScanConfig {
            report: ReportMode::OnChange,
            heartbeat_scans,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn test_idle_grid_line() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &every_scan());
        let mut uart = MockUart::default();

        let outcome = cycle.run(&mut RecordingDelay::default(), &mut uart).unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::Sent {
                len: MAX_LINE_LEN,
                reason: EmitReason::Scan
            }
        );
        assert_eq!(uart.sent, IDLE_LINE);
        assert_eq!(cycle.last_line(), IDLE_LINE);
        assert_eq!(uart.flushes, 1);
    }

    #[test]
    fn test_pressed_cell_2_3() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &every_scan());
        let mut uart = MockUart::default();

        panel.press(2, 3);
        cycle.run(&mut RecordingDelay::default(), &mut uart).unwrap();

        assert_eq!(
            uart.lines(),
            ["1,1,1,1,1,1,1,1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,1,1,1"]
        );
    }

    #[test]
    fn test_lines_identical_without_input_change() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &every_scan());
        let mut uart = MockUart::default();
        let mut delay = RecordingDelay::default();

        panel.press(4, 0);
        for _ in 0..3 {
            cycle.run(&mut delay, &mut uart).unwrap();
        }

        let lines = uart.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| *l == lines[0]));
        assert_eq!(cycle.cycles(), 3);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &every_scan());
        let mut uart = MockUart {
            fail_writes: true,
            ..MockUart::default()
        };
        let mut delay = RecordingDelay::default();

        panel.press(0, 0);
        assert_eq!(
            cycle.run(&mut delay, &mut uart),
            Err(CycleError::Write(WriteFailed))
        );
        // Scan still completed
        assert_eq!(cycle.grid().touched_count(), 1);

        uart.fail_writes = false;
        assert!(cycle.run(&mut delay, &mut uart).is_ok());
        assert_eq!(uart.lines().len(), 1);
    }

    #[test]
    fn test_on_change_sends_only_changes_and_heartbeat() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &on_change(4));
        let mut uart = MockUart::default();
        let mut delay = RecordingDelay::default();

        // Initial sync
        assert!(matches!(
            cycle.run(&mut delay, &mut uart),
            Ok(CycleOutcome::Sent {
                reason: EmitReason::Initial,
                ..
            })
        ));
        assert_eq!(cycle.run(&mut delay, &mut uart), Ok(CycleOutcome::Skipped));

        panel.press(1, 2);
        assert!(matches!(
            cycle.run(&mut delay, &mut uart),
            Ok(CycleOutcome::Sent {
                reason: EmitReason::Changed,
                ..
            })
        ));

        for _ in 0..3 {
            assert_eq!(cycle.run(&mut delay, &mut uart), Ok(CycleOutcome::Skipped));
        }
        assert!(matches!(
            cycle.run(&mut delay, &mut uart),
            Ok(CycleOutcome::Sent {
                reason: EmitReason::Heartbeat,
                ..
            })
        ));

        assert_eq!(uart.lines().len(), 3);
    }

    #[test]
    fn test_host_decodes_stream() {
        let panel = Panel::new(COL_COUNT);
        let mut cycle = ScanCycle::from_config(panel.rows(), panel.cols(), &every_scan());
        let mut uart = MockUart::default();
        let mut delay = RecordingDelay::default();

        panel.press(0, 1);
        cycle.run(&mut delay, &mut uart).unwrap();
        panel.release_all();
        panel.press(3, 4);
        cycle.run(&mut delay, &mut uart).unwrap();

        let mut decoder: LineDecoder = LineDecoder::new();
        let mut frames: Vec<GridFrame> = Vec::new();
        for &byte in &uart.sent {
            if let Some(line) = decoder.feed(byte).unwrap() {
                frames.push(GridFrame::parse(&line).unwrap());
            }
        }

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].touched().collect::<Vec<_>>(), [(0, 1)]);
        assert_eq!(frames[1].touched().collect::<Vec<_>>(), [(3, 4)]);
    }
}
