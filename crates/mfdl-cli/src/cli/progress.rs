//! Single-line progress rendering, throttled so fast transfers do not flood
//! the terminal.

use std::io::Write;
use std::time::{Duration, Instant};

use mfdl_core::download::TransferProgress;

const PRINT_INTERVAL: Duration = Duration::from_millis(500);
const MIB: f64 = 1_048_576.0;

pub struct ProgressPrinter {
    last_print: Option<Instant>,
    dirty: bool,
}

impl ProgressPrinter {
    pub fn new() -> Self {
        ProgressPrinter {
            last_print: None,
            dirty: false,
        }
    }

    /// Called per chunk; prints at most every 500 ms (and always at the end
    /// of a sized transfer).
    pub fn update(&mut self, name: &str, p: &TransferProgress) {
        let now = Instant::now();
        let due = match self.last_print {
            None => true,
            Some(at) => now.duration_since(at) >= PRINT_INTERVAL,
        };
        let complete = p.total_bytes.is_some_and(|t| p.bytes_done >= t);
        if !due && !complete {
            self.dirty = true;
            return;
        }

        let done_mib = p.bytes_done as f64 / MIB;
        let rate_mib = p.bytes_per_sec() / MIB;
        let line = match (p.total_bytes, p.eta_secs()) {
            (Some(total), Some(eta)) => format!(
                "\r  {}  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {:.0}s  ",
                name,
                done_mib,
                total as f64 / MIB,
                p.fraction().unwrap_or(0.0) * 100.0,
                rate_mib,
                eta
            ),
            _ => format!("\r  {}  {:.1} MiB  {:.2} MiB/s  ", name, done_mib, rate_mib),
        };
        print!("{line}");
        let _ = std::io::stdout().flush();
        self.last_print = Some(now);
        self.dirty = true;
    }

    /// Ends the progress line so summary output starts on a fresh one.
    pub fn finish(&mut self) {
        if self.dirty {
            println!();
            self.dirty = false;
        }
    }
}
