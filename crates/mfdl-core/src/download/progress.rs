//! Transfer progress snapshots (bytes done, rate, ETA).
//!
//! Delivered to the caller's callback as chunks land; frequency follows the
//! transfer, so consumers throttle their own rendering.

/// Snapshot of one file transfer.
#[derive(Debug, Clone, Copy)]
pub struct TransferProgress {
    /// Bytes written to the temp file so far.
    pub bytes_done: u64,
    /// Advisory total (the page's size label); unknown for some transfers.
    pub total_bytes: Option<u64>,
    /// Seconds since the transfer started.
    pub elapsed_secs: f64,
}

impl TransferProgress {
    /// Average rate in bytes per second (0 until the clock moves).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining; `None` without a total or a rate.
    pub fn eta_secs(&self) -> Option<f64> {
        let total = self.total_bytes?;
        let remaining = total.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0, 1]; `None` without a total.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total_bytes?;
        if total == 0 {
            return Some(1.0);
        }
        Some((self.bytes_done as f64 / total as f64).min(1.0))
    }
}
