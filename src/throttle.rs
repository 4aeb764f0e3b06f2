use std::io::{self, Read};
use std::thread;
use std::time::{Duration, Instant};

/// Caps the throughput of an inner reader to a fixed number of bytes per
/// second.
///
/// Accounting uses one-second windows: once the window's budget is spent,
/// the reader sleeps out the remainder of the window before handing back
/// more data. Installed on the upload body and the response body reader
/// when a bandwidth limit is configured; a limit of zero means the adapter
/// is never constructed.
pub struct RateLimitedReader<R> {
    inner: R,
    bytes_per_second: u64,
    window_start: Instant,
    spent_in_window: u64,
}

impl<R: Read> RateLimitedReader<R> {
    /// Wrap a reader with a cap of `bytes_per_second` (must be non-zero)
    pub fn new(inner: R, bytes_per_second: u64) -> Self {
        Self {
            inner,
            bytes_per_second: bytes_per_second.max(1),
            window_start: Instant::now(),
            spent_in_window: 0,
        }
    }
}

impl<R: Read> Read for RateLimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.spent_in_window >= self.bytes_per_second {
            let elapsed = self.window_start.elapsed();
            if elapsed < Duration::from_secs(1) {
                thread::sleep(Duration::from_secs(1) - elapsed);
            }
            self.window_start = Instant::now();
            self.spent_in_window = 0;
        }

        let budget = (self.bytes_per_second - self.spent_in_window) as usize;
        let upper = buf.len().min(budget);
        let read = self.inner.read(&mut buf[..upper])?;
        self.spent_in_window += read as u64;
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn delivers_all_bytes_unchanged() {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = RateLimitedReader::new(Cursor::new(data.clone()), 1024);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn paces_reads_to_the_configured_rate() {
        // 40 bytes at 20 bytes/sec needs at least one full window.
        let data = vec![7u8; 40];
        let started = Instant::now();
        let mut reader = RateLimitedReader::new(Cursor::new(data), 20);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out.len(), 40);
        assert!(started.elapsed() >= Duration::from_millis(900));
    }

    #[test]
    fn single_read_never_exceeds_window_budget() {
        let data = vec![0u8; 64];
        let mut reader = RateLimitedReader::new(Cursor::new(data), 16);
        let mut buf = [0u8; 64];
        let read = reader.read(&mut buf).unwrap();
        assert!(read <= 16);
    }
}
