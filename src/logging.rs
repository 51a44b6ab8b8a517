//! Lock-free event log for the console engine.
//!
//! # Architecture
//!
//! ```text
//! Console                LogStream            Drain
//! ───────                ─────────            ─────
//!
//! cli_warn!() ─────────▶ [L0][L1][L2] ──────▶ uart_logger::drain_to
//! non-blocking            lock-free           any fmt::Write sink
//! ```
//!
//! # Rules
//!
//! - Any context may log; pushing never blocks and never allocates
//! - Messages are dropped (and counted) when the ring is full
//! - Entries above `CONFIG.log_level` are filtered by the macros

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 80;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Convert from raw u8 value. Out-of-range values saturate to `Trace`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Parse a level name as typed on the console (lowercase).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Position of this entry in the stream since creation.
    pub seq: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        seq: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, or a placeholder if it is not valid UTF-8.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Lock-free log stream (multiple producers, single drain).
///
/// - Producers reserve a slot with a CAS on `write_idx`
/// - A slot is handed to the drain only once its `ready` marker is set
/// - Push never blocks (drops message if full)
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    /// Per slot: sequence number + 1 of the entry last committed there.
    ready: [AtomicU32; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Each producer owns the slot it reserved until it publishes the
// ready marker with Release. The single drain reads a slot only after
// observing that marker with Acquire, and frees it by advancing read_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");
        const NOT_READY: AtomicU32 = AtomicU32::new(0);

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            ready: [NOT_READY; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    #[inline]
    pub fn push(&self, level: LogLevel, msg: &[u8]) -> bool {
        let mut write = self.write_idx.load(Ordering::Relaxed);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let idx = (write as usize) & Self::MASK;
        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: The CAS above gave this producer exclusive use of the
        // slot; the drain skips it until the ready marker below is set.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.seq = write;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }

        self.ready[idx].store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available, or if the next one is
    /// reserved but not yet written.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;
        if self.ready[idx].load(Ordering::Acquire) != read.wrapping_add(1) {
            return None;
        }

        // SAFETY: Single drain, slot committed (Acquire above)
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Log macro, filtered by `CONFIG.log_level`.
///
/// # Example
///
/// ```ignore
/// cli_log!(LogLevel::Info, CLI_LOG_STREAM, "dispatch {}", name);
/// ```
#[macro_export]
macro_rules! cli_log {
    ($level:expr, $stream:expr, $($arg:tt)*) => {{
        let level: $crate::logging::LogLevel = $level;
        if level <= $crate::config::CONFIG.log_level() {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $stream.push(level, &buf[..len]);
        }
    }};
}

/// Error log.
#[macro_export]
macro_rules! cli_error {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Error, $stream, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! cli_warn {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Warn, $stream, $($arg)*)
    };
}

/// Info log.
#[macro_export]
macro_rules! cli_info {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Info, $stream, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! cli_debug {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Debug, $stream, $($arg)*)
    };
}

/// Trace log (maximum verbosity).
#[macro_export]
macro_rules! cli_trace {
    ($stream:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Trace, $stream, $($arg)*)
    };
}
