//! Log output to the console transport.
//!
//! Drains a [`LogStream`] into any `core::fmt::Write` sink, one line per
//! entry. On the device the sink is the same serial console the editor
//! writes to, so this runs from the processing loop between lines.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Write one log entry.
///
/// Format: `[seq] LEVEL: message\r\n`
fn write_log_entry(entry: &LogEntry, out: &mut dyn Write) {
    let _ = write!(
        out,
        "[{:6}] {}: {}\r\n",
        entry.seq,
        entry.level.as_str(),
        entry.message()
    );
}

/// Drain every pending entry of `stream` into `out`.
///
/// Reports (and resets) the dropped counter after the entries.
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        write_log_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = write!(out, "[WARN] Dropped: {}\r\n", dropped);
        stream.reset_dropped();
    }

    count
}
