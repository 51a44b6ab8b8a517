//! Global log stream instance.

use crate::logging::LogStream;

/// Console event log.
///
/// Any context may push; one context drains (the `log` command or a UART task).
pub static CLI_LOG_STREAM: LogStream = LogStream::new();
