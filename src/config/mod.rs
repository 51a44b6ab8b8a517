//! Module: config
//!
//! Purpose: Configuration for the console engine.
//!
//! Architecture:
//! - Capacities are compile-time constants, checked at compile time
//! - Runtime switches live in [`CONFIG`], one atomic per field
//!
//! Safety: Any context may read or write. All access via atomics, no locks.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::logging::LogLevel;

/// Receive ring capacity in bytes. Must be a power of 2.
pub const RX_BUFFER_SIZE: usize = 128;

/// Line buffer capacity, including the reserved terminator byte.
pub const LINE_SIZE: usize = 64;

/// History arena capacity in bytes.
pub const HISTORY_ARENA_SIZE: usize = 512;

/// Arguments accepted after the command name.
pub const MAX_ARGS: usize = 8;

/// History allocator alignment quantum.
pub const ENTRY_ALIGN: usize = 4;

/// Prompt printed before every line.
pub const PROMPT: &str = "> ";

const _: () = {
    assert!(RX_BUFFER_SIZE.is_power_of_two(), "RX buffer size must be power of 2");
    assert!(LINE_SIZE >= 2, "line buffer needs room for one byte and the terminator");
    assert!(ENTRY_ALIGN.is_power_of_two(), "alignment quantum must be power of 2");
    assert!(HISTORY_ARENA_SIZE < u16::MAX as usize, "history handles are 16-bit offsets");
};

/// Runtime switches for the console.
pub struct CliConfig {
    /// Echo typed printable bytes back to the terminal.
    pub echo: AtomicBool,
    /// Record submitted lines in history.
    pub history: AtomicBool,
    /// Most verbose [`LogLevel`] accepted by log streams.
    pub log_level: AtomicU8,
}

impl CliConfig {
    /// Defaults: echo on, history on, `Info` logging.
    pub const fn new() -> Self {
        Self {
            echo: AtomicBool::new(true),
            history: AtomicBool::new(true),
            log_level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    #[inline]
    pub fn echo(&self) -> bool {
        self.echo.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_echo(&self, on: bool) {
        self.echo.store(on, Ordering::Relaxed);
    }

    #[inline]
    pub fn history_enabled(&self) -> bool {
        self.history.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_history_enabled(&self, on: bool) {
        self.history.store(on, Ordering::Relaxed);
    }

    #[inline]
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_log_level(&self, level: LogLevel) {
        self.log_level.store(level as u8, Ordering::Relaxed);
    }

    /// Plain copy of all fields, for display.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            echo: self.echo(),
            history: self.history_enabled(),
            log_level: self.log_level(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`CliConfig`] at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub echo: bool,
    pub history: bool,
    pub log_level: LogLevel,
}

/// Global console configuration.
pub static CONFIG: CliConfig = CliConfig::new();
