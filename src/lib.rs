//! # micro-cli
//!
//! Heap-free interactive command line for a serial console.
//!
//! ## Architecture
//!
//! Input arrives one byte at a time through [`RxBuffer::on_byte_received`],
//! which may run in interrupt context. The main loop calls
//! [`Console::process`], which drains the buffer, edits the line, recalls
//! history and dispatches finished lines to a command table.
//!
//! - Only the receive buffer is shared between contexts
//! - Everything else is owned by the [`Console`] session
//! - No heap, no locks, no blocking

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod log_globals;
pub mod logging;
pub mod uart_logger;

pub use config::CONFIG;
pub use console::{CliError, CommandDescriptor, Console, History, LineBuffer, RxBuffer};
pub use log_globals::CLI_LOG_STREAM;
pub use logging::{LogLevel, LogStream};
