//! Serial console: line editing, history and command dispatch
//!
//! Zero heap allocation - all static buffers.
//!
//! ```text
//! on_byte_received ──▶ RxBuffer ──▶ Console::process ──▶ LineBuffer
//!  (interrupt ctx)      (SPSC)       (main loop)          │ Enter
//!                                                         ▼
//!                                             History + tokenize + dispatch
//! ```

pub mod arena;
pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod ring_buffer;
pub mod vt;

pub use arena::{Arena, EntryHandle};
pub use commands::{dispatch, CommandDescriptor, Handler};
pub use console::{Console, VERSION};
pub use error::CliError;
pub use history::{History, RecordOutcome};
pub use line_buffer::{is_blank, is_printable, LineBuffer};
pub use parser::{tokenize, ParsedCommand};
pub use ring_buffer::RxBuffer;
