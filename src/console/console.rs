//! Main console struct integrating all components

use core::fmt::Write;

use super::arena::EntryHandle;
use super::commands::{dispatch, CommandDescriptor};
use super::history::RecordOutcome;
use super::line_buffer::is_printable;
use super::parser::tokenize;
use super::vt;
use super::{CliError, History, LineBuffer, RxBuffer};
use crate::config::{CONFIG, PROMPT, RX_BUFFER_SIZE};
use crate::log_globals::CLI_LOG_STREAM;
use crate::{cli_debug, cli_info, cli_warn};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console session: everything the processing loop owns.
///
/// The receive buffer is shared with the byte arrival path; all other
/// state is touched only through `&mut self`.
pub struct Console<'a, const RX: usize = RX_BUFFER_SIZE> {
    rx: &'a RxBuffer<RX>,
    commands: &'a [CommandDescriptor],
    line: LineBuffer,
    history: History,
    /// Escape sequence state
    escape_state: EscapeState,
    /// Previous raw byte, for CR LF folding.
    last_byte: u8,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl<'a, const RX: usize> Console<'a, RX> {
    /// Create new console
    pub const fn new(rx: &'a RxBuffer<RX>, commands: &'a [CommandDescriptor]) -> Self {
        Self {
            rx,
            commands,
            line: LineBuffer::new(),
            history: History::new(),
            escape_state: EscapeState::Normal,
            last_byte: 0,
        }
    }

    /// Drain every queued byte, editing and dispatching as lines complete.
    ///
    /// Returns the number of lines dispatched.
    pub fn process(&mut self, out: &mut dyn Write) -> usize {
        let mut dispatched = 0;

        loop {
            if self.rx.take_overflow() {
                self.recover_overflow(out);
            }
            let Some(byte) = self.rx.pop() else {
                break;
            };
            if self.process_byte(byte, out).is_some() {
                dispatched += 1;
            }
        }

        dispatched
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line was dispatched, None otherwise.
    pub fn process_byte(&mut self, byte: u8, out: &mut dyn Write) -> Option<Result<(), CliError>> {
        let prev = core::mem::replace(&mut self.last_byte, byte);

        match self.escape_state {
            EscapeState::Escape if byte == vt::CSI => {
                self.escape_state = EscapeState::Bracket;
                return None;
            }
            // A fresh ESC restarts the sequence instead of ending it
            EscapeState::Bracket if byte == vt::ESC => {
                self.escape_state = EscapeState::Escape;
                return None;
            }
            EscapeState::Bracket => {
                self.escape_state = EscapeState::Normal;
                self.handle_escape_code(byte, out);
                return None;
            }
            _ => self.escape_state = EscapeState::Normal,
        }

        if is_printable(byte) {
            self.insert(byte, out);
            None
        } else {
            self.handle_control(byte, prev, out)
        }
    }

    fn handle_escape_code(&mut self, code: u8, out: &mut dyn Write) {
        match code {
            vt::KEY_UP => {
                let entry = self.history.recall_older();
                self.render(entry, out);
            }
            vt::KEY_DOWN => {
                let entry = self.history.recall_newer();
                self.render(entry, out);
            }
            vt::KEY_RIGHT => {
                if self.line.cursor_right() {
                    let _ = out.write_str(vt::CURSOR_RIGHT);
                }
            }
            vt::KEY_LEFT => {
                if self.line.cursor_left() {
                    let _ = out.write_str(vt::CURSOR_LEFT);
                }
            }
            _ => {}
        }
    }

    fn insert(&mut self, byte: u8, out: &mut dyn Write) {
        let mid_line = self.line.cursor() > 0;
        if !self.line.insert(byte) {
            return;
        }

        if CONFIG.echo() {
            if mid_line {
                let _ = out.write_str(vt::INSERT_CHAR);
            }
            let _ = out.write_char(byte as char);
        }
    }

    fn handle_control(
        &mut self,
        byte: u8,
        prev: u8,
        out: &mut dyn Write,
    ) -> Option<Result<(), CliError>> {
        match byte {
            // Enter; LF right after CR was already handled by the CR
            b'\r' => self.submit(out),
            b'\n' if prev != b'\r' => self.submit(out),

            vt::DEL | vt::BS => {
                if self.line.insert_pos() > 0 {
                    let _ = out.write_str(vt::BACKSPACE);
                    self.line.delete_before_cursor();
                }
                None
            }

            vt::ESC => {
                self.escape_state = EscapeState::Escape;
                None
            }

            vt::ETX => {
                let _ = write!(out, "^C{}", vt::NEWLINE);
                self.line.clear();
                self.history.reset_recall();
                self.print_prompt(out);
                None
            }

            vt::NAK => {
                self.line.clear();
                let _ = out.write_str(vt::CLEAR_LINE);
                self.print_prompt(out);
                None
            }

            _ => None,
        }
    }

    /// Finish the current line: record, tokenize, dispatch, reprompt.
    fn submit(&mut self, out: &mut dyn Write) -> Option<Result<(), CliError>> {
        let _ = out.write_str(vt::NEWLINE);

        let mut result = None;
        if !self.line.is_blank() {
            if CONFIG.history_enabled() {
                self.record_line();
            }
            self.history.reset_recall();
            result = Some(self.execute(out));
        }

        self.line.clear();
        self.print_prompt(out);
        result
    }

    fn record_line(&mut self) {
        match self.history.record(self.line.as_bytes()) {
            RecordOutcome::Stored { evicted } if evicted > 0 => {
                cli_debug!(CLI_LOG_STREAM, "history: evicted {} entries", evicted);
            }
            RecordOutcome::Dropped => {
                cli_warn!(CLI_LOG_STREAM, "history: {} byte line too large", self.line.len());
            }
            _ => {}
        }
    }

    fn execute(&mut self, out: &mut dyn Write) -> Result<(), CliError> {
        let cmd = match tokenize(self.line.as_mut_bytes()) {
            Ok(cmd) => cmd,
            Err(e) => {
                cli_info!(CLI_LOG_STREAM, "rejected line: {}", e);
                let _ = write!(out, "{}{}", e, vt::NEWLINE);
                return Err(e);
            }
        };

        let result = dispatch(self.commands, &cmd, out);
        match result {
            Ok(()) => {}
            Err(CliError::CommandNotFound) => {
                cli_info!(CLI_LOG_STREAM, "not found: {}", cmd.command());
                let _ = write!(out, "{}: {}{}", cmd.command(), CliError::CommandNotFound, vt::NEWLINE);
            }
            Err(e) => {
                cli_warn!(CLI_LOG_STREAM, "{} failed: {}", cmd.command(), e);
                let _ = write!(out, "{}{}", e, vt::NEWLINE);
            }
        }
        result
    }

    /// Show a history entry (or an empty line) in place of the current one.
    fn render(&mut self, entry: Option<EntryHandle>, out: &mut dyn Write) {
        match entry {
            Some(h) => self.line.set(self.history.text(h)),
            None => self.line.clear(),
        }

        let _ = out.write_str(vt::CLEAR_LINE);
        self.print_prompt(out);
        let _ = out.write_str(self.line.as_str());
    }

    /// Discard the line after the receive buffer dropped input.
    fn recover_overflow(&mut self, out: &mut dyn Write) {
        self.line.clear();
        self.escape_state = EscapeState::Normal;
        self.last_byte = 0;
        self.history.reset_recall();

        let _ = out.write_str(vt::NEWLINE);
        self.print_prompt(out);
        cli_warn!(
            CLI_LOG_STREAM,
            "rx overflow: line discarded, {} bytes dropped total",
            self.rx.dropped()
        );
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = out.write_str(PROMPT);
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}{}{}", vt::NEWLINE, VERSION, vt::NEWLINE);
        let _ = write!(out, "Type 'help' for commands.{}", vt::NEWLINE);
        self.print_prompt(out);
    }

    /// Line being edited.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Command history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable history, e.g. for a `history clear` command.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Receive buffer feeding this console.
    pub fn rx(&self) -> &'a RxBuffer<RX> {
        self.rx
    }

    /// Command table.
    pub fn commands(&self) -> &'a [CommandDescriptor] {
        self.commands
    }
}
