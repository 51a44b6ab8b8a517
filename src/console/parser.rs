//! Command line tokenizer
//!
//! Splits a line on spaces in place: every space becomes a zero byte and
//! tokens borrow from the line. At most `MAX_ARGS` arguments follow the
//! command name.

use super::CliError;
use crate::config::MAX_ARGS;

/// Tokenized command line.
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    argv: [&'a str; MAX_ARGS + 1],
    argc: usize,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            argv: [""; MAX_ARGS + 1],
            argc: 0,
        }
    }

    /// The command name (first token), `""` if none.
    pub fn command(&self) -> &'a str {
        self.argv[0]
    }

    /// Get argument by index (0-based, after the command name)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        if idx + 1 < self.argc {
            Some(self.argv[idx + 1])
        } else {
            None
        }
    }

    /// Token count, command name included.
    pub fn argc(&self) -> usize {
        self.argc
    }

    /// All tokens, command name first.
    pub fn argv(&self) -> &[&'a str] {
        &self.argv[..self.argc]
    }

    /// Arguments after the command name.
    pub fn args(&self) -> &[&'a str] {
        self.argv.get(1..self.argc).unwrap_or(&[])
    }
}

/// Tokenize `line` in place.
///
/// Spaces (and existing zero bytes) separate tokens; runs of them collapse.
/// Fails with [`CliError::TooManyArgs`] when more than `MAX_ARGS` arguments
/// follow the command name.
pub fn tokenize(line: &mut [u8]) -> Result<ParsedCommand<'_>, CliError> {
    let mut spans = [(0usize, 0usize); MAX_ARGS + 1];
    let mut argc = 0;
    let mut start: Option<usize> = None;

    for i in 0..line.len() {
        let c = line[i];
        if c == b' ' || c == 0 {
            line[i] = 0;
            if let Some(s) = start.take() {
                spans[argc - 1] = (s, i);
            }
        } else if start.is_none() {
            if argc == spans.len() {
                return Err(CliError::TooManyArgs);
            }
            start = Some(i);
            argc += 1;
        }
    }
    if let Some(s) = start {
        spans[argc - 1] = (s, line.len());
    }

    let line: &[u8] = line;
    let mut cmd = ParsedCommand::empty();
    for (slot, &(s, e)) in cmd.argv.iter_mut().zip(&spans[..argc]) {
        *slot = core::str::from_utf8(&line[s..e]).map_err(|_| CliError::InvalidInput)?;
    }
    cmd.argc = argc;
    Ok(cmd)
}
