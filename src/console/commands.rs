//! Command table and dispatch
//!
//! The table is supplied by the application; the console only looks
//! commands up by exact, case-sensitive name.

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::CliError;

/// Command handler signature.
pub type Handler = fn(&ParsedCommand<'_>, &mut dyn Write) -> Result<(), CliError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: Handler,
}

/// Look up a command by name.
pub fn find<'t>(table: &'t [CommandDescriptor], name: &str) -> Option<&'t CommandDescriptor> {
    table.iter().find(|c| c.name == name)
}

/// Run the handler named by `cmd.command()` and return its result.
///
/// An empty command line is a no-op.
pub fn dispatch(
    table: &[CommandDescriptor],
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if cmd.argc() == 0 {
        return Ok(());
    }

    let descriptor = find(table, cmd.command()).ok_or(CliError::CommandNotFound)?;
    (descriptor.handler)(cmd, out)
}

/// All command names, in table order.
pub fn names(table: &[CommandDescriptor]) -> impl Iterator<Item = &'static str> + '_ {
    table.iter().map(|c| c.name)
}

/// Print one line per command: name and help text.
pub fn help(table: &[CommandDescriptor], out: &mut dyn Write) {
    for c in table {
        let _ = write!(out, "  {:<14} {}\r\n", c.name, c.help);
    }
}
