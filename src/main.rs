//! micro-cli demo console
//!
//! 1. A reader thread plays the byte arrival path: every byte read from
//!    stdin goes through `RxBuffer::on_byte_received`
//! 2. The main loop drains it with `Console::process` and writes to stdout
//!
//! On the device stdin/stdout are the ESP-IDF serial console.

use std::io::{Read, Write as _};
use std::thread;
use std::time::Duration;

use micro_cli::console::commands::{self, CommandDescriptor};
use micro_cli::console::{CliError, Console, ParsedCommand, RxBuffer, VERSION};
use micro_cli::logging::LogLevel;
use micro_cli::{uart_logger, CLI_LOG_STREAM, CONFIG};

static RX: RxBuffer = RxBuffer::new();

static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        help: "List commands",
        handler: cmd_help,
    },
    CommandDescriptor {
        name: "echo",
        help: "Print arguments",
        handler: cmd_echo,
    },
    CommandDescriptor {
        name: "config",
        help: "Show or set echo|history|log",
        handler: cmd_config,
    },
    CommandDescriptor {
        name: "log",
        help: "Drain the event log",
        handler: cmd_log,
    },
    CommandDescriptor {
        name: "version",
        help: "Firmware version",
        handler: cmd_version,
    },
];

/// `fmt::Write` over the process stdout.
struct Stdout(std::io::Stdout);

impl std::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| std::fmt::Error)
    }
}

fn main() {
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();

    let mut out = Stdout(std::io::stdout());
    let mut console = Console::new(&RX, COMMANDS);
    console.print_banner(&mut out);
    let _ = out.0.flush();

    thread::spawn(|| {
        let mut stdin = std::io::stdin();
        let mut byte = [0u8; 1];
        while let Ok(1) = stdin.read(&mut byte) {
            RX.on_byte_received(byte[0]);
        }
    });

    loop {
        if console.process(&mut out) > 0 || !RX.is_empty() {
            let _ = out.0.flush();
            continue;
        }
        let _ = out.0.flush();
        thread::sleep(Duration::from_millis(10));
    }
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, out: &mut dyn std::fmt::Write) -> Result<(), CliError> {
    match cmd.arg(0) {
        Some(name) => {
            let c = commands::find(COMMANDS, name).ok_or(CliError::CommandNotFound)?;
            let _ = write!(out, "{}: {}\r\n", c.name, c.help);
        }
        None => commands::help(COMMANDS, out),
    }
    Ok(())
}

fn cmd_echo(cmd: &ParsedCommand<'_>, out: &mut dyn std::fmt::Write) -> Result<(), CliError> {
    for (i, arg) in cmd.args().iter().enumerate() {
        if i > 0 {
            let _ = out.write_char(' ');
        }
        let _ = out.write_str(arg);
    }
    let _ = out.write_str("\r\n");
    Ok(())
}

fn cmd_config(cmd: &ParsedCommand<'_>, out: &mut dyn std::fmt::Write) -> Result<(), CliError> {
    let Some(name) = cmd.arg(0) else {
        let snap = CONFIG.snapshot();
        let _ = write!(out, "echo={}\r\n", snap.echo);
        let _ = write!(out, "history={}\r\n", snap.history);
        let _ = write!(out, "log={}\r\n", snap.log_level.as_str());
        return Ok(());
    };
    let value = cmd.arg(1).ok_or(CliError::MissingArg)?;

    match name {
        "echo" => CONFIG.set_echo(parse_bool(value)?),
        "history" => CONFIG.set_history_enabled(parse_bool(value)?),
        "log" => CONFIG.set_log_level(LogLevel::parse(value).ok_or(CliError::InvalidValue)?),
        _ => return Err(CliError::InvalidValue),
    }
    let _ = write!(out, "{}={}\r\n", name, value);
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, CliError> {
    match value {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(CliError::InvalidValue),
    }
}

fn cmd_log(_cmd: &ParsedCommand<'_>, out: &mut dyn std::fmt::Write) -> Result<(), CliError> {
    if uart_logger::drain_to(&CLI_LOG_STREAM, out) == 0 {
        let _ = out.write_str("log: empty\r\n");
    }
    Ok(())
}

fn cmd_version(_cmd: &ParsedCommand<'_>, out: &mut dyn std::fmt::Write) -> Result<(), CliError> {
    let _ = write!(out, "{}\r\n", VERSION);
    Ok(())
}
