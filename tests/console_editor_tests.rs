//! Line editor tests: bytes in, terminal output and dispatch out

use core::fmt::Write;

use micro_cli::console::{CliError, CommandDescriptor, Console, ParsedCommand, RxBuffer};

static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "echo",
        help: "Print arguments",
        handler: cmd_echo,
    },
    CommandDescriptor {
        name: "fail",
        help: "Always fails",
        handler: cmd_fail,
    },
];

fn cmd_echo(cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<(), CliError> {
    let _ = write!(out, "[");
    for arg in cmd.args() {
        let _ = write!(out, "<{}>", arg);
    }
    let _ = write!(out, "]");
    Ok(())
}

fn cmd_fail(_cmd: &ParsedCommand<'_>, _out: &mut dyn Write) -> Result<(), CliError> {
    Err(CliError::InvalidValue)
}

const UP: &[u8] = b"\x1b[A";
const DOWN: &[u8] = b"\x1b[B";
const RIGHT: &[u8] = b"\x1b[C";
const LEFT: &[u8] = b"\x1b[D";

/// Queue `bytes` as the arrival path would, then run one processing pass.
fn feed<const N: usize>(console: &mut Console<'_, N>, bytes: &[u8], out: &mut String) -> usize {
    for &b in bytes {
        console.rx().on_byte_received(b);
    }
    console.process(out)
}

#[test]
fn test_submit_dispatches_and_resets() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    assert_eq!(feed(&mut console, b"echo  hi   there\r", &mut out), 1);
    assert!(out.contains("echo  hi   there\r\n[<hi><there>]> "));
    assert!(console.line().is_empty());
    assert_eq!(console.line().cursor(), 0);
    assert_eq!(console.history().len(), 1);
    let newest = console.history().newest().unwrap();
    // History keeps the line as typed, before tokenizing
    assert_eq!(console.history().text(newest), b"echo  hi   there");
}

#[test]
fn test_submit_with_cursor_mid_line_resets() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo abc", &mut out);
    feed(&mut console, LEFT, &mut out);
    feed(&mut console, LEFT, &mut out);
    assert_eq!(console.line().cursor(), 2);

    feed(&mut console, b"\r", &mut out);
    assert_eq!(console.line().len(), 0);
    assert_eq!(console.line().cursor(), 0);
}

#[test]
fn test_crlf_submits_once() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    assert_eq!(feed(&mut console, b"echo a\r\necho b\n", &mut out), 2);
    assert_eq!(console.history().len(), 2);
    assert_eq!(out.matches("> ").count(), 2);
}

#[test]
fn test_blank_line_not_dispatched() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    assert_eq!(feed(&mut console, b"    \r", &mut out), 0);
    assert!(console.history().is_empty());
    assert!(console.line().is_empty());
    assert!(out.ends_with("\r\n> "));
}

#[test]
fn test_escape_sequence_moves_cursor_not_text() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"ab", &mut out);
    feed(&mut console, LEFT, &mut out);
    assert_eq!(console.line().cursor(), 1);
    assert!(out.ends_with("\x1b[D"));

    out.clear();
    feed(&mut console, RIGHT, &mut out);
    assert_eq!(console.line().cursor(), 0);
    assert_eq!(out, "\x1b[C");
    assert_eq!(console.line().as_str(), "ab");

    // Already at the end: nothing to do
    out.clear();
    feed(&mut console, RIGHT, &mut out);
    assert_eq!(out, "");
}

#[test]
fn test_left_stops_at_line_start() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"x", &mut out);
    feed(&mut console, LEFT, &mut out);
    out.clear();
    feed(&mut console, LEFT, &mut out);

    assert_eq!(console.line().cursor(), 1);
    assert_eq!(out, "");
}

#[test]
fn test_escape_split_across_process_calls() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"ab\x1b", &mut out);
    feed(&mut console, b"[", &mut out);
    feed(&mut console, b"D", &mut out);

    assert_eq!(console.line().as_str(), "ab");
    assert_eq!(console.line().cursor(), 1);
}

#[test]
fn test_escape_restarts_inside_sequence() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"ab", &mut out);
    feed(&mut console, LEFT, &mut out);
    out.clear();

    // Interrupted ESC [ then a complete cursor-right
    feed(&mut console, b"\x1b[\x1b[C", &mut out);

    assert_eq!(console.line().as_str(), "ab");
    assert_eq!(console.line().cursor(), 0);
    assert_eq!(out, "\x1b[C");
}

#[test]
fn test_insert_mid_line_emits_insert_char() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"abd", &mut out);
    feed(&mut console, LEFT, &mut out);
    out.clear();

    feed(&mut console, b"c", &mut out);
    assert_eq!(console.line().as_str(), "abcd");
    assert_eq!(console.line().cursor(), 1);
    assert_eq!(out, "\x1b[@c");

    out.clear();
    feed(&mut console, b"\x7f", &mut out);
    assert_eq!(console.line().as_str(), "abd");
    assert_eq!(console.line().cursor(), 1);
    assert_eq!(out, "\x1b[D\x1b[P");
}

#[test]
fn test_insert_at_end_echoes_plainly() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"hi", &mut out);
    assert_eq!(out, "hi");
}

#[test]
fn test_backspace_variants_and_start_of_line() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"abc\x08", &mut out);
    assert_eq!(console.line().as_str(), "ab");

    feed(&mut console, LEFT, &mut out);
    feed(&mut console, LEFT, &mut out);
    out.clear();
    feed(&mut console, b"\x7f", &mut out);
    assert_eq!(console.line().as_str(), "ab");
    assert_eq!(out, "");
}

#[test]
fn test_line_full_drops_input() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, &[b'k'; 70], &mut out);
    assert_eq!(console.line().len(), console.line().capacity());
    assert_eq!(out.len(), console.line().capacity());
}

#[test]
fn test_history_navigation_renders_entries() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo one\r", &mut out);
    feed(&mut console, b"echo two\r", &mut out);
    out.clear();

    feed(&mut console, UP, &mut out);
    assert_eq!(console.line().as_str(), "echo two");
    assert_eq!(out, "\r\x1b[K> echo two");

    feed(&mut console, UP, &mut out);
    assert_eq!(console.line().as_str(), "echo one");
    feed(&mut console, UP, &mut out);
    assert_eq!(console.line().as_str(), "echo one");

    feed(&mut console, DOWN, &mut out);
    assert_eq!(console.line().as_str(), "echo two");

    out.clear();
    feed(&mut console, DOWN, &mut out);
    assert_eq!(console.line().as_str(), "");
    assert_eq!(out, "\r\x1b[K> ");
}

#[test]
fn test_up_with_empty_history_renders_empty_line() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"draft", &mut out);
    out.clear();
    feed(&mut console, UP, &mut out);

    assert!(console.line().is_empty());
    assert_eq!(out, "\r\x1b[K> ");
}

#[test]
fn test_recalled_line_edit_and_submit() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo a\r", &mut out);
    feed(&mut console, b"echo b\r", &mut out);
    feed(&mut console, UP, &mut out);
    feed(&mut console, UP, &mut out);
    feed(&mut console, b"z\r", &mut out);

    let texts: Vec<&[u8]> = console.history().iter().collect();
    assert_eq!(texts, [&b"echo az"[..], &b"echo b"[..], &b"echo a"[..]]);

    // Recall restarts from the newest entry after a submit
    feed(&mut console, UP, &mut out);
    assert_eq!(console.line().as_str(), "echo az");
}

#[test]
fn test_resubmitting_newest_is_not_duplicated() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo x\r", &mut out);
    feed(&mut console, UP, &mut out);
    assert_eq!(feed(&mut console, b"\r", &mut out), 1);

    assert_eq!(console.history().len(), 1);
    assert_eq!(out.matches("[<x>]").count(), 2);
}

#[test]
fn test_unknown_command_reported() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    assert_eq!(feed(&mut console, b"nope 1\r", &mut out), 1);
    assert!(out.contains("nope: E01: command not found\r\n> "));
    // Still recorded
    assert_eq!(console.history().len(), 1);
}

#[test]
fn test_handler_error_reported() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    assert_eq!(console.process_byte(b'f', &mut out), None);
    for &b in b"ail" {
        console.process_byte(b, &mut out);
    }
    assert_eq!(console.process_byte(b'\r', &mut out), Some(Err(CliError::InvalidValue)));
    assert!(out.contains("E03: invalid value"));
}

#[test]
fn test_too_many_arguments_rejected() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo 1 2 3 4 5 6 7 8 9\r", &mut out);
    assert!(out.contains("E02: too many arguments"));
    assert!(!out.contains("[<1>"));
    assert!(console.line().is_empty());
}

#[test]
fn test_ctrl_c_discards_line() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo oops\x03", &mut out);
    assert!(console.line().is_empty());
    assert!(out.ends_with("^C\r\n> "));
    assert!(console.history().is_empty());
}

#[test]
fn test_ctrl_u_clears_line() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"echo oops", &mut out);
    out.clear();
    feed(&mut console, b"\x15", &mut out);
    assert!(console.line().is_empty());
    assert_eq!(out, "\r\x1b[K> ");
}

#[test]
fn test_other_control_bytes_ignored() {
    let rx = RxBuffer::<128>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"a\x01\x00\tb", &mut out);
    assert_eq!(console.line().as_str(), "ab");
}

#[test]
fn test_overflow_discards_line_and_escape_state() {
    let rx = RxBuffer::<8>::new();
    let mut console = Console::new(&rx, COMMANDS);
    let mut out = String::new();

    feed(&mut console, b"hello\x1b", &mut out);
    assert_eq!(console.line().as_str(), "hello");

    // Nine bytes into a 7 byte queue: two dropped
    for _ in 0..9 {
        rx.on_byte_received(b'[');
    }
    assert!(rx.overflowed());

    out.clear();
    console.process(&mut out);

    // Line discarded, pending ESC forgotten: '[' is plain text again
    assert!(!rx.overflowed());
    assert_eq!(console.line().as_str(), "[[[[[[[");
    assert!(out.starts_with("\r\n> "));
}
