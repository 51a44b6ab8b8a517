//! ANSI/VT100 byte sequences used by the line editor.

/// Escape, first byte of every sequence.
pub const ESC: u8 = 0x1B;

/// Second byte of a Control Sequence Introducer (`ESC [`).
pub const CSI: u8 = b'[';

/// Delete (sent by most terminals for the backspace key).
pub const DEL: u8 = 0x7F;

/// Backspace.
pub const BS: u8 = 0x08;

/// Ctrl+C.
pub const ETX: u8 = 0x03;

/// Ctrl+U.
pub const NAK: u8 = 0x15;

/// Final bytes of the arrow key sequences.
pub const KEY_UP: u8 = b'A';
pub const KEY_DOWN: u8 = b'B';
pub const KEY_RIGHT: u8 = b'C';
pub const KEY_LEFT: u8 = b'D';

/// Move cursor one column right (CUF).
pub const CURSOR_RIGHT: &str = "\x1b[C";

/// Move cursor one column left (CUB).
pub const CURSOR_LEFT: &str = "\x1b[D";

/// Open a blank column at the cursor, shifting the rest right (ICH).
pub const INSERT_CHAR: &str = "\x1b[@";

/// Erase the character left of the cursor: CUB then DCH.
pub const BACKSPACE: &str = "\x1b[D\x1b[P";

/// Return to column 0 and erase to end of line (CR, EL).
pub const CLEAR_LINE: &str = "\r\x1b[K";

/// Line terminator sent to the terminal.
pub const NEWLINE: &str = "\r\n";
