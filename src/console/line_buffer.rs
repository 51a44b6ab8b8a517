//! Line buffer for console input
//!
//! Holds the line being edited plus a cursor. The cursor is stored as a
//! distance from the end of the text, so `0` means "at the end" and typing
//! at the end never needs to shift anything.
//!
//! Invariant: `cursor <= len < N`. The byte at `buf[len]` is always zero.

use crate::config::LINE_SIZE;

/// Printable byte range: ASCII 0x20..=0x7E.
#[inline]
pub const fn is_printable(c: u8) -> bool {
    matches!(c, 0x20..=0x7E)
}

/// True if `text` has nothing but spaces and non-printable bytes.
#[inline]
pub fn is_blank(text: &[u8]) -> bool {
    !text.iter().any(|&c| is_printable(c) && c != b' ')
}

/// Line input buffer
pub struct LineBuffer<const N: usize = LINE_SIZE> {
    buf: [u8; N],
    len: usize,
    /// Cursor distance from the end of the text.
    cursor: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        const { assert!(N >= 2, "line buffer needs room for one byte and the terminator") };

        Self {
            buf: [0u8; N],
            len: 0,
            cursor: 0,
        }
    }

    /// Bytes that fit, excluding the terminator slot.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Index where the next insert lands.
    #[inline]
    pub fn insert_pos(&self) -> usize {
        self.len - self.cursor
    }

    /// Insert a byte at the cursor.
    ///
    /// Returns `false` (and leaves the buffer untouched) if full.
    pub fn insert(&mut self, c: u8) -> bool {
        if self.len >= self.capacity() {
            return false;
        }

        let pos = self.insert_pos();
        // Shift the tail and the terminator one slot right.
        self.buf.copy_within(pos..=self.len, pos + 1);
        self.buf[pos] = c;
        self.len += 1;
        true
    }

    /// Delete the byte before the cursor.
    ///
    /// Returns `false` if the cursor is at the start of the line.
    pub fn delete_before_cursor(&mut self) -> bool {
        let pos = self.insert_pos();
        if pos == 0 {
            return false;
        }

        self.buf.copy_within(pos..=self.len, pos - 1);
        self.len -= 1;
        true
    }

    /// Move cursor one byte left. Returns `false` at the start of the line.
    pub fn cursor_left(&mut self) -> bool {
        if self.cursor < self.len {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move cursor one byte right. Returns `false` at the end of the line.
    pub fn cursor_right(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Cursor distance from the end of the text.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
        self.buf[0] = 0;
    }

    /// Replace contents, truncating to capacity. Cursor goes to the end.
    pub fn set(&mut self, bytes: &[u8]) {
        let copy_len = bytes.len().min(self.capacity());
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.buf[copy_len] = 0;
        self.len = copy_len;
        self.cursor = 0;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if the line holds no visible character.
    pub fn is_blank(&self) -> bool {
        is_blank(self.as_bytes())
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Mutable view of the text, for in-place tokenizing.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// Text from the cursor to the end of the line.
    pub fn tail(&self) -> &[u8] {
        &self.buf[self.insert_pos()..self.len]
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
