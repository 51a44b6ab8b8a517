//! Circular arena allocator for history entries.
//!
//! One fixed byte region, allocated front to back like a bump allocator
//! and reclaimed strictly oldest-first. Every entry is stored inline:
//!
//! ```text
//! offset  0      2      4      6            6+len
//!         ┌──────┬──────┬──────┬────────────┬───┬─────┐
//!         │ len  │ prev │ next │ text bytes │ 0 │ pad │
//!         └──────┴──────┴──────┴────────────┴───┴─────┘
//!           u16 little endian, NIL = 0xFFFF
//! ```
//!
//! Live entries occupy the ring from `oldest` up to the allocation hint,
//! wrapping to offset 0 at most once. Free space is whatever lies outside
//! that span, so evicting the oldest entry is enough to reclaim its bytes.

use crate::config::{ENTRY_ALIGN, HISTORY_ARENA_SIZE};

/// Bytes of inline header before the text.
pub const HEADER_SIZE: usize = 6;

const NIL: u16 = u16::MAX;

const LEN_AT: usize = 0;
const PREV_AT: usize = 2;
const NEXT_AT: usize = 4;

/// Handle to an entry: its byte offset in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryHandle(u16);

impl EntryHandle {
    /// Byte offset of the entry header.
    #[inline]
    pub fn offset(self) -> usize {
        self.0 as usize
    }
}

/// Positions of the live span, passed in by the owner of the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSpan {
    /// Most recently allocated live entry.
    pub newest: EntryHandle,
    /// Least recently allocated live entry.
    pub oldest: EntryHandle,
}

impl LiveSpan {
    /// True once newest has wrapped to a lower offset than oldest.
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.newest.offset() < self.oldest.offset()
    }
}

/// Fixed-size arena with a "next free" hint.
pub struct Arena<const N: usize = HISTORY_ARENA_SIZE> {
    bytes: [u8; N],
    /// Offset just past the most recent allocation.
    hint: usize,
}

impl<const N: usize> Arena<N> {
    /// Create an empty arena.
    pub const fn new() -> Self {
        const { assert!(N < NIL as usize, "arena offsets must fit below the NIL handle") };
        const { assert!(N >= HEADER_SIZE + 2, "arena too small for one entry") };

        Self {
            bytes: [0u8; N],
            hint: 0,
        }
    }

    /// Arena size in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current allocation hint.
    #[inline]
    pub fn hint(&self) -> usize {
        self.hint
    }

    /// Storage needed for `text_len` bytes of text: header, text and
    /// terminator, rounded up to the alignment quantum.
    #[inline]
    pub const fn entry_size(text_len: usize) -> usize {
        (HEADER_SIZE + text_len + 1 + ENTRY_ALIGN - 1) & !(ENTRY_ALIGN - 1)
    }

    /// Reserve `size` contiguous bytes.
    ///
    /// `live` is `None` when no entry survives; the block then starts at
    /// offset 0. Otherwise the block never overlaps `[oldest, hint)`:
    ///
    /// - unwrapped: take `[hint, hint+size)` if it ends before the arena
    ///   end, else wrap to `[0, size)` if that ends before `oldest`
    /// - wrapped: take `[hint, hint+size)` only if it ends before `oldest`
    ///
    /// Returns `None` when none of these fit; the caller evicts and retries.
    pub fn allocate(&mut self, size: usize, live: Option<LiveSpan>) -> Option<EntryHandle> {
        if size == 0 || size > N {
            return None;
        }

        let start = match live {
            None => 0,
            Some(span) if !span.is_wrapped() => {
                if self.hint + size <= N {
                    self.hint
                } else if size <= span.oldest.offset() {
                    0
                } else {
                    return None;
                }
            }
            Some(span) => {
                if self.hint + size <= span.oldest.offset() {
                    self.hint
                } else {
                    return None;
                }
            }
        };

        self.hint = start + size;
        Some(EntryHandle(start as u16))
    }

    /// Forget every allocation.
    pub fn reset(&mut self) {
        self.hint = 0;
    }

    /// Write a fresh entry header and its text at `h`.
    ///
    /// The block at `h` must have been sized with [`Self::entry_size`].
    pub fn write_entry(&mut self, h: EntryHandle, text: &[u8], next: Option<EntryHandle>) {
        let at = h.offset();
        let len = text.len().min(N.saturating_sub(at + HEADER_SIZE + 1));

        self.write_u16(at + LEN_AT, len as u16);
        self.write_u16(at + PREV_AT, NIL);
        self.write_link(at + NEXT_AT, next);
        let text_at = at + HEADER_SIZE;
        self.bytes[text_at..text_at + len].copy_from_slice(&text[..len]);
        self.bytes[text_at + len] = 0;
    }

    /// Text stored at `h`.
    pub fn text(&self, h: EntryHandle) -> &[u8] {
        let at = h.offset();
        let text_at = (at + HEADER_SIZE).min(N);
        let len = self.read_u16(at + LEN_AT) as usize;
        &self.bytes[text_at..(text_at + len).min(N)]
    }

    /// Link towards the newer neighbour.
    #[inline]
    pub fn prev(&self, h: EntryHandle) -> Option<EntryHandle> {
        self.read_link(h.offset() + PREV_AT)
    }

    /// Link towards the older neighbour.
    #[inline]
    pub fn next(&self, h: EntryHandle) -> Option<EntryHandle> {
        self.read_link(h.offset() + NEXT_AT)
    }

    #[inline]
    pub fn set_prev(&mut self, h: EntryHandle, prev: Option<EntryHandle>) {
        self.write_link(h.offset() + PREV_AT, prev);
    }

    #[inline]
    pub fn set_next(&mut self, h: EntryHandle, next: Option<EntryHandle>) {
        self.write_link(h.offset() + NEXT_AT, next);
    }

    fn read_link(&self, at: usize) -> Option<EntryHandle> {
        match self.read_u16(at) {
            NIL => None,
            v if (v as usize) < N => Some(EntryHandle(v)),
            _ => None,
        }
    }

    fn write_link(&mut self, at: usize, link: Option<EntryHandle>) {
        self.write_u16(at, link.map_or(NIL, |h| h.0));
    }

    fn read_u16(&self, at: usize) -> u16 {
        match self.bytes.get(at..at + 2) {
            Some(b) => u16::from_le_bytes([b[0], b[1]]),
            None => NIL,
        }
    }

    fn write_u16(&mut self, at: usize, value: u16) {
        if let Some(b) = self.bytes.get_mut(at..at + 2) {
            b.copy_from_slice(&value.to_le_bytes());
        }
    }
}

impl<const N: usize> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}
