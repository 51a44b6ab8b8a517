//! Lock-free receive ring buffer
//!
//! SPSC (single producer, single consumer) byte queue between the byte
//! arrival path (interrupt or reader task) and the processing loop.
//!
//! - Producer only writes `write_idx`, consumer only writes `read_idx`
//! - One slot always stays empty to tell full from empty
//! - Indices wrap with a mask, N must be a power of 2

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use crate::config::RX_BUFFER_SIZE;

/// Receive ring buffer with static size
pub struct RxBuffer<const N: usize = RX_BUFFER_SIZE> {
    data: UnsafeCell<[u8; N]>,
    write_idx: AtomicUsize,
    read_idx: AtomicUsize,
    /// Set by the producer when a byte was dropped, cleared by the consumer.
    overflow: AtomicBool,
    /// Total bytes dropped since creation (never cleared).
    dropped: AtomicU32,
}

// SAFETY: Single producer writes only the slot at write_idx before
// publishing it with a Release store; single consumer reads only slots
// below write_idx (observed with Acquire) and then releases them.
unsafe impl<const N: usize> Sync for RxBuffer<N> {}
unsafe impl<const N: usize> Send for RxBuffer<N> {}

impl<const N: usize> RxBuffer<N> {
    const MASK: usize = N - 1;

    /// Create new empty buffer
    pub const fn new() -> Self {
        const { assert!(N.is_power_of_two(), "RX buffer size must be power of 2") };
        const { assert!(N >= 2, "RX buffer needs at least two slots") };

        Self {
            data: UnsafeCell::new([0u8; N]),
            write_idx: AtomicUsize::new(0),
            read_idx: AtomicUsize::new(0),
            overflow: AtomicBool::new(false),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue one byte.
    ///
    /// Returns `false` without touching the queue if it is full.
    /// Producer side only.
    #[inline]
    pub fn push(&self, byte: u8) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let next = (write + 1) & Self::MASK;

        if next == self.read_idx.load(Ordering::Acquire) {
            return false;
        }

        // SAFETY: Single producer; the consumer never reads the slot at
        // write_idx until the store below publishes it.
        unsafe {
            (*self.data.get())[write] = byte;
        }
        self.write_idx.store(next, Ordering::Release);
        true
    }

    /// Take the oldest byte, or `None` if empty. Consumer side only.
    #[inline]
    pub fn pop(&self) -> Option<u8> {
        let read = self.read_idx.load(Ordering::Relaxed);

        if read == self.write_idx.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: Single consumer, slot published by the Acquire above
        let byte = unsafe { (*self.data.get())[read] };
        self.read_idx.store((read + 1) & Self::MASK, Ordering::Release);
        Some(byte)
    }

    /// True when no unread bytes remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_idx.load(Ordering::Relaxed) == self.write_idx.load(Ordering::Acquire)
    }

    /// Number of unread bytes.
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        write.wrapping_sub(read) & Self::MASK
    }

    /// Usable capacity (one slot is kept empty).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Byte arrival entry point.
    ///
    /// Never blocks, safe from interrupt context. A byte that does not fit
    /// is dropped and the overflow flag raised for the consumer.
    #[inline]
    pub fn on_byte_received(&self, byte: u8) {
        if !self.push(byte) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            self.overflow.store(true, Ordering::Release);
        }
    }

    /// Check the overflow flag without clearing it.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.overflow.load(Ordering::Acquire)
    }

    /// Clear the overflow flag, returning whether it was set.
    ///
    /// Consumer side, after recovery.
    #[inline]
    pub fn take_overflow(&self) -> bool {
        self.overflow.swap(false, Ordering::AcqRel)
    }

    /// Total bytes dropped since creation.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
