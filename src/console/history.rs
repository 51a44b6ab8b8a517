//! Command history in a circular arena
//!
//! Entries live in an [`Arena`] and form a doubly linked list by recency:
//! `prev` points to the newer neighbour, `next` to the older one. When the
//! arena is full the oldest entry is unlinked until the new line fits.
//!
//! A recall cursor tracks the entry shown during up/down navigation.

use super::arena::{Arena, EntryHandle, LiveSpan};
use super::line_buffer::is_blank;
use crate::config::HISTORY_ARENA_SIZE;

/// What [`History::record`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Stored as the newest entry after evicting `evicted` older ones.
    Stored { evicted: usize },
    /// Empty, blank, or identical to the newest entry.
    Skipped,
    /// Larger than the arena can ever hold; history is now empty.
    Dropped,
}

/// Command history
pub struct History<const N: usize = HISTORY_ARENA_SIZE> {
    arena: Arena<N>,
    newest: Option<EntryHandle>,
    oldest: Option<EntryHandle>,
    /// Entry currently shown by up/down navigation, `None` = live line.
    recall: Option<EntryHandle>,
    count: usize,
}

impl<const N: usize> History<N> {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            newest: None,
            oldest: None,
            recall: None,
            count: 0,
        }
    }

    /// Store a submitted line as the newest entry.
    ///
    /// Evicts oldest entries until the line fits. Immediate repeats of the
    /// newest entry are not stored twice.
    pub fn record(&mut self, text: &[u8]) -> RecordOutcome {
        if is_blank(text) {
            return RecordOutcome::Skipped;
        }
        if self.newest.is_some_and(|n| self.arena.text(n) == text) {
            return RecordOutcome::Skipped;
        }

        let size = Arena::<N>::entry_size(text.len());
        let mut evicted = 0;
        let handle = loop {
            if let Some(h) = self.arena.allocate(size, self.live_span()) {
                break h;
            }
            if !self.evict_oldest() {
                return RecordOutcome::Dropped;
            }
            evicted += 1;
        };

        self.arena.write_entry(handle, text, self.newest);
        match self.newest {
            Some(previous) => self.arena.set_prev(previous, Some(handle)),
            None => self.oldest = Some(handle),
        }
        self.newest = Some(handle);
        self.count += 1;

        RecordOutcome::Stored { evicted }
    }

    /// Unlink the oldest entry. Returns `false` if history is empty.
    ///
    /// Its bytes become free implicitly: the allocator never hands out
    /// space inside the live span.
    pub fn evict_oldest(&mut self) -> bool {
        let Some(old) = self.oldest else {
            return false;
        };

        match self.arena.prev(old) {
            Some(newer) => {
                self.arena.set_next(newer, None);
                self.oldest = Some(newer);
            }
            None => {
                self.oldest = None;
                self.newest = None;
                self.arena.reset();
            }
        }

        if self.recall == Some(old) {
            self.recall = None;
        }
        self.count -= 1;
        true
    }

    /// Step the recall cursor towards older entries.
    ///
    /// Starts at the newest entry; stays put on the oldest.
    pub fn recall_older(&mut self) -> Option<EntryHandle> {
        self.recall = match self.recall {
            None => self.newest,
            Some(h) => Some(self.arena.next(h).unwrap_or(h)),
        };
        self.recall
    }

    /// Step the recall cursor towards newer entries, ending at `None`.
    pub fn recall_newer(&mut self) -> Option<EntryHandle> {
        if let Some(h) = self.recall {
            self.recall = self.arena.prev(h);
        }
        self.recall
    }

    /// Drop the recall cursor (back to the live line).
    pub fn reset_recall(&mut self) {
        self.recall = None;
    }

    /// Entry currently being recalled.
    pub fn recalled(&self) -> Option<EntryHandle> {
        self.recall
    }

    /// Text of an entry.
    pub fn text(&self, h: EntryHandle) -> &[u8] {
        self.arena.text(h)
    }

    pub fn newest(&self) -> Option<EntryHandle> {
        self.newest
    }

    pub fn oldest(&self) -> Option<EntryHandle> {
        self.oldest
    }

    /// Newer neighbour of `h`.
    pub fn newer(&self, h: EntryHandle) -> Option<EntryHandle> {
        self.arena.prev(h)
    }

    /// Older neighbour of `h`.
    pub fn older(&self, h: EntryHandle) -> Option<EntryHandle> {
        self.arena.next(h)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes occupied by live entries, including headers and padding.
    pub fn used_bytes(&self) -> usize {
        self.iter().map(|t| Arena::<N>::entry_size(t.len())).sum()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.newest = None;
        self.oldest = None;
        self.recall = None;
        self.count = 0;
        self.arena.reset();
    }

    /// Entry texts from newest to oldest.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            history: self,
            cursor: self.newest,
        }
    }

    fn live_span(&self) -> Option<LiveSpan> {
        match (self.newest, self.oldest) {
            (Some(newest), Some(oldest)) => Some(LiveSpan { newest, oldest }),
            _ => None,
        }
    }
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entry texts, newest first.
pub struct Iter<'a, const N: usize> {
    history: &'a History<N>,
    cursor: Option<EntryHandle>,
}

impl<'a, const N: usize> Iterator for Iter<'a, N> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.cursor?;
        self.cursor = self.history.arena.next(h);
        Some(self.history.arena.text(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_order_follows_recency() {
        let mut history = History::<64>::new();
        history.record(b"one");
        history.record(b"two");
        history.record(b"three");

        let newest = history.newest().unwrap();
        let middle = history.older(newest).unwrap();
        let oldest = history.oldest().unwrap();

        assert_eq!(history.older(middle), Some(oldest));
        assert!(oldest.offset() < middle.offset());
        assert!(middle.offset() < newest.offset());
        // Each entry starts where the previous one ended.
        assert_eq!(middle.offset(), Arena::<64>::entry_size(3));
    }

    #[test]
    fn test_evicting_recalled_entry_clears_recall() {
        let mut history = History::<64>::new();
        history.record(b"a");
        history.record(b"b");
        history.recall_older();
        history.recall_older();
        assert_eq!(history.recalled(), history.oldest());

        history.evict_oldest();
        assert_eq!(history.recalled(), None);
    }

    #[test]
    fn test_empty_history_restarts_at_front() {
        let mut history = History::<64>::new();
        history.record(b"first");
        history.evict_oldest();
        assert!(history.is_empty());

        history.record(b"again");
        assert_eq!(history.newest().unwrap().offset(), 0);
    }
}
