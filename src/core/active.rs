//! Observable "active section" store.
//!
//! One writer (the [`ScrollTracker`](super::tracker::ScrollTracker) owns the
//! [`ActiveSection`]) and any number of readers holding an [`ActiveReader`].
//! Backed by a `tokio::sync::watch` channel so readers can either peek at the
//! current value or await the next change.

use tokio::sync::watch;

use super::section::SectionId;

/// Reader handle.  Cheap to clone.
pub type ActiveReader = watch::Receiver<Option<SectionId>>;

/// Writer side of the store.
#[derive(Debug)]
pub struct ActiveSection {
    tx: watch::Sender<Option<SectionId>>,
}

impl Default for ActiveSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveSection {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Current value.
    pub fn get(&self) -> Option<SectionId> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> ActiveReader {
        self.tx.subscribe()
    }

    /// Store `value`.  Readers are only woken when it actually differs
    /// from the current one.  Returns `true` on change.
    pub fn publish(&self, value: Option<SectionId>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}
