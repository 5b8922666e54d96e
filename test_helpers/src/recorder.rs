//! A shareable log of observations made inside merge callbacks.
//!
//! Custom merge functions must be `Send + Sync`, so the recorder wraps its
//! entries in a [`parking_lot::Mutex`] behind an [`Arc`]. Clone it into the
//! callback and inspect it afterwards.

use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe, cloneable list of recorded entries.
#[derive(Debug)]
pub struct Recorder<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Recorder<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&self, entry: T) {
        self.entries.lock().push(entry);
    }

    /// Number of entries recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T: Clone> Recorder<T> {
    /// Copies out every entry recorded so far, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.lock().clone()
    }
}
