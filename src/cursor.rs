//! Cursor storage and the sharing contract between producer and consumer

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// How producers and consumers are allowed to share a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConcurrencyMode {
    /// One producer and one consumer, synchronized only through the cursors.
    /// The producer publishes `write_index` after its payload copy and the
    /// consumer publishes `read_index` after its own; no lock hook is needed.
    #[default]
    LockFree,
    /// Any number of producers and consumers, serialized by the user's
    /// lock and unlock hooks. Rings in this mode must subscribe to both.
    /// Cursor publication is the same as in `LockFree`.
    ExternallyLocked,
}

/// One side's position in the ring
///
/// Only the owning side stores to a cursor. The other side reads it with
/// acquire ordering so that the payload copied before the matching release
/// store is visible.
#[derive(Debug, Default)]
pub(crate) struct Cursor(AtomicUsize);

impl Cursor {
    pub(crate) const fn new(index: usize) -> Self {
        Self(AtomicUsize::new(index))
    }

    /// Load a cursor this side owns
    #[inline]
    pub(crate) fn load_own(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Load the other side's cursor
    #[inline]
    pub(crate) fn load_peer(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Make an advanced cursor visible to the other side
    #[inline]
    pub(crate) fn publish(&self, index: usize) {
        self.0.store(index, Ordering::Release);
    }

    /// Exclusive reset, used on (de)initialization
    pub(crate) fn reset(&mut self) {
        *self.0.get_mut() = 0;
    }
}

/// Marks one side (producing or consuming) as busy
///
/// Two producers (or two consumers) entering a ring at once without a lock
/// hook is a contract violation. The claim turns it into an error instead of
/// overlapping copies into the same slots.
#[derive(Debug, Default)]
pub(crate) struct SideClaim(AtomicBool);

impl SideClaim {
    pub(crate) fn try_claim(&self) -> Option<ClaimGuard<'_>> {
        if self.0.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(ClaimGuard(&self.0))
        }
    }
}

pub(crate) struct ClaimGuard<'a>(&'a AtomicBool);

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_publish_and_reset() {
        let mut cursor = Cursor::new(3);
        assert_eq!(cursor.load_own(), 3);

        cursor.publish(7);
        assert_eq!(cursor.load_peer(), 7);

        cursor.reset();
        assert_eq!(cursor.load_own(), 0);
    }

    #[test]
    fn test_side_claim_is_exclusive() {
        let claim = SideClaim::default();

        let guard = claim.try_claim();
        assert!(guard.is_some());
        assert!(claim.try_claim().is_none());

        drop(guard);
        assert!(claim.try_claim().is_some());
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(ConcurrencyMode::default(), ConcurrencyMode::LockFree);
    }
}
