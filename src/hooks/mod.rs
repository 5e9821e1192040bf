//! Hook events and their dispatch
//!
//! Every byte that enters or leaves the backing storage, and every lock and
//! unlock around a ring operation, is raised as a [`RingEvent`]. A ring routes
//! each event kind either to the user's [`EventHandler`] (when the kind is in
//! its [`Subscription`]) or to [`RawCopy`], the built-in handler that copies
//! bytes and treats lock/unlock as no-ops.
//!
//! Hooks make it possible to back a ring with memory that cannot be touched
//! through a plain `memcpy` (memory-mapped peripherals, DMA descriptors) and
//! to plug in whatever mutual exclusion the platform offers.

pub mod dispatch;
pub mod event;

pub use dispatch::{EventHandler, RawCopy};
pub use event::{ContextInfo, EventPayload, RingEvent};

pub(crate) use dispatch::HookDispatcher;

use std::{fmt, ops::BitOr};

/// The four kinds of events a ring raises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Bytes are copied out of the storage
    Read,
    /// Bytes are copied into the storage
    Write,
    /// An operation is about to touch the cursors
    Lock,
    /// An operation is done with the cursors
    Unlock,
}

impl EventKind {
    /// All event kinds, in routing-table order
    pub const ALL: [EventKind; 4] = [
        EventKind::Read,
        EventKind::Write,
        EventKind::Lock,
        EventKind::Unlock,
    ];

    /// The subscription bit for this kind
    pub const fn bit(self) -> Subscription {
        match self {
            EventKind::Read => Subscription::READ,
            EventKind::Write => Subscription::WRITE,
            EventKind::Lock => Subscription::LOCK,
            EventKind::Unlock => Subscription::UNLOCK,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            EventKind::Read => 0,
            EventKind::Write => 1,
            EventKind::Lock => 2,
            EventKind::Unlock => 3,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Read => "read",
            EventKind::Write => "write",
            EventKind::Lock => "lock",
            EventKind::Unlock => "unlock",
        };
        f.write_str(name)
    }
}

/// Set of event kinds routed to the user handler
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Subscription(u8);

impl Subscription {
    /// No events; the ring uses its built-in behavior everywhere
    pub const NONE: Subscription = Subscription(0);
    /// Read copies
    pub const READ: Subscription = Subscription(1 << 0);
    /// Write copies
    pub const WRITE: Subscription = Subscription(1 << 1);
    /// Lock before an operation
    pub const LOCK: Subscription = Subscription(1 << 2);
    /// Unlock after an operation
    pub const UNLOCK: Subscription = Subscription(1 << 3);
    /// Both lock and unlock
    pub const LOCKING: Subscription = Subscription(Self::LOCK.0 | Self::UNLOCK.0);
    /// Both copy directions
    pub const COPIES: Subscription = Subscription(Self::READ.0 | Self::WRITE.0);
    /// Every event kind
    pub const ALL: Subscription = Subscription(Self::COPIES.0 | Self::LOCKING.0);

    /// Raw mask value, as used by the C API
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from a raw mask, `None` if any bit names no event kind
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Subscription(bits))
        } else {
            None
        }
    }

    /// Build from a raw mask, dropping unknown bits
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Subscription(bits & Self::ALL.0)
    }

    /// True when no kind is subscribed
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every kind in `other` is subscribed
    pub const fn contains(self, other: Subscription) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `kind` is subscribed
    pub const fn includes(self, kind: EventKind) -> bool {
        self.contains(kind.bit())
    }
}

impl BitOr for Subscription {
    type Output = Subscription;

    fn bitor(self, rhs: Subscription) -> Subscription {
        Subscription(self.0 | rhs.0)
    }
}

impl From<EventKind> for Subscription {
    fn from(kind: EventKind) -> Self {
        kind.bit()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for kind in EventKind::ALL {
            if self.includes(kind) {
                set.entry(&kind);
            }
        }
        set.finish()
    }
}
