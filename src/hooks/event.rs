//! Event records handed to hooks

use std::any::Any;

use super::EventKind;

/// Snapshot of a ring's geometry and cursors when an event was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextInfo {
    /// Element slots in the backing storage, including the reserved one
    pub capacity: usize,
    /// Bytes per element
    pub element_size: usize,
    /// Next slot the consumer will take
    pub read_index: usize,
    /// Next slot the producer will fill
    pub write_index: usize,
}

/// Kind-specific event data
///
/// For copies, `source` and `destination` always have the same length: the
/// byte count of the segment. One side of the copy lies inside the ring's
/// storage and the other inside the caller's buffer.
#[derive(Debug)]
pub enum EventPayload<'e> {
    /// Copy `source` (inside the storage) into `destination` (caller buffer)
    Read {
        source: &'e [u8],
        destination: &'e mut [u8],
    },
    /// Copy `source` (caller buffer) into `destination` (inside the storage)
    Write {
        source: &'e [u8],
        destination: &'e mut [u8],
    },
    Lock,
    Unlock,
}

/// An event raised by a ring operation
#[derive(Debug)]
pub struct RingEvent<'e> {
    context: ContextInfo,
    user_data: Option<&'e (dyn Any + Send + Sync)>,
    payload: EventPayload<'e>,
}

impl<'e> RingEvent<'e> {
    pub(crate) fn new(
        context: ContextInfo,
        user_data: Option<&'e (dyn Any + Send + Sync)>,
        payload: EventPayload<'e>,
    ) -> Self {
        Self {
            context,
            user_data,
            payload,
        }
    }

    /// Which kind of event this is
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Read { .. } => EventKind::Read,
            EventPayload::Write { .. } => EventKind::Write,
            EventPayload::Lock => EventKind::Lock,
            EventPayload::Unlock => EventKind::Unlock,
        }
    }

    /// The ring's state when the event was raised
    pub fn context(&self) -> &ContextInfo {
        &self.context
    }

    /// The opaque value registered alongside the handler
    pub fn user_data(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.user_data
    }

    /// The registered user data, if it is a `T`
    pub fn user_data_as<T: Any>(&self) -> Option<&T> {
        self.user_data.and_then(|data| data.downcast_ref::<T>())
    }

    pub fn payload(&self) -> &EventPayload<'e> {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut EventPayload<'e> {
        &mut self.payload
    }

    /// Byte count of a copy event, zero for lock and unlock
    pub fn bytes(&self) -> usize {
        match &self.payload {
            EventPayload::Read { source, .. } | EventPayload::Write { source, .. } => source.len(),
            EventPayload::Lock | EventPayload::Unlock => 0,
        }
    }

    /// Perform the plain byte copy this event describes
    ///
    /// Handlers that only want to observe or account for copies can call this
    /// to fall through to the built-in behavior.
    pub fn copy_through(&mut self) {
        match &mut self.payload {
            EventPayload::Read {
                source,
                destination,
            }
            | EventPayload::Write {
                source,
                destination,
            } => destination.copy_from_slice(source),
            EventPayload::Lock | EventPayload::Unlock => {}
        }
    }
}
