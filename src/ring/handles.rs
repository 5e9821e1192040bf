//! Producer and consumer halves of a ring

use super::context::RingBuffer;
use crate::error::Result;

impl<'a> RingBuffer<'a> {
    /// Split into a producer and a consumer handle
    ///
    /// The handles borrow the ring mutably as a pair, so at most one producer
    /// and one consumer exist through this path. Both are `Send` and can be
    /// moved into scoped threads.
    pub fn split(&mut self) -> (Producer<'_, 'a>, Consumer<'_, 'a>) {
        let ring: &RingBuffer<'a> = self;
        (Producer { ring }, Consumer { ring })
    }
}

/// Write half of a ring
#[derive(Debug)]
pub struct Producer<'r, 'a> {
    ring: &'r RingBuffer<'a>,
}

impl Producer<'_, '_> {
    /// Write `count` elements from `source`
    pub fn write(&mut self, source: &[u8], count: usize) -> Result<()> {
        self.ring.write(source, count)
    }

    /// Free slots available to this producer
    pub fn unfilled(&self) -> Result<usize> {
        self.ring.unfilled()
    }

    pub fn is_full(&self) -> Result<bool> {
        self.ring.is_full()
    }

    pub fn element_size(&self) -> usize {
        self.ring.element_size()
    }
}

/// Read half of a ring
#[derive(Debug)]
pub struct Consumer<'r, 'a> {
    ring: &'r RingBuffer<'a>,
}

impl Consumer<'_, '_> {
    /// Read `count` elements into `destination`
    pub fn read(&mut self, destination: &mut [u8], count: usize) -> Result<()> {
        self.ring.read(destination, count)
    }

    /// Elements available to this consumer
    pub fn filled(&self) -> Result<usize> {
        self.ring.filled()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.ring.is_empty()
    }

    pub fn element_size(&self) -> usize {
        self.ring.element_size()
    }
}
