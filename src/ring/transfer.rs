//! Read and write orchestration
//!
//! Every transfer follows the same steps: validate arguments, raise the lock
//! event, compute the available span, copy at most two contiguous segments
//! through the hook dispatcher, publish the advanced cursor, raise the unlock
//! event.

use std::slice;

use log::{trace, warn};

use super::{
    context::{Geometry, RingBuffer},
    index::{self, Span},
};
use crate::{
    error::{Result, RingError},
    hooks::EventKind,
};

impl RingBuffer<'_> {
    /// Copy `count` elements from `source` into the ring
    ///
    /// Fails with `Full`, leaving the ring untouched, when fewer than `count`
    /// slots are unfilled. If a subscribed write hook fails on the second
    /// segment of a wrapping write, the first segment has already been
    /// copied into the storage; the write cursor is not advanced.
    pub fn write(&self, source: &[u8], count: usize) -> Result<()> {
        let geometry = self.geometry()?;
        let bytes = transfer_bytes(&geometry, count, source.len(), "source")?;

        self.hooks.lock(self.info());
        let result = self.write_locked(&geometry, &source[..bytes], count);
        self.hooks.unlock(self.info());
        result
    }

    /// Copy `count` elements out of the ring into `destination`
    ///
    /// Fails with `Empty`, leaving the ring untouched, when fewer than `count`
    /// elements are filled. A hook failure on the second segment leaves the
    /// first segment copied into `destination` and the read cursor where it
    /// was.
    pub fn read(&self, destination: &mut [u8], count: usize) -> Result<()> {
        let geometry = self.geometry()?;
        let bytes = transfer_bytes(&geometry, count, destination.len(), "destination")?;

        self.hooks.lock(self.info());
        let result = self.read_locked(&geometry, &mut destination[..bytes], count);
        self.hooks.unlock(self.info());
        result
    }

    /// Number of elements that can currently be written
    pub fn unfilled(&self) -> Result<usize> {
        self.locked_span(index::unfilled).map(|span| span.total())
    }

    /// Number of elements that can currently be read
    pub fn filled(&self) -> Result<usize> {
        self.locked_span(index::filled).map(|span| span.total())
    }

    /// Whether no element is buffered
    pub fn is_empty(&self) -> Result<bool> {
        self.filled().map(|count| count == 0)
    }

    /// Whether every usable slot is filled
    pub fn is_full(&self) -> Result<bool> {
        self.unfilled().map(|count| count == 0)
    }

    fn locked_span(&self, compute: fn(usize, usize, usize) -> Span) -> Result<Span> {
        let geometry = self.geometry()?;

        self.hooks.lock(self.info());
        let span = compute(
            self.read_index.load_peer(),
            self.write_index.load_peer(),
            geometry.capacity,
        );
        self.hooks.unlock(self.info());

        Ok(span)
    }

    fn write_locked(&self, geometry: &Geometry, source: &[u8], count: usize) -> Result<()> {
        let _claim = self.producer.try_claim().ok_or_else(|| {
            RingError::invalid_args("context", "Concurrent producers require lock hooks")
        })?;

        let write_index = self.write_index.load_own();
        let read_index = self.read_index.load_peer();
        let space = index::unfilled(read_index, write_index, geometry.capacity);

        if count > space.total() {
            trace!("write rejected: requested={} unfilled={}", count, space.total());
            return Err(RingError::full(count, space.total()));
        }

        let segments = space.take(count);
        let (head, tail) = source.split_at(segments.first * geometry.element_size);

        self.copy_in(geometry, write_index, head, 1)?;
        if segments.second > 0 {
            self.copy_in(geometry, 0, tail, 2)?;
        }

        self.write_index
            .publish(index::advance(write_index, count, geometry.capacity));
        Ok(())
    }

    fn read_locked(&self, geometry: &Geometry, destination: &mut [u8], count: usize) -> Result<()> {
        let _claim = self.consumer.try_claim().ok_or_else(|| {
            RingError::invalid_args("context", "Concurrent consumers require lock hooks")
        })?;

        let read_index = self.read_index.load_own();
        let write_index = self.write_index.load_peer();
        let data = index::filled(read_index, write_index, geometry.capacity);

        if count > data.total() {
            trace!("read rejected: requested={} filled={}", count, data.total());
            return Err(RingError::empty(count, data.total()));
        }

        let segments = data.take(count);
        let (head, tail) = destination.split_at_mut(segments.first * geometry.element_size);

        self.copy_out(geometry, read_index, head, 1)?;
        if segments.second > 0 {
            self.copy_out(geometry, 0, tail, 2)?;
        }

        self.read_index
            .publish(index::advance(read_index, count, geometry.capacity));
        Ok(())
    }

    fn copy_in(&self, geometry: &Geometry, slot: usize, source: &[u8], segment: u8) -> Result<()> {
        trace!("write segment {}: slot={} bytes={}", segment, slot, source.len());

        // SAFETY: `slot..slot + len / element_size` lies inside the unfilled
        // span, which the consumer never touches and which the producer claim
        // (or the user's lock) gives to this call alone.
        let destination = unsafe { geometry.slots_mut(slot, source.len()) };

        self.hooks
            .write(self.info(), source, destination)
            .map_err(|err| {
                warn!("write hook failed on segment {}: {}", segment, err);
                RingError::event(EventKind::Write, err)
            })
    }

    fn copy_out(
        &self,
        geometry: &Geometry,
        slot: usize,
        destination: &mut [u8],
        segment: u8,
    ) -> Result<()> {
        trace!("read segment {}: slot={} bytes={}", segment, slot, destination.len());

        // SAFETY: `slot..slot + len / element_size` lies inside the filled
        // span, which the producer never touches until the read cursor moves
        // past it.
        let source = unsafe { geometry.slots(slot, destination.len()) };

        self.hooks
            .read(self.info(), source, destination)
            .map_err(|err| {
                warn!("read hook failed on segment {}: {}", segment, err);
                RingError::event(EventKind::Read, err)
            })
    }
}

impl Geometry {
    /// # Safety
    ///
    /// `slot * element_size + len` must not exceed the storage size and the
    /// range must not be written concurrently.
    unsafe fn slots<'s>(&self, slot: usize, len: usize) -> &'s [u8] {
        debug_assert!(slot * self.element_size + len <= self.capacity * self.element_size);
        slice::from_raw_parts(self.base.as_ptr().add(slot * self.element_size), len)
    }

    /// # Safety
    ///
    /// As for [`Geometry::slots`], and the range must not be accessed by
    /// anything else while the returned slice lives.
    #[allow(clippy::mut_from_ref)]
    unsafe fn slots_mut<'s>(&self, slot: usize, len: usize) -> &'s mut [u8] {
        debug_assert!(slot * self.element_size + len <= self.capacity * self.element_size);
        slice::from_raw_parts_mut(self.base.as_ptr().add(slot * self.element_size), len)
    }
}

/// Validate a transfer request and return its size in bytes
fn transfer_bytes(geometry: &Geometry, count: usize, available: usize, buffer: &str) -> Result<usize> {
    if count == 0 {
        return Err(RingError::invalid_args("count", "Count must be greater than zero"));
    }

    let bytes = count
        .checked_mul(geometry.element_size)
        .ok_or_else(|| RingError::invalid_args("count", "count * element_size overflows usize"))?;

    if available < bytes {
        return Err(RingError::invalid_args(
            buffer,
            format!("Buffer holds {} bytes, transfer needs {}", available, bytes),
        ));
    }

    Ok(bytes)
}
