//! Wraparound index arithmetic
//!
//! Given the two cursors and the slot count, these functions report how many
//! slots are filled (readable) or unfilled (writable). Because the region can
//! straddle the end of the backing array, the answer is a [`Span`]: a first
//! contiguous run starting at the relevant cursor, and a second run starting
//! at index 0.
//!
//! One slot is never written, so a full ring (`write + 1 == read`, modulo
//! capacity) is distinguishable from an empty one (`write == read`) with no
//! extra flag, and `filled + unfilled == capacity - 1` for every state.

/// A region of the ring split at the wraparound boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Elements from the cursor towards the end of the array
    pub first: usize,
    /// Elements from index 0 onwards
    pub second: usize,
}

impl Span {
    pub const EMPTY: Span = Span {
        first: 0,
        second: 0,
    };

    pub const fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    /// Total element count of both runs
    pub const fn total(&self) -> usize {
        self.first + self.second
    }

    /// The leading `count` elements of this span, split the same way
    ///
    /// `count` must not exceed [`Span::total`].
    pub const fn take(&self, count: usize) -> Span {
        let first = if count < self.first { count } else { self.first };
        Span {
            first,
            second: count - first,
        }
    }
}

/// Filled slots, starting at `read_index`
pub const fn filled(read_index: usize, write_index: usize, capacity: usize) -> Span {
    if write_index == read_index {
        // Empty
        Span::EMPTY
    } else if write_index < read_index {
        // Data runs from the read cursor to the array end, then wraps to the
        // write cursor. This includes the full case where write sits right
        // behind read.
        Span::new(capacity - read_index, write_index)
    } else {
        Span::new(write_index - read_index, 0)
    }
}

/// Unfilled slots, starting at `write_index`
pub const fn unfilled(read_index: usize, write_index: usize, capacity: usize) -> Span {
    let limit = read_limit(read_index, capacity);

    if write_index == limit {
        // Full: the only slot left is the reserved one
        Span::EMPTY
    } else if limit < write_index {
        // Free space runs to the array end, then wraps up to the limit
        Span::new(capacity - write_index, limit)
    } else {
        Span::new(limit - write_index, 0)
    }
}

/// The slot just behind the read cursor, which the writer must never fill
pub const fn read_limit(read_index: usize, capacity: usize) -> usize {
    if read_index == 0 {
        capacity - 1
    } else {
        read_index - 1
    }
}

/// Move a cursor forward by `count` slots, wrapping at `capacity`
///
/// `count` must not exceed `capacity`.
pub const fn advance(index: usize, count: usize, capacity: usize) -> usize {
    let next = index + count;
    if next >= capacity {
        next - capacity
    } else {
        next
    }
}

/// True when the ring holds no elements
pub const fn is_empty(read_index: usize, write_index: usize) -> bool {
    read_index == write_index
}

/// True when every usable slot holds an element
pub const fn is_full(read_index: usize, write_index: usize, capacity: usize) -> bool {
    advance(write_index, 1, capacity) == read_index
}
