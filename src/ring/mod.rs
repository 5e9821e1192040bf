//! Fixed-capacity ring buffer engine

pub mod context;
pub mod handles;
pub mod index;
pub mod transfer;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use context::RingBuffer;
pub use handles::{Consumer, Producer};
pub use index::Span;
