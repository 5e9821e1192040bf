//! # hookring - Hookable fixed-capacity ring buffer
//!
//! hookring moves fixed-size elements between a producer and a consumer
//! through a circular buffer laid over memory the caller owns. It never
//! allocates on the data path, and every storage access and every lock can be
//! redirected through user hooks, so the same engine serves memory-mapped
//! peripherals, DMA buffers and ordinary multi-threaded host code.
//!
//! ## Features
//!
//! - **Caller-owned storage**: borrowed slices or raw regions, never freed here
//! - **Reserved slot layout**: full and empty are told apart without a flag
//! - **Two-segment transfers**: wraparound handled as at most two copies
//! - **Hooks**: read/write copies and lock/unlock routed to a user handler
//! - **Lock-free SPSC**: atomic cursors with acquire/release publication
//! - **C API**: status-code interface behind the `c-api` feature
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  RingBuffer                      │
//! ├──────────────────────────────────────────────────┤
//! │  Transfer engine         │  Index arithmetic     │
//! │  - validate              │  - filled / unfilled  │
//! │  - lock / unlock         │  - two-run spans      │
//! │  - up to two copies      │  - cursor advance     │
//! └──────────────────────────────────────────────────┘
//!           │
//!           ▼
//! ┌──────────────────────────────────────────────────┐
//! │  Hook dispatcher: user handler │ RawCopy default  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use hookring::{RingBuffer, RingConfig};
//!
//! let mut storage = [0u8; 16];
//! let ring = RingBuffer::new(&mut storage, RingConfig::new(8, 2)).unwrap();
//!
//! ring.write(&[1, 0, 2, 0], 2).unwrap();
//! assert_eq!(ring.filled().unwrap(), 2);
//!
//! let mut out = [0u8; 4];
//! ring.read(&mut out, 2).unwrap();
//! assert_eq!(out, [1, 0, 2, 0]);
//! assert!(ring.is_empty().unwrap());
//! ```

// Core modules
pub mod config;
pub mod cursor;
pub mod error;
pub mod hooks;
pub mod ring;

#[cfg(feature = "c-api")]
pub mod ffi;

// Main API re-exports
pub use config::{HookConfig, RingConfig};
pub use cursor::ConcurrencyMode;
pub use error::{ErrorCode, HookError, Result, RingError};
pub use hooks::{
    ContextInfo, EventHandler, EventKind, EventPayload, RawCopy, RingEvent, Subscription,
};
pub use ring::{Consumer, Producer, RingBuffer, Span};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 2;
pub const VERSION_PATCH: u32 = 0;
