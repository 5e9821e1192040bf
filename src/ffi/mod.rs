//! C Foreign Function Interface (FFI)
//!
//! Status-code API over [`crate::RingBuffer`] for firmware and other C
//! callers. Every function returns a [`HookringErrorCode`]; query results are
//! written through out-pointers.

pub mod ring;
pub mod types;
pub mod utils;
pub mod version;


pub use types::{
    HookringErrorCode, HookringEvent, HookringEventHandler, HookringHandle, HOOKRING_EVT_LOCK,
    HOOKRING_EVT_NONE, HOOKRING_EVT_READ, HOOKRING_EVT_UNLOCK, HOOKRING_EVT_WRITE,
};

// Ring API
pub use ring::{
    hookring_deinit, hookring_get_filled, hookring_get_unfilled, hookring_init, hookring_is_empty,
    hookring_is_full, hookring_read, hookring_set_hooks, hookring_write,
};

// Version API
pub use version::{
    hookring_version, hookring_version_major, hookring_version_minor, hookring_version_patch,
    hookring_version_string, HookringVersion,
};
