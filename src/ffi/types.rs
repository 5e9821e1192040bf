//! FFI type definitions and handle types

use std::ffi::c_void;

use crate::error::{ErrorCode, RingError};

/// Opaque ring handle for the C API
pub type HookringHandle = *mut c_void;

/// Error codes for C API
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookringErrorCode {
    Ok = 0,
    InvalidArgs = 1,
    Full = 2,
    Empty = 3,
    Event = 4,
}

impl From<ErrorCode> for HookringErrorCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Ok => HookringErrorCode::Ok,
            ErrorCode::InvalidArgs => HookringErrorCode::InvalidArgs,
            ErrorCode::Full => HookringErrorCode::Full,
            ErrorCode::Empty => HookringErrorCode::Empty,
            ErrorCode::Event => HookringErrorCode::Event,
        }
    }
}

impl From<RingError> for HookringErrorCode {
    fn from(error: RingError) -> Self {
        error.code().into()
    }
}

impl From<crate::Result<()>> for HookringErrorCode {
    fn from(result: crate::Result<()>) -> Self {
        match result {
            Ok(()) => HookringErrorCode::Ok,
            Err(err) => err.into(),
        }
    }
}

/// Event mask bits, identical to [`crate::Subscription::bits`]
pub const HOOKRING_EVT_NONE: u32 = 0;
pub const HOOKRING_EVT_READ: u32 = 1 << 0;
pub const HOOKRING_EVT_WRITE: u32 = 1 << 1;
pub const HOOKRING_EVT_LOCK: u32 = 1 << 2;
pub const HOOKRING_EVT_UNLOCK: u32 = 1 << 3;

/// Event record passed to C handlers (C-compatible)
///
/// For read events `src` points into the ring storage and `dst` into the
/// caller's buffer; for write events the other way round. Both are null and
/// `bytes` is zero for lock and unlock.
#[repr(C)]
#[derive(Debug)]
pub struct HookringEvent {
    pub id: u32,
    pub user_data: *mut c_void,
    pub src: *const u8,
    pub dst: *mut u8,
    pub bytes: usize,
    pub capacity: usize,
    pub element_size: usize,
    pub read_index: usize,
    pub write_index: usize,
}

/// C event handler; returns 0 (`HookringErrorCode::Ok`) on success
pub type HookringEventHandler = Option<unsafe extern "C" fn(event: *mut HookringEvent) -> u32>;
