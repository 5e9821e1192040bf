//! FFI functions for ring lifecycle and transfers

use std::{ffi::c_void, ptr::null_mut, slice};

use crate::{config::RingConfig, ring::RingBuffer};

use super::{
    types::{HookringErrorCode, HookringEventHandler, HookringHandle},
    utils::hook_config,
};

/// Borrow the ring behind a handle
///
/// # Safety
///
/// `handle` must be null or a live handle returned by [`hookring_init`].
unsafe fn ring_ref<'h>(handle: HookringHandle) -> Option<&'h RingBuffer<'static>> {
    (handle as *const RingBuffer<'static>).as_ref()
}

unsafe fn ring_mut<'h>(handle: HookringHandle) -> Option<&'h mut RingBuffer<'static>> {
    (handle as *mut RingBuffer<'static>).as_mut()
}

/// Create a ring over caller-owned storage
///
/// `storage` must stay valid for `capacity * element_size` bytes until
/// [`hookring_deinit`] is called. Only the context is allocated here.
#[no_mangle]
pub extern "C" fn hookring_init(
    out_handle: *mut HookringHandle,
    storage: *mut u8,
    capacity: usize,
    element_size: usize,
    handler: HookringEventHandler,
    subscription: u32,
    user_data: *mut c_void,
) -> HookringErrorCode {
    if out_handle.is_null() || storage.is_null() {
        return HookringErrorCode::InvalidArgs;
    }

    let hooks = match hook_config(handler, subscription, user_data) {
        Ok(hooks) => hooks,
        Err(code) => return code,
    };

    let ring = unsafe {
        RingBuffer::from_raw_parts(storage, RingConfig::new(capacity, element_size), hooks)
    };

    match ring {
        Ok(ring) => {
            unsafe { *out_handle = Box::into_raw(Box::new(ring)) as HookringHandle };
            HookringErrorCode::Ok
        }
        Err(err) => {
            unsafe { *out_handle = null_mut() };
            err.into()
        }
    }
}

/// Copy `count` elements from `src` into the ring
#[no_mangle]
pub extern "C" fn hookring_write(
    handle: HookringHandle,
    src: *const u8,
    count: usize,
) -> HookringErrorCode {
    let Some(ring) = (unsafe { ring_ref(handle) }) else {
        return HookringErrorCode::InvalidArgs;
    };
    if src.is_null() {
        return HookringErrorCode::InvalidArgs;
    }
    let Some(bytes) = count.checked_mul(ring.element_size()) else {
        return HookringErrorCode::InvalidArgs;
    };

    let source = unsafe { slice::from_raw_parts(src, bytes) };
    ring.write(source, count).into()
}

/// Copy `count` elements out of the ring into `dst`
#[no_mangle]
pub extern "C" fn hookring_read(
    handle: HookringHandle,
    dst: *mut u8,
    count: usize,
) -> HookringErrorCode {
    let Some(ring) = (unsafe { ring_ref(handle) }) else {
        return HookringErrorCode::InvalidArgs;
    };
    if dst.is_null() {
        return HookringErrorCode::InvalidArgs;
    }
    let Some(bytes) = count.checked_mul(ring.element_size()) else {
        return HookringErrorCode::InvalidArgs;
    };

    let destination = unsafe { slice::from_raw_parts_mut(dst, bytes) };
    ring.read(destination, count).into()
}

/// Run `query` against the ring and store its result through `out`
///
/// Both pointers are checked before the ring is touched, so a rejected call
/// raises no lock or unlock event.
fn report<T>(
    handle: HookringHandle,
    out: *mut T,
    query: impl FnOnce(&RingBuffer<'static>) -> crate::Result<T>,
) -> HookringErrorCode {
    if out.is_null() {
        return HookringErrorCode::InvalidArgs;
    }
    let Some(ring) = (unsafe { ring_ref(handle) }) else {
        return HookringErrorCode::InvalidArgs;
    };

    match query(ring) {
        Ok(value) => {
            unsafe { *out = value };
            HookringErrorCode::Ok
        }
        Err(err) => err.into(),
    }
}

/// Number of elements that can currently be written
#[no_mangle]
pub extern "C" fn hookring_get_unfilled(handle: HookringHandle, out: *mut usize) -> HookringErrorCode {
    report(handle, out, RingBuffer::unfilled)
}

/// Number of elements that can currently be read
#[no_mangle]
pub extern "C" fn hookring_get_filled(handle: HookringHandle, out: *mut usize) -> HookringErrorCode {
    report(handle, out, RingBuffer::filled)
}

#[no_mangle]
pub extern "C" fn hookring_is_empty(handle: HookringHandle, out: *mut bool) -> HookringErrorCode {
    report(handle, out, RingBuffer::is_empty)
}

#[no_mangle]
pub extern "C" fn hookring_is_full(handle: HookringHandle, out: *mut bool) -> HookringErrorCode {
    report(handle, out, RingBuffer::is_full)
}

/// Replace the handler and subscription of a live ring
#[no_mangle]
pub extern "C" fn hookring_set_hooks(
    handle: HookringHandle,
    handler: HookringEventHandler,
    subscription: u32,
    user_data: *mut c_void,
) -> HookringErrorCode {
    let Some(ring) = (unsafe { ring_mut(handle) }) else {
        return HookringErrorCode::InvalidArgs;
    };

    match hook_config(handler, subscription, user_data) {
        Ok(hooks) => ring.set_hooks(hooks).into(),
        Err(code) => code,
    }
}

/// Reset the ring and release its handle
///
/// The storage is not touched. The handle is invalid afterwards.
#[no_mangle]
pub extern "C" fn hookring_deinit(handle: HookringHandle) -> HookringErrorCode {
    if handle.is_null() {
        return HookringErrorCode::InvalidArgs;
    }

    let mut ring = unsafe { Box::from_raw(handle as *mut RingBuffer<'static>) };
    ring.deinit().into()
}
