//! FFI utilities: bridging C handlers and masks into hook configuration

use std::ffi::c_void;

use crate::{
    config::HookConfig,
    error::HookError,
    hooks::{EventHandler, EventPayload, RingEvent, Subscription},
};

use super::types::{HookringErrorCode, HookringEvent, HookringEventHandler};

/// Adapts a C function pointer to [`EventHandler`]
pub(crate) struct CHandler {
    func: unsafe extern "C" fn(*mut HookringEvent) -> u32,
    user_data: *mut c_void,
}

// The C side promises its handler and user data may be used from whichever
// thread calls into the ring.
unsafe impl Send for CHandler {}
unsafe impl Sync for CHandler {}

impl EventHandler for CHandler {
    fn handle(&self, event: &mut RingEvent<'_>) -> Result<(), HookError> {
        let id = event.kind().bit().bits() as u32;
        let context = *event.context();
        let (src, dst, bytes) = match event.payload_mut() {
            EventPayload::Read {
                source,
                destination,
            }
            | EventPayload::Write {
                source,
                destination,
            } => (source.as_ptr(), destination.as_mut_ptr(), source.len()),
            EventPayload::Lock | EventPayload::Unlock => {
                (std::ptr::null(), std::ptr::null_mut(), 0)
            }
        };

        let mut raw = HookringEvent {
            id,
            user_data: self.user_data,
            src,
            dst,
            bytes,
            capacity: context.capacity,
            element_size: context.element_size,
            read_index: context.read_index,
            write_index: context.write_index,
        };

        let status = unsafe { (self.func)(&mut raw) };
        if status == HookringErrorCode::Ok as u32 {
            Ok(())
        } else {
            Err(HookError::new(format!("C handler returned status {}", status)))
        }
    }
}

/// Build a hook configuration from C arguments
///
/// The handler/subscription pairing is checked later by the ring itself.
pub(crate) fn hook_config(
    handler: HookringEventHandler,
    subscription: u32,
    user_data: *mut c_void,
) -> Result<HookConfig, HookringErrorCode> {
    let subscription = u8::try_from(subscription)
        .ok()
        .and_then(Subscription::from_bits)
        .ok_or(HookringErrorCode::InvalidArgs)?;

    Ok(match handler {
        Some(func) => HookConfig::new(CHandler { func, user_data }, subscription),
        None => HookConfig {
            subscription,
            ..HookConfig::none()
        },
    })
}
