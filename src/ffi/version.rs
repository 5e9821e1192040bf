//! Library version as seen from C

use std::ffi::c_char;

/// Version triple (C-compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookringVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

const VERSION_CSTR: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Full version triple of the linked library
#[no_mangle]
pub extern "C" fn hookring_version() -> HookringVersion {
    HookringVersion {
        major: crate::VERSION_MAJOR,
        minor: crate::VERSION_MINOR,
        patch: crate::VERSION_PATCH,
    }
}

#[no_mangle]
pub extern "C" fn hookring_version_major() -> u32 {
    hookring_version().major
}

#[no_mangle]
pub extern "C" fn hookring_version_minor() -> u32 {
    hookring_version().minor
}

#[no_mangle]
pub extern "C" fn hookring_version_patch() -> u32 {
    hookring_version().patch
}

/// NUL-terminated version string with static lifetime; never free it
#[no_mangle]
pub extern "C" fn hookring_version_string() -> *const c_char {
    VERSION_CSTR.as_ptr() as *const c_char
}
