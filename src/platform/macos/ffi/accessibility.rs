//! FFI bindings for ApplicationServices (Accessibility).
//!
//! This module provides the TCC Accessibility API to check/prompt
//! for accessibility permissions on macOS.

use std::ffi::c_void;
use std::ptr::addr_of;

use super::coregraphics::{
    kCFBooleanTrue, kCFTypeDictionaryKeyCallBacks, kCFTypeDictionaryValueCallBacks,
    CFDictionaryCreate, CFRelease,
};

// === FFI Declarations ===

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    pub fn AXIsProcessTrusted() -> bool;

    pub fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;

    pub static kAXTrustedCheckOptionPrompt: *const c_void;
}

/// Current trust state without prompting.
pub fn is_process_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Check trust, showing the system Accessibility prompt if not yet granted.
///
/// Returns the trust state reported with the prompt. The prompt itself is
/// asynchronous, so `false` usually just means "the user has not answered".
///
/// # Safety
/// Must be called from main thread with valid autorelease pool.
pub unsafe fn prompt_for_accessibility() -> bool {
    // CFDictionary with kAXTrustedCheckOptionPrompt = true
    let keys = [kAXTrustedCheckOptionPrompt];
    let values = [kCFBooleanTrue];

    let dict = CFDictionaryCreate(
        std::ptr::null(), // default allocator
        keys.as_ptr(),
        values.as_ptr(),
        1,
        addr_of!(kCFTypeDictionaryKeyCallBacks),
        addr_of!(kCFTypeDictionaryValueCallBacks),
    );

    let trusted = AXIsProcessTrustedWithOptions(dict);

    if !dict.is_null() {
        CFRelease(dict);
    }
    trusted
}
