//! Thin helpers over objc2 for message-send style Cocoa code.
//!
//! The shims talk to AppKit through untyped `msg_send!` calls on `id`
//! pointers; this module gathers the aliases and conversions they share.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

// ============================================================================
// Core objc2 re-exports
// ============================================================================

pub use objc2::runtime::{AnyClass, AnyObject, Bool};
pub use objc2::{msg_send, ClassType};

// ============================================================================
// Type aliases
// ============================================================================

/// Objective-C object pointer.
///
/// Prefer typed pointers like `&NSString` or `Retained<NSString>` when the
/// type is known. Use `id` only for truly dynamic/unknown types.
pub type id = *mut AnyObject;

/// Null object pointer.
pub const nil: id = std::ptr::null_mut();

/// Objective-C BOOL YES (u8), not Rust bool.
pub const YES: Bool = Bool::YES;

// ============================================================================
// Foundation / AppKit classes
// ============================================================================

pub use objc2_app_kit::NSApplication;
pub use objc2_foundation::NSString;

// ============================================================================
// Block support
// ============================================================================

pub use block2::RcBlock;

// ============================================================================
// Memory management
// ============================================================================

pub use objc2::rc::Retained;

// ============================================================================
// Helper functions
// ============================================================================

/// Get the shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

/// Create an NSString from a Rust string slice.
#[inline]
pub fn nsstring(s: &str) -> Retained<NSString> {
    NSString::from_str(s)
}

/// Copy an NSString (or nil) into an owned Rust string.
///
/// # Safety
/// `obj` must be nil or a valid NSString.
pub unsafe fn string_from_nsstring(obj: id) -> Option<String> {
    if obj.is_null() {
        return None;
    }
    let s = &*(obj as *const NSString);
    Some(s.to_string())
}

// ============================================================================
// Runtime helpers
// ============================================================================

/// Get a system class by name. Panics if the class is missing, which would
/// mean the framework itself failed to load.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = std::ffi::CString::new(name).expect("Invalid class name");
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("Class '{}' not found", name))
}

// ============================================================================
// NSAutoreleasePool replacement
// ============================================================================

/// Run a closure within an autorelease pool.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    objc2::rc::autoreleasepool(|_| f())
}
