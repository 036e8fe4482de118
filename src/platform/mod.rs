//! Platform-specific implementations.
//!
//! Only macOS is supported. The submodule provides the OS shims behind the
//! library's seams:
//! - FFI bindings (CoreGraphics event taps, Accessibility, Dock)
//! - Input handling (event tap, key synthesis, workspace observers)
//! - The accessory-app run loop

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::*;
