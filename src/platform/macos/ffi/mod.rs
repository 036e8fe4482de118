//! FFI bindings for macOS frameworks.
//!
//! This module encapsulates all `extern "C"` declarations needed for the
//! event tap, the Accessibility trust flag and Dock notifications.

pub mod accessibility;
pub mod bridge;
pub mod coregraphics;
pub mod dock;

// Re-exports for convenient access
pub use accessibility::*;
pub use coregraphics::*;
pub use dock::*;
