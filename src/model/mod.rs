//! Application domain model.
//!
//! This module contains pure data (no FFI dependencies): buttons and
//! device models, keyboard shortcuts, preset actions, profiles and the
//! persisted configuration document.
//!
//! Persistence lives in `store`; dispatch lives in `interceptor`.

pub mod buttons;
pub mod constants;
pub mod keycodes;
pub mod preset;
pub mod profile;
pub mod shortcut;

pub use buttons::{MouseButton, MouseModel, ParseButtonError, ParseModelError};
pub use preset::{ParsePresetError, PresetAction, PresetDispatch};
pub use profile::{AppConfiguration, AppProfile, ButtonMapping, MappingAction};
pub use shortcut::{KeyboardShortcut, ModifierFlags, ParseShortcutError};
