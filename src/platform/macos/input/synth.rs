//! Synthetic input via CoreGraphics and the Dock.

use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use crate::actions::InputSynthesizer;
use crate::error::SynthError;
use crate::model::{KeyboardShortcut, ModifierFlags};
use crate::platform::macos::ffi::send_dock_notification;

/// Posts key chords into the annotated session stream.
///
/// Synthesized events are plain keyboard events, so the auxiliary-button
/// tap never sees them again.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphicsSynthesizer;

fn event_flags(modifiers: ModifierFlags) -> CGEventFlags {
    let mut flags = CGEventFlags::empty();
    if modifiers.command {
        flags |= CGEventFlags::CGEventFlagCommand;
    }
    if modifiers.option {
        flags |= CGEventFlags::CGEventFlagAlternate;
    }
    if modifiers.control {
        flags |= CGEventFlags::CGEventFlagControl;
    }
    if modifiers.shift {
        flags |= CGEventFlags::CGEventFlagShift;
    }
    flags
}

impl InputSynthesizer for CoreGraphicsSynthesizer {
    fn send_dock_notification(&self, identifier: &str) {
        send_dock_notification(identifier);
    }

    fn post_key_chord(&self, shortcut: &KeyboardShortcut) -> Result<(), SynthError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| SynthError::SourceUnavailable)?;
        let flags = event_flags(shortcut.modifiers);
        let key = shortcut.key_code;

        let down = CGEvent::new_keyboard_event(source.clone(), key, true)
            .map_err(|_| SynthError::EventCreationFailed(key))?;
        let up = CGEvent::new_keyboard_event(source, key, false)
            .map_err(|_| SynthError::EventCreationFailed(key))?;

        down.set_flags(flags);
        up.set_flags(flags);
        down.post(CGEventTapLocation::AnnotatedSession);
        up.post(CGEventTapLocation::AnnotatedSession);
        Ok(())
    }
}
