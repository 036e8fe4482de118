//! Action performer: turns a resolved mapping into OS input.
//!
//! Presets go through their fixed table (Dock notification or keyboard
//! shortcut); user shortcuts are synthesized as a key-down/key-up pair.
//! Everything is best effort: failures are logged and dropped.

use tracing::{debug, warn};

use crate::error::SynthError;
use crate::model::{KeyboardShortcut, MappingAction, PresetDispatch};

/// Carries out a mapped action. Called from the tap callback.
pub trait ActionPerformer: Send + Sync {
    fn perform(&self, action: &MappingAction);
}

/// OS binding for synthetic input.
pub trait InputSynthesizer: Send + Sync {
    /// Fire a Dock gesture notification. The OS gives no result.
    fn send_dock_notification(&self, identifier: &str);

    /// Post key-down then key-up for `shortcut` into the session stream.
    fn post_key_chord(&self, shortcut: &KeyboardShortcut) -> Result<(), SynthError>;
}

/// The production performer, parameterized over the synthesizer.
pub struct SystemActionPerformer<S> {
    synth: S,
}

impl<S: InputSynthesizer> SystemActionPerformer<S> {
    pub fn new(synth: S) -> Self {
        Self { synth }
    }

    pub fn synthesizer(&self) -> &S {
        &self.synth
    }

    fn post(&self, shortcut: &KeyboardShortcut) {
        if let Err(e) = self.synth.post_key_chord(shortcut) {
            warn!(shortcut = %shortcut, "dropping action: {e}");
        }
    }
}

impl<S: InputSynthesizer> ActionPerformer for SystemActionPerformer<S> {
    fn perform(&self, action: &MappingAction) {
        match action {
            MappingAction::None => {}
            MappingAction::Shortcut(shortcut) => {
                debug!(shortcut = %shortcut, "synthesizing shortcut");
                self.post(shortcut);
            }
            MappingAction::Preset(preset) => match preset.dispatch() {
                PresetDispatch::Dock(identifier) => {
                    debug!(preset = preset.id(), identifier, "sending dock notification");
                    self.synth.send_dock_notification(identifier);
                }
                PresetDispatch::Shortcut(shortcut) => {
                    debug!(preset = preset.id(), shortcut = %shortcut, "synthesizing preset");
                    self.post(&shortcut);
                }
            },
        }
    }
}
