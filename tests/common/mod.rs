//! Fakes for the OS seams, shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use mousemap::actions::{InputSynthesizer, SystemActionPerformer};
use mousemap::agent::Agent;
use mousemap::error::{StoreError, SynthError, TapError};
use mousemap::events::{ButtonDirection, EventBus};
use mousemap::foreground::{ForegroundApp, ForegroundTracker};
use mousemap::interceptor::{Dispatcher, EventTap, RawEvent, TapHandler, TapVerdict};
use mousemap::model::{AppConfiguration, KeyboardShortcut};
use mousemap::permission::TrustChecker;
use mousemap::store::{ConfigStorage, ProfileStore};

// === Storage ===

/// In-memory document shared with the test through a handle.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    pub document: Arc<Mutex<Option<String>>>,
    pub writes: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    pub fn with_document(text: &str) -> Self {
        let storage = Self::default();
        *storage.document.lock() = Some(text.to_string());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.document.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl ConfigStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document.lock().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        *self.document.lock() = Some(contents.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// === Event tap ===

#[derive(Default)]
pub struct TapLog {
    pub installs: usize,
    pub removes: usize,
    pub handler: Option<Arc<dyn TapHandler>>,
    pub fail_installs: bool,
}

/// Records registrations and lets the test deliver events to the handler
/// the way the OS callback would.
#[derive(Clone, Default)]
pub struct FakeTap {
    pub log: Arc<Mutex<TapLog>>,
}

impl FakeTap {
    pub fn failing() -> Self {
        let tap = Self::default();
        tap.log.lock().fail_installs = true;
        tap
    }

    /// Registrations currently live.
    pub fn registered(&self) -> usize {
        let log = self.log.lock();
        log.installs - log.removes
    }

    pub fn installs(&self) -> usize {
        self.log.lock().installs
    }

    /// `None` when no listener is installed (the OS would deliver nothing).
    pub fn deliver(&self, event: RawEvent) -> Option<TapVerdict> {
        let handler = self.log.lock().handler.clone()?;
        Some(handler.handle(&event))
    }

    pub fn press(&self, code: i64) -> Option<TapVerdict> {
        self.deliver(RawEvent::button(ButtonDirection::Down, code))
    }

    pub fn release(&self, code: i64) -> Option<TapVerdict> {
        self.deliver(RawEvent::button(ButtonDirection::Up, code))
    }
}

impl EventTap for FakeTap {
    fn install(&mut self, handler: Arc<dyn TapHandler>) -> Result<(), TapError> {
        let mut log = self.log.lock();
        if log.fail_installs {
            return Err(TapError::CreateFailed);
        }
        log.installs += 1;
        log.handler = Some(handler);
        Ok(())
    }

    fn remove(&mut self) {
        let mut log = self.log.lock();
        log.removes += 1;
        log.handler = None;
    }
}

// === Synthesis ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesized {
    Dock(String),
    Chord(KeyboardShortcut),
}

#[derive(Clone, Default)]
pub struct RecordingSynth {
    pub log: Arc<Mutex<Vec<Synthesized>>>,
}

impl RecordingSynth {
    pub fn performed(&self) -> Vec<Synthesized> {
        self.log.lock().clone()
    }
}

impl InputSynthesizer for RecordingSynth {
    fn send_dock_notification(&self, identifier: &str) {
        self.log.lock().push(Synthesized::Dock(identifier.to_string()));
    }

    fn post_key_chord(&self, shortcut: &KeyboardShortcut) -> Result<(), SynthError> {
        self.log.lock().push(Synthesized::Chord(*shortcut));
        Ok(())
    }
}

// === Trust ===

/// Answers `is_trusted` from a script; the last answer repeats.
pub struct ScriptedTrust {
    answers: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
    prompt: bool,
    pub queries: Mutex<usize>,
}

impl ScriptedTrust {
    pub fn new(answers: &[bool], prompt: bool) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            last: Mutex::new(false),
            prompt,
            queries: Mutex::new(0),
        }
    }
}

impl TrustChecker for ScriptedTrust {
    fn is_trusted(&self) -> bool {
        *self.queries.lock() += 1;
        let mut last = self.last.lock();
        if let Some(next) = self.answers.lock().pop_front() {
            *last = next;
        }
        *last
    }

    fn request_trust(&self) -> bool {
        self.prompt
    }
}

// === Assembly ===

pub fn store_with(config: AppConfiguration) -> Arc<ProfileStore> {
    Arc::new(ProfileStore::with_configuration(Box::new(MemoryStorage::default()), config))
}

pub fn tracker_for(bundle_id: Option<&str>) -> Arc<ForegroundTracker> {
    Arc::new(ForegroundTracker::new(bundle_id.map(|bid| ForegroundApp::new(bid, bid))))
}

/// A dispatcher over the given store and foreground app, plus its
/// synthesizer log and event bus.
pub fn dispatcher(
    store: Arc<ProfileStore>,
    foreground: Arc<ForegroundTracker>,
) -> (Dispatcher, RecordingSynth, EventBus) {
    let synth = RecordingSynth::default();
    let bus = EventBus::new();
    let dispatcher = Dispatcher::new(
        store,
        foreground,
        Box::new(SystemActionPerformer::new(synth.clone())),
        bus.publisher(),
    );
    (dispatcher, synth, bus)
}

/// An agent wired to fakes.
pub fn agent(config: AppConfiguration) -> (Agent<FakeTap>, FakeTap, RecordingSynth) {
    let tap = FakeTap::default();
    let synth = RecordingSynth::default();
    let agent = Agent::new(
        store_with(config),
        tracker_for(None),
        tap.clone(),
        Box::new(SystemActionPerformer::new(synth.clone())),
    );
    (agent, tap, synth)
}
