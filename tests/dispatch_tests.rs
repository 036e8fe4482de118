//! Event handling: which raw events are forwarded, suppressed, or acted on.

mod common;

use common::{dispatcher, store_with, tracker_for, Synthesized};
use mousemap::events::{AppEvent, ButtonDirection};
use mousemap::interceptor::{RawEvent, RawEventKind, TapHandler, TapVerdict};
use mousemap::model::keycodes::KC_C;
use mousemap::model::{
    AppConfiguration, AppProfile, KeyboardShortcut, MappingAction, ModifierFlags, MouseButton,
    MouseModel, PresetAction,
};

fn press(code: i64) -> RawEvent {
    RawEvent::button(ButtonDirection::Down, code)
}

fn release(code: i64) -> RawEvent {
    RawEvent::button(ButtonDirection::Up, code)
}

fn cmd_c() -> KeyboardShortcut {
    KeyboardShortcut::new(KC_C, ModifierFlags::COMMAND)
}

/// Default profile plus a `com.example.Foo` profile mapping Back to cmd-C.
fn foo_config() -> AppConfiguration {
    let mut foo = AppProfile::for_app("Foo", "com.example.Foo");
    foo.set_action(MouseButton::Back, MappingAction::Shortcut(cmd_c()));
    let mut config = AppConfiguration::default();
    config.profiles.push(foo);
    config
}

// === Scenarios ===

#[test]
fn scenario_a_default_config_button5_opens_mission_control_once() {
    let config = AppConfiguration { mouse_model: MouseModel::Generic5, ..Default::default() };
    let (dispatcher, synth, _bus) = dispatcher(store_with(config), tracker_for(None));

    assert_eq!(dispatcher.handle(&press(5)), TapVerdict::Suppress);
    assert_eq!(synth.performed(), vec![Synthesized::Dock("com.apple.expose.awake".into())]);

    assert_eq!(dispatcher.handle(&release(5)), TapVerdict::Suppress);
    assert_eq!(synth.performed().len(), 1);
}

#[test]
fn scenario_b_app_profile_shortcut_and_fallback() {
    let store = store_with(foo_config());

    let (in_foo, synth, _bus) = dispatcher(store.clone(), tracker_for(Some("com.example.Foo")));
    assert_eq!(in_foo.handle(&press(3)), TapVerdict::Suppress);
    assert_eq!(in_foo.handle(&release(3)), TapVerdict::Suppress);
    assert_eq!(synth.performed(), vec![Synthesized::Chord(cmd_c())]);

    let (in_bar, synth, _bus) = dispatcher(store, tracker_for(Some("com.example.Bar")));
    assert_eq!(in_bar.handle(&press(3)), TapVerdict::Forward);
    assert_eq!(in_bar.handle(&release(3)), TapVerdict::Forward);
    assert!(synth.performed().is_empty());
}

// === Properties ===

#[test]
fn unmapped_buttons_pass_through_untouched() {
    let (dispatcher, synth, _bus) = dispatcher(store_with(AppConfiguration::default()), tracker_for(None));
    for button in MouseButton::ALL.into_iter().filter(|b| *b != MouseButton::Button5) {
        assert_eq!(dispatcher.handle(&press(button.code())), TapVerdict::Forward, "{button:?}");
        assert_eq!(dispatcher.handle(&release(button.code())), TapVerdict::Forward, "{button:?}");
    }
    assert!(synth.performed().is_empty());
}

#[test]
fn unknown_button_code_passes_through() {
    let (dispatcher, synth, _bus) = dispatcher(store_with(AppConfiguration::default()), tracker_for(None));
    assert_eq!(dispatcher.handle(&press(42)), TapVerdict::Forward);
    assert_eq!(dispatcher.handle(&press(0)), TapVerdict::Forward);
    assert!(synth.performed().is_empty());
}

#[test]
fn same_press_always_triggers_same_action_once() {
    let store = store_with(foo_config());
    let (dispatcher, synth, _bus) = dispatcher(store, tracker_for(Some("com.example.Foo")));
    for round in 1..=5 {
        assert_eq!(dispatcher.handle(&press(3)), TapVerdict::Suppress);
        assert_eq!(dispatcher.handle(&release(3)), TapVerdict::Suppress);
        assert_eq!(synth.performed(), vec![Synthesized::Chord(cmd_c()); round]);
    }
}

#[test]
fn timeout_reenables_and_forwards() {
    let (dispatcher, synth, bus) = dispatcher(store_with(AppConfiguration::default()), tracker_for(None));
    let verdict = dispatcher.handle(&RawEvent::of_kind(RawEventKind::TapDisabledByTimeout));
    assert_eq!(verdict, TapVerdict::ReenableAndForward);
    assert!(synth.performed().is_empty());
    assert!(bus.drain().is_empty());
}

#[test]
fn other_event_kinds_are_forwarded_without_observation() {
    let (dispatcher, _synth, bus) = dispatcher(store_with(AppConfiguration::default()), tracker_for(None));
    assert_eq!(dispatcher.handle(&RawEvent::of_kind(RawEventKind::Other)), TapVerdict::Forward);
    assert!(bus.drain().is_empty());
}

#[test]
fn every_button_event_is_observed_even_unknown_ones() {
    let (dispatcher, _synth, bus) = dispatcher(store_with(AppConfiguration::default()), tracker_for(None));
    dispatcher.handle(&press(5));
    dispatcher.handle(&release(5));
    dispatcher.handle(&press(99));

    let observed: Vec<_> = bus
        .drain()
        .into_iter()
        .filter_map(|e| match e {
            AppEvent::ButtonObserved(o) => Some((o.button_code, o.direction)),
            _ => None,
        })
        .collect();
    assert_eq!(
        observed,
        vec![(5, ButtonDirection::Down), (5, ButtonDirection::Up), (99, ButtonDirection::Down)]
    );
}

#[test]
fn shortcut_preset_is_synthesized_from_table() {
    let mut config = AppConfiguration::default();
    config.profiles[0].set_action(MouseButton::Forward, MappingAction::Preset(PresetAction::Copy));
    let (dispatcher, synth, _bus) = dispatcher(store_with(config), tracker_for(None));

    dispatcher.handle(&press(4));
    assert_eq!(synth.performed(), vec![Synthesized::Chord(cmd_c())]);
}

#[test]
fn mapping_change_applies_to_next_event() {
    let store = store_with(AppConfiguration::default());
    let (dispatcher, synth, _bus) = dispatcher(store.clone(), tracker_for(None));
    assert_eq!(dispatcher.handle(&press(2)), TapVerdict::Forward);

    let default_id = store.default_profile().id;
    store
        .update_mapping(default_id, MouseButton::Middle, MappingAction::Preset(PresetAction::Launchpad))
        .unwrap();
    assert_eq!(dispatcher.handle(&press(2)), TapVerdict::Suppress);
    assert_eq!(synth.performed(), vec![Synthesized::Dock("com.apple.launchpad.toggle".into())]);
}

#[test]
fn foreground_switch_changes_resolved_profile() {
    let store = store_with(foo_config());
    let tracker = tracker_for(Some("com.example.Bar"));
    let (dispatcher, synth, _bus) = dispatcher(store, tracker.clone());
    assert_eq!(dispatcher.handle(&press(3)), TapVerdict::Forward);

    tracker.update(mousemap::foreground::ForegroundApp::new("com.example.Foo", "Foo"));
    assert_eq!(dispatcher.handle(&press(3)), TapVerdict::Suppress);
    assert_eq!(synth.performed().len(), 1);
}
