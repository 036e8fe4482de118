//! Preset system actions and their fixed dispatch tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keycodes::*;
use super::shortcut::{KeyboardShortcut, ModifierFlags};

/// A named OS-level action a button can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetAction {
    // Dock gestures
    MissionControl,
    AppExpose,
    ShowDesktop,
    Launchpad,
    // Keyboard shortcuts
    NotificationCenter,
    Spotlight,
    ScreenshotTool,
    FullscreenToggle,
    MinimizeWindow,
    BrowserBack,
    BrowserForward,
    Copy,
    Paste,
    Undo,
    LockScreen,
    AppSwitcher,
}

/// How a preset is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetDispatch {
    /// Sent as a Dock notification with this identifier.
    Dock(&'static str),
    /// Synthesized as this keyboard shortcut.
    Shortcut(KeyboardShortcut),
}

const fn shortcut(key_code: u16, modifiers: ModifierFlags) -> PresetDispatch {
    PresetDispatch::Shortcut(KeyboardShortcut::new(key_code, modifiers))
}

impl PresetAction {
    pub const ALL: [PresetAction; 16] = [
        PresetAction::MissionControl,
        PresetAction::AppExpose,
        PresetAction::ShowDesktop,
        PresetAction::Launchpad,
        PresetAction::NotificationCenter,
        PresetAction::Spotlight,
        PresetAction::ScreenshotTool,
        PresetAction::FullscreenToggle,
        PresetAction::MinimizeWindow,
        PresetAction::BrowserBack,
        PresetAction::BrowserForward,
        PresetAction::Copy,
        PresetAction::Paste,
        PresetAction::Undo,
        PresetAction::LockScreen,
        PresetAction::AppSwitcher,
    ];

    /// Identifier used in the configuration document.
    pub fn id(self) -> &'static str {
        match self {
            PresetAction::MissionControl => "mission_control",
            PresetAction::AppExpose => "app_expose",
            PresetAction::ShowDesktop => "show_desktop",
            PresetAction::Launchpad => "launchpad",
            PresetAction::NotificationCenter => "notification_center",
            PresetAction::Spotlight => "spotlight",
            PresetAction::ScreenshotTool => "screenshot_tool",
            PresetAction::FullscreenToggle => "fullscreen_toggle",
            PresetAction::MinimizeWindow => "minimize_window",
            PresetAction::BrowserBack => "browser_back",
            PresetAction::BrowserForward => "browser_forward",
            PresetAction::Copy => "copy",
            PresetAction::Paste => "paste",
            PresetAction::Undo => "undo",
            PresetAction::LockScreen => "lock_screen",
            PresetAction::AppSwitcher => "app_switcher",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PresetAction::MissionControl => "Mission Control",
            PresetAction::AppExpose => "App Expos\u{e9}",
            PresetAction::ShowDesktop => "Show Desktop",
            PresetAction::Launchpad => "Launchpad",
            PresetAction::NotificationCenter => "Notification Center",
            PresetAction::Spotlight => "Spotlight",
            PresetAction::ScreenshotTool => "Screenshot Tool",
            PresetAction::FullscreenToggle => "Fullscreen Toggle",
            PresetAction::MinimizeWindow => "Minimize Window",
            PresetAction::BrowserBack => "Browser Back",
            PresetAction::BrowserForward => "Browser Forward",
            PresetAction::Copy => "Copy",
            PresetAction::Paste => "Paste",
            PresetAction::Undo => "Undo",
            PresetAction::LockScreen => "Lock Screen",
            PresetAction::AppSwitcher => "App Switcher",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            PresetAction::MissionControl
            | PresetAction::AppExpose
            | PresetAction::ShowDesktop
            | PresetAction::Launchpad => "System",
            PresetAction::NotificationCenter
            | PresetAction::Spotlight
            | PresetAction::ScreenshotTool
            | PresetAction::LockScreen => "macOS",
            PresetAction::FullscreenToggle | PresetAction::MinimizeWindow => "Window",
            PresetAction::BrowserBack | PresetAction::BrowserForward => "Navigation",
            PresetAction::Copy | PresetAction::Paste | PresetAction::Undo | PresetAction::AppSwitcher => {
                "General"
            }
        }
    }

    pub fn is_dock_action(self) -> bool {
        matches!(self.dispatch(), PresetDispatch::Dock(_))
    }

    /// The fixed dispatch table. Shortcut entries must not change: users
    /// rely on them matching the system's default bindings.
    pub fn dispatch(self) -> PresetDispatch {
        use ModifierFlags as M;
        match self {
            PresetAction::MissionControl => PresetDispatch::Dock("com.apple.expose.awake"),
            PresetAction::AppExpose => PresetDispatch::Dock("com.apple.expose.front.awake"),
            PresetAction::ShowDesktop => PresetDispatch::Dock("com.apple.showdesktop.awake"),
            PresetAction::Launchpad => PresetDispatch::Dock("com.apple.launchpad.toggle"),
            PresetAction::NotificationCenter => shortcut(KC_N, M::COMMAND_SHIFT),
            PresetAction::Spotlight => shortcut(KC_SPACE, M::COMMAND),
            PresetAction::ScreenshotTool => shortcut(KC_5, M::COMMAND_SHIFT),
            PresetAction::FullscreenToggle => shortcut(KC_F, M::COMMAND_CONTROL),
            PresetAction::MinimizeWindow => shortcut(KC_M, M::COMMAND),
            PresetAction::BrowserBack => shortcut(KC_LEFT_BRACKET, M::COMMAND),
            PresetAction::BrowserForward => shortcut(KC_RIGHT_BRACKET, M::COMMAND),
            PresetAction::Copy => shortcut(KC_C, M::COMMAND),
            PresetAction::Paste => shortcut(KC_V, M::COMMAND),
            PresetAction::Undo => shortcut(KC_Z, M::COMMAND),
            PresetAction::LockScreen => shortcut(KC_Q, M::COMMAND_CONTROL),
            PresetAction::AppSwitcher => shortcut(KC_TAB, M::COMMAND),
        }
    }
}

impl fmt::Display for PresetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset action: {0}")]
pub struct ParsePresetError(pub String);

impl FromStr for PresetAction {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PresetAction::ALL
            .into_iter()
            .find(|p| p.id() == t)
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_dock_actions_twelve_shortcuts() {
        let docks = PresetAction::ALL.iter().filter(|p| p.is_dock_action()).count();
        assert_eq!(docks, 4);
        assert_eq!(PresetAction::ALL.len() - docks, 12);
    }

    #[test]
    fn shortcut_table_matches_system_bindings() {
        let expect = |p: PresetAction, key: u16, m: ModifierFlags| {
            assert_eq!(p.dispatch(), PresetDispatch::Shortcut(KeyboardShortcut::new(key, m)), "{p:?}");
        };
        expect(PresetAction::NotificationCenter, KC_N, ModifierFlags::COMMAND_SHIFT);
        expect(PresetAction::Spotlight, KC_SPACE, ModifierFlags::COMMAND);
        expect(PresetAction::ScreenshotTool, KC_5, ModifierFlags::COMMAND_SHIFT);
        expect(PresetAction::FullscreenToggle, KC_F, ModifierFlags::COMMAND_CONTROL);
        expect(PresetAction::MinimizeWindow, KC_M, ModifierFlags::COMMAND);
        expect(PresetAction::BrowserBack, KC_LEFT_BRACKET, ModifierFlags::COMMAND);
        expect(PresetAction::BrowserForward, KC_RIGHT_BRACKET, ModifierFlags::COMMAND);
        expect(PresetAction::Copy, KC_C, ModifierFlags::COMMAND);
        expect(PresetAction::Paste, KC_V, ModifierFlags::COMMAND);
        expect(PresetAction::Undo, KC_Z, ModifierFlags::COMMAND);
        expect(PresetAction::LockScreen, KC_Q, ModifierFlags::COMMAND_CONTROL);
        expect(PresetAction::AppSwitcher, KC_TAB, ModifierFlags::COMMAND);
    }

    #[test]
    fn dock_identifiers() {
        assert_eq!(PresetAction::MissionControl.dispatch(), PresetDispatch::Dock("com.apple.expose.awake"));
        assert_eq!(PresetAction::Launchpad.dispatch(), PresetDispatch::Dock("com.apple.launchpad.toggle"));
    }

    #[test]
    fn serde_ids_match_id() {
        for p in PresetAction::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.id()));
            assert_eq!(p.id().parse::<PresetAction>(), Ok(p));
        }
        assert_eq!("Mission Control".parse::<PresetAction>(), Ok(PresetAction::MissionControl));
    }
}
