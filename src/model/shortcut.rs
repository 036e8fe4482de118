//! Keyboard shortcuts: a virtual key code plus modifier flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keycodes::{key_code_for_name, name_for_key_code};

/// The four independent modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierFlags {
    pub command: bool,
    pub option: bool,
    pub control: bool,
    pub shift: bool,
}

impl ModifierFlags {
    pub const NONE: ModifierFlags = ModifierFlags {
        command: false,
        option: false,
        control: false,
        shift: false,
    };

    pub const COMMAND: ModifierFlags = ModifierFlags {
        command: true,
        ..ModifierFlags::NONE
    };

    pub const COMMAND_SHIFT: ModifierFlags = ModifierFlags {
        command: true,
        shift: true,
        ..ModifierFlags::NONE
    };

    pub const COMMAND_CONTROL: ModifierFlags = ModifierFlags {
        command: true,
        control: true,
        ..ModifierFlags::NONE
    };

    pub fn is_empty(&self) -> bool {
        !self.command && !self.option && !self.control && !self.shift
    }

    /// Modifier symbols in the fixed macOS order: ⌃ ⌥ ⇧ ⌘.
    pub fn symbols(&self) -> String {
        let mut out = String::new();
        if self.control {
            out.push('\u{2303}');
        }
        if self.option {
            out.push('\u{2325}');
        }
        if self.shift {
            out.push('\u{21E7}');
        }
        if self.command {
            out.push('\u{2318}');
        }
        out
    }
}

/// A key combination to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardShortcut {
    pub key_code: u16,
    #[serde(default)]
    pub modifiers: ModifierFlags,
}

impl KeyboardShortcut {
    pub const fn new(key_code: u16, modifiers: ModifierFlags) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    /// Canonical display string, e.g. `⇧⌘N`.
    pub fn display_string(&self) -> String {
        format!("{}{}", self.modifiers.symbols(), name_for_key_code(self.key_code))
    }
}

impl fmt::Display for KeyboardShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseShortcutError {
    #[error("empty shortcut")]
    Empty,
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("shortcut names more than one key: {0}")]
    MultipleKeys(String),
}

impl FromStr for KeyboardShortcut {
    type Err = ParseShortcutError;

    /// Parses `cmd+shift+n` style text. The key may also be given as a raw
    /// numeric code prefixed with `#` (e.g. `cmd+#8`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseShortcutError::Empty);
        }
        let mut modifiers = ModifierFlags::NONE;
        let mut key: Option<u16> = None;
        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "cmd" | "command" | "super" | "meta" => modifiers.command = true,
                "opt" | "option" | "alt" => modifiers.option = true,
                "ctrl" | "control" => modifiers.control = true,
                "shift" => modifiers.shift = true,
                other => {
                    if key.is_some() {
                        return Err(ParseShortcutError::MultipleKeys(s.to_string()));
                    }
                    let code = match other.strip_prefix('#') {
                        Some(raw) => raw.parse::<u16>().ok(),
                        None => key_code_for_name(other),
                    };
                    key = Some(code.ok_or_else(|| ParseShortcutError::UnknownKey(part.to_string()))?);
                }
            }
        }
        let key_code = key.ok_or(ParseShortcutError::MissingKey)?;
        Ok(KeyboardShortcut::new(key_code, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keycodes::{KC_C, KC_N, KC_SPACE};

    #[test]
    fn display_orders_modifiers_control_option_shift_command() {
        let all = ModifierFlags {
            command: true,
            option: true,
            control: true,
            shift: true,
        };
        let sc = KeyboardShortcut::new(KC_C, all);
        assert_eq!(sc.display_string(), "\u{2303}\u{2325}\u{21E7}\u{2318}C");
    }

    #[test]
    fn display_without_modifiers_is_key_name() {
        let sc = KeyboardShortcut::new(KC_SPACE, ModifierFlags::NONE);
        assert_eq!(sc.to_string(), "Space");
    }

    #[test]
    fn equality_is_structural() {
        let a = KeyboardShortcut::new(KC_N, ModifierFlags::COMMAND_SHIFT);
        let b = KeyboardShortcut::new(KC_N, ModifierFlags { shift: true, command: true, ..Default::default() });
        assert_eq!(a, b);
        assert_ne!(a, KeyboardShortcut::new(KC_N, ModifierFlags::COMMAND));
    }

    #[test]
    fn parse_modifier_aliases() {
        let sc: KeyboardShortcut = "Cmd+Shift+N".parse().unwrap();
        assert_eq!(sc, KeyboardShortcut::new(KC_N, ModifierFlags::COMMAND_SHIFT));

        let sc: KeyboardShortcut = "ctrl + alt + space".parse().unwrap();
        assert!(sc.modifiers.control && sc.modifiers.option);
        assert!(!sc.modifiers.command && !sc.modifiers.shift);
        assert_eq!(sc.key_code, KC_SPACE);
    }

    #[test]
    fn parse_raw_key_code() {
        let sc: KeyboardShortcut = "cmd+#8".parse().unwrap();
        assert_eq!(sc, KeyboardShortcut::new(KC_C, ModifierFlags::COMMAND));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<KeyboardShortcut>(), Err(ParseShortcutError::Empty));
        assert_eq!("cmd+shift".parse::<KeyboardShortcut>(), Err(ParseShortcutError::MissingKey));
        assert!(matches!("cmd+c+v".parse::<KeyboardShortcut>(), Err(ParseShortcutError::MultipleKeys(_))));
        assert!(matches!("cmd+banana".parse::<KeyboardShortcut>(), Err(ParseShortcutError::UnknownKey(_))));
    }

    #[test]
    fn modifiers_default_when_missing_in_json() {
        let sc: KeyboardShortcut = serde_json::from_str(r#"{"keyCode": 8}"#).unwrap();
        assert!(sc.modifiers.is_empty());
    }
}
