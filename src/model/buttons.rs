//! Physical mouse buttons and the device models that expose them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pointer button beyond the primary/secondary pair.
///
/// The discriminant is the button number reported by the OS in
/// auxiliary-button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MouseButton {
    Middle = 2,
    Back = 3,
    Forward = 4,
    Button5 = 5,
    Button6 = 6,
    Button7 = 7,
    Button8 = 8,
    Button9 = 9,
    Button10 = 10,
    Button11 = 11,
}

impl MouseButton {
    /// All known buttons in ascending code order.
    pub const ALL: [MouseButton; 10] = [
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
        MouseButton::Button5,
        MouseButton::Button6,
        MouseButton::Button7,
        MouseButton::Button8,
        MouseButton::Button9,
        MouseButton::Button10,
        MouseButton::Button11,
    ];

    /// Button number as carried by the raw OS event.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Look up a button by its raw event code.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.code() == code)
    }

    /// Generic name, independent of the device.
    pub fn display_name(self) -> &'static str {
        match self {
            MouseButton::Middle => "Middle Click",
            MouseButton::Back => "Back",
            MouseButton::Forward => "Forward",
            MouseButton::Button5 => "Button 5",
            MouseButton::Button6 => "Button 6",
            MouseButton::Button7 => "Button 7",
            MouseButton::Button8 => "Button 8",
            MouseButton::Button9 => "Button 9",
            MouseButton::Button10 => "Button 10",
            MouseButton::Button11 => "Button 11",
        }
    }

    /// Device-specific label when the model has one, generic name otherwise.
    pub fn display_name_for(self, model: MouseModel) -> &'static str {
        model.button_label(self).unwrap_or_else(|| self.display_name())
    }
}

impl From<MouseButton> for i64 {
    fn from(button: MouseButton) -> Self {
        button.code()
    }
}

impl TryFrom<i64> for MouseButton {
    type Error = ParseButtonError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        MouseButton::from_code(code).ok_or_else(|| ParseButtonError(code.to_string()))
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Text did not name a known button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mouse button: {0}")]
pub struct ParseButtonError(pub String);

impl FromStr for MouseButton {
    type Err = ParseButtonError;

    /// Accepts a numeric code (`5`) or a name (`middle`, `back`, `forward`, `button7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        if let Ok(code) = t.parse::<i64>() {
            return MouseButton::from_code(code).ok_or_else(|| ParseButtonError(s.to_string()));
        }
        let compact: String = t.chars().filter(|c| !c.is_whitespace() && *c != '_').collect();
        match compact.as_str() {
            "middle" | "middleclick" => Ok(MouseButton::Middle),
            "back" => Ok(MouseButton::Back),
            "forward" => Ok(MouseButton::Forward),
            other => other
                .strip_prefix("button")
                .and_then(|n| n.parse::<i64>().ok())
                .and_then(MouseButton::from_code)
                .ok_or_else(|| ParseButtonError(s.to_string())),
        }
    }
}

/// A named device declaring which buttons it physically has.
///
/// Purely descriptive: dispatch never consults the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseModel {
    #[default]
    #[serde(rename = "mx_master_3")]
    MxMaster3,
    #[serde(rename = "mx_master_3s")]
    MxMaster3s,
    #[serde(rename = "mx_master_2s")]
    MxMaster2s,
    #[serde(rename = "mx_anywhere_3")]
    MxAnywhere3,
    #[serde(rename = "mx_ergo")]
    MxErgo,
    #[serde(rename = "mx_vertical")]
    MxVertical,
    #[serde(rename = "g502")]
    G502,
    #[serde(rename = "g604")]
    G604,
    #[serde(rename = "generic_5")]
    Generic5,
    #[serde(rename = "generic_3")]
    Generic3,
}

use MouseButton::*;

const MX_MASTER_BUTTONS: &[MouseButton] = &[Middle, Back, Forward, Button5];
const THREE_BUTTONS: &[MouseButton] = &[Middle, Back, Forward];
const G502_BUTTONS: &[MouseButton] = &[Middle, Back, Forward, Button5, Button6, Button7, Button8];
const G604_BUTTONS: &[MouseButton] = &[
    Middle, Back, Forward, Button5, Button6, Button7, Button8, Button9, Button10, Button11,
];
const GENERIC5_BUTTONS: &[MouseButton] = &[Middle, Back, Forward, Button5, Button6];

const MX_MASTER_LABELS: &[(MouseButton, &str)] = &[
    (Middle, "Middle Click"),
    (Back, "Back"),
    (Forward, "Forward"),
    (Button5, "Thumb Button"),
];
const G502_LABELS: &[(MouseButton, &str)] = &[
    (Middle, "Middle Click"),
    (Back, "Back"),
    (Forward, "Forward"),
    (Button5, "G4"),
    (Button6, "G5"),
    (Button7, "G7"),
    (Button8, "G8"),
];
const G604_LABELS: &[(MouseButton, &str)] = &[
    (Middle, "Middle Click"),
    (Back, "Back"),
    (Forward, "Forward"),
    (Button5, "G4"),
    (Button6, "G5"),
    (Button7, "G6"),
    (Button8, "G7"),
    (Button9, "G8"),
    (Button10, "G9"),
    (Button11, "G10"),
];

impl MouseModel {
    pub const ALL: [MouseModel; 10] = [
        MouseModel::MxMaster3,
        MouseModel::MxMaster3s,
        MouseModel::MxMaster2s,
        MouseModel::MxAnywhere3,
        MouseModel::MxErgo,
        MouseModel::MxVertical,
        MouseModel::G502,
        MouseModel::G604,
        MouseModel::Generic5,
        MouseModel::Generic3,
    ];

    /// Stable identifier used in the configuration document.
    pub fn id(self) -> &'static str {
        match self {
            MouseModel::MxMaster3 => "mx_master_3",
            MouseModel::MxMaster3s => "mx_master_3s",
            MouseModel::MxMaster2s => "mx_master_2s",
            MouseModel::MxAnywhere3 => "mx_anywhere_3",
            MouseModel::MxErgo => "mx_ergo",
            MouseModel::MxVertical => "mx_vertical",
            MouseModel::G502 => "g502",
            MouseModel::G604 => "g604",
            MouseModel::Generic5 => "generic_5",
            MouseModel::Generic3 => "generic_3",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MouseModel::MxMaster3 => "MX Master 3",
            MouseModel::MxMaster3s => "MX Master 3S",
            MouseModel::MxMaster2s => "MX Master 2S",
            MouseModel::MxAnywhere3 => "MX Anywhere 3",
            MouseModel::MxErgo => "MX Ergo",
            MouseModel::MxVertical => "MX Vertical",
            MouseModel::G502 => "G502",
            MouseModel::G604 => "G604",
            MouseModel::Generic5 => "Generic (5 Buttons)",
            MouseModel::Generic3 => "Generic (3 Buttons)",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            MouseModel::MxMaster3
            | MouseModel::MxMaster3s
            | MouseModel::MxMaster2s
            | MouseModel::MxAnywhere3
            | MouseModel::MxErgo
            | MouseModel::MxVertical => "Logitech MX",
            MouseModel::G502 | MouseModel::G604 => "Logitech G",
            MouseModel::Generic5 | MouseModel::Generic3 => "Generic",
        }
    }

    /// Buttons physically present on this device, in code order.
    pub fn available_buttons(self) -> &'static [MouseButton] {
        match self {
            MouseModel::MxMaster3 | MouseModel::MxMaster3s | MouseModel::MxMaster2s => {
                MX_MASTER_BUTTONS
            }
            MouseModel::MxAnywhere3 | MouseModel::MxErgo | MouseModel::MxVertical => THREE_BUTTONS,
            MouseModel::G502 => G502_BUTTONS,
            MouseModel::G604 => G604_BUTTONS,
            MouseModel::Generic5 => GENERIC5_BUTTONS,
            MouseModel::Generic3 => THREE_BUTTONS,
        }
    }

    /// Per-device label for a button, if the device names it.
    pub fn button_label(self, button: MouseButton) -> Option<&'static str> {
        let labels = match self {
            MouseModel::MxMaster3 | MouseModel::MxMaster3s | MouseModel::MxMaster2s => {
                MX_MASTER_LABELS
            }
            MouseModel::G502 => G502_LABELS,
            MouseModel::G604 => G604_LABELS,
            _ => &[],
        };
        labels.iter().find(|(b, _)| *b == button).map(|(_, label)| *label)
    }
}

impl fmt::Display for MouseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mouse model: {0}")]
pub struct ParseModelError(pub String);

impl FromStr for MouseModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase().replace('-', "_");
        MouseModel::ALL
            .into_iter()
            .find(|m| m.id() == t)
            .ok_or_else(|| ParseModelError(s.to_string()))
    }
}
