//! macOS virtual key codes (kVK_*) and their display names.
//!
//! Only the keys a user can sensibly bind to a button are listed. Codes
//! follow the ANSI layout constants from Carbon's `Events.h`.

// ANSI keycodes used by the preset table
pub const KC_C: u16 = 8;
pub const KC_V: u16 = 9;
pub const KC_Q: u16 = 12;
pub const KC_Z: u16 = 6;
pub const KC_F: u16 = 3;
pub const KC_M: u16 = 46;
pub const KC_N: u16 = 45;
pub const KC_5: u16 = 23;
pub const KC_LEFT_BRACKET: u16 = 33;
pub const KC_RIGHT_BRACKET: u16 = 30;
pub const KC_TAB: u16 = 48;
pub const KC_SPACE: u16 = 49;
pub const KC_ESCAPE: u16 = 53;

/// (code, display name, accepted text aliases)
const KEYS: &[(u16, &str, &[&str])] = &[
    (0, "A", &["a"]),
    (1, "S", &["s"]),
    (2, "D", &["d"]),
    (3, "F", &["f"]),
    (4, "H", &["h"]),
    (5, "G", &["g"]),
    (6, "Z", &["z"]),
    (7, "X", &["x"]),
    (8, "C", &["c"]),
    (9, "V", &["v"]),
    (11, "B", &["b"]),
    (12, "Q", &["q"]),
    (13, "W", &["w"]),
    (14, "E", &["e"]),
    (15, "R", &["r"]),
    (16, "Y", &["y"]),
    (17, "T", &["t"]),
    (18, "1", &["1"]),
    (19, "2", &["2"]),
    (20, "3", &["3"]),
    (21, "4", &["4"]),
    (22, "6", &["6"]),
    (23, "5", &["5"]),
    (24, "=", &["=", "equal"]),
    (25, "9", &["9"]),
    (26, "7", &["7"]),
    (27, "-", &["-", "minus"]),
    (28, "8", &["8"]),
    (29, "0", &["0"]),
    (30, "]", &["]", "rightbracket"]),
    (31, "O", &["o"]),
    (32, "U", &["u"]),
    (33, "[", &["[", "leftbracket"]),
    (34, "I", &["i"]),
    (35, "P", &["p"]),
    (36, "\u{21A9}", &["return", "enter"]),
    (37, "L", &["l"]),
    (38, "J", &["j"]),
    (39, "'", &["'", "quote"]),
    (40, "K", &["k"]),
    (41, ";", &[";", "semicolon"]),
    (42, "\\", &["\\", "backslash"]),
    (43, ",", &[",", "comma"]),
    (44, "/", &["/", "slash"]),
    (45, "N", &["n"]),
    (46, "M", &["m"]),
    (47, ".", &[".", "period"]),
    (48, "\u{21E5}", &["tab"]),
    (49, "Space", &["space"]),
    (50, "`", &["`", "grave"]),
    (51, "\u{232B}", &["delete", "backspace"]),
    (53, "\u{238B}", &["escape", "esc"]),
    (96, "F5", &["f5"]),
    (97, "F6", &["f6"]),
    (98, "F7", &["f7"]),
    (99, "F3", &["f3"]),
    (100, "F8", &["f8"]),
    (101, "F9", &["f9"]),
    (103, "F11", &["f11"]),
    (105, "F13", &["f13"]),
    (106, "F16", &["f16"]),
    (107, "F14", &["f14"]),
    (109, "F10", &["f10"]),
    (111, "F12", &["f12"]),
    (113, "F15", &["f15"]),
    (115, "\u{2196}", &["home"]),
    (116, "\u{21DE}", &["pageup"]),
    (117, "\u{2326}", &["forwarddelete"]),
    (118, "F4", &["f4"]),
    (119, "\u{2198}", &["end"]),
    (120, "F2", &["f2"]),
    (121, "\u{21DF}", &["pagedown"]),
    (122, "F1", &["f1"]),
    (123, "\u{2190}", &["left"]),
    (124, "\u{2192}", &["right"]),
    (125, "\u{2193}", &["down"]),
    (126, "\u{2191}", &["up"]),
];

/// Display name for a virtual key code; unknown codes render as `Key <n>`.
pub fn name_for_key_code(code: u16) -> String {
    KEYS.iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| (*name).to_string())
        .unwrap_or_else(|| format!("Key {code}"))
}

/// Resolve a textual key name (case-insensitive) to its virtual key code.
pub fn key_code_for_name(name: &str) -> Option<u16> {
    let t = name.trim().to_ascii_lowercase();
    KEYS.iter()
        .find(|(_, _, aliases)| aliases.contains(&t.as_str()))
        .map(|(code, _, _)| *code)
}
