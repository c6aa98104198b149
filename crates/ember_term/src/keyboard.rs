//! Keyboard translation
//!
//! Maps keyboard events onto the byte sequences a vt100/vt220-compatible
//! application expects. The map is mode-sensitive: cursor key mode
//! switches the navigation keys to SS3 form, keypad application mode
//! switches the numeric keypad to ESC O sequences, and line-feed/new-line
//! mode makes Return send CR LF.

use bitflags::bitflags;

use crate::PtyWrite;
use crate::vte::TermFlags;

bitflags! {
    /// Modifier state attached to a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT     = 0b0000_0100;
        const LOGO    = 0b0000_1000;
    }
}

/// Symbolic key identity, independent of layout and modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keysym {
    /// A key that produces a printable character on its own
    Char(char),

    BackSpace,
    Tab,
    Linefeed,
    Clear,
    Pause,
    ScrollLock,
    SysReq,
    Escape,
    Return,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Right,
    Left,

    KpEnter,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpSubtract,
    KpSeparator,
    KpDelete,
    KpDecimal,
    KpEqual,
    KpDivide,
    KpMultiply,
    KpAdd,
    KpSpace,
    KpF1,
    KpF2,
    KpF3,
    KpF4,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,

    /// No symbolic identity; only the unicode value (if any) is usable
    Unknown,
}

/// A keyboard event as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub mods: Modifiers,
    pub keysym: Keysym,
    /// The character this key produces under the current layout, if any
    pub unicode: Option<char>,
}

impl InputEvent {
    pub fn new(mods: Modifiers, keysym: Keysym, unicode: Option<char>) -> Self {
        Self { mods, keysym, unicode }
    }

    /// Event for a bare named key.
    pub fn key(keysym: Keysym) -> Self {
        Self::new(Modifiers::empty(), keysym, None)
    }

    /// Event for a printable character key.
    pub fn ch(c: char) -> Self {
        Self::new(Modifiers::empty(), Keysym::Char(c), Some(c))
    }
}

/// Map Ctrl plus a character key to its traditional C0 control.
fn control_byte(c: char) -> Option<u8> {
    match c {
        '2' | ' ' => Some(0x00),
        'a'..='z' => Some(c as u8 - b'a' + 1),
        'A'..='Z' => Some(c as u8 - b'A' + 1),
        '3' | '[' | '{' => Some(0x1B),
        '4' | '\\' | '|' => Some(0x1C),
        '5' | ']' | '}' => Some(0x1D),
        '6' | '`' | '~' => Some(0x1E),
        '7' | '/' | '?' => Some(0x1F),
        '8' => Some(0x7F),
        _ => None,
    }
}

/// Translate a key event into PTY bytes. Returns whether anything was
/// written.
pub(crate) fn translate(ev: &InputEvent, flags: TermFlags, pty: &mut dyn PtyWrite) -> bool {
    if ev.mods.contains(Modifiers::CONTROL) {
        if let Keysym::Char(c) = ev.keysym {
            if let Some(byte) = control_byte(c) {
                pty.write(&[byte]);
                return true;
            }
        }
    }

    let cursor_key_mode = flags.contains(TermFlags::CURSOR_KEY_MODE);
    let keypad_application = flags.contains(TermFlags::KEYPAD_APPLICATION_MODE);

    let bytes: &[u8] = match ev.keysym {
        Keysym::BackSpace => b"\x08",
        Keysym::Tab => b"\x09",
        Keysym::Linefeed => b"\x0a",
        Keysym::Clear => b"\x0b",
        Keysym::Pause => b"\x13",
        Keysym::ScrollLock => b"\x14",
        Keysym::SysReq => b"\x15",
        Keysym::Escape => b"\x1b",
        Keysym::KpEnter if keypad_application => b"\x1bOM",
        Keysym::KpEnter | Keysym::Return => {
            if flags.contains(TermFlags::LINE_FEED_NEW_LINE_MODE) {
                b"\x0d\x0a"
            } else {
                b"\x0d"
            }
        }
        Keysym::Insert => b"\x1b[2~",
        Keysym::Delete => b"\x1b[3~",
        Keysym::PageUp => b"\x1b[5~",
        Keysym::PageDown => b"\x1b[6~",
        Keysym::Up => {
            if cursor_key_mode {
                b"\x1bOA"
            } else {
                b"\x1b[A"
            }
        }
        Keysym::Down => {
            if cursor_key_mode {
                b"\x1bOB"
            } else {
                b"\x1b[B"
            }
        }
        Keysym::Right => {
            if cursor_key_mode {
                b"\x1bOC"
            } else {
                b"\x1b[C"
            }
        }
        Keysym::Left => {
            if cursor_key_mode {
                b"\x1bOD"
            } else {
                b"\x1b[D"
            }
        }
        Keysym::Home => {
            if cursor_key_mode {
                b"\x1bOH"
            } else {
                b"\x1b[H"
            }
        }
        Keysym::End => {
            if cursor_key_mode {
                b"\x1bOF"
            } else {
                b"\x1b[F"
            }
        }
        Keysym::Kp0 => {
            if keypad_application {
                b"\x1bOp"
            } else {
                b"0"
            }
        }
        Keysym::Kp1 => {
            if keypad_application {
                b"\x1bOq"
            } else {
                b"1"
            }
        }
        Keysym::Kp2 => {
            if keypad_application {
                b"\x1bOr"
            } else {
                b"2"
            }
        }
        Keysym::Kp3 => {
            if keypad_application {
                b"\x1bOs"
            } else {
                b"3"
            }
        }
        Keysym::Kp4 => {
            if keypad_application {
                b"\x1bOt"
            } else {
                b"4"
            }
        }
        Keysym::Kp5 => {
            if keypad_application {
                b"\x1bOu"
            } else {
                b"5"
            }
        }
        Keysym::Kp6 => {
            if keypad_application {
                b"\x1bOv"
            } else {
                b"6"
            }
        }
        Keysym::Kp7 => {
            if keypad_application {
                b"\x1bOw"
            } else {
                b"7"
            }
        }
        Keysym::Kp8 => {
            if keypad_application {
                b"\x1bOx"
            } else {
                b"8"
            }
        }
        Keysym::Kp9 => {
            if keypad_application {
                b"\x1bOy"
            } else {
                b"9"
            }
        }
        Keysym::KpSubtract => {
            if keypad_application {
                b"\x1bOm"
            } else {
                b"-"
            }
        }
        Keysym::KpSeparator => {
            if keypad_application {
                b"\x1bOl"
            } else {
                b","
            }
        }
        // KP_Delete and KP_Decimal share a sequence, as do KP_Equal and
        // KP_Divide
        Keysym::KpDelete | Keysym::KpDecimal => {
            if keypad_application {
                b"\x1bOn"
            } else {
                b"."
            }
        }
        Keysym::KpEqual | Keysym::KpDivide => {
            if keypad_application {
                b"\x1bOj"
            } else {
                b"/"
            }
        }
        Keysym::KpMultiply => {
            if keypad_application {
                b"\x1bOo"
            } else {
                b"*"
            }
        }
        Keysym::KpAdd => {
            if keypad_application {
                b"\x1bOk"
            } else {
                b"+"
            }
        }
        Keysym::KpSpace => b" ",
        Keysym::F1 | Keysym::KpF1 => b"\x1bOP",
        Keysym::F2 | Keysym::KpF2 => b"\x1bOQ",
        Keysym::F3 | Keysym::KpF3 => b"\x1bOR",
        Keysym::F4 | Keysym::KpF4 => b"\x1bOS",
        Keysym::F5 => b"\x1b[15~",
        Keysym::F6 => b"\x1b[17~",
        Keysym::F7 => b"\x1b[18~",
        Keysym::F8 => b"\x1b[19~",
        Keysym::F9 => b"\x1b[20~",
        Keysym::F10 => b"\x1b[21~",
        Keysym::F11 => b"\x1b[23~",
        Keysym::F12 => b"\x1b[24~",
        Keysym::F13 => b"\x1b[25~",
        Keysym::F14 => b"\x1b[26~",
        Keysym::F15 => b"\x1b[28~",
        Keysym::F16 => b"\x1b[29~",
        Keysym::F17 => b"\x1b[31~",
        Keysym::F18 => b"\x1b[32~",
        Keysym::F19 => b"\x1b[33~",
        Keysym::F20 => b"\x1b[34~",
        Keysym::Char(_) | Keysym::Unknown => {
            // no named mapping; fall back to the unicode value
            if let Some(c) = ev.unicode {
                let mut buf = [0u8; 4];
                pty.write(c.encode_utf8(&mut buf).as_bytes());
                return true;
            }
            return false;
        }
    };

    pty.write(bytes);
    true
}
