//! VT parser core: UTF-8 decoding and the VT500-series escape sequence
//! state machine.
//!
//! The parser consumes *decoded* Unicode code points (so C1 controls are
//! recognized no matter which byte sequence produced them) and emits
//! structured [`VtCommand`]s through a [`VtSink`]. Applying commands to a
//! screen is the job of a higher layer; this crate holds no screen state.

mod parser;
pub use parser::{CSI_MAX_PARAMS, ParserState, VtParser};

mod utf8;
pub use utf8::{Utf8Machine, Utf8State};

/// Replacement code point (U+FFFD) produced for invalid UTF-8 input.
pub const UCS4_REPLACEMENT: u32 = 0xFFFD;

/// Cursor movement direction for the CUU/CUD/CUF/CUB family
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

/// Erase in Display mode for the ED command (ESC[nJ)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseInDisplayMode {
    /// Clear from cursor to end of display
    CursorToEnd = 0,
    /// Clear from start of display to cursor
    StartToCursor = 1,
    /// Clear entire display
    All = 2,
}

impl EraseInDisplayMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            n if n <= 0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            _ => None,
        }
    }
}

/// Erase in Line mode for the EL command (ESC[nK)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseInLineMode {
    /// Clear from cursor to end of line
    CursorToEnd = 0,
    /// Clear from start of line to cursor
    StartToCursor = 1,
    /// Clear entire line
    All = 2,
}

impl EraseInLineMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            n if n <= 0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            _ => None,
        }
    }
}

/// Color values carried by SGR attributes.
///
/// Only the 8 ANSI base colors and the terminal default are representable;
/// mapping an index to concrete RGB values happens in the dispatch layer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermColor {
    /// Terminal default (white foreground / black background)
    Default,
    /// ANSI base color index 0-7 (black, red, green, yellow, blue,
    /// magenta, cyan, white)
    Ansi(u8),
}

/// SGR (Select Graphic Rendition) attributes for ESC[...m sequences
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrAttribute {
    /// Reset all attributes to default
    Reset,
    /// Bold on/off (SGR 1 / 22)
    Bold(bool),
    /// Underline on/off (SGR 4 / 24)
    Underline(bool),
    /// Blink on/off (SGR 5 / 25)
    Blink(bool),
    /// Inverse video on/off (SGR 7 / 27)
    Inverse(bool),
    /// Set foreground color (SGR 30-37, 39)
    Foreground(TermColor),
    /// Set background color (SGR 40-47, 49)
    Background(TermColor),
}

/// ANSI modes for the SM/RM commands (ESC[nh / ESC[nl)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    /// LNM - Line Feed/New Line Mode (Mode 20)
    /// When set: LF implies CR, and Return sends CR LF
    LineFeedNewLine = 20,
}

impl TerminalMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            20 => Some(Self::LineFeedNewLine),
            _ => None,
        }
    }
}

/// DEC private modes for the DECSET/DECRST commands (ESC[?nh / ESC[?nl)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateMode {
    /// DECCKM - Cursor Key Mode (Mode 1)
    /// When set: cursor keys send SS3 sequences instead of CSI
    CursorKeys = 1,
}

impl PrivateMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::CursorKeys),
            _ => None,
        }
    }
}

/// A single dispatched terminal operation.
///
/// Counts are already resolved: missing or non-positive CSI parameters
/// default to 1 for the cursor family, and SGR sequences emit one command
/// per parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtCommand {
    /// Print a code point at the cursor with the current attributes
    Print(u32),

    // C0 controls
    /// BEL (0x07)
    Bell,
    /// BS (0x08) - cursor one position left, no scroll
    Backspace,
    /// HT (0x09) - next tab stop (tab stops are not implemented)
    Tab,
    /// LF/VT/FF (0x0A-0x0C) - line feed, or newline in LNM
    LineFeed,
    /// CR (0x0D) - cursor to left margin
    CarriageReturn,
    /// ENQ (0x05) - answerback; the dispatcher replies with ACK
    Enquiry,
    /// SUB (0x1A) - abort sequence and show an error symbol
    Substitute,

    // C1 controls and their ESC aliases
    /// IND (0x84 / ESC D) - cursor down one row, scroll-up if needed
    Index,
    /// NEL (0x85 / ESC E) - CR/LF with scroll-up if needed
    NextLine,
    /// RI (0x8D / ESC M) - cursor up one row, scroll-down if needed
    ReverseIndex,

    /// RIS (ESC c) - full reset to initial state
    FullReset,
    /// DECKPAM / DECKPNM (ESC = / ESC >) - keypad application mode
    KeypadApplicationMode(bool),

    // CSI sequences
    /// CUU/CUD/CUF/CUB - cursor movement without scrolling: ESC[{n}A-D
    MoveCursor(Direction, u16),
    /// CUP - cursor position (1-based row, column): ESC[{row};{col}H
    CursorPosition(u16, u16),
    /// ED - Erase in Display: ESC[{n}J
    EraseInDisplay(EraseInDisplayMode),
    /// EL - Erase in Line: ESC[{n}K
    EraseInLine(EraseInLineMode),
    /// SGR - Select Graphic Rendition: ESC[{param}m
    /// Emitted once per parameter (e.g. ESC[1;31m emits Bold then a
    /// foreground color)
    SelectGraphicRendition(SgrAttribute),
    /// DECSCL - Select Conformance Level: ESC[{n}p
    ConformanceLevel(u16),
    /// SM - Set Mode: ESC[{n}h (one command per recognized mode)
    SetMode(TerminalMode),
    /// RM - Reset Mode: ESC[{n}l
    ResetMode(TerminalMode),
    /// DECSET - DEC Private Mode Set: ESC[?{n}h
    SetPrivateMode(PrivateMode),
    /// DECRST - DEC Private Mode Reset: ESC[?{n}l
    ResetPrivateMode(PrivateMode),
}

/// Parser problems reported through [`VtSink::report_error`].
///
/// None of these abort parsing; the state machine always recovers on its
/// own and the sequence in question is simply not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// C0/C1 control code with no handler
    UnsupportedControl { code: u32 },
    /// Escape sequence with an unhandled final byte
    UnsupportedEscape { final_byte: u32 },
    /// CSI sequence with an unhandled final byte or intermediate
    UnsupportedCsi { final_byte: u32 },
    /// Known command with a parameter value outside the handled set
    InvalidParameter { command: &'static str, value: i32 },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedControl { code } => {
                write!(f, "unhandled control character 0x{code:02X}")
            }
            Self::UnsupportedEscape { final_byte } => {
                write!(f, "unhandled escape sequence final 0x{final_byte:02X}")
            }
            Self::UnsupportedCsi { final_byte } => {
                write!(f, "unhandled CSI sequence final 0x{final_byte:02X}")
            }
            Self::InvalidParameter { command, value } => {
                write!(f, "invalid parameter {value} for {command}")
            }
        }
    }
}

/// Receiver for dispatched commands.
pub trait VtSink {
    fn emit(&mut self, cmd: VtCommand);

    /// Report a parsing problem. Default implementation does nothing.
    fn report_error(&mut self, _error: ParseError) {}
}
