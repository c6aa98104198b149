//! VT escape sequence parser
//!
//! State machine over decoded code points, following the VT500-series
//! state diagram by Paul Williams (vt100.net/emu). The per-state tables
//! below mirror that diagram range for range; "anywhere" rules are
//! evaluated first and win over per-state rules. Entry and exit actions
//! fire on every transition that names a target state, even when the
//! target equals the current state; actions without a target run in
//! place.
//!
//! The parser supports everything from vt100 up to the vt500 series as
//! far as sequence *recognition* goes; sequences without a handler are
//! reported through the sink and otherwise ignored, so unknown input can
//! never wedge the machine.

use crate::{
    Direction, EraseInDisplayMode, EraseInLineMode, ParseError, PrivateMode, SgrAttribute, TermColor, TerminalMode, VtCommand, VtSink,
};

/// Maximum number of CSI parameters
pub const CSI_MAX_PARAMS: usize = 16;

/// Largest value a single CSI parameter can take; further digits are
/// dropped once a slot saturates.
const PARAM_MAX: i32 = 0xFFFF;

/// How many intermediate/private-marker characters are kept per sequence
const INTERMEDIATE_MAX: usize = 2;

/// Parser states
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Initial state and ground
    #[default]
    Ground,
    /// ESC sequence was started
    Escape,
    /// Intermediate escape characters
    EscapeIntermediate,
    /// Starting CSI sequence
    CsiEntry,
    /// CSI parameters
    CsiParam,
    /// Intermediate CSI characters
    CsiIntermediate,
    /// CSI error; ignore this CSI sequence
    CsiIgnore,
    /// Starting DCS sequence
    DcsEntry,
    /// DCS parameters
    DcsParam,
    /// Intermediate DCS characters
    DcsIntermediate,
    /// DCS data passthrough
    DcsPassthrough,
    /// DCS error; ignore this DCS sequence
    DcsIgnore,
    /// Parsing OSC sequence
    OscString,
    /// Unimplemented string sequence; ignore until ST
    StIgnore,
}

/// Parser actions
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Placeholder; do nothing
    None,
    /// Ignore the character entirely
    Ignore,
    /// Print the character on the console
    Print,
    /// Execute a single control character (C0/C1)
    Execute,
    /// Clear the current parameter state
    Clear,
    /// Collect an intermediate character
    Collect,
    /// Collect a parameter character
    Param,
    /// Dispatch an escape sequence
    EscDispatch,
    /// Dispatch a CSI sequence
    CsiDispatch,
    /// Start of DCS data
    DcsStart,
    /// Collect DCS data
    DcsCollect,
    /// End of DCS data
    DcsEnd,
    /// Start of OSC data
    OscStart,
    /// Collect OSC data
    OscCollect,
    /// End of OSC data
    OscEnd,
}

/// Entry actions performed when entering the selected state
fn entry_action(state: ParserState) -> Action {
    match state {
        ParserState::CsiEntry | ParserState::DcsEntry | ParserState::Escape => Action::Clear,
        ParserState::DcsPassthrough => Action::DcsStart,
        ParserState::OscString => Action::OscStart,
        _ => Action::None,
    }
}

/// Exit actions performed when leaving the selected state
fn exit_action(state: ParserState) -> Action {
    match state {
        ParserState::DcsPassthrough => Action::DcsEnd,
        ParserState::OscString => Action::OscEnd,
        _ => Action::None,
    }
}

/// The escape sequence state machine.
///
/// Holds nothing but its own state, the bounded parameter vector and the
/// collected intermediates; all effects leave through the sink.
#[derive(Debug)]
pub struct VtParser {
    state: ParserState,
    argc: usize,
    argv: [i32; CSI_MAX_PARAMS],
    intermediates: [u8; INTERMEDIATE_MAX],
    intermediate_len: usize,
}

impl Default for VtParser {
    fn default() -> Self {
        Self {
            state: ParserState::Ground,
            argc: 0,
            argv: [-1; CSI_MAX_PARAMS],
            intermediates: [0; INTERMEDIATE_MAX],
            intermediate_len: 0,
        }
    }
}

impl VtParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Current parameter slots; unset slots hold -1.
    pub fn params(&self) -> &[i32] {
        &self.argv
    }

    pub fn param_count(&self) -> usize {
        self.argc
    }

    /// Return to ground and clear all collected sequence state.
    pub fn reset(&mut self) {
        self.state = ParserState::Ground;
        self.clear();
    }

    /// Parse one decoded code point, performing state transitions and
    /// dispatching the resulting actions into `sink`.
    pub fn feed(&mut self, ucs4: u32, sink: &mut dyn VtSink) {
        // events that may occur in any state
        match ucs4 {
            0x18 | 0x1A | 0x80..=0x8F | 0x91..=0x97 | 0x99 | 0x9A | 0x9C => {
                self.transition(ucs4, Some(ParserState::Ground), Action::Execute, sink);
                return;
            }
            0x1B => {
                self.transition(ucs4, Some(ParserState::Escape), Action::None, sink);
                return;
            }
            0x98 | 0x9E | 0x9F => {
                self.transition(ucs4, Some(ParserState::StIgnore), Action::None, sink);
                return;
            }
            0x90 => {
                self.transition(ucs4, Some(ParserState::DcsEntry), Action::None, sink);
                return;
            }
            0x9D => {
                self.transition(ucs4, Some(ParserState::OscString), Action::None, sink);
                return;
            }
            0x9B => {
                self.transition(ucs4, Some(ParserState::CsiEntry), Action::None, sink);
                return;
            }
            _ => {}
        }

        // events that depend on the current state
        match self.state {
            ParserState::Ground => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x80..=0x8F | 0x91..=0x9A | 0x9C => {
                    self.transition(ucs4, None, Action::Execute, sink);
                }
                _ => self.transition(ucs4, None, Action::Print, sink),
            },
            ParserState::Escape => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x20..=0x2F => self.transition(ucs4, Some(ParserState::EscapeIntermediate), Action::Collect, sink),
                0x30..=0x4F | 0x51..=0x57 | 0x59 | 0x5A | 0x5C | 0x60..=0x7E => {
                    self.transition(ucs4, Some(ParserState::Ground), Action::EscDispatch, sink);
                }
                0x5B => self.transition(ucs4, Some(ParserState::CsiEntry), Action::None, sink),
                0x5D => self.transition(ucs4, Some(ParserState::OscString), Action::None, sink),
                0x50 => self.transition(ucs4, Some(ParserState::DcsEntry), Action::None, sink),
                0x58 | 0x5E | 0x5F => self.transition(ucs4, Some(ParserState::StIgnore), Action::None, sink),
                _ => self.transition(ucs4, Some(ParserState::EscapeIntermediate), Action::Collect, sink),
            },
            ParserState::EscapeIntermediate => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x20..=0x2F => self.transition(ucs4, None, Action::Collect, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x30..=0x7E => self.transition(ucs4, Some(ParserState::Ground), Action::EscDispatch, sink),
                _ => self.transition(ucs4, None, Action::Collect, sink),
            },
            ParserState::CsiEntry => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x20..=0x2F => self.transition(ucs4, Some(ParserState::CsiIntermediate), Action::Collect, sink),
                0x3A => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
                0x30..=0x39 | 0x3B => self.transition(ucs4, Some(ParserState::CsiParam), Action::Param, sink),
                0x3C..=0x3F => self.transition(ucs4, Some(ParserState::CsiParam), Action::Collect, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::Ground), Action::CsiDispatch, sink),
                _ => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
            },
            ParserState::CsiParam => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x30..=0x39 | 0x3B => self.transition(ucs4, None, Action::Param, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x3A | 0x3C..=0x3F => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
                0x20..=0x2F => self.transition(ucs4, Some(ParserState::CsiIntermediate), Action::Collect, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::Ground), Action::CsiDispatch, sink),
                _ => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
            },
            ParserState::CsiIntermediate => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x20..=0x2F => self.transition(ucs4, None, Action::Collect, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x30..=0x3F => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::Ground), Action::CsiDispatch, sink),
                _ => self.transition(ucs4, Some(ParserState::CsiIgnore), Action::None, sink),
            },
            ParserState::CsiIgnore => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Execute, sink),
                0x20..=0x3F | 0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::Ground), Action::None, sink),
                _ => self.transition(ucs4, None, Action::Ignore, sink),
            },
            ParserState::DcsEntry => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x3A => self.transition(ucs4, Some(ParserState::DcsIgnore), Action::None, sink),
                0x20..=0x2F => self.transition(ucs4, Some(ParserState::DcsIntermediate), Action::Collect, sink),
                0x30..=0x39 | 0x3B => self.transition(ucs4, Some(ParserState::DcsParam), Action::Param, sink),
                0x3C..=0x3F => self.transition(ucs4, Some(ParserState::DcsParam), Action::Collect, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
                _ => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
            },
            ParserState::DcsParam => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x30..=0x39 | 0x3B => self.transition(ucs4, None, Action::Param, sink),
                0x3A | 0x3C..=0x3F => self.transition(ucs4, Some(ParserState::DcsIgnore), Action::None, sink),
                0x20..=0x2F => self.transition(ucs4, Some(ParserState::DcsIntermediate), Action::Collect, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
                _ => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
            },
            ParserState::DcsIntermediate => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x20..=0x2F => self.transition(ucs4, None, Action::Collect, sink),
                0x30..=0x3F => self.transition(ucs4, Some(ParserState::DcsIgnore), Action::None, sink),
                0x40..=0x7E => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
                _ => self.transition(ucs4, Some(ParserState::DcsPassthrough), Action::None, sink),
            },
            ParserState::DcsPassthrough => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x20..=0x7E => self.transition(ucs4, None, Action::DcsCollect, sink),
                0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x9C => self.transition(ucs4, Some(ParserState::Ground), Action::None, sink),
                _ => self.transition(ucs4, None, Action::DcsCollect, sink),
            },
            ParserState::DcsIgnore => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x20..=0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x9C => self.transition(ucs4, Some(ParserState::Ground), Action::None, sink),
                _ => self.transition(ucs4, None, Action::Ignore, sink),
            },
            ParserState::OscString => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F => self.transition(ucs4, None, Action::Ignore, sink),
                0x20..=0x7F => self.transition(ucs4, None, Action::OscCollect, sink),
                0x9C => self.transition(ucs4, Some(ParserState::Ground), Action::None, sink),
                _ => self.transition(ucs4, None, Action::OscCollect, sink),
            },
            ParserState::StIgnore => match ucs4 {
                0x00..=0x17 | 0x19 | 0x1C..=0x1F | 0x20..=0x7F => self.transition(ucs4, None, Action::Ignore, sink),
                0x9C => self.transition(ucs4, Some(ParserState::Ground), Action::None, sink),
                _ => self.transition(ucs4, None, Action::Ignore, sink),
            },
        }
    }

    /// Perform a state transition and dispatch the related actions.
    ///
    /// A `None` target fires the action without a transition and without
    /// entry/exit side effects.
    fn transition(&mut self, ucs4: u32, target: Option<ParserState>, action: Action, sink: &mut dyn VtSink) {
        match target {
            Some(next) => {
                self.do_action(ucs4, exit_action(self.state), sink);
                self.do_action(ucs4, action, sink);
                self.do_action(ucs4, entry_action(next), sink);
                self.state = next;
            }
            None => self.do_action(ucs4, action, sink),
        }
    }

    fn do_action(&mut self, ucs4: u32, action: Action, sink: &mut dyn VtSink) {
        match action {
            Action::None | Action::Ignore => {}
            Action::Print => sink.emit(VtCommand::Print(ucs4)),
            Action::Execute => self.execute(ucs4, sink),
            Action::Clear => self.clear(),
            Action::Collect => self.collect(ucs4),
            Action::Param => self.param(ucs4),
            Action::EscDispatch => self.esc_dispatch(ucs4, sink),
            Action::CsiDispatch => self.csi_dispatch(ucs4, sink),
            // String payload hooks. DCS payloads and OSC strings are
            // recognized for state correctness but their content is
            // discarded.
            Action::DcsStart | Action::DcsCollect | Action::DcsEnd => {}
            Action::OscStart | Action::OscCollect | Action::OscEnd => {}
        }
    }

    fn clear(&mut self) {
        self.argc = 0;
        self.argv = [-1; CSI_MAX_PARAMS];
        self.intermediates = [0; INTERMEDIATE_MAX];
        self.intermediate_len = 0;
    }

    fn collect(&mut self, ucs4: u32) {
        // intermediates are always 0x20-0x2F or 0x3C-0x3F here; extra
        // ones beyond the buffer are dropped
        if self.intermediate_len < INTERMEDIATE_MAX {
            self.intermediates[self.intermediate_len] = ucs4 as u8;
            self.intermediate_len += 1;
        }
    }

    fn param(&mut self, ucs4: u32) {
        if ucs4 == u32::from(b';') {
            if self.argc < CSI_MAX_PARAMS {
                self.argc += 1;
            }
            return;
        }

        if self.argc >= CSI_MAX_PARAMS {
            return;
        }

        if let Some(digit) = char::from_u32(ucs4).and_then(|c| c.to_digit(10)) {
            let cur = self.argv[self.argc];
            let new = if cur <= 0 { digit as i32 } else { cur * 10 + digit as i32 };
            self.argv[self.argc] = new.min(PARAM_MAX);
        }
    }

    /// Execute a control character (C0 or C1).
    fn execute(&mut self, ctrl: u32, sink: &mut dyn VtSink) {
        match ctrl {
            // NUL: ignore on input
            0x00 => {}
            // ENQ: transmit answerback message
            0x05 => sink.emit(VtCommand::Enquiry),
            // BEL: sound bell tone
            0x07 => sink.emit(VtCommand::Bell),
            // BS: move cursor one position left
            0x08 => sink.emit(VtCommand::Backspace),
            // HT: move to next tab stop or end of line
            0x09 => sink.emit(VtCommand::Tab),
            // LF/VT/FF: line feed or newline (CR/NL mode)
            0x0A..=0x0C => sink.emit(VtCommand::LineFeed),
            // CR: move cursor to left margin
            0x0D => sink.emit(VtCommand::CarriageReturn),
            // SO/SI: charset shifting is not supported
            0x0E | 0x0F => {}
            // XON/XOFF: flow control is the PTY layer's business
            0x11 | 0x13 => {}
            // CAN: cancel escape sequence; handled by the state machine
            0x18 => {}
            // SUB: discard current sequence and show an error symbol
            0x1A => sink.emit(VtCommand::Substitute),
            // ESC: handled by the state machine
            0x1B => {}
            // US: ignored
            0x1F => {}
            // IND: move down one row, scroll-up if needed
            0x84 => sink.emit(VtCommand::Index),
            // NEL: CR/NL with scroll-up if needed
            0x85 => sink.emit(VtCommand::NextLine),
            // HTS: set tab stop; tab stops are not implemented
            0x88 => {}
            // RI: move up one row, scroll-down if needed
            0x8D => sink.emit(VtCommand::ReverseIndex),
            // SS2/SS3: single shifts are not supported
            0x8E | 0x8F => {}
            // DECID: obsolete device attributes request
            0x9A => {}
            // ST: end of control string; handled by the state machine
            0x9C => {}
            _ => sink.report_error(ParseError::UnsupportedControl { code: ctrl }),
        }
    }

    /// Dispatch an escape sequence by its final character.
    fn esc_dispatch(&mut self, ucs4: u32, sink: &mut dyn VtSink) {
        match char::from_u32(ucs4) {
            // IND: move down one row, scroll-up if needed
            Some('D') => sink.emit(VtCommand::Index),
            // NEL: CR/NL with scroll-up if needed
            Some('E') => sink.emit(VtCommand::NextLine),
            // RI: move up one row, scroll-down if needed
            Some('M') => sink.emit(VtCommand::ReverseIndex),
            // RIS: full reset
            Some('c') => sink.emit(VtCommand::FullReset),
            // DECKPAM: keypad application mode
            Some('=') => sink.emit(VtCommand::KeypadApplicationMode(true)),
            // DECKPNM: keypad numeric mode
            Some('>') => sink.emit(VtCommand::KeypadApplicationMode(false)),
            // HTS, SS2, SS3, DECID, ST: accepted without effect
            Some('H' | 'N' | 'O' | 'Z' | '\\') => {}
            _ => sink.report_error(ParseError::UnsupportedEscape { final_byte: ucs4 }),
        }
    }

    /// Dispatch a CSI sequence by its final character.
    fn csi_dispatch(&mut self, ucs4: u32, sink: &mut dyn VtSink) {
        // the parameter under construction counts too
        if self.argc < CSI_MAX_PARAMS {
            self.argc += 1;
        }

        if self.intermediate_len > 0 {
            if self.intermediates[0] == b'?' {
                self.csi_dispatch_private(ucs4, sink);
            } else {
                sink.report_error(ParseError::UnsupportedCsi { final_byte: ucs4 });
            }
            return;
        }

        match char::from_u32(ucs4) {
            // CUU
            Some('A') => sink.emit(VtCommand::MoveCursor(Direction::Up, self.count(0))),
            // CUD
            Some('B') => sink.emit(VtCommand::MoveCursor(Direction::Down, self.count(0))),
            // CUF
            Some('C') => sink.emit(VtCommand::MoveCursor(Direction::Right, self.count(0))),
            // CUB
            Some('D') => sink.emit(VtCommand::MoveCursor(Direction::Left, self.count(0))),
            // CUP (also HVP)
            Some('H' | 'f') => sink.emit(VtCommand::CursorPosition(self.count(0), self.count(1))),
            // ED
            Some('J') => match EraseInDisplayMode::from_param(self.argv[0]) {
                Some(mode) => sink.emit(VtCommand::EraseInDisplay(mode)),
                None => sink.report_error(ParseError::InvalidParameter {
                    command: "ED",
                    value: self.argv[0],
                }),
            },
            // EL
            Some('K') => match EraseInLineMode::from_param(self.argv[0]) {
                Some(mode) => sink.emit(VtCommand::EraseInLine(mode)),
                None => sink.report_error(ParseError::InvalidParameter {
                    command: "EL",
                    value: self.argv[0],
                }),
            },
            // SGR
            Some('m') => self.sgr_dispatch(sink),
            // DECSCL
            Some('p') => sink.emit(VtCommand::ConformanceLevel(self.argv[0].clamp(0, PARAM_MAX) as u16)),
            // SM
            Some('h') => {
                for i in 0..self.argc {
                    let param = self.argv[i];
                    if param == -1 {
                        continue;
                    }
                    match TerminalMode::from_param(param) {
                        Some(mode) => sink.emit(VtCommand::SetMode(mode)),
                        None => sink.report_error(ParseError::InvalidParameter { command: "SM", value: param }),
                    }
                }
            }
            // RM
            Some('l') => {
                for i in 0..self.argc {
                    let param = self.argv[i];
                    if param == -1 {
                        continue;
                    }
                    match TerminalMode::from_param(param) {
                        Some(mode) => sink.emit(VtCommand::ResetMode(mode)),
                        None => sink.report_error(ParseError::InvalidParameter { command: "RM", value: param }),
                    }
                }
            }
            _ => sink.report_error(ParseError::UnsupportedCsi { final_byte: ucs4 }),
        }
    }

    /// Dispatch a DEC private CSI sequence (collected '?' prefix).
    fn csi_dispatch_private(&mut self, ucs4: u32, sink: &mut dyn VtSink) {
        match char::from_u32(ucs4) {
            // DECSET
            Some('h') => {
                for i in 0..self.argc {
                    let param = self.argv[i];
                    if param == -1 {
                        continue;
                    }
                    match PrivateMode::from_param(param) {
                        Some(mode) => sink.emit(VtCommand::SetPrivateMode(mode)),
                        None => sink.report_error(ParseError::InvalidParameter { command: "DECSET", value: param }),
                    }
                }
            }
            // DECRST
            Some('l') => {
                for i in 0..self.argc {
                    let param = self.argv[i];
                    if param == -1 {
                        continue;
                    }
                    match PrivateMode::from_param(param) {
                        Some(mode) => sink.emit(VtCommand::ResetPrivateMode(mode)),
                        None => sink.report_error(ParseError::InvalidParameter { command: "DECRST", value: param }),
                    }
                }
            }
            _ => sink.report_error(ParseError::UnsupportedCsi { final_byte: ucs4 }),
        }
    }

    /// Apply the SGR parameter list, one command per attribute.
    fn sgr_dispatch(&mut self, sink: &mut dyn VtSink) {
        // a bare ESC[m resets everything
        if self.argv[..self.argc].iter().all(|&v| v == -1) {
            sink.emit(VtCommand::SelectGraphicRendition(SgrAttribute::Reset));
            return;
        }

        for i in 0..self.argc {
            let attr = match self.argv[i] {
                -1 => continue,
                0 => SgrAttribute::Reset,
                1 => SgrAttribute::Bold(true),
                4 => SgrAttribute::Underline(true),
                5 => SgrAttribute::Blink(true),
                7 => SgrAttribute::Inverse(true),
                22 => SgrAttribute::Bold(false),
                24 => SgrAttribute::Underline(false),
                25 => SgrAttribute::Blink(false),
                27 => SgrAttribute::Inverse(false),
                n @ 30..=37 => SgrAttribute::Foreground(TermColor::Ansi((n - 30) as u8)),
                39 => SgrAttribute::Foreground(TermColor::Default),
                n @ 40..=47 => SgrAttribute::Background(TermColor::Ansi((n - 40) as u8)),
                49 => SgrAttribute::Background(TermColor::Default),
                n => {
                    sink.report_error(ParseError::InvalidParameter { command: "SGR", value: n });
                    continue;
                }
            };
            sink.emit(VtCommand::SelectGraphicRendition(attr));
        }
    }

    /// Resolve a CSI count parameter: missing or non-positive values
    /// default to 1.
    fn count(&self, index: usize) -> u16 {
        let num = self.argv[index];
        if num <= 0 { 1 } else { num.min(PARAM_MAX) as u16 }
    }
}
