//! Sequence dispatch
//!
//! [`Vte`] is the screen-facing half of the emulator: it feeds PTY bytes
//! through the UTF-8 machine and the escape sequence parser, applies the
//! resulting commands to a [`Screen`], tracks the current cell attributes
//! and the terminal mode flags, and emits reply bytes (answerback and the
//! keyboard sequences) to the PTY writer.
//!
//! Everything runs to completion per fed byte; replies are written
//! synchronously and never re-enter the parser.

use bitflags::bitflags;
use ember_parser_core::{
    Direction, EraseInDisplayMode, EraseInLineMode, ParseError, PrivateMode, SgrAttribute, TermColor, TerminalMode, Utf8Machine, Utf8State, VtCommand,
    VtParser, VtSink,
};

use crate::PtyWrite;
use crate::keyboard::{self, InputEvent};
use crate::screen::{ANSI_PALETTE, AttrFlags, CellAttributes, Rgb, Screen};

bitflags! {
    /// Terminal mode flags, set by control sequences and consulted by
    /// both dispatch and the keyboard translator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TermFlags: u8 {
        /// DECCKM: cursor keys send SS3 sequences
        const CURSOR_KEY_MODE = 0b0000_0001;
        /// DECKPAM: keypad sends application sequences
        const KEYPAD_APPLICATION_MODE = 0b0000_0010;
        /// LNM: LF implies CR, Return sends CR LF
        const LINE_FEED_NEW_LINE_MODE = 0b0000_0100;
    }
}

/// The VT emulation engine.
pub struct Vte {
    utf8: Utf8Machine,
    parser: VtParser,
    attr: CellAttributes,
    flags: TermFlags,
}

impl Default for Vte {
    fn default() -> Self {
        Self::new()
    }
}

impl Vte {
    pub fn new() -> Self {
        Self {
            utf8: Utf8Machine::new(),
            parser: VtParser::new(),
            attr: CellAttributes::default(),
            flags: TermFlags::empty(),
        }
    }

    /// Current cell attributes (applied to subsequently printed text).
    pub fn attributes(&self) -> &CellAttributes {
        &self.attr
    }

    pub fn flags(&self) -> TermFlags {
        self.flags
    }

    /// Feed raw PTY bytes through decoding, parsing and dispatch.
    pub fn input(&mut self, bytes: &[u8], screen: &mut dyn Screen, pty: &mut dyn PtyWrite) {
        for &byte in bytes {
            match self.utf8.feed(byte) {
                Utf8State::Accept | Utf8State::Reject => {
                    let ucs4 = self.utf8.get();
                    self.parse(ucs4, screen, pty);
                }
                _ => {}
            }
        }
    }

    fn parse(&mut self, ucs4: u32, screen: &mut dyn Screen, pty: &mut dyn PtyWrite) {
        let mut dispatch = Dispatcher {
            attr: &mut self.attr,
            flags: &mut self.flags,
            screen,
            pty,
            hard_reset: false,
        };
        self.parser.feed(ucs4, &mut dispatch);
        if dispatch.hard_reset {
            self.parser.reset();
            self.utf8.reset();
        }
    }

    /// Reset the emulator to its initial state (RIS-equivalent).
    pub fn hard_reset(&mut self, screen: &mut dyn Screen) {
        self.parser.reset();
        self.utf8.reset();
        self.attr = CellAttributes::default();
        self.flags = TermFlags::empty();
        screen.reset();
    }

    /// Translate a keyboard event into bytes on the PTY writer. Returns
    /// whether the event produced output.
    pub fn handle_keyboard(&self, ev: &InputEvent, pty: &mut dyn PtyWrite) -> bool {
        keyboard::translate(ev, self.flags, pty)
    }
}

/// Applies parsed commands to the screen. Only this type writes to the
/// grid.
struct Dispatcher<'a> {
    attr: &'a mut CellAttributes,
    flags: &'a mut TermFlags,
    screen: &'a mut dyn Screen,
    pty: &'a mut dyn PtyWrite,
    hard_reset: bool,
}

impl Dispatcher<'_> {
    fn apply_sgr(&mut self, attr: SgrAttribute) {
        match attr {
            SgrAttribute::Reset => *self.attr = CellAttributes::default(),
            SgrAttribute::Bold(on) => self.attr.flags.set(AttrFlags::BOLD, on),
            SgrAttribute::Underline(on) => self.attr.flags.set(AttrFlags::UNDERLINE, on),
            SgrAttribute::Blink(on) => self.attr.flags.set(AttrFlags::BLINK, on),
            SgrAttribute::Inverse(on) => self.attr.flags.set(AttrFlags::INVERSE, on),
            SgrAttribute::Foreground(color) => self.attr.foreground = resolve_color(color, Rgb::WHITE),
            SgrAttribute::Background(color) => self.attr.background = resolve_color(color, Rgb::BLACK),
        }
    }
}

fn resolve_color(color: TermColor, default: Rgb) -> Rgb {
    match color {
        TermColor::Default => default,
        TermColor::Ansi(index) => ANSI_PALETTE[usize::from(index) & 7],
    }
}

impl VtSink for Dispatcher<'_> {
    fn emit(&mut self, cmd: VtCommand) {
        match cmd {
            VtCommand::Print(ucs4) => {
                // surrogate halves cannot appear in valid UTF-8, but the
                // decoder lets them through as raw scalars
                let ch = char::from_u32(ucs4).unwrap_or('\u{FFFD}');
                self.screen.write(ch, self.attr);
            }
            // the bell stays silent and tab stops are not implemented
            VtCommand::Bell | VtCommand::Tab => {}
            VtCommand::Backspace => self.screen.move_left(1),
            VtCommand::LineFeed => {
                if self.flags.contains(TermFlags::LINE_FEED_NEW_LINE_MODE) {
                    self.screen.newline();
                } else {
                    self.screen.move_down(1, true);
                }
            }
            VtCommand::CarriageReturn => self.screen.move_line_home(),
            VtCommand::Enquiry => self.pty.write(b"\x06"),
            VtCommand::Substitute => self.screen.write('\u{BF}', self.attr),
            VtCommand::Index => self.screen.move_down(1, true),
            VtCommand::NextLine => self.screen.newline(),
            VtCommand::ReverseIndex => self.screen.move_up(1, true),
            VtCommand::FullReset => {
                *self.attr = CellAttributes::default();
                *self.flags = TermFlags::empty();
                self.screen.reset();
                self.hard_reset = true;
            }
            VtCommand::KeypadApplicationMode(on) => {
                self.flags.set(TermFlags::KEYPAD_APPLICATION_MODE, on);
            }
            VtCommand::MoveCursor(direction, num) => {
                let num = usize::from(num);
                match direction {
                    Direction::Up => self.screen.move_up(num, false),
                    Direction::Down => self.screen.move_down(num, false),
                    Direction::Right => self.screen.move_right(num),
                    Direction::Left => self.screen.move_left(num),
                }
            }
            VtCommand::CursorPosition(row, col) => {
                self.screen.move_to(usize::from(col) - 1, usize::from(row) - 1);
            }
            VtCommand::EraseInDisplay(mode) => match mode {
                EraseInDisplayMode::CursorToEnd => self.screen.erase_cursor_to_screen(),
                EraseInDisplayMode::StartToCursor => self.screen.erase_screen_to_cursor(),
                EraseInDisplayMode::All => self.screen.erase_screen(),
            },
            VtCommand::EraseInLine(mode) => match mode {
                EraseInLineMode::CursorToEnd => self.screen.erase_cursor_to_end(),
                EraseInLineMode::StartToCursor => self.screen.erase_home_to_cursor(),
                EraseInLineMode::All => self.screen.erase_current_line(),
            },
            VtCommand::SelectGraphicRendition(attr) => self.apply_sgr(attr),
            VtCommand::ConformanceLevel(level) => match level {
                // vt100 and vt220 conformance: we are compatible enough
                // with both, and always send 7-bit controls, so there is
                // nothing to switch
                61 | 62 => {}
                _ => log::debug!("unhandled DECSCL level {level}"),
            },
            VtCommand::SetMode(TerminalMode::LineFeedNewLine) => {
                self.flags.insert(TermFlags::LINE_FEED_NEW_LINE_MODE);
            }
            VtCommand::ResetMode(TerminalMode::LineFeedNewLine) => {
                self.flags.remove(TermFlags::LINE_FEED_NEW_LINE_MODE);
            }
            VtCommand::SetPrivateMode(PrivateMode::CursorKeys) => {
                self.flags.insert(TermFlags::CURSOR_KEY_MODE);
            }
            VtCommand::ResetPrivateMode(PrivateMode::CursorKeys) => {
                self.flags.remove(TermFlags::CURSOR_KEY_MODE);
            }
        }
    }

    fn report_error(&mut self, error: ParseError) {
        log::debug!("{error}");
    }
}
