//! Terminal emulator engine
//!
//! Applies the command stream produced by [`ember_parser_core`] to a
//! screen grid, translates keyboard events into the byte sequences a
//! vt100/vt220 application expects, and hosts an optional input method
//! for composed text. The screen itself is a collaborator behind the
//! [`Screen`] trait; this crate owns no display resources.

mod error;
pub use error::TermError;

mod input_method;
pub use input_method::{DictEntry, InputMethod};

mod keyboard;
pub use keyboard::{InputEvent, Keysym, Modifiers};

mod screen;
pub use screen::{ANSI_PALETTE, AttrFlags, CellAttributes, Rgb, Screen};

mod terminal;
pub use terminal::Terminal;

mod vte;
pub use vte::{TermFlags, Vte};

/// Byte sink towards the client application (the PTY master side).
///
/// Writes are best-effort and must not block; a sink that buffers
/// internally must deliver bytes in FIFO order. Implementations must not
/// feed bytes back into the emulator synchronously.
pub trait PtyWrite {
    fn write(&mut self, bytes: &[u8]);
}

impl PtyWrite for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}
