//! Terminal session
//!
//! A terminal gets assigned a byte stream and a screen and then runs a
//! fully functional terminal emulation on it: PTY output through the VT
//! engine, key events through the input method (when active) and the
//! keyboard translator, and a scrollback view over the screen's history.
//! The event loop, the PTY device and the renderer all live outside.

use crate::PtyWrite;
use crate::error::TermError;
use crate::input_method::{DictEntry, InputMethod};
use crate::keyboard::InputEvent;
use crate::screen::Screen;
use crate::vte::Vte;

/// One terminal session: screen, VT engine, input method and PTY writer.
pub struct Terminal<S: Screen, W: PtyWrite> {
    screen: S,
    pty: W,
    vte: Vte,
    im: InputMethod,
}

impl<S: Screen, W: PtyWrite> Terminal<S, W> {
    pub fn new(screen: S, pty: W) -> Self {
        Self {
            screen,
            pty,
            vte: Vte::new(),
            im: InputMethod::new(),
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn pty(&self) -> &W {
        &self.pty
    }

    pub fn pty_mut(&mut self) -> &mut W {
        &mut self.pty
    }

    pub fn vte(&self) -> &Vte {
        &self.vte
    }

    pub fn input_method(&self) -> &InputMethod {
        &self.im
    }

    /// Feed bytes read from the PTY into the emulation.
    pub fn input(&mut self, bytes: &[u8]) {
        self.vte.input(bytes, &mut self.screen, &mut self.pty);
    }

    /// Route one key event. The input method gets the first look while it
    /// is active; everything it does not consume goes through the
    /// keyboard translator. A translated key snaps the scrollback view
    /// back to the live screen.
    pub fn handle_key(&mut self, ev: &InputEvent) -> bool {
        if self.im.is_active() && self.im.handle_key(ev, &mut self.pty) {
            return true;
        }

        if self.vte.handle_keyboard(ev, &mut self.pty) {
            self.screen.scrollback_reset();
            return true;
        }
        false
    }

    /// Flip input method activity; activation starts from a clean
    /// preedit.
    pub fn toggle_input_method(&mut self) {
        let active = !self.im.is_active();
        self.im.set_active(active);
        if active {
            self.im.reset();
        }
    }

    /// Load the input method dictionary. Done once at startup; a failing
    /// loader is fatal to the session.
    pub fn load_dictionary<F>(&mut self, loader: F) -> Result<(), TermError>
    where
        F: FnOnce(&mut Vec<DictEntry>) -> std::io::Result<()>,
    {
        self.im.load_dictionary(loader)
    }

    /// Reset emulation and screen to their initial state.
    pub fn hard_reset(&mut self) {
        self.vte.hard_reset(&mut self.screen);
    }

    /// Propagate a display size change to the screen. Notifying the PTY
    /// of the new size is the embedder's job.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen.resize(cols, rows);
    }

    pub fn scrollback_up(&mut self, num: usize) {
        self.screen.scrollback_up(num);
    }

    pub fn scrollback_down(&mut self, num: usize) {
        self.screen.scrollback_down(num);
    }

    pub fn scrollback_page_up(&mut self, num: usize) {
        self.screen.scrollback_page_up(num);
    }

    pub fn scrollback_page_down(&mut self, num: usize) {
        self.screen.scrollback_page_down(num);
    }
}
