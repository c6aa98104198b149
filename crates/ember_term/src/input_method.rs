//! Input method
//!
//! A logic-only input method for composed text (the shipped dictionary
//! format is pinyin-shaped, but nothing here depends on that): letter
//! keys accumulate in a preedit buffer, the preedit is looked up in a
//! sorted dictionary, and the selected candidate is committed to the PTY
//! as UTF-8. Rendering of the preedit and candidate list is the
//! embedder's job; this type only exposes the state to draw.
//!
//! While the method is active it sees key events before the keyboard
//! translator; events it does not handle fall through unchanged.

use crate::PtyWrite;
use crate::error::TermError;
use crate::keyboard::{InputEvent, Keysym};

/// One dictionary mapping: an ASCII key in `[a-z]+` to the candidate
/// code points it can produce.
#[derive(Debug, Clone)]
pub struct DictEntry {
    pub key: String,
    pub candidates: Vec<char>,
}

/// Input method state machine.
pub struct InputMethod {
    preedit: Vec<u8>,
    dictionary: Vec<DictEntry>,
    candidates: Vec<char>,
    selected: Option<usize>,
    active: bool,
}

impl Default for InputMethod {
    fn default() -> Self {
        Self::new()
    }
}

impl InputMethod {
    pub fn new() -> Self {
        Self {
            preedit: Vec::new(),
            dictionary: Vec::new(),
            candidates: Vec::new(),
            selected: None,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The uncommitted input, for rendering.
    pub fn preedit(&self) -> &[u8] {
        &self.preedit
    }

    /// The current candidate list, for rendering.
    pub fn candidates(&self) -> &[char] {
        &self.candidates
    }

    /// Index of the selected candidate; `None` iff the list is empty.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Drop the preedit, the candidates and the selection.
    pub fn reset(&mut self) {
        self.preedit.clear();
        self.candidates.clear();
        self.selected = None;
    }

    /// Populate the dictionary through `loader` and sort it by key. The
    /// loader may deliver entries in any order; duplicate keys are kept
    /// and resolve to the left-most entry on lookup.
    pub fn load_dictionary<F>(&mut self, loader: F) -> Result<(), TermError>
    where
        F: FnOnce(&mut Vec<DictEntry>) -> std::io::Result<()>,
    {
        self.dictionary.clear();
        loader(&mut self.dictionary)?;

        let bad_key = self
            .dictionary
            .iter()
            .find(|entry| entry.key.is_empty() || !entry.key.bytes().all(|b| b.is_ascii_lowercase()))
            .map(|entry| entry.key.clone());
        if let Some(key) = bad_key {
            self.dictionary.clear();
            return Err(TermError::InvalidDictionaryKey(key));
        }

        self.dictionary.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(())
    }

    /// Process one key event. Returns whether the event was consumed;
    /// unconsumed events are meant for the regular keyboard path.
    pub fn handle_key(&mut self, ev: &InputEvent, pty: &mut dyn PtyWrite) -> bool {
        let mut handled = false;
        let mut changed = false;

        match ev.keysym {
            Keysym::Char(c) if c.is_ascii_alphabetic() => {
                self.preedit.push(c.to_ascii_lowercase() as u8);
                changed = true;
            }
            Keysym::Char(' ') => {
                // commit the selected candidate; with nothing selected
                // the space falls through to the keyboard path
                if let Some(selected) = self.selected {
                    let mut buf = [0u8; 4];
                    pty.write(self.candidates[selected].encode_utf8(&mut buf).as_bytes());
                    self.preedit.clear();
                    self.candidates.clear();
                    self.selected = None;
                    return true;
                }
            }
            Keysym::Right => {
                if let Some(selected) = self.selected {
                    if selected + 1 < self.candidates.len() {
                        self.selected = Some(selected + 1);
                        handled = true;
                    }
                }
            }
            Keysym::Left => {
                if let Some(selected) = self.selected {
                    if selected > 0 {
                        self.selected = Some(selected - 1);
                        handled = true;
                    }
                }
            }
            Keysym::Home => {
                if let Some(selected) = self.selected {
                    if selected > 0 {
                        self.selected = Some(0);
                        handled = true;
                    }
                }
            }
            Keysym::End => {
                if let Some(selected) = self.selected {
                    if selected + 1 < self.candidates.len() {
                        self.selected = Some(self.candidates.len() - 1);
                        handled = true;
                    }
                }
            }
            Keysym::Return => {
                // send the raw preedit through unconverted
                if !self.preedit.is_empty() {
                    pty.write(&self.preedit);
                    self.preedit.clear();
                    changed = true;
                    handled = true;
                }
            }
            Keysym::Escape => {
                self.reset();
                handled = true;
            }
            Keysym::BackSpace => {
                if !self.preedit.is_empty() {
                    self.preedit.pop();
                    changed = true;
                    handled = true;
                }
            }
            _ => {}
        }

        if !changed {
            return handled;
        }

        self.candidates.clear();
        self.selected = None;

        if !self.preedit.is_empty() {
            self.lookup();
        }
        true
    }

    /// Binary search for the full preedit string; duplicate keys resolve
    /// to the left-most entry.
    fn lookup(&mut self) {
        let index = self.dictionary.partition_point(|e| e.key.as_bytes() < self.preedit.as_slice());
        if let Some(entry) = self.dictionary.get(index) {
            if entry.key.as_bytes() == self.preedit.as_slice() {
                self.candidates.extend_from_slice(&entry.candidates);
                self.selected = Some(0);
            }
        }
    }
}
