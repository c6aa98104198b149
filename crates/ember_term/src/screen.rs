//! Screen grid contract
//!
//! The emulator writes into a grid of styled cells through the [`Screen`]
//! trait and never touches display resources itself. Implementations own
//! the cell storage, the cursor and the scrollback history; all bounds
//! clamping is their responsibility, so every operation here has
//! always-succeeding semantics.

use bitflags::bitflags;

/// A 24-bit color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags! {
    /// Cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttrFlags: u8 {
        const BOLD      = 0b0000_0001;
        const UNDERLINE = 0b0000_0010;
        const INVERSE   = 0b0000_0100;
        const BLINK     = 0b0000_1000;
        const PROTECT   = 0b0001_0000;
    }
}

/// Per-cell rendering attributes.
///
/// Always a total value; there is no partially-assigned state. The
/// default is white on black with all flags clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttributes {
    pub foreground: Rgb,
    pub background: Rgb,
    pub flags: AttrFlags,
}

impl Default for CellAttributes {
    fn default() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
            flags: AttrFlags::empty(),
        }
    }
}

/// RGB values for the 8 ANSI base colors (SGR 30-37 / 40-47), in ANSI
/// order: black, red, green, yellow, blue, magenta, cyan, white.
pub const ANSI_PALETTE: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(255, 255, 255),
];

/// The grid the emulator writes into.
///
/// Coordinates are 0-indexed with the origin in the top-left corner; the
/// cursor stays within `[0, width) x [0, height)` after every operation.
pub trait Screen {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Change the grid dimensions. Content outside the new bounds is
    /// dropped; the cursor is clamped.
    fn resize(&mut self, width: usize, height: usize);

    /// Write a character at the cursor and advance it, wrapping to the
    /// next line (scrolling up if needed) past the last column.
    fn write(&mut self, ch: char, attr: &CellAttributes);

    /// CR plus LF: cursor to column 0 of the next row, scrolling up at
    /// the bottom.
    fn newline(&mut self);

    /// Cursor to column 0 of the current row.
    fn move_line_home(&mut self);

    /// Cursor up by `num` rows. With `scroll`, rows scroll down when the
    /// cursor would leave the top; otherwise it stops there.
    fn move_up(&mut self, num: usize, scroll: bool);

    /// Cursor down by `num` rows. With `scroll`, rows scroll up into the
    /// history when the cursor would leave the bottom.
    fn move_down(&mut self, num: usize, scroll: bool);

    fn move_left(&mut self, num: usize);
    fn move_right(&mut self, num: usize);

    /// Absolute cursor addressing, clamped to the grid.
    fn move_to(&mut self, x: usize, y: usize);

    /// Erase from the cursor to the end of the current line.
    fn erase_cursor_to_end(&mut self);
    /// Erase from the start of the current line to the cursor.
    fn erase_home_to_cursor(&mut self);
    /// Erase the current line.
    fn erase_current_line(&mut self);
    /// Erase from the cursor to the end of the screen.
    fn erase_cursor_to_screen(&mut self);
    /// Erase from the start of the screen to the cursor.
    fn erase_screen_to_cursor(&mut self);
    /// Erase the whole screen.
    fn erase_screen(&mut self);

    /// Hard reset: blank grid, cursor home, scrollback dropped.
    fn reset(&mut self);

    /// Scroll the view `num` lines into the history. Screens without
    /// history may ignore the whole scrollback group.
    fn scrollback_up(&mut self, _num: usize) {}
    /// Scroll the view `num` lines back towards the present.
    fn scrollback_down(&mut self, _num: usize) {}
    fn scrollback_page_up(&mut self, _num: usize) {}
    fn scrollback_page_down(&mut self, _num: usize) {}
    /// Snap the view back to the live screen.
    fn scrollback_reset(&mut self) {}
}
