mod common;

use common::TestScreen;
use ember_term::{InputEvent, Keysym, Modifiers, Vte};
use pretty_assertions::assert_eq;

fn bytes_for(vte: &Vte, ev: InputEvent) -> Vec<u8> {
    let mut pty: Vec<u8> = Vec::new();
    vte.handle_keyboard(&ev, &mut pty);
    pty
}

fn ctrl(c: char) -> InputEvent {
    InputEvent::new(Modifiers::CONTROL, Keysym::Char(c), Some(c))
}

/// Feed a control sequence so the emulation flips its own mode flags.
fn vte_with_modes(sequences: &[u8]) -> Vte {
    let mut vte = Vte::new();
    let mut screen = TestScreen::new(80, 24);
    let mut pty: Vec<u8> = Vec::new();
    vte.input(sequences, &mut screen, &mut pty);
    vte
}

#[test]
fn ctrl_letters_map_to_c0_controls() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, ctrl('a')), vec![0x01]);
    assert_eq!(bytes_for(&vte, ctrl('m')), vec![0x0D]);
    assert_eq!(bytes_for(&vte, ctrl('z')), vec![0x1A]);
    // shifted letters produce the same control
    assert_eq!(bytes_for(&vte, ctrl('C')), vec![0x03]);
}

#[test]
fn ctrl_digits_and_punctuation() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, ctrl(' ')), vec![0x00]);
    assert_eq!(bytes_for(&vte, ctrl('2')), vec![0x00]);
    assert_eq!(bytes_for(&vte, ctrl('3')), vec![0x1B]);
    assert_eq!(bytes_for(&vte, ctrl('[')), vec![0x1B]);
    assert_eq!(bytes_for(&vte, ctrl('{')), vec![0x1B]);
    assert_eq!(bytes_for(&vte, ctrl('4')), vec![0x1C]);
    assert_eq!(bytes_for(&vte, ctrl('\\')), vec![0x1C]);
    assert_eq!(bytes_for(&vte, ctrl('|')), vec![0x1C]);
    assert_eq!(bytes_for(&vte, ctrl('5')), vec![0x1D]);
    assert_eq!(bytes_for(&vte, ctrl(']')), vec![0x1D]);
    assert_eq!(bytes_for(&vte, ctrl('}')), vec![0x1D]);
    assert_eq!(bytes_for(&vte, ctrl('6')), vec![0x1E]);
    assert_eq!(bytes_for(&vte, ctrl('`')), vec![0x1E]);
    assert_eq!(bytes_for(&vte, ctrl('~')), vec![0x1E]);
    assert_eq!(bytes_for(&vte, ctrl('7')), vec![0x1F]);
    assert_eq!(bytes_for(&vte, ctrl('/')), vec![0x1F]);
    assert_eq!(bytes_for(&vte, ctrl('?')), vec![0x1F]);
    assert_eq!(bytes_for(&vte, ctrl('8')), vec![0x7F]);
}

#[test]
fn ctrl_with_unmapped_key_falls_back_to_unicode() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, ctrl('9')), b"9");
}

#[test]
fn named_keys() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::BackSpace)), vec![0x08]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Tab)), vec![0x09]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Linefeed)), vec![0x0A]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Clear)), vec![0x0B]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Pause)), vec![0x13]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::ScrollLock)), vec![0x14]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::SysReq)), vec![0x15]);
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Escape)), vec![0x1B]);
}

#[test]
fn return_sends_cr_and_cr_lf_in_new_line_mode() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Return)), b"\r");

    let vte = vte_with_modes(b"\x1b[20h");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Return)), b"\r\n");
}

#[test]
fn keypad_enter_follows_keypad_mode_first() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::KpEnter)), b"\r");

    let vte = vte_with_modes(b"\x1b=");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::KpEnter)), b"\x1bOM");

    // keypad application beats new-line mode
    let vte = vte_with_modes(b"\x1b[20h\x1b=");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::KpEnter)), b"\x1bOM");
}

#[test]
fn editing_and_paging_keys() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Insert)), b"\x1b[2~");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Delete)), b"\x1b[3~");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::PageUp)), b"\x1b[5~");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::PageDown)), b"\x1b[6~");
}

#[test]
fn navigation_keys_without_cursor_key_mode() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Up)), b"\x1b[A");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Down)), b"\x1b[B");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Right)), b"\x1b[C");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Left)), b"\x1b[D");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Home)), b"\x1b[H");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::End)), b"\x1b[F");
}

#[test]
fn navigation_keys_with_cursor_key_mode() {
    let vte = vte_with_modes(b"\x1b[?1h");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Up)), b"\x1bOA");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Down)), b"\x1bOB");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Right)), b"\x1bOC");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Left)), b"\x1bOD");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::Home)), b"\x1bOH");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::End)), b"\x1bOF");
}

#[test]
fn keypad_digits_in_both_modes() {
    let digits = [
        (Keysym::Kp0, b"0", b"\x1bOp"),
        (Keysym::Kp1, b"1", b"\x1bOq"),
        (Keysym::Kp2, b"2", b"\x1bOr"),
        (Keysym::Kp3, b"3", b"\x1bOs"),
        (Keysym::Kp4, b"4", b"\x1bOt"),
        (Keysym::Kp5, b"5", b"\x1bOu"),
        (Keysym::Kp6, b"6", b"\x1bOv"),
        (Keysym::Kp7, b"7", b"\x1bOw"),
        (Keysym::Kp8, b"8", b"\x1bOx"),
        (Keysym::Kp9, b"9", b"\x1bOy"),
    ];

    let plain = Vte::new();
    let application = vte_with_modes(b"\x1b=");
    for (key, normal, app) in digits {
        assert_eq!(bytes_for(&plain, InputEvent::key(key)), normal);
        assert_eq!(bytes_for(&application, InputEvent::key(key)), app);
    }
}

#[test]
fn keypad_operators_in_both_modes() {
    let plain = Vte::new();
    let application = vte_with_modes(b"\x1b=");

    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpSubtract)), b"-");
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpSubtract)), b"\x1bOm");
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpSeparator)), b",");
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpSeparator)), b"\x1bOl");
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpMultiply)), b"*");
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpMultiply)), b"\x1bOo");
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpAdd)), b"+");
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpAdd)), b"\x1bOk");
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpSpace)), b" ");
}

#[test]
fn keypad_shared_sequences() {
    // KP_Delete/KP_Decimal and KP_Equal/KP_Divide pairs share output
    let application = vte_with_modes(b"\x1b=");
    assert_eq!(
        bytes_for(&application, InputEvent::key(Keysym::KpDelete)),
        bytes_for(&application, InputEvent::key(Keysym::KpDecimal))
    );
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpDecimal)), b"\x1bOn");
    assert_eq!(
        bytes_for(&application, InputEvent::key(Keysym::KpEqual)),
        bytes_for(&application, InputEvent::key(Keysym::KpDivide))
    );
    assert_eq!(bytes_for(&application, InputEvent::key(Keysym::KpDivide)), b"\x1bOj");

    let plain = Vte::new();
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpDelete)), b".");
    assert_eq!(bytes_for(&plain, InputEvent::key(Keysym::KpEqual)), b"/");
}

#[test]
fn function_keys() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::F1)), b"\x1bOP");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::F2)), b"\x1bOQ");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::F3)), b"\x1bOR");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::F4)), b"\x1bOS");
    assert_eq!(bytes_for(&vte, InputEvent::key(Keysym::KpF1)), b"\x1bOP");

    let expected: [(&[u8], Keysym); 16] = [
        (b"\x1b[15~", Keysym::F5),
        (b"\x1b[17~", Keysym::F6),
        (b"\x1b[18~", Keysym::F7),
        (b"\x1b[19~", Keysym::F8),
        (b"\x1b[20~", Keysym::F9),
        (b"\x1b[21~", Keysym::F10),
        (b"\x1b[23~", Keysym::F11),
        (b"\x1b[24~", Keysym::F12),
        (b"\x1b[25~", Keysym::F13),
        (b"\x1b[26~", Keysym::F14),
        (b"\x1b[28~", Keysym::F15),
        (b"\x1b[29~", Keysym::F16),
        (b"\x1b[31~", Keysym::F17),
        (b"\x1b[32~", Keysym::F18),
        (b"\x1b[33~", Keysym::F19),
        (b"\x1b[34~", Keysym::F20),
    ];
    for (bytes, key) in expected {
        assert_eq!(bytes_for(&vte, InputEvent::key(key)), bytes);
    }
}

#[test]
fn plain_characters_encode_as_utf8() {
    let vte = Vte::new();
    assert_eq!(bytes_for(&vte, InputEvent::ch('x')), b"x");
    assert_eq!(bytes_for(&vte, InputEvent::ch('ü')), "ü".as_bytes());
    assert_eq!(bytes_for(&vte, InputEvent::ch('你')), "你".as_bytes());
}

#[test]
fn event_without_mapping_or_unicode_is_not_handled() {
    let vte = Vte::new();
    let mut pty: Vec<u8> = Vec::new();
    let handled = vte.handle_keyboard(&InputEvent::key(Keysym::Unknown), &mut pty);
    assert!(!handled);
    assert_eq!(pty, b"");
}
