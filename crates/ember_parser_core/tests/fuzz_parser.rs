use ember_parser_core::{ParseError, Utf8Machine, Utf8State, VtCommand, VtParser, VtSink};

/// A no-op sink that just counts calls - perfect for fuzzing
struct FuzzSink {
    command_count: usize,
    error_count: usize,
}

impl FuzzSink {
    fn new() -> Self {
        Self {
            command_count: 0,
            error_count: 0,
        }
    }
}

impl VtSink for FuzzSink {
    fn emit(&mut self, _cmd: VtCommand) {
        self.command_count += 1;
    }

    fn report_error(&mut self, _error: ParseError) {
        self.error_count += 1;
    }
}

/// Generate hostile input patterns
fn generate_fuzz_patterns() -> Vec<Vec<u8>> {
    let mut patterns: Vec<Vec<u8>> = Vec::new();

    // every byte value once
    patterns.push((0..=255).collect());

    // escape sequence fragments
    patterns.push(b"\x1B".to_vec());
    patterns.push(b"\x1B[".to_vec());
    patterns.push(b"\x1B[;".to_vec());
    patterns.push(b"\x1B[;;;;;;;".to_vec());
    patterns.push(b"\x1B[999999999999999999999".to_vec());
    patterns.push(b"\x1B]never terminated".to_vec());
    patterns.push(b"\x1BP1;2;3|dcs data".to_vec());

    // CSI sequences with every possible terminator
    for i in 0..=255u8 {
        patterns.push(vec![0x1B, b'[', b'1', i]);
    }

    // nested/interrupted sequences
    patterns.push(b"\x1B[1;\x1B[2J".to_vec());
    patterns.push(b"\x1B\x1B\x1B\x1B".to_vec());
    patterns.push(b"\x1B[\x18\x1B[\x1A".to_vec());

    // invalid and overlong UTF-8 mixed with sequences
    patterns.push(b"\xC0\x80\x1B[31m\xFF\xFE".to_vec());
    patterns.push(b"\xE4\xBD\x1B[2J\xA0".to_vec());
    patterns.push(b"\x80\x80\x80\x80".to_vec());

    // deterministic pseudo-random soup
    let mut x: u32 = 0x1234_5678;
    let mut soup = Vec::with_capacity(4096);
    for _ in 0..4096 {
        x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        soup.push((x >> 24) as u8);
    }
    patterns.push(soup);

    patterns
}

#[test]
fn parser_is_total_on_arbitrary_input() {
    for pattern in generate_fuzz_patterns() {
        let mut mach = Utf8Machine::new();
        let mut parser = VtParser::new();
        let mut sink = FuzzSink::new();

        for &byte in &pattern {
            match mach.feed(byte) {
                Utf8State::Accept | Utf8State::Reject => parser.feed(mach.get(), &mut sink),
                _ => {}
            }
        }

        // whatever happened, the parser must still be able to print
        parser.reset();
        let before = sink.command_count;
        parser.feed(u32::from(b'A'), &mut sink);
        assert_eq!(sink.command_count, before + 1, "parser wedged after {:02X?}...", &pattern[..pattern.len().min(8)]);
    }
}

#[test]
fn parameter_vector_never_exceeds_bounds() {
    let mut parser = VtParser::new();
    let mut sink = FuzzSink::new();

    let mut seq = b"\x1B[".to_vec();
    for _ in 0..100 {
        seq.extend_from_slice(b"65536;");
    }
    seq.push(b'H');

    for &b in &seq {
        parser.feed(u32::from(b), &mut sink);
        assert!(parser.param_count() <= 16);
        assert!(parser.params().iter().all(|&p| (-1..=0xFFFF).contains(&p)));
    }
}
