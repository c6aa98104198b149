use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ember_parser_core::{Utf8Machine, Utf8State, VtCommand, VtParser, VtSink};

struct NullSink;
impl VtSink for NullSink {
    #[inline]
    fn emit(&mut self, _cmd: VtCommand) { /* discard */
    }
}

fn make_synthetic_inputs() -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
    // 1. Pure text with minimal sequences (realistic terminal output)
    let mut text_heavy = Vec::new();
    for i in 0..1000 {
        text_heavy.extend_from_slice(b"\x1B[32mLine ");
        text_heavy.extend_from_slice(i.to_string().as_bytes());
        text_heavy.extend_from_slice(b": Some text content here\x1B[0m\n");
    }

    // 2. CSI sequence heavy (lots of cursor movements)
    let mut csi_heavy = Vec::new();
    for y in 0..100 {
        for x in 0..80 {
            csi_heavy.extend_from_slice(format!("\x1B[{};{}H*", y, x).as_bytes());
        }
    }

    // 3. SGR color-heavy (typical colorized output)
    let mut color_heavy = Vec::new();
    for _ in 0..1000 {
        color_heavy.extend_from_slice(b"\x1B[31mRed\x1B[0m \x1B[32mGreen\x1B[0m \x1B[34mBlue\x1B[0m ");
        color_heavy.extend_from_slice(b"\x1B[1;33mBold Yellow\x1B[0m\n");
    }

    // 4. Mixed content (text, controls, sequences, multi-byte UTF-8)
    let mut mixed = Vec::new();
    for i in 0..500 {
        mixed.extend_from_slice(format!("\x1B[{};1H", i % 24 + 1).as_bytes());
        mixed.extend_from_slice(b"\x1B[2KClearing line and writing text\n");
        mixed.extend_from_slice("Normal text with \u{4f60}\u{597d} and \x08backspace\t and tab\r\n".as_bytes());
        mixed.extend_from_slice(b"\x1B[1;32mColored text\x1B[0m");
    }

    (text_heavy, csi_heavy, color_heavy, mixed)
}

/// Run a byte stream through the decode + parse pipeline.
#[inline]
fn run_pipeline(mach: &mut Utf8Machine, parser: &mut VtParser, sink: &mut NullSink, data: &[u8]) {
    for &byte in data {
        match mach.feed(byte) {
            Utf8State::Accept | Utf8State::Reject => parser.feed(mach.get(), sink),
            _ => {}
        }
    }
}

fn bench_vt_parser(c: &mut Criterion) {
    let (text_heavy, csi_heavy, color_heavy, mixed) = make_synthetic_inputs();
    let mut group = c.benchmark_group("vt_parser");

    group.throughput(Throughput::Bytes(text_heavy.len() as u64));
    group.bench_function("parse_text_heavy", |b| {
        let mut mach = Utf8Machine::new();
        let mut parser = VtParser::new();
        let mut sink = NullSink;
        b.iter(|| {
            run_pipeline(&mut mach, &mut parser, &mut sink, black_box(&text_heavy));
        });
    });

    group.throughput(Throughput::Bytes(csi_heavy.len() as u64));
    group.bench_function("parse_csi_heavy", |b| {
        let mut mach = Utf8Machine::new();
        let mut parser = VtParser::new();
        let mut sink = NullSink;
        b.iter(|| {
            run_pipeline(&mut mach, &mut parser, &mut sink, black_box(&csi_heavy));
        });
    });

    group.throughput(Throughput::Bytes(color_heavy.len() as u64));
    group.bench_function("parse_color_heavy", |b| {
        let mut mach = Utf8Machine::new();
        let mut parser = VtParser::new();
        let mut sink = NullSink;
        b.iter(|| {
            run_pipeline(&mut mach, &mut parser, &mut sink, black_box(&color_heavy));
        });
    });

    group.throughput(Throughput::Bytes(mixed.len() as u64));
    group.bench_function("parse_mixed", |b| {
        let mut mach = Utf8Machine::new();
        let mut parser = VtParser::new();
        let mut sink = NullSink;
        b.iter(|| {
            run_pipeline(&mut mach, &mut parser, &mut sink, black_box(&mixed));
        });
    });

    // parser reuse vs new instantiation
    group.throughput(Throughput::Bytes(mixed.len() as u64));
    group.bench_function("parse_mixed_new_each_time", |b| {
        let mut sink = NullSink;
        b.iter(|| {
            let mut mach = Utf8Machine::new();
            let mut parser = VtParser::new();
            run_pipeline(&mut mach, &mut parser, &mut sink, black_box(&mixed));
        });
    });

    group.finish();
}

criterion_group!(name=parser; config=Criterion::default().with_plots(); targets=bench_vt_parser);
criterion_main!(parser);
