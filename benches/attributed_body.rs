use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use message_history_explorer::parsers::{decode_archive, extract_text, scan_readable_segments};

/// Typed-stream payload with `text` behind the string-class marker
fn typed_stream_payload(text: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x04\x0bstreamtyped\x81\xe8\x03\x84\x01@\x84\x84\x84");
    buf.extend_from_slice(b"\x12NSAttributedString\x00\x84\x84\x08NSObject\x00\x85\x92");
    buf.extend_from_slice(b"\x84\x84\x84\x08NSString\x01\x94\x84\x01+");
    if text.len() < 0x80 {
        buf.push(text.len() as u8);
    } else {
        buf.push(0x81);
        buf.extend_from_slice(&(text.len() as u16).to_le_bytes());
    }
    buf.extend_from_slice(text.as_bytes());
    buf.extend_from_slice(b"\x86\x84\x02iI\x01\x0c\x92\x84\x84\x84\x0cNSDictionary\x00\x94");
    buf.extend_from_slice(b"\x84\x01i\x01\x92\x84\x98\x98\x1d__kIMMessagePartAttributeName\x86");
    buf
}

/// Payload with no recognizable structure, forcing the scanner fallback
fn opaque_payload(text_len: usize) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..64u8).map(|b| b % 0x1f).collect();
    buf.extend(std::iter::repeat_n(b'x', text_len));
    buf.extend((0..64u8).map(|b| b % 0x1f));
    buf
}

fn bench_extract_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_text");

    for size in [16usize, 120, 1_000, 10_000].iter() {
        let text = "a".repeat(*size);
        let payload = typed_stream_payload(&text);

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("typed_stream", size), size, |b, _| {
            b.iter(|| extract_text(black_box(&payload)));
        });
    }

    group.finish();
}

fn bench_fallbacks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallbacks");

    let payload = typed_stream_payload(&"b".repeat(1_000));
    group.bench_function("decode_archive", |b| b.iter(|| decode_archive(black_box(&payload))));

    for size in [100usize, 10_000].iter() {
        let opaque = opaque_payload(*size);
        group.bench_with_input(BenchmarkId::new("scan_readable_segments", size), size, |b, _| {
            b.iter(|| scan_readable_segments(black_box(&opaque)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_text, bench_fallbacks);
criterion_main!(benches);
