use criterion::{Criterion, criterion_group, criterion_main};
use offset_lens_engine::{
    Document, Offsets, TextSource, TrackedOffsets, char_details, line_starts, resolve_byte,
    resolve_char,
};

fn generate_document(lines: usize) -> String {
    let base = "plain ascii line with some words\nünïcødé lïné wïth äccents\n日本語のテキスト行\nemoji 😀🎉 and 𝄞 astral\n";
    base.repeat(lines / 4)
}

fn bench_line_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_table");
    group.sample_size(10);

    let doc = Document::from_text(&generate_document(10_000));
    group.bench_function("both_offsets", |b| {
        b.iter(|| {
            let count = line_starts(std::hint::black_box(&doc), TrackedOffsets::Both).count();
            std::hint::black_box(count);
        });
    });
    group.bench_function("bytes_only", |b| {
        b.iter(|| {
            let count = line_starts(std::hint::black_box(&doc), TrackedOffsets::BytesOnly).count();
            std::hint::black_box(count);
        });
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    group.sample_size(10);

    let crlf = generate_document(10_000).replace('\n', "\r\n");
    let doc = Document::from_text(&crlf);
    let last_byte = crlf.len() - 3;
    let last_char = crlf.chars().count() / 2;

    group.bench_function("resolve_byte_near_end", |b| {
        b.iter(|| std::hint::black_box(resolve_byte(&doc, std::hint::black_box(last_byte))));
    });
    group.bench_function("resolve_char_middle", |b| {
        b.iter(|| std::hint::black_box(resolve_char(&doc, std::hint::black_box(last_char))));
    });

    group.finish();
}

fn bench_char_details(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_details");
    group.sample_size(10);

    let doc = Document::from_text(&generate_document(1_000));
    let text = doc.text();
    group.bench_function("decompose_document", |b| {
        b.iter(|| {
            let count = char_details(&text, doc.line_ending(), Offsets::ZERO)
                .map(Iterator::count)
                .unwrap_or(0);
            std::hint::black_box(count);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_line_table, bench_resolution, bench_char_details);
criterion_main!(benches);
