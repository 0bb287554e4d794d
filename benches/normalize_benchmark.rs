//! Benchmarks for docnorm normalization performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic datasheet markdown.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docnorm::{
    normalize_document, ChunkOptions, ExtractedDocument, NormalizeOptions, SpanningCell,
    TableRecord,
};

/// Build synthetic datasheet markdown with the given number of sections.
fn create_test_markdown(section_count: usize) -> String {
    let mut content = String::new();
    content.push_str("Preamble paragraph before the first heading.\n\n");

    for i in 1..=section_count {
        content.push_str(&format!("# {} Section {}\n\n", i, i));
        for paragraph in 0..4 {
            content.push_str(&format!(
                "Paragraph {} of section {}. Limits are in Table {} and timing \
                 is covered in Section {}. ",
                paragraph, i, i, i
            ));
            content.push_str(&"Synthetic body text for benchmark purposes. ".repeat(10));
            content.push_str("\n\n");
        }
        content.push_str(&format!("## Table {} Limits for section {}\n\ndata\n\n", i, i));
    }
    content
}

fn create_test_document(section_count: usize) -> ExtractedDocument {
    let mut doc = ExtractedDocument::from_markdown(create_test_markdown(section_count));
    for i in 0..section_count {
        doc = doc.with_table(
            TableRecord::new(4, 3)
                .with_cell(SpanningCell::at("Parameter", 0, 0))
                .with_cell(SpanningCell::at("Min", 0, 1))
                .with_cell(SpanningCell::at("Max", 0, 2))
                .with_cell(SpanningCell::spanning("VDD range", (1, 3), (0, 0)))
                .with_cell(SpanningCell::at("1.8", 1, 1))
                .with_cell(SpanningCell::at("3.6", 1, 2))
                .on_page(i as u32 + 1),
        );
    }
    doc
}

/// Benchmark the full pipeline at various document sizes.
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for section_count in [5, 25, 100].iter() {
        let doc = create_test_document(*section_count);
        let options = NormalizeOptions::new();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| normalize_document("bench", "bench.pdf", black_box(&doc), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the chunker in isolation.
fn bench_chunking(c: &mut Criterion) {
    let text = "Synthetic body text for benchmark purposes. ".repeat(2000);
    let options = ChunkOptions::default();

    c.bench_function("chunk_text_88k", |b| {
        b.iter(|| docnorm::chunk_text(black_box(&text), &options));
    });
}

criterion_group!(benches, bench_normalize, bench_chunking);
criterion_main!(benches);
