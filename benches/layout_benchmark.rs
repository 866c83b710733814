//! Benchmarks for pagetext layout reconstruction.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic résumé-like pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagetext::{LayoutConfig, Page, SourceDocument, TextFragment};

const WORDS: [&str; 8] = [
    "Designed", "scalable", "services", "in", "Rust", "for", "payment", "systems",
];

/// Creates a single-column page with the given number of lines.
fn create_single_column_page(lines: usize) -> Page {
    let mut fragments = Vec::with_capacity(lines * WORDS.len());
    for line in 0..lines {
        let y = line as f64 * 1.2 + if line % 6 == 0 { 2.0 } else { 0.0 };
        let mut x = 5.0;
        for word in WORDS {
            fragments.push(TextFragment::new(x, y, word));
            x += word.len() as f64 * 0.1 + 0.8;
        }
    }
    Page::with_width(50.0, fragments)
}

/// Creates a page with a narrow sidebar next to the main column.
fn create_sidebar_page(lines: usize) -> Page {
    let mut page = create_single_column_page(lines);
    for fragment in &mut page.fragments {
        fragment.x += 20.0;
    }
    for line in 0..lines / 2 {
        page.add_fragment(TextFragment::new(1.0, line as f64 * 2.0, format!("- skill {}", line)));
    }
    page.width = Some(50.0);
    page
}

/// Benchmark single pages of each layout.
fn bench_page_assembly(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let single = create_single_column_page(60);
    let sidebar = create_sidebar_page(60);

    c.bench_function("assemble_single_column_page", |b| {
        b.iter(|| pagetext::assemble_page(black_box(&single), &config));
    });

    c.bench_function("assemble_sidebar_page", |b| {
        b.iter(|| pagetext::assemble_page(black_box(&sidebar), &config));
    });
}

/// Benchmark whole documents, parallel and sequential.
fn bench_document_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_extraction");

    for page_count in [1, 5, 20].iter() {
        let pages: Vec<Page> = (0..*page_count)
            .map(|i| {
                if i % 2 == 0 {
                    create_sidebar_page(60)
                } else {
                    create_single_column_page(60)
                }
            })
            .collect();
        let source = SourceDocument::from(pages);

        let parallel = LayoutConfig::default();
        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| pagetext::extract(black_box(&source), &parallel));
        });

        let sequential = LayoutConfig::default().sequential();
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| pagetext::extract(black_box(&source), &sequential));
        });
    }

    group.finish();
}

/// Benchmark the normalization pipeline on flat text.
fn bench_normalize(c: &mut Criterion) {
    let text = "WORK EXPERIENCE\n- Led team of 5\n1) Shipped parser\n  a) lexer\n\n\n\n"
        .repeat(200);

    c.bench_function("normalize_flat_text", |b| {
        b.iter(|| pagetext::normalize(black_box(&text)));
    });
}

criterion_group!(
    benches,
    bench_page_assembly,
    bench_document_extraction,
    bench_normalize,
);
criterion_main!(benches);
