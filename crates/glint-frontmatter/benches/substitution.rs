//! Benchmarks for frontmatter extraction and placeholder substitution.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glint_frontmatter::{BuiltinContext, Preprocessor, Variables, remove_frontmatter};

/// Generate a document with `vars` frontmatter entries and `paragraphs`
/// paragraphs that each reference a few of them.
fn generate_document(vars: usize, paragraphs: usize) -> String {
    let mut doc = String::with_capacity(vars * 20 + paragraphs * 120);
    doc.push_str("---\n");
    for i in 0..vars {
        doc.push_str(&format!("key{i}: value {i}\n"));
    }
    doc.push_str("---\n# {{key0}}\n\n");

    for j in 0..paragraphs {
        let k = j % vars.max(1);
        doc.push_str(&format!(
            "Paragraph {j} mentions {{{{key{k}}}}}, {{{{ date }}}} and {{{{unknown}}}}.\n\n"
        ));
    }
    doc
}

fn bench_remove_frontmatter(c: &mut Criterion) {
    let doc = generate_document(20, 50);

    c.bench_function("remove_frontmatter", |b| {
        b.iter(|| remove_frontmatter(doc.as_bytes()));
    });
}

fn bench_process_by_size(c: &mut Criterion) {
    let preprocessor = Preprocessor::new().with_context(BuiltinContext::capture());
    let mut group = c.benchmark_group("process_by_size");

    for (vars, paragraphs) in [(5, 10), (20, 100), (100, 1000)] {
        let doc = generate_document(vars, paragraphs);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("document", format!("{vars}v_{paragraphs}p")),
            &doc,
            |b, doc| b.iter(|| preprocessor.process(doc.as_bytes())),
        );
    }

    group.finish();
}

fn bench_apply_many_variables(c: &mut Criterion) {
    let vars: Variables = (0..500)
        .map(|i| (format!("key{i}"), format!("value {i}")))
        .collect();
    let body = generate_document(500, 500);

    c.bench_function("apply_500_variables", |b| {
        b.iter(|| vars.apply(body.as_bytes()));
    });
}

criterion_group!(
    benches,
    bench_remove_frontmatter,
    bench_process_by_size,
    bench_apply_many_variables
);
criterion_main!(benches);
