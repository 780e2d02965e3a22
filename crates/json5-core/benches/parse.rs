use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use json5_core::{parse, to_json};

/// A config-style document: comments, bare keys, mixed quoting, hex and trailing commas.
fn config_document(entries: usize) -> String {
    let mut text = String::from("// generated\n{\n");
    for i in 0..entries {
        text.push_str(&format!(
            "  entry{i}: {{ id: 0x{i:x}, name: 'item {i}', weight: {i}.5, tags: [\"a\", 'b',], enabled: true, }}, /* #{i} */\n"
        ));
    }
    text.push_str("}\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let small = config_document(10);
    let large = config_document(1_000);

    c.bench_function("parse_small_config", |b| b.iter(|| parse(black_box(&small))));
    c.bench_function("parse_large_config", |b| b.iter(|| parse(black_box(&large))));
    c.bench_function("to_json_large_config", |b| {
        b.iter(|| to_json(black_box(&large)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
