// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for dotted-key dictionary lookup.
//!
//! Measures the performance of:
//! - Raw dictionary resolution (hit and miss paths)
//! - End-to-end translation through a preloaded localizer

use criterion::{criterion_group, criterion_main, Criterion};
use phrasebook::dictionary::Dictionary;
use phrasebook::localizer::Localizer;
use phrasebook::store::TranslationStore;
use std::hint::black_box;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let dictionary = Dictionary::from_json(
        r#"{"home": {"title": "Welcome", "menu": {"file": "File", "edit": "Edit"}}}"#,
    )
    .expect("bench dictionary must parse");

    group.bench_function("resolve_hit", |b| {
        b.iter(|| black_box(dictionary.resolve(black_box("home.menu.edit"))));
    });

    group.bench_function("resolve_miss", |b| {
        b.iter(|| black_box(dictionary.resolve(black_box("home.menu.missing"))));
    });

    group.finish();
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let localizer = Localizer::preloaded(TranslationStore::bundled(), Some("en-US".to_string()));

    group.bench_function("translate", |b| {
        b.iter(|| black_box(localizer.translate(black_box("home.title"))));
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_translate);
criterion_main!(benches);
