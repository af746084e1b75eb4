// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Benchmarks for body translation and submission planning.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use trac2gh_core::{plan, translate_body, translate_page, IdMapping};

fn sample_body(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "= Section {i} =\nSee #{i} and `#{i}` for '''details'''.\n\
                 {{{{{{#!python\nprint({i})\n}}}}}}\n|| a || b ||\n"
            )
        })
        .collect()
}

fn body_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate_body");

    let mut mapping = IdMapping::new();
    for id in 0..500u64 {
        // Only even ids are mapped so both branches are exercised.
        if id % 2 == 0 {
            let _ = mapping.insert(id, &format!("https://github.com/o/r/issues/{}", id + 1));
        }
    }

    for paragraphs in [1usize, 50, 500] {
        let body = sample_body(paragraphs);
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &body, |b, t| {
            b.iter(|| translate_body(t, &mapping))
        });
    }
    group.finish();
}

fn page_translation(c: &mut Criterion) {
    let page = "[[PageOutline]]\n= Guide =\n\
                See :trac:`wiki:Dev/Setup` and [wiki:WikiStart home].\n\
                Intro:\n * one\n * two\n"
        .repeat(100);
    c.bench_function("translate_page", |b| b.iter(|| translate_page(&page)));
}

fn planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");

    let cases: &[(&str, Vec<u64>, u64)] = &[
        ("contiguous", (1..=1000).collect(), 1),
        ("behind_cursor", (1..=1000).collect(), 500),
        ("ahead_of_cursor", (2000..3000).collect(), 1),
        ("sparse", (1..=1000).map(|i| i * 3).collect(), 100),
    ];

    for (name, ids, next) in cases {
        group.bench_with_input(BenchmarkId::new("plan", name), ids, |b, ids| {
            b.iter(|| plan(ids.clone(), *next))
        });
    }
    group.finish();
}

criterion_group!(benches, body_translation, page_translation, planning);
criterion_main!(benches);
