use carrera_challenge::models::{DriverMapping, ResolvedResult};
use carrera_challenge::services::{extract_results, merge_and_rank, resolve_identities};
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_submission_pipeline(c: &mut Criterion) {
    // A noisy OCR dump: 40 result rows interleaved with junk lines
    let ocr_text: String = (0..40)
        .map(|i| {
            format!(
                "{}. Driver {} | 1:{:02}.{:03} | Lap 7\n|| ::: noise {} ::\n",
                i + 1,
                i,
                10 + (i % 50),
                i * 7 % 1000,
                i
            )
        })
        .collect();

    let mut mapping = DriverMapping::new();
    let results = extract_results(&ocr_text);
    let resolved: Vec<ResolvedResult> = resolve_identities(&results, &mut mapping, "host");
    let board = merge_and_rank("", &resolved, Utc::now()).text;

    let mut group = c.benchmark_group("submission_pipeline");

    group.bench_function("extract_results", |b| {
        b.iter(|| extract_results(black_box(&ocr_text)))
    });

    group.bench_function("resolve_known_drivers", |b| {
        b.iter(|| {
            let mut mapping = mapping.clone();
            resolve_identities(black_box(&results), &mut mapping, "host")
        })
    });

    group.bench_function("merge_into_full_board", |b| {
        b.iter(|| merge_and_rank(black_box(&board), black_box(&resolved), Utc::now()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_submission_pipeline);
criterion_main!(benches);
