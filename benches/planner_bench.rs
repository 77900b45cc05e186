use build_matrix::core::config::AxisSet;
use build_matrix::core::models::{BuildResult, Outcome};
use build_matrix::core::planner::{Selection, plan_matrix};
use build_matrix::reporting::BuildLog;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn wide_axes() -> AxisSet {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    AxisSet {
        compilers: strings(&["clang++", "g++", "icpx", "zig-c++"]),
        flags: vec![
            strings(&["-O0", "-O1", "-O2", "-O3", "-Os"]),
            strings(&["", "-m32"]),
            strings(&["", "-fno-exceptions"]),
            strings(&["", "-fsanitize=address", "-fsanitize=undefined"]),
        ],
        build_types: strings(&["Debug", "Release", "RelWithDebInfo"]),
    }
}

fn bench_plan_matrix(c: &mut Criterion) {
    let reference = AxisSet::default();
    let wide = wide_axes();
    let selection = Selection::default();

    c.bench_function("plan_reference_matrix", |b| {
        b.iter(|| plan_matrix(black_box(&reference), &selection).unwrap());
    });
    c.bench_function("plan_wide_matrix", |b| {
        b.iter(|| plan_matrix(black_box(&wide), &selection).unwrap());
    });
}

fn bench_build_log(c: &mut Criterion) {
    let results: Vec<BuildResult> = plan_matrix(&wide_axes(), &Selection::default())
        .unwrap()
        .combinations
        .into_iter()
        .map(|combination| BuildResult::new(combination, Outcome::Succeeded, Duration::ZERO))
        .collect();

    c.bench_function("record_build_log", |b| {
        b.iter(|| {
            let mut log = BuildLog::new(Vec::with_capacity(64 * 1024));
            for result in &results {
                log.record(black_box(result)).unwrap();
            }
            log.into_inner()
        });
    });
}

criterion_group!(benches, bench_plan_matrix, bench_build_log);
criterion_main!(benches);
