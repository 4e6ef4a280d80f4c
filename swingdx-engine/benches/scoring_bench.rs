//! Scoring Path Performance Benchmark
//!
//! Measures extraction + sequence analysis per swing and the cheaper
//! per-event scorers.
//!
//! **Goal:** A 240 fps swing (~100 frames) analyzes in well under 1 ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swingdx_engine::fingerprint::build_fingerprint;
use swingdx_engine::{analyze_sequence, score_batted_ball, MomentumExtractor, SwingEngine};
use swingdx_synth::pose::PoseSpec;
use swingdx_synth::{SwingGenerator, SwingPattern};

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence");
    let mut generator = SwingGenerator::from_seed(1);
    let extractor = MomentumExtractor::default();

    for frame_rate in [120.0, 240.0, 480.0] {
        let spec = PoseSpec {
            frame_rate,
            ..PoseSpec::ideal()
        };
        let sequence = generator.pose_sequence(&spec);

        group.bench_with_input(
            BenchmarkId::new("extract", frame_rate as u32),
            &sequence,
            |b, seq| b.iter(|| black_box(extractor.extract(black_box(seq)))),
        );

        let segments = extractor.extract(&sequence);
        group.bench_with_input(
            BenchmarkId::new("analyze", frame_rate as u32),
            &segments,
            |b, segs| b.iter(|| black_box(analyze_sequence(black_box(segs)))),
        );
    }

    let engine = SwingEngine::default();
    let sequence = generator.ideal_pose_sequence();
    group.bench_function("full_diagnosis_240fps", |b| {
        b.iter(|| black_box(engine.analyze_pose_sequence(black_box(&sequence))))
    });

    group.finish();
}

fn bench_contact(c: &mut Criterion) {
    let mut generator = SwingGenerator::from_seed(2);
    let events = generator.batted_balls(1_000);
    let engine = SwingEngine::default();

    c.bench_function("score_1000_batted_balls", |b| {
        b.iter(|| {
            for event in &events {
                black_box(score_batted_ball(black_box(event)));
            }
        })
    });

    c.bench_function("session_1000_events", |b| {
        b.iter(|| black_box(engine.score_session(black_box(&events))))
    });
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut generator = SwingGenerator::from_seed(3);
    let swings: Vec<_> = (0..500)
        .map(|_| generator.swing_sample(&SwingPattern::default()))
        .collect();

    c.bench_function("fingerprint_500_swings", |b| {
        b.iter(|| black_box(build_fingerprint(black_box(&swings))))
    });
}

criterion_group!(benches, bench_sequence, bench_contact, bench_fingerprint);
criterion_main!(benches);
