use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exposure_report::config::ReportConfig;
use exposure_report::core::domain::{GameDocument, GameInfo, LogoRecord, ShotRecord};
use exposure_report::normalization::normalize_period;
use exposure_report::report::{ReportGenerator, ReportRequest};
use exposure_report::time::ms_to_hhmmss;

const PLACEMENTS: [&str; 4] = ["LeftBoard", "RightBoard", "CenterIce", "Dasher"];
const PERIODS: [&str; 6] = ["1T", "1B", "2 top", "2bot", "3t", "3 Bottom"];

fn synthetic_game(index: usize, logos: usize, shots: usize) -> GameDocument {
    let logo_records: Vec<LogoRecord> = (0..logos)
        .map(|i| {
            LogoRecord::new(
                format!("Sponsor{}.png", i % 25),
                i as i64,
                PLACEMENTS[i % PLACEMENTS.len()],
            )
        })
        .collect();

    let shot_records: Vec<ShotRecord> = (0..shots)
        .map(|i| {
            ShotRecord::new(
                format!("Sponsor{}.png", (i % logos) % 25),
                (i % logos) as i64,
                PERIODS[i % PERIODS.len()],
                500.0 + (i % 40) as f64 * 75.0,
                (i % 30) as f64 + 0.5,
            )
        })
        .collect();

    GameDocument {
        info: GameInfo {
            game_id: format!("G{}", index),
            ..Default::default()
        },
        logos: logo_records,
        shots: shot_records,
    }
}

fn bench_ms_to_hhmmss(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration_codec");

    group.bench_function("ms_to_hhmmss", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(ms_to_hhmmss(black_box(i as f64 * 1234.5)));
            }
        });
    });

    group.finish();
}

fn bench_period_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let config = ReportConfig::default();

    group.bench_function("normalize_period", |b| {
        b.iter(|| {
            for raw in PERIODS {
                black_box(normalize_period(black_box(raw), &config.labels));
            }
        });
    });

    group.finish();
}

fn bench_report_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_generation");
    let request = ReportRequest {
        aggregate: true,
        ..Default::default()
    };

    for games in [1usize, 8, 32] {
        let documents: Vec<GameDocument> =
            (0..games).map(|i| synthetic_game(i, 100, 5_000)).collect();

        let sequential = ReportGenerator::new(ReportConfig::default());
        group.bench_with_input(
            BenchmarkId::new("sequential", games),
            &documents,
            |b, docs| {
                b.iter(|| sequential.generate(black_box(docs), &request));
            },
        );

        let parallel = ReportGenerator::new(ReportConfig::default()).with_parallelism(0);
        group.bench_with_input(BenchmarkId::new("parallel", games), &documents, |b, docs| {
            b.iter(|| parallel.generate(black_box(docs), &request));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ms_to_hhmmss,
    bench_period_normalization,
    bench_report_generation
);
criterion_main!(benches);
