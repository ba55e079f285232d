use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo_privacy::{FilterConfig, Point, PrivacyFilter, ReleaseStrategy};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Points scattered around a town center like survey respondents
fn respondents(number: usize) -> Vec<Point> {
    let mut rng = SmallRng::seed_from_u64(number as u64);
    (0..number)
        .map(|_| {
            Point::new(
                9.55 + rng.gen_range(-0.01..0.01),
                47.12 + rng.gen_range(-0.01..0.01),
            )
        })
        .collect()
}

fn compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("Anonymize");

    for number in [100, 10_000, 1_000_000] {
        let points = respondents(number);
        for release in [ReleaseStrategy::Centroid, ReleaseStrategy::UniformJitter] {
            let filter = PrivacyFilter::new(FilterConfig {
                release,
                seed: Some(1),
                ..Default::default()
            });
            group.bench_with_input(
                BenchmarkId::new(format!("{release:?}"), number),
                &points,
                |b, points| b.iter(|| filter.anonymize(points)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, compare);
criterion_main!(benches);
