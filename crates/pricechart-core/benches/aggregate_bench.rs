use chrono::FixedOffset;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};
use pricechart_core::{aggregate, Period, Sample};

const HOUR_MS: i64 = 3_600_000;

fn gen_hourly(n: usize) -> Vec<Sample> {
    let mut v = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + ((i as f64) * 0.37).sin() * 0.5;
        price = c;
        v.push(Sample::new(i as i64 * HOUR_MS, o, o.max(c) + 0.3, o.min(c) - 0.3, c));
    }
    v
}

fn bench_aggregate(c: &mut Criterion) {
    let tz = FixedOffset::west_opt(5 * 3600).expect("valid offset");
    let mut group = c.benchmark_group("aggregate");
    for &n in &[10_000usize, 100_000usize] {
        let data = gen_hourly(n);
        for period in [Period::Weekly, Period::Monthly] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{period:?}")), &period, |b, &p| {
                b.iter(|| black_box(aggregate(&data, p, tz)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
