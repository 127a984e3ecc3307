use bt_instruments::{BinomialOption, Underlying};
use bt_pricingengines::{BinomialPricer, PricingParameters};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn parameters(steps: usize) -> PricingParameters {
    PricingParameters::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .volatility(0.2)
        .horizon(1.0)
        .steps(steps)
        .build()
        .expect("benchmark parameters should be valid")
}

fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial");
    for steps in [100usize, 500, 1000] {
        let params = parameters(steps);
        for (name, option) in [
            ("european_call", BinomialOption::european_call(Underlying::Stock)),
            ("american_put", BinomialOption::american_put(Underlying::Stock)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, steps), &params, |b, &p| {
                b.iter(|| {
                    let pricer = BinomialPricer::new(black_box(p), option)
                        .expect("pricer should build");
                    black_box(pricer.value().expect("pricing should succeed"))
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_binomial);
criterion_main!(benches);
