use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pool_engine_core::amm::guardrails::sqrt_k;
use pool_engine_core::amm::liquidity::{deposit_mint, withdraw_amounts};

fn bench_liquidity(c: &mut Criterion) {
    let mut g = c.benchmark_group("liquidity");
    g.warm_up_time(Duration::from_secs(2));
    g.measurement_time(Duration::from_secs(5));
    g.sample_size(300);
    g.throughput(Throughput::Elements(1));

    let (x, y) = (2_000_000u128, 3_000_000u128);
    let total = sqrt_k(x, y).unwrap();

    g.bench_function("sqrt_k", |b| {
        b.iter(|| {
            let s = sqrt_k(black_box(x), black_box(y)).unwrap();
            black_box(s);
        });
    });

    g.bench_function("deposit_mint", |b| {
        b.iter(|| {
            let out = deposit_mint(black_box(x + 10_000), black_box(y), black_box(total))
                .expect("deposit ok");
            black_box(out.minted);
        });
    });

    g.bench_function("withdraw_partial", |b| {
        b.iter(|| {
            let out = withdraw_amounts(
                black_box(x),
                black_box(y),
                black_box(total / 2),
                black_box(total),
            )
            .expect("withdraw ok");
            black_box(out.payout);
        });
    });

    g.finish();
}

criterion_group!(benches, bench_liquidity);
criterion_main!(benches);
