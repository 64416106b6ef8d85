use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use dao_cross::{FixedClock, OrderQueue, generator::OrderGenerator};

fn bench_queue(c: &mut Criterion) {
    let clock = FixedClock(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    let orders = OrderGenerator::new(1)
        .generate(10_000, &clock)
        .expect("generated orders are valid");

    c.bench_function("push 10k orders", |b| {
        b.iter(|| orders.iter().cloned().collect::<OrderQueue>())
    });

    c.bench_function("drain 10k orders", |b| {
        b.iter_batched(
            || orders.iter().cloned().collect::<OrderQueue>(),
            |mut q| while q.pop().is_some() {},
            criterion::BatchSize::LargeInput,
        )
    });

    let a = &orders[0];
    let z = &orders[1];
    c.bench_function("precedence_cmp", |b| b.iter(|| a.precedence_cmp(z)));
}

criterion_group!(benches, bench_queue);
criterion_main!(benches);
