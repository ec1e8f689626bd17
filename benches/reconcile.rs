
use config_generator::generate_config;
use criterion::{criterion_group, criterion_main, Criterion};
use inipatch::Config;

fn reconcile_benchmarks(c: &mut Criterion) {
    let small = generate_config(50);
    let large = generate_config(1000);

    let mut group = c.benchmark_group("reconcile");

    // Value mutation
    group.bench_function("set", |b| {
        let mut config = Config::new();
        config.parse(small.as_bytes());
        b.iter(|| config.set("section0", "int_0", 42))
    });

    // Nothing dirty: plain copy through the scanner
    group.bench_function("unchanged_large", |b| {
        let mut config = Config::new();
        config.parse(large.as_bytes());
        b.iter(|| config.reconcile(large.as_bytes()))
    });

    // One patch in the last section, one new key, one new section
    group.bench_function("patched_large", |b| {
        let mut config = Config::new();
        config.parse(large.as_bytes());
        config.set("section39", "int_975", 1);
        config.set("section0", "added", "yes");
        config.set("extra", "key", "value");
        b.iter(|| config.reconcile(large.as_bytes()))
    });

    // Full regeneration
    group.bench_function("serialize_large", |b| {
        let mut config = Config::new();
        config.parse(large.as_bytes());
        b.iter(|| config.serialize())
    });

    // Round-trip: parse -> mutate -> render -> parse
    group.bench_function("round_trip", |b| {
        b.iter(|| {
            let mut config = Config::new();
            config.parse(small.as_bytes());
            config.set("section0", "int_0", 42);
            let output = config.render(small.as_bytes());
            let mut config2 = Config::new();
            config2.parse(&output);
        })
    });

    group.finish();
}

criterion_group!(benches, reconcile_benchmarks);
criterion_main!(benches);
