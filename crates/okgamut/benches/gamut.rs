use criterion::{black_box, criterion_group, criterion_main, Criterion};
use okgamut::opt::SliceOptions;
use okgamut::{max_chroma_for_hue, ChromaLimitTable, GamutMapper, GamutPolicy, Slice};

pub fn run_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("gamut-mapping");

    for policy in [
        GamutPolicy::Clip,
        GamutPolicy::BisectChroma,
        GamutPolicy::ConeClamp,
    ] {
        let mapper = GamutMapper::new(policy);
        group.bench_function(policy.name(), |b| {
            b.iter(|| mapper.map_finite(black_box(&[0.7, 0.4, 0.0])))
        });
    }

    group.finish();

    let mut group = c.benchmark_group("chroma-limit");
    group.bench_function("search", |b| b.iter(|| max_chroma_for_hue(black_box(264.5))));

    let table = ChromaLimitTable::default();
    group.bench_function("table", |b| b.iter(|| table.at(black_box(264.5))));
    group.finish();

    let mut group = c.benchmark_group("slice");
    group.sample_size(10);

    for policy in [GamutPolicy::Clip, GamutPolicy::ConeClamp] {
        let options = SliceOptions::builder()
            .width(128)
            .height(128)
            .policy(policy)
            .boundary(true)
            .build();
        if let Ok(options) = options {
            let slice = Slice::new(options);
            group.bench_function(policy.name(), |b| b.iter(|| slice.render()));
        }
    }

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
