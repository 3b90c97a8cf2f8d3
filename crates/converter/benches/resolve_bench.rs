use criterion::{Criterion, criterion_group, criterion_main};
use micro_client::protocol::RawResponse;
use micro_converter::{Annotations, BuiltInConverters, ConverterFactory, Converters, Streaming, TargetType, Void};
use std::hint::black_box;

struct User;

fn resolve_builtins(c: &mut Criterion) {
    let builtins = BuiltInConverters::new();
    let raw = TargetType::of::<RawResponse>();
    let void = TargetType::of::<Void>();
    let user = TargetType::of::<User>();
    let streaming = Annotations::from(Streaming);
    let empty = Annotations::empty();

    let mut group = c.benchmark_group("builtin");
    group.bench_function("raw_streaming", |b| b.iter(|| builtins.response_body_converter(black_box(&raw), &streaming)));
    group.bench_function("void", |b| b.iter(|| builtins.response_body_converter(black_box(&void), &empty)));
    group.bench_function("miss", |b| b.iter(|| builtins.response_body_converter(black_box(&user), &empty)));
    group.finish();
}

fn resolve_registry(c: &mut Criterion) {
    let converters = Converters::default();
    let user = TargetType::of::<User>();
    let empty = Annotations::empty();

    c.bench_function("registry_miss", |b| b.iter(|| converters.response_body_converter(black_box(&user), &empty)));
}

criterion_group!(benches, resolve_builtins, resolve_registry);
criterion_main!(benches);
