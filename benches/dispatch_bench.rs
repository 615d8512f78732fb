use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use capstan::descriptor::RegistryBuilder;
use capstan::engine::Runtime;
use capstan::types::{int, list};
use capstan::value::Var;

fn ints(rt: &Runtime, n: usize) -> Var {
    let items = (0..n as i64)
        .map(|v| int::make(rt, v).unwrap())
        .collect::<Vec<_>>();
    list::make(rt, items).unwrap()
}

fn bench_eq_dispatch(c: &mut Criterion) {
    let rt = RegistryBuilder::with_builtins().build();
    let a = int::make(&rt, 7).unwrap();
    let b = int::make(&rt, 7).unwrap();

    c.bench_function("dispatch/eq_int", |bencher| {
        bencher.iter(|| black_box(rt.eq(black_box(&a), black_box(&b)).unwrap()));
    });

    // no Eq class: the identity fallback path
    let bare = list::make(&rt, vec![]).unwrap();
    c.bench_function("dispatch/hash_identity_fallback", |bencher| {
        bencher.iter(|| black_box(rt.hash(black_box(&bare)).unwrap()));
    });
}

fn bench_for_each(c: &mut Criterion) {
    let rt = RegistryBuilder::with_builtins().build();
    let mut group = c.benchmark_group("dispatch/for_each");

    for &size in &[100, 1_000, 10_000] {
        let items = ints(&rt, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |bencher, items| {
            bencher.iter(|| {
                let mut total = 0i64;
                rt.for_each(items, |item| {
                    total += rt.as_long(&item)?;
                    Ok(())
                })
                .unwrap();
                black_box(total);
            });
        });
    }

    group.finish();
}

fn bench_maximum(c: &mut Criterion) {
    let rt = RegistryBuilder::with_builtins().build();
    let mut group = c.benchmark_group("dispatch/maximum");

    for &size in &[100, 1_000] {
        let items = ints(&rt, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |bencher, items| {
            bencher.iter(|| black_box(rt.maximum(items).unwrap()));
        });
    }

    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let rt = RegistryBuilder::with_builtins().build();
    let tag = rt.lookup("Int").unwrap();
    let seed = int::make(&rt, 42).unwrap();

    c.bench_function("dispatch/construct_int", |bencher| {
        bencher.iter(|| black_box(rt.construct(tag, std::slice::from_ref(&seed)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_eq_dispatch,
    bench_for_each,
    bench_maximum,
    bench_construct
);
criterion_main!(benches);
