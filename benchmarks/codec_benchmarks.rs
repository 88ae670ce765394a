#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Codec benchmarks: urlvars vs `url::form_urlencoded`
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use urlvars::{QueryParams, parse_typed_default, stringify};

const SIMPLE: &str = "name=John&age=30&city=Tokyo";
const ENCODED: &str = "name=Samchon%20(Jeongho%20Nam)&age=29\
    &git=https%3A%2F%2Fgithub.com%2Fsamchon%2Ftstl\
    &memo=Hello%2C%20I'm%20the%20best%20programmer%20in%20Korea.&is_crazy=true";

fn bench_parse_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, input) in [("simple", SIMPLE), ("encoded", ENCODED)] {
        group.bench_function(format!("urlvars_{name}"), |b| {
            b.iter(|| urlvars::parse(black_box(input)).unwrap());
        });

        group.bench_function(format!("form_urlencoded_{name}"), |b| {
            b.iter(|| {
                url::form_urlencoded::parse(black_box(input).as_bytes())
                    .into_owned()
                    .collect::<Vec<(String, String)>>()
            });
        });
    }

    group.finish();
}

fn bench_serialize_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let params = urlvars::parse(ENCODED).unwrap();
    let pairs: Vec<(String, String)> = params.clone().into_iter().collect();

    group.bench_function("urlvars", |b| {
        b.iter(|| urlvars::serialize(black_box(&params)));
    });

    group.bench_function("form_urlencoded", |b| {
        b.iter(|| {
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(black_box(&pairs))
                .finish()
        });
    });

    group.finish();
}

fn bench_typed_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed");
    let object = parse_typed_default(ENCODED).unwrap();

    group.bench_function("parse_typed", |b| {
        b.iter(|| parse_typed_default(black_box(ENCODED)).unwrap());
    });

    group.bench_function("stringify", |b| {
        b.iter(|| stringify(black_box(&object)));
    });

    group.bench_function("build_and_serialize", |b| {
        b.iter(|| {
            let mut params = QueryParams::with_capacity(3);
            params.set("name", black_box("John"));
            params.set("age", black_box("30"));
            params.set("flag", "");
            params.serialize()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_all, bench_serialize_all, bench_typed_all);

criterion_main!(benches);
