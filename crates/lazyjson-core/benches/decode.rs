use criterion::{criterion_group, criterion_main, Criterion};
use lazyjson_core::decode;
use std::hint::black_box;

fn flat_object(fields: usize) -> String {
    let body: Vec<String> = (0..fields)
        .map(|i| match i % 3 {
            0 => format!("\"key_{i}\":\"value with, commas and {{braces}} {i}\""),
            1 => format!("\"key_{i}\":{}", i * 7919),
            _ => format!("\"key_{i}\":true"),
        })
        .collect();
    format!("{{{}}}", body.join(","))
}

fn nested_object(depth: usize) -> String {
    let mut text = flat_object(8);
    for level in 0..depth {
        text = format!("{{\"level_{level}\":{text},\"list\":[1,2,3],\"name\":\"n{level}\"}}");
    }
    text
}

fn bench_decode(c: &mut Criterion) {
    let flat = flat_object(200);
    c.bench_function("decode_flat_200", |b| {
        b.iter(|| decode(black_box(&flat)).unwrap())
    });

    let nested = nested_object(6);
    c.bench_function("decode_nested_top_level", |b| {
        b.iter(|| decode(black_box(&nested)).unwrap())
    });
    c.bench_function("decode_nested_full_path", |b| {
        b.iter(|| {
            let store = decode(black_box(&nested)).unwrap();
            store
                .get_path("level_5.level_4.level_3.level_2.level_1.level_0.key_1")
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
