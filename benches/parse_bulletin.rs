use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use marine_forecast::extract_synopsis;
use marine_forecast::parser::{BulletinParser, parse_body};
use marine_forecast::timestamp::{AbbreviationTable, parse_timestamp};

const BULLETIN: &str = include_str!("../tests/fixtures/cwf_box.txt");

fn bench_full_bulletin(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulletin_parsing");
    let parser = BulletinParser::new();

    group.bench_function("single_product", |b| {
        b.iter(|| black_box(parser.parse(black_box(BULLETIN))));
    });

    for copies in [4usize, 16] {
        let zones = BULLETIN
            .split_once("$$")
            .map(|(_, zones)| zones)
            .unwrap_or_default();
        let large = format!("{}$${}", BULLETIN, zones.repeat(copies));
        group.bench_with_input(BenchmarkId::new("repeated_zones", copies), &large, |b, input| {
            b.iter(|| black_box(parser.parse(black_box(input))));
        });
    }

    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");
    let table = AbbreviationTable::new();

    group.bench_function("synopsis", |b| {
        b.iter(|| black_box(extract_synopsis(black_box(BULLETIN))));
    });

    group.bench_function("timestamp", |b| {
        b.iter(|| {
            black_box(parse_timestamp(
                black_box("330 AM EST Mon Jan 15 2024 /230 AM CST Mon Jan 15 2024/"),
                &table,
            ))
        });
    });

    let body = [
        "...SMALL CRAFT ADVISORY IN EFFECT FROM 1 PM EST THIS AFTERNOON",
        "THROUGH TUESDAY AFTERNOON...",
        ".TODAY...SW winds 10 to 15 kt, increasing to 15 to 20 kt",
        "this afternoon. Seas 2 to 4 ft.",
        ".TONIGHT...SW winds 15 to 20 kt with gusts up to 25 kt.",
        "Seas 3 to 5 ft.",
    ];
    group.bench_function("body", |b| {
        b.iter(|| black_box(parse_body(black_box(body))));
    });

    group.finish();
}

criterion_group!(benches, bench_full_bulletin, bench_components);
criterion_main!(benches);
