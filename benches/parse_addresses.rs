use ar_address_parser::AddressParser;
use criterion::{criterion_group, criterion_main, Criterion};

const LINES: &[&str] = &[
    "Sarmiento N° 1100",
    "Av. Libertador 2ndo A e/25 de Mayo y Bartolome Mitre",
    "Tucuman y 9 de Julio",
    "Vicente Lopez y Planes 120",
    "Ruta 9 Km 45",
];

fn parse_uncached(c: &mut Criterion) {
    c.bench_function("parse uncached", |b| {
        b.iter(|| {
            let mut parser = AddressParser::new();
            for line in LINES {
                std::hint::black_box(parser.parse(line));
            }
        })
    });
}

fn parse_cached(c: &mut Criterion) {
    let mut parser = AddressParser::with_cache(ar_address_parser::MemoryParseCache::new());
    for line in LINES {
        parser.parse(line);
    }
    c.bench_function("parse cache warm", |b| {
        b.iter(|| {
            for line in LINES {
                std::hint::black_box(parser.parse(line));
            }
        })
    });
}

criterion_group!(benches, parse_uncached, parse_cached);
criterion_main!(benches);
