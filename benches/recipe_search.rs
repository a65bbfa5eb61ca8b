use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pigment_match::{Pigment, PigmentMatcher, Rgb};

/// 48 pigments spread over the RGB cube plus white and black references
fn sample_catalog() -> Vec<Pigment> {
    let mut catalog = vec![
        Pigment::new("white", "Titanium White", Rgb::new(255, 255, 255)),
        Pigment::new("black", "Ivory Black", Rgb::new(0, 0, 0)),
    ];
    for i in 0..48u8 {
        let color = Rgb::new(i.wrapping_mul(53), i.wrapping_mul(97), i.wrapping_mul(151));
        catalog.push(Pigment::new(format!("p{}", i), format!("Pigment {}", i), color));
    }
    catalog
}

fn benchmark_matching(c: &mut Criterion) {
    let matcher = PigmentMatcher::new();
    let catalog = sample_catalog();
    let target = Rgb::new(107, 142, 35);

    c.bench_function("rank_catalog", |b| {
        b.iter(|| matcher.rank(black_box(target), black_box(&catalog), None, None))
    });

    c.bench_function("recipe_search", |b| {
        b.iter(|| matcher.recipe(black_box(target), black_box(&catalog), None))
    });
}

criterion_group!(benches, benchmark_matching);
criterion_main!(benches);
