use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mgee_dashboard::dashboard::widgets::{pie_slices, slice_at};
use mgee_dashboard::model::Kpi;
use std::collections::HashSet;

fn build_kpis(count: usize) -> Vec<Kpi> {
    (0..count)
        .map(|i| Kpi::new(format!("Skill {i:03}"), (i * 37 % 101) as u32))
        .collect()
}

fn bench_pie_slices(c: &mut Criterion) {
    let kpis = build_kpis(64);
    let hidden: HashSet<usize> = (0..64).filter(|i| i % 7 == 0).collect();

    c.bench_function("pie_slices_64", |b| {
        b.iter(|| pie_slices(black_box(&kpis), black_box(&hidden)))
    });

    let slices = pie_slices(&kpis, &hidden);
    c.bench_function("slice_at_sweep", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for step in 0..360 {
                let angle = (step as f32).to_radians();
                if slice_at(black_box(&slices), angle).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
}

criterion_group!(benches, bench_pie_slices);
criterion_main!(benches);
