use canopy::render::{render_hierarchy_page, render_nodegraph_page};
use canopy::{GraphData, HierarchyKind, VisOptions};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const INFRASTRUCTURE: &str = include_str!("../../../fixtures/infrastructure_data.json");
const NODEGRAPH: &str = include_str!("../../../fixtures/nodegraph_data.json");

fn bench_pages(c: &mut Criterion) {
    let infra = GraphData::from_json_str(INFRASTRUCTURE).expect("fixture");
    let services = GraphData::from_json_str(NODEGRAPH).expect("fixture");
    let overrides = VisOptions::default();

    let mut group = c.benchmark_group("pages");
    group.bench_function("hierarchy_infrastructure", |b| {
        b.iter(|| {
            let html = render_hierarchy_page(
                black_box(&infra),
                HierarchyKind::Infrastructure,
                &overrides,
            )
            .expect("render");
            black_box(html.len());
        });
    });
    group.bench_function("nodegraph", |b| {
        b.iter(|| {
            let html = render_nodegraph_page(black_box(&services), &overrides).expect("render");
            black_box(html.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_pages);
criterion_main!(benches);
