//! Measures mesh construction and traversal.

use cgmath::Point2;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pslg::DcelMesh;


/// Builds a closed regular polygon with `n` vertices.
fn polygon(n: u32) -> DcelMesh {
    let mut mesh = DcelMesh::new();
    let vs: Vec<_> = (0..n)
        .map(|i| {
            let angle = (i as f64) / (n as f64) * 2.0 * std::f64::consts::PI;
            mesh.insert_vertex(Point2::new(angle.cos(), angle.sin()))
        })
        .collect();
    for i in 0..n as usize {
        mesh.insert_edge(vs[i], vs[(i + 1) % n as usize]).unwrap();
    }
    mesh
}

/// Builds a star: one center vertex connected to `n` surrounding vertices.
/// Every insertion past the second has to search the center's fan for the
/// correct angular slot.
fn star(n: u32) -> DcelMesh {
    let mut mesh = DcelMesh::new();
    let center = mesh.insert_vertex(Point2::new(0.0, 0.0));
    for i in 0..n {
        let angle = (i as f64) / (n as f64) * 2.0 * std::f64::consts::PI;
        let v = mesh.insert_vertex(Point2::new(angle.cos(), angle.sin()));
        mesh.insert_edge(center, v).unwrap();
    }
    mesh
}

fn insert(c: &mut Criterion) {
    c.bench_function("insert_polygon_100", |b| {
        b.iter(|| polygon(black_box(100)))
    });
    c.bench_function("insert_star_64", |b| {
        b.iter(|| star(black_box(64)))
    });
}

fn traverse(c: &mut Criterion) {
    let mesh = polygon(1000);
    let start = mesh[mesh.vertex_handles().next().unwrap()].outgoing().unwrap();
    c.bench_function("cycle_walk_1000", |b| {
        b.iter(|| {
            let count = mesh.edge_count(black_box(start));
            black_box(count)
        })
    });

    let star_mesh = star(64);
    let center = star_mesh.vertex_handles().next().unwrap();
    c.bench_function("fan_circulation_64", |b| {
        b.iter(|| {
            let degree = star_mesh.degree(black_box(center));
            black_box(degree)
        })
    });

    c.bench_function("find_slot_64", |b| {
        b.iter(|| {
            star_mesh
                .find_in_between_edges(black_box(center), Point2::new(0.001, 0.0015))
                .unwrap()
        })
    });
}

criterion_group!(benches, insert, traverse);
criterion_main!(benches);
