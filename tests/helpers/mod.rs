// Copyright 2025 Lars Brubaker
// Shared test utilities for planar-delaunay tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use planar_delaunay::{Mesh, Point, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Position key that compares exactly.
pub type Key = (u64, u64);

pub fn key(p: Point) -> Key {
    (p.x.to_bits(), p.y.to_bits())
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random point strictly inside `[lo, hi]^2`.
pub fn random_point(rng: &mut StdRng, lo: f64, hi: f64) -> (f64, f64) {
    (rng.random_range(lo..hi), rng.random_range(lo..hi))
}

/// V - E + F computed from the public iterators. The four edges to the root,
/// the root itself and the four boundary faces are added back in.
pub fn euler_characteristic<T>(mesh: &Mesh<T>) -> i64 {
    let v = mesh.vertex_count() as i64 + 5;
    let e = mesh.edges().count() as i64 + 4;
    let f = mesh.face_count() as i64 + 4;
    v - e + f
}

/// Structural integrity, the Delaunay property and the Euler relation.
pub fn assert_valid<T>(mesh: &Mesh<T>) {
    if let Err(err) = mesh.check_integrity() {
        panic!("integrity check failed: {}", err);
    }
    assert_eq!(
        mesh.delaunay_violations(),
        0,
        "mesh has faces violating the Delaunay property"
    );
    assert_eq!(mesh.illegal_edge_count(), 0, "mesh has illegal edges");
    assert_eq!(euler_characteristic(mesh), 2, "Euler relation violated");
}

/// Every vertex (corners included) keyed by position, with the positions of
/// its neighbors. Two meshes with equal snapshots are the same triangulation.
pub fn neighbor_snapshot<T>(mesh: &Mesh<T>) -> BTreeMap<Key, BTreeSet<Key>> {
    mesh.vertices()
        .chain(mesh.corners())
        .map(|v| {
            let around = mesh
                .neighbors(v)
                .map(|n| key(position(mesh, n)))
                .collect();
            (key(position(mesh, v)), around)
        })
        .collect()
}

pub fn position<T>(mesh: &Mesh<T>, v: VertexId) -> Point {
    match mesh.position(v) {
        Some(p) => p,
        None => panic!("vertex {} has no position", v),
    }
}

/// A 100 x 100 mesh with `n` random points, payload = insertion index.
pub fn random_mesh(seed: u64, n: usize) -> (Mesh<usize>, Vec<VertexId>) {
    let mut mesh = Mesh::new(100.0, 100.0).unwrap();
    let mut rng = rng(seed);
    let mut ids = Vec::with_capacity(n);
    while ids.len() < n {
        let (x, y) = random_point(&mut rng, 1.0, 99.0);
        if let Ok(v) = mesh.add(ids.len(), x, y) {
            ids.push(v);
        }
    }
    (mesh, ids)
}
