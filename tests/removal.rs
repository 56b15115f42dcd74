// Copyright 2025 Lars Brubaker
// Tests for vertex removal.

mod helpers;

use planar_delaunay::{Mesh, MeshError};

#[test]
fn add_then_remove_restores_the_triangulation() {
    let (mut mesh, _) = helpers::random_mesh(21, 40);
    let before = helpers::neighbor_snapshot(&mesh);

    let mut rng = helpers::rng(22);
    for _ in 0..20 {
        let (x, y) = helpers::random_point(&mut rng, 1.0, 99.0);
        let v = mesh.add(usize::MAX, x, y).unwrap();
        assert_eq!(mesh.remove(v), Ok(usize::MAX));
        assert_eq!(helpers::neighbor_snapshot(&mesh), before);
    }
    helpers::assert_valid(&mesh);
}

#[test]
fn removing_every_vertex_leaves_the_empty_rectangle() {
    let (mut mesh, ids) = helpers::random_mesh(23, 60);
    for (i, v) in ids.into_iter().enumerate() {
        assert_eq!(mesh.remove(v), Ok(i));
        if i % 10 == 0 {
            helpers::assert_valid(&mesh);
        }
    }
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.edges().count(), 5);
    helpers::assert_valid(&mesh);
}

#[test]
fn removal_in_reverse_order() {
    let (mut mesh, ids) = helpers::random_mesh(24, 60);
    for v in ids.into_iter().rev() {
        mesh.remove(v).unwrap();
    }
    assert_eq!(mesh.vertex_count(), 0);
    helpers::assert_valid(&mesh);
}

#[test]
fn corners_are_never_removed() {
    let (mut mesh, _) = helpers::random_mesh(25, 10);
    let before = helpers::neighbor_snapshot(&mesh);
    for c in mesh.corners() {
        assert_eq!(mesh.remove(c), Err(MeshError::ImmutableVertex(c)));
        assert_eq!(mesh.move_vertex(c, 1.0, 1.0), Err(MeshError::ImmutableVertex(c)));
    }
    assert_eq!(helpers::neighbor_snapshot(&mesh), before);
    assert_eq!(mesh.vertex_count(), 10);
}

#[test]
fn removing_a_hub_vertex() {
    let mut mesh = Mesh::new(100.0, 100.0).unwrap();
    let n = 12;
    for i in 0..n {
        let angle = std::f64::consts::TAU * i as f64 / n as f64 + 0.1;
        mesh.add(i, 50.0 + 30.0 * angle.cos(), 50.0 + 30.0 * angle.sin())
            .unwrap();
    }
    let hub = mesh.add(n, 50.0, 50.0).unwrap();
    assert_eq!(mesh.degree(hub), n);

    assert_eq!(mesh.remove(hub), Ok(n));
    assert_eq!(mesh.vertex_count(), n);
    helpers::assert_valid(&mesh);
}

#[test]
fn grid_points_can_be_removed() {
    let mut mesh = Mesh::new(100.0, 100.0).unwrap();
    let mut ids = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            let v = mesh
                .add((i, j), 10.0 + 16.0 * i as f64, 10.0 + 16.0 * j as f64)
                .unwrap();
            ids.push(v);
        }
    }
    for v in ids.into_iter().step_by(2) {
        mesh.remove(v).unwrap();
    }
    assert_eq!(mesh.vertex_count(), 18);
    helpers::assert_valid(&mesh);
}
