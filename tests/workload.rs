// Copyright 2025 Lars Brubaker
// Larger seeded workloads mixing every operation.

mod helpers;

use planar_delaunay::geom::random_point_in_polygon;
use planar_delaunay::{Mesh, MeshError, Point, VertexId};

#[test]
fn mixed_workload() {
    let (mut mesh, mut live) = helpers::random_mesh(51, 400);
    helpers::assert_valid(&mesh);

    let mut rng = helpers::rng(52);
    for step in 0..600usize {
        match step % 3 {
            0 => {
                let (x, y) = helpers::random_point(&mut rng, 0.0, 100.0);
                if let Ok(v) = mesh.add(10_000 + step, x, y) {
                    live.push(v);
                }
            }
            1 => {
                let v = live.swap_remove(step % live.len());
                mesh.remove(v).unwrap();
            }
            _ => {
                let v = live[step % live.len()];
                let (dx, dy) = helpers::random_point(&mut rng, -5.0, 5.0);
                match mesh.move_vertex(v, dx, dy) {
                    Ok(()) | Err(MeshError::DuplicatePosition { .. }) => {}
                    Err(err) => panic!("step {}: {}", step, err),
                }
            }
        }
    }
    assert_eq!(mesh.vertex_count(), live.len());
    helpers::assert_valid(&mesh);
    assert_eq!(mesh.restore_all(), 0);
}

#[test]
fn sites_sampled_from_a_polygon() {
    // An L-shaped region inside the domain.
    let region = [
        Point::new(10.0, 10.0),
        Point::new(90.0, 10.0),
        Point::new(90.0, 40.0),
        Point::new(40.0, 40.0),
        Point::new(40.0, 90.0),
        Point::new(10.0, 90.0),
    ];
    let mut mesh: Mesh<usize> = Mesh::new(100.0, 100.0).unwrap();
    let mut rng = helpers::rng(53);
    let mut ids: Vec<VertexId> = Vec::new();
    for i in 0..150 {
        let p = random_point_in_polygon(&region, &mut rng).unwrap();
        ids.push(mesh.add(i, p.x, p.y).unwrap());
    }
    helpers::assert_valid(&mesh);

    // Nothing was sampled from the notch.
    let notch = Point::new(65.0, 65.0);
    assert_eq!(mesh.vertices_near(notch, 20.0 * 20.0).count(), 0);
    assert_eq!(mesh.vertices().count(), ids.len());
}

#[test]
fn triangles_cover_the_rectangle() {
    let (mesh, _) = helpers::random_mesh(54, 120);
    let area: f64 = mesh
        .triangles()
        .map(|[a, b, c]| 0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)))
        .sum();
    approx::assert_relative_eq!(area, 100.0 * 100.0, max_relative = 1e-9);
    assert!(mesh.triangles().all(|[a, b, c]| {
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) > 0.0
    }));
}
