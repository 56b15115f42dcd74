// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Structural and geometric diagnostics. These only read the arenas; debug
// builds run check_integrity after every mutation.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{EdgeId, FaceId, FaceKind, Mesh, Site, VertexId};
use crate::error::IntegrityError;
use crate::geom::{orientation, point_in_circumcircle, Orientation};

impl<T> Mesh<T> {
    /// Verify every structural invariant of the half-edge mesh.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let half_edges: Vec<EdgeId> = self
            .edges
            .iter()
            .flat_map(|(slot, _)| [EdgeId(slot << 1), EdgeId((slot << 1) | 1)])
            .collect();

        // References first, so the walks below never index a dead slot.
        for &e in &half_edges {
            let he = self.he(e);
            if !self.edge_alive(he.next) || !self.faces.contains(he.face.0) || !self.verts.contains(he.origin.0) {
                return Err(IntegrityError::DanglingEdge(e));
            }
        }

        let mut outgoing: FxHashMap<VertexId, usize> = FxHashMap::default();
        let mut corner_constraints = 0;
        for &e in &half_edges {
            let (o, t) = (self.origin(e), self.target(e));
            if o == t {
                return Err(IntegrityError::BrokenCycle(e));
            }
            let n1 = self.next(e);
            let n2 = self.next(n1);
            if !self.edge_alive(n2) || self.next(n2) != e || n1 == e {
                return Err(IntegrityError::BrokenCycle(e));
            }
            if self.origin(n1) != t || self.rot_cw(self.rot_ccw(e)) != e {
                return Err(IntegrityError::BrokenCycle(e));
            }
            let f = self.face(e);
            if self.face(n1) != f || self.face(n2) != f {
                return Err(IntegrityError::FaceMismatch { edge: e, face: f });
            }
            if self.is_constrained(e) != self.is_constrained(e.twin()) {
                return Err(IntegrityError::AsymmetricConstraint(e));
            }
            if self.is_constrained(e) && self.is_corner(o) && self.is_corner(t) {
                corner_constraints += 1;
            }
            *outgoing.entry(o).or_default() += 1;
        }
        if corner_constraints != 8 {
            return Err(IntegrityError::CornerConstraints(corner_constraints));
        }

        let mut boundary_faces = 0;
        for (i, face) in self.faces.iter() {
            let f = FaceId(i);
            if !self.edge_alive(face.edge) || self.face(face.edge) != f {
                return Err(IntegrityError::DanglingFace(f));
            }
            let cycle = [face.edge, self.next(face.edge), self.prev(face.edge)];
            let touches_root = cycle.iter().any(|&e| self.origin(e) == self.root());
            match (face.kind, touches_root) {
                (FaceKind::Boundary, true) => boundary_faces += 1,
                (FaceKind::Ordinary, false) => {
                    let [a, b, c] = cycle.map(|e| self.pos(self.origin(e)));
                    if orientation(c, a, b) != Orientation::Left {
                        return Err(IntegrityError::InvertedFace(f));
                    }
                }
                _ => return Err(IntegrityError::MisclassifiedFace(f)),
            }
        }
        if boundary_faces != 4 {
            let f = self
                .faces
                .iter()
                .find(|(_, face)| face.kind == FaceKind::Boundary)
                .map_or(FaceId(super::INVALID), |(i, _)| FaceId(i));
            return Err(IntegrityError::MisclassifiedFace(f));
        }

        for (i, vert) in self.verts.iter() {
            let v = VertexId(i);
            if !self.edge_alive(vert.edge) || self.origin(vert.edge) != v {
                return Err(IntegrityError::VertexEdgeMismatch(v));
            }
            let expected = outgoing.get(&v).copied().unwrap_or(0);
            let mut seen: FxHashSet<VertexId> = FxHashSet::default();
            let mut reached = 0;
            // A ring that fails to close within `expected` steps is broken.
            for e in self.outgoing(v).take(expected + 1) {
                if self.origin(e) != v {
                    return Err(IntegrityError::VertexEdgeMismatch(v));
                }
                let neighbor = self.target(e);
                if !seen.insert(neighbor) {
                    return Err(IntegrityError::DuplicateNeighbor { vertex: v, neighbor });
                }
                reached += 1;
            }
            if reached != expected {
                return Err(IntegrityError::UnreachableEdges {
                    vertex: v,
                    reached,
                    outgoing: expected,
                });
            }
        }

        let (vertices, edges, faces) = (self.verts.len(), self.edges.len(), self.faces.len());
        if vertices + faces != edges + 2 {
            return Err(IntegrityError::Euler {
                vertices,
                edges,
                faces,
            });
        }
        Ok(())
    }

    /// Number of ordinary faces whose circumcircle strictly contains some
    /// other vertex. Brute force; zero on a Delaunay mesh.
    pub fn delaunay_violations(&self) -> usize {
        let points: Vec<(VertexId, _)> = self
            .verts
            .iter()
            .filter_map(|(i, vert)| match vert.site {
                Site::Finite(p) => Some((VertexId(i), p)),
                Site::Infinite => None,
            })
            .collect();

        self.faces()
            .filter(|&f| {
                let Some(vs) = self.face_vertices(f) else {
                    return false;
                };
                let [a, b, c] = vs.map(|v| self.pos(v));
                points
                    .iter()
                    .any(|&(v, p)| !vs.contains(&v) && point_in_circumcircle(p, a, b, c))
            })
            .count()
    }

    /// Number of unconstrained edges between ordinary faces that fail the
    /// local in-circle test.
    pub fn illegal_edge_count(&self) -> usize {
        self.edges
            .iter()
            .map(|(slot, _)| EdgeId(slot << 1))
            .filter(|&e| !self.is_constrained(e) && !self.edge_is_locally_delaunay(e))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh<()> {
        Mesh::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn empty_mesh_is_valid() {
        let m = square();
        m.check_integrity().unwrap();
        assert_eq!(m.delaunay_violations(), 0);
        assert_eq!(m.illegal_edge_count(), 0);
    }

    #[test]
    fn broken_next_is_reported() {
        let mut m = square();
        let e = m.anchor;
        let n = m.next(e);
        m.he_mut(e).next = n.twin();
        assert!(m.check_integrity().is_err());
    }

    #[test]
    fn asymmetric_constraint_is_reported() {
        let mut m = square();
        let side = m.anchor;
        m.he_mut(side.twin()).constrained = false;
        assert!(matches!(
            m.check_integrity(),
            Err(IntegrityError::AsymmetricConstraint(_))
        ));
    }

    #[test]
    fn missing_side_constraint_is_reported() {
        let mut m = square();
        let side = m.anchor;
        m.set_constrained(side, false);
        assert_eq!(m.check_integrity(), Err(IntegrityError::CornerConstraints(6)));
    }

    #[test]
    fn misclassified_face_is_reported() {
        let mut m = square();
        let f = m.face(m.anchor);
        m.faces[f.0].kind = FaceKind::Boundary;
        assert_eq!(m.check_integrity(), Err(IntegrityError::MisclassifiedFace(f)));
    }

    #[test]
    fn bad_vertex_edge_is_reported() {
        let mut m = square();
        let c = m.corners()[0];
        m.verts[c.0].edge = m.anchor.twin();
        assert_eq!(m.check_integrity(), Err(IntegrityError::VertexEdgeMismatch(c)));
    }

    #[test]
    fn forced_flip_shows_up_as_violation() {
        let mut m = square();
        for (x, y) in [(50.0, 10.0), (50.0, 90.0), (20.0, 50.0), (80.0, 50.0)] {
            m.add((), x, y).unwrap();
        }
        let short = m
            .edges()
            .find(|&e| {
                let (a, b) = (m.pos(m.origin(e)), m.pos(m.target(e)));
                a.y == 50.0 && b.y == 50.0
            })
            .unwrap();
        assert!(m.flip_edge(short));
        m.check_integrity().unwrap();
        assert!(m.delaunay_violations() > 0);
        assert!(m.illegal_edge_count() > 0);
    }
}
