// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Vertex removal: shrink the vertex's degree with flips, then merge the
// remaining 3 or 4 triangles around it.

use smallvec::SmallVec;

use super::{EdgeId, FaceId, Mesh, VertexId, INVALID};
use crate::error::{MeshError, Result};
use crate::geom::{orientation, segments_cross, Orientation};

impl<T> Mesh<T> {
    /// Remove a vertex and hand back its payload.
    ///
    /// Corners and unknown ids are rejected without touching the mesh.
    pub fn remove(&mut self, v: VertexId) -> Result<T> {
        self.check_mutable(v)?;

        let touched = self.unlink_vertex(v);
        let payload = match self.kill_vertex(v) {
            Some(payload) => payload,
            None => panic!("mutable vertex {} carried no payload", v),
        };
        if self.walk_hint == v {
            self.walk_hint = self.corners()[0];
        }
        let flips = self.restore_delaunay(touched);

        tracing::debug!(vertex = %v, flips, "removed vertex");
        self.debug_validate();
        Ok(payload)
    }

    /// Only live vertices added by the caller may be removed or moved.
    pub(crate) fn check_mutable(&self, v: VertexId) -> Result<()> {
        if self.is_frame_vertex(v) {
            return Err(MeshError::ImmutableVertex(v));
        }
        if !self.verts.contains(v.0) {
            return Err(MeshError::UnknownVertex(v));
        }
        Ok(())
    }

    /// Detach `v` from the triangulation, leaving its record allocated with
    /// no edge. Returns the surviving faces that need repair.
    pub(crate) fn unlink_vertex(&mut self, v: VertexId) -> SmallVec<[FaceId; 16]> {
        let mut touched: SmallVec<[FaceId; 16]> = SmallVec::new();

        loop {
            let ring: SmallVec<[EdgeId; 8]> = self.outgoing(v).collect();
            let n = ring.len();
            if n <= 4 {
                break;
            }
            // Flip v -> two when the quadrilateral v, one, two, three is
            // strictly convex; the new edge one -> three skips over two.
            let center = self.pos(v);
            let flippable = (0..n).find_map(|i| {
                let spoke = ring[(i + 1) % n];
                if self.is_constrained(spoke) {
                    return None;
                }
                let one = self.pos(self.target(ring[i]));
                let two = self.pos(self.target(spoke));
                let three = self.pos(self.target(ring[(i + 2) % n]));
                segments_cross(one, three, center, two).then_some(spoke)
            });
            let Some(spoke) = flippable else {
                panic!("no flippable edge around vertex {} of degree {}", v, n);
            };
            let (a, b) = self.flip_unchecked(spoke);
            touched.extend([a, b]);
        }

        let ring: SmallVec<[EdgeId; 4]> = self.outgoing(v).collect();
        match ring.len() {
            3 => touched.push(self.merge_three([ring[0], ring[1], ring[2]])),
            4 => touched.extend(self.merge_four([ring[0], ring[1], ring[2], ring[3]])),
            n => panic!("vertex {} left with degree {}", v, n),
        }
        self.verts[v.0].edge = EdgeId(INVALID);

        let mut alive: SmallVec<[FaceId; 16]> = SmallVec::new();
        for f in touched {
            if self.faces.contains(f.0) && !alive.contains(&f) {
                alive.push(f);
            }
        }
        alive
    }

    /// Collapse the three triangles around a degree-3 vertex into the outer
    /// triangle. `ring` holds its outgoing half-edges counter-clockwise.
    fn merge_three(&mut self, ring: [EdgeId; 3]) -> FaceId {
        let outer = ring.map(|e| self.next(e));
        let faces = ring.map(|e| self.face(e));

        self.link_face(faces[0], outer);
        for &o in &outer {
            let n = self.origin(o);
            self.verts[n.0].edge = o;
        }
        for &e in &ring {
            self.kill_edge(e);
        }
        self.kill_face(faces[1]);
        self.kill_face(faces[2]);
        faces[0]
    }

    /// Collapse the four triangles around a degree-4 vertex into two,
    /// reusing one spoke's pair as the diagonal of the outer quadrilateral.
    fn merge_four(&mut self, ring: [EdgeId; 4]) -> [FaceId; 2] {
        let outer = ring.map(|e| self.next(e));
        let faces = ring.map(|e| self.face(e));
        let n = outer.map(|o| self.pos(self.origin(o)));

        // Counter-clockwise quadrilateral: n1 right of n0 -> n2 and n3 left
        // of it, unless the diagonal n0-n2 leaves the quadrilateral.
        let d = if orientation(n[1], n[0], n[2]) == Orientation::Right
            && orientation(n[3], n[0], n[2]) == Orientation::Left
        {
            0
        } else {
            1
        };

        let diagonal = ring[0];
        let a = self.origin(outer[d]);
        let b = self.origin(outer[d + 2]);
        self.he_mut(diagonal).origin = a;
        self.he_mut(diagonal.twin()).origin = b;
        self.set_constrained(diagonal, false);

        self.link_face(faces[0], [outer[d], outer[d + 1], diagonal.twin()]);
        self.link_face(faces[2], [outer[d + 2], outer[(d + 3) % 4], diagonal]);
        for &o in &outer {
            let n = self.origin(o);
            self.verts[n.0].edge = o;
        }
        for &e in &ring[1..] {
            self.kill_edge(e);
        }
        self.kill_face(faces[1]);
        self.kill_face(faces[3]);
        [faces[0], faces[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh<char> {
        Mesh::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn remove_returns_payload() {
        let mut m = square();
        let v = m.add('a', 30.0, 60.0).unwrap();
        assert_eq!(m.remove(v), Ok('a'));
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.faces().count(), 2);
        assert!(!m.verts.contains(v.0));
    }

    #[test]
    fn corners_are_immutable() {
        let mut m = square();
        m.add('a', 30.0, 60.0).unwrap();
        for c in m.corners() {
            assert_eq!(m.remove(c), Err(MeshError::ImmutableVertex(c)));
        }
        let root = m.root();
        assert_eq!(m.remove(root), Err(MeshError::ImmutableVertex(root)));
        assert_eq!(m.vertex_count(), 1);
    }

    #[test]
    fn removed_vertex_is_unknown() {
        let mut m = square();
        let v = m.add('a', 30.0, 60.0).unwrap();
        m.remove(v).unwrap();
        assert_eq!(m.remove(v), Err(MeshError::UnknownVertex(v)));
    }

    #[test]
    fn degree_four_vertex_on_diagonal() {
        let mut m = square();
        let v = m.add('m', 50.0, 50.0).unwrap();
        assert_eq!(m.outgoing(v).count(), 4);
        assert_eq!(m.remove(v), Ok('m'));
        assert_eq!(m.faces().count(), 2);
        m.check_integrity().unwrap();
    }

    #[test]
    fn high_degree_vertex_is_reduced_first() {
        let mut m = square();
        let ring = [
            (50.0, 20.0),
            (75.0, 30.0),
            (80.0, 55.0),
            (65.0, 78.0),
            (35.0, 80.0),
            (20.0, 55.0),
            (25.0, 30.0),
        ];
        for (i, &(x, y)) in ring.iter().enumerate() {
            m.add(char::from(b'a' + i as u8), x, y).unwrap();
        }
        let hub = m.add('z', 50.0, 50.0).unwrap();
        assert!(m.outgoing(hub).count() > 4);

        assert_eq!(m.remove(hub), Ok('z'));
        assert_eq!(m.vertex_count(), ring.len());
        assert_eq!(m.delaunay_violations(), 0);
    }
}
