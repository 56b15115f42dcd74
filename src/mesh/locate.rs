// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Walking point location.

use smallvec::SmallVec;

use super::{EdgeId, FaceId, Mesh, VertexId};
use crate::error::{MeshError, Result};
use crate::geom::{orientation, Orientation, Point, Real};

/// The mesh element containing a query point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The point coincides with a vertex.
    OnVertex(VertexId),
    /// The point lies in the interior of this half-edge's segment.
    OnEdge(EdgeId),
    /// The point lies strictly inside this face.
    InFace(FaceId),
}

impl<T> Mesh<T> {
    /// Find the vertex, edge or face containing `(x, y)`.
    pub fn locate(&self, x: Real, y: Real) -> Result<Location> {
        self.locate_with_hint(x, y, None)
    }

    /// Like [`Mesh::locate`], starting the walk from `hint` when it is still
    /// a live half-edge. A hint close to the target keeps the walk short.
    pub fn locate_with_hint(&self, x: Real, y: Real, hint: Option<EdgeId>) -> Result<Location> {
        if !self.in_bounds(x, y) {
            return Err(MeshError::OutOfBounds { x, y });
        }
        Ok(self.walk(Point::new(x, y), self.start_edge(hint)))
    }

    /// Pick a half-edge bordering an ordinary face to start a walk from.
    pub(crate) fn start_edge(&self, hint: Option<EdgeId>) -> EdgeId {
        if let Some(e) = hint.filter(|&e| self.edge_alive(e)) {
            if !self.is_boundary_face(self.face(e)) {
                return e;
            }
            if !self.is_boundary_face(self.face(e.twin())) {
                return e.twin();
            }
        }
        let v = self.walk_hint;
        if self.verts.contains(v.0) && self.verts[v.0].edge.0 != super::INVALID {
            if let Some(e) = self
                .outgoing(v)
                .find(|&e| !self.is_boundary_face(self.face(e)))
            {
                return e;
            }
        }
        self.anchor
    }

    /// Visibility walk from `start` (which must border an ordinary face)
    /// towards `p`, a point inside the closed rectangle.
    ///
    /// While `p` is strictly right of one of the current triangle's
    /// half-edges, step across it. The walk can never leave the rectangle
    /// because `p` is never right of a side. On a Delaunay triangulation with
    /// exact predicates each triangle is entered at most once.
    pub(crate) fn walk(&self, p: Point, start: EdgeId) -> Location {
        let mut e = start;
        let limit = self.faces.len() * 2 + 8;

        for step in 0..limit {
            let tri = [e, self.next(e), self.prev(e)];
            let mut sides = [Orientation::Left; 3];
            let mut crossed = None;
            for (i, &h) in tri.iter().enumerate() {
                let o = orientation(p, self.pos(self.origin(h)), self.pos(self.target(h)));
                if o == Orientation::Right {
                    crossed = Some(h);
                    break;
                }
                sides[i] = o;
            }

            if let Some(h) = crossed {
                debug_assert!(
                    !self.is_boundary_face(self.face(h.twin())),
                    "point location walked out of the rectangle"
                );
                // Enter the neighbor; its shared edge is tested last.
                e = self.next(h.twin());
                continue;
            }

            let on: SmallVec<[usize; 3]> = (0..3).filter(|&i| sides[i] == Orientation::On).collect();
            tracing::trace!(steps = step + 1, x = p.x, y = p.y, "point located");
            return match on.as_slice() {
                [] => Location::InFace(self.face(e)),
                [i] => Location::OnEdge(tri[*i]),
                // Two lines meet at the vertex shared by both half-edges.
                [0, 1] => Location::OnVertex(self.origin(tri[1])),
                [1, 2] => Location::OnVertex(self.origin(tri[2])),
                [0, 2] => Location::OnVertex(self.origin(tri[0])),
                _ => panic!("degenerate triangle at face {}", self.face(e)),
            };
        }

        panic!(
            "point location did not terminate for ({}, {}) after {} steps",
            p.x, p.y, limit
        );
    }
}
