// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Point insertion: face split and edge split.

use smallvec::SmallVec;

use super::{EdgeId, FaceId, Location, Mesh, Site, VertexId};
use crate::error::{MeshError, Result};
use crate::geom::Real;

impl<T> Mesh<T> {
    /// Insert a vertex carrying `payload` at `(x, y)`.
    ///
    /// Points on the rectangle's border are nudged just inside it. Fails
    /// without touching the mesh if the point is outside the bounds or a
    /// vertex already sits there.
    ///
    /// Two distinct points within the border margin of the same spot nudge
    /// to the same position; the second is then a duplicate, and the error
    /// reports the nudged coordinates rather than the ones passed in.
    pub fn add(&mut self, payload: T, x: Real, y: Real) -> Result<VertexId> {
        self.add_with_hint(payload, x, y, None)
    }

    /// Like [`Mesh::add`], starting point location from `hint`.
    pub fn add_with_hint(
        &mut self,
        payload: T,
        x: Real,
        y: Real,
        hint: Option<EdgeId>,
    ) -> Result<VertexId> {
        if !self.in_bounds(x, y) {
            return Err(MeshError::OutOfBounds { x, y });
        }
        let p = self.clamp_to_interior(x, y);
        let location = self.walk(p, self.start_edge(hint));
        if let Location::OnVertex(existing) = location {
            return Err(MeshError::DuplicatePosition {
                x: p.x,
                y: p.y,
                existing,
            });
        }

        let v = self.make_vertex(Site::Finite(p), Some(payload));
        self.insert_at(v, location);
        tracing::debug!(vertex = %v, x = p.x, y = p.y, "inserted vertex");
        self.debug_validate();
        Ok(v)
    }

    /// Link an allocated, unlinked vertex into the face or edge at
    /// `location`, then repair the faces around it.
    pub(crate) fn insert_at(&mut self, v: VertexId, location: Location) {
        let touched: SmallVec<[FaceId; 4]> = match location {
            Location::InFace(f) => self.split_face(f, v).into_iter().collect(),
            Location::OnEdge(e) => self.split_edge(e, v).into_iter().collect(),
            Location::OnVertex(other) => {
                panic!("vertex {} inserted on top of vertex {}", v, other)
            }
        };
        self.walk_hint = v;
        self.restore_delaunay(touched);
    }

    /// Split triangle `A,B,C` at interior vertex `I` into `A,B,I`, `B,C,I`
    /// and `C,A,I`. The original face record becomes `A,B,I`.
    fn split_face(&mut self, f: FaceId, v: VertexId) -> [FaceId; 3] {
        let kind = self.face_kind(f);
        let ab = self.faces[f.0].edge;
        let bc = self.next(ab);
        let ca = self.next(bc);
        let a = self.origin(ab);
        let b = self.origin(bc);
        let c = self.origin(ca);

        let ai = self.make_edge_pair(a, v);
        let bi = self.make_edge_pair(b, v);
        let ci = self.make_edge_pair(c, v);

        self.link_face(f, [ab, bi, ai.twin()]);
        let f1 = self.make_face(kind, [bc, ci, bi.twin()]);
        let f2 = self.make_face(kind, [ca, ai, ci.twin()]);
        self.verts[v.0].edge = ai.twin();

        tracing::trace!(face = %f, vertex = %v, "split face");
        [f, f1, f2]
    }

    /// Split half-edge `X -> Y` at vertex `I` lying on its segment.
    ///
    /// With `L` the apex on the left and `R` the apex on the right, the pair
    /// is reused as `X -> I` / `I -> X` and the two faces become four:
    /// `X,I,L` and `I,Y,L` on the left, `I,X,R` and `Y,I,R` on the right.
    /// Both halves keep the edge's constrained flag.
    fn split_edge(&mut self, e: EdgeId, v: VertexId) -> [FaceId; 4] {
        let t = e.twin();
        let yl = self.next(e);
        let lx = self.next(yl);
        let xr = self.next(t);
        let ry = self.next(xr);

        let y = self.origin(t);
        let l = self.origin(lx);
        let r = self.origin(ry);
        let fl = self.face(e);
        let fr = self.face(t);
        let constrained = self.is_constrained(e);

        self.he_mut(t).origin = v;
        let iy = self.make_edge_pair(v, y);
        self.set_constrained(iy, constrained);
        let il = self.make_edge_pair(v, l);
        let ir = self.make_edge_pair(v, r);

        self.link_face(fl, [e, il, lx]);
        let fl2 = self.make_face(self.face_kind(fl), [iy, yl, il.twin()]);
        self.link_face(fr, [t, xr, ir.twin()]);
        let fr2 = self.make_face(self.face_kind(fr), [iy.twin(), ir, ry]);

        if self.verts[y.0].edge == t {
            self.verts[y.0].edge = yl;
        }
        self.verts[v.0].edge = iy;

        tracing::trace!(edge = %e, vertex = %v, "split edge");
        [fl, fl2, fr, fr2]
    }
}
