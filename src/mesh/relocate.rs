// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Vertex relocation.

use smallvec::SmallVec;

use super::{FaceId, Location, Mesh, Site, VertexId};
use crate::error::{MeshError, Result};
use crate::geom::{orientation, segments_cross, Orientation, Point, Real};

impl<T> Mesh<T> {
    /// Move a vertex by `(dx, dy)`. The target is clamped into the strict
    /// interior of the rectangle. The vertex keeps its id and payload.
    ///
    /// If the target stays inside the star of the vertex the position is
    /// overwritten in place; otherwise the vertex is unlinked and inserted
    /// again at the target.
    pub fn move_vertex(&mut self, v: VertexId, dx: Real, dy: Real) -> Result<()> {
        self.check_mutable(v)?;
        let from = self.pos(v);
        let (tx, ty) = (from.x + dx, from.y + dy);
        if !(tx.is_finite() && ty.is_finite()) {
            return Err(MeshError::OutOfBounds { x: tx, y: ty });
        }
        let to = self.clamp_to_interior(tx, ty);
        if to == from {
            return Ok(());
        }

        if let Location::OnVertex(existing) = self.walk(to, self.start_edge(Some(self.vertex_edge(v)))) {
            if existing != v {
                return Err(MeshError::DuplicatePosition {
                    x: to.x,
                    y: to.y,
                    existing,
                });
            }
        }

        if self.stays_in_star(v, from, to) {
            self.verts[v.0].site = Site::Finite(to);
            let around: SmallVec<[FaceId; 8]> = self.outgoing(v).map(|e| self.face(e)).collect();
            let flips = self.restore_delaunay(around);
            tracing::debug!(vertex = %v, x = to.x, y = to.y, flips, "moved vertex in place");
        } else {
            // A link half-edge survives the unlink and sits next to the old
            // position, so it starts the walk close by.
            let hint = self.next(self.vertex_edge(v));
            let touched = self.unlink_vertex(v);
            self.restore_delaunay(touched);
            self.verts[v.0].site = Site::Finite(to);
            let location = self.walk(to, self.start_edge(Some(hint)));
            self.insert_at(v, location);
            tracing::debug!(vertex = %v, x = to.x, y = to.y, "moved vertex by reinsertion");
        }

        self.walk_hint = v;
        self.debug_validate();
        Ok(())
    }

    /// True if moving `v` from `from` to `to` keeps every triangle around it
    /// counter-clockwise: the path crosses no link edge and the target is
    /// strictly left of each one.
    fn stays_in_star(&self, v: VertexId, from: Point, to: Point) -> bool {
        self.outgoing(v).all(|e| {
            let link = self.next(e);
            let a = self.pos(self.origin(link));
            let b = self.pos(self.target(link));
            !segments_cross(from, to, a, b) && orientation(to, a, b) == Orientation::Left
        })
    }
}
