// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Read-only access. Corners, the root and everything touching the root are
// hidden from these iterators.

use super::{EdgeId, FaceId, FaceKind, Mesh, Site, VertexId, INVALID};
use crate::geom::{squared_distance, Point, Real};

impl<T> Mesh<T> {
    /// Vertices added by the caller, in slot order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.verts
            .iter()
            .map(|(i, _)| VertexId(i))
            .filter(move |&v| !self.is_frame_vertex(v))
    }

    /// Number of vertices added by the caller.
    pub fn vertex_count(&self) -> usize {
        // Four corners and the root are always present.
        self.verts.len() - 5
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        !self.is_frame_vertex(v) && self.verts.contains(v.0)
    }

    /// Position of a live vertex, corners included.
    pub fn position(&self, v: VertexId) -> Option<Point> {
        match self.verts.get(v.0)?.site {
            Site::Finite(p) => Some(p),
            Site::Infinite => None,
        }
    }

    pub fn payload(&self, v: VertexId) -> Option<&T> {
        self.verts.get(v.0)?.payload.as_ref()
    }

    pub fn payload_mut(&mut self, v: VertexId) -> Option<&mut T> {
        self.verts.get_mut(v.0)?.payload.as_mut()
    }

    /// Vertices joined to `v` by an edge, counter-clockwise. Corners are
    /// included; the root is not. Empty for a dead id.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let linked = self
            .verts
            .get(v.0)
            .map_or(false, |vert| vert.edge.0 != INVALID);
        linked
            .then(|| self.outgoing(v))
            .into_iter()
            .flatten()
            .map(move |e| self.target(e))
            .filter(move |&n| n != self.root())
    }

    /// Number of visible neighbors of `v`.
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).count()
    }

    /// One half-edge per undirected edge, skipping edges to the root.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .map(|(slot, _)| EdgeId(slot << 1))
            .filter(move |&e| !self.is_boundary_edge(e))
    }

    /// `(origin, target)` of a live half-edge.
    pub fn edge_endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edge_alive(e).then(|| (self.origin(e), self.target(e)))
    }

    /// Ordinary faces.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .filter(|(_, f)| f.kind == FaceKind::Ordinary)
            .map(|(i, _)| FaceId(i))
    }

    pub fn face_count(&self) -> usize {
        self.faces().count()
    }

    /// Corners of a live face in counter-clockwise order.
    pub fn face_vertices(&self, f: FaceId) -> Option<[VertexId; 3]> {
        let e = self.faces.get(f.0)?.edge;
        Some([self.origin(e), self.origin(self.next(e)), self.origin(self.prev(e))])
    }

    /// Corner positions of every ordinary face, counter-clockwise.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.faces().filter_map(move |f| {
            let vs = self.face_vertices(f)?;
            Some(vs.map(|v| self.pos(v)))
        })
    }

    /// Caller vertices within `sqrt(max_squared_distance)` of `position`.
    ///
    /// A plain scan over the vertex arena. The iterator is lazy and can be
    /// cloned to restart it.
    pub fn vertices_near(&self, position: Point, max_squared_distance: Real) -> VerticesNear<'_, T> {
        VerticesNear {
            mesh: self,
            center: position,
            max_squared_distance,
            cursor: 0,
        }
    }
}

/// Iterator returned by [`Mesh::vertices_near`].
#[derive(Debug)]
pub struct VerticesNear<'a, T> {
    mesh: &'a Mesh<T>,
    center: Point,
    max_squared_distance: Real,
    cursor: u32,
}

impl<T> Clone for VerticesNear<'_, T> {
    fn clone(&self) -> Self {
        VerticesNear { ..*self }
    }
}

impl<T> Iterator for VerticesNear<'_, T> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        let mesh = self.mesh;
        while (self.cursor as usize) < mesh.verts.slot_count() {
            let v = VertexId(self.cursor);
            self.cursor += 1;
            if mesh.is_frame_vertex(v) {
                continue;
            }
            let Some(vert) = mesh.verts.get(v.0) else {
                continue;
            };
            if let Site::Finite(p) = vert.site {
                if squared_distance(p, self.center) <= self.max_squared_distance {
                    return Some(v);
                }
            }
        }
        None
    }
}
