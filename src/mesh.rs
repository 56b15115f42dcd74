// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The mesh is a half-edge data structure over a fixed rectangle.
// All references between records are u32 indices into slot arenas.
//
// Design:
//   - Half-edges are allocated in pairs: one arena slot holds both halves,
//     and EdgeId = 2 * slot + side, so twin(e) = e ^ 1.
//   - Every face is a triangle; `next` walks counter-clockwise around the
//     left face, so prev(e) = next(next(e)).
//   - Rotation around an origin vertex: rot_ccw(e) = twin(prev(e)),
//     rot_cw(e) = next(twin(e)).
//   - The rectangle's outside is closed by a root vertex "at infinity"
//     joined to the four corners. The four faces touching it are tagged
//     FaceKind::Boundary and are never examined geometrically.

use std::fmt;

use crate::arena::Arena;
use crate::error::{MeshError, Result};
use crate::geom::{Point, Real};

mod check;
mod delaunay;
mod insert;
mod locate;
mod query;
mod relocate;
mod remove;

pub use locate::Location;
pub use query::VerticesNear;

pub(crate) const INVALID: u32 = u32::MAX;

/// Points on the rectangle's border are nudged inward by this fraction of
/// the side they are measured along.
pub const BORDER_MARGIN_FACTOR: Real = 1e-9;

/// Index of a vertex record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) u32);

/// Index of a half-edge. The twin of `e` is always `e ^ 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u32);

/// Index of a triangular face record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub(crate) u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The oppositely-directed half of the same edge.
    #[inline(always)]
    pub fn twin(self) -> EdgeId {
        EdgeId(self.0 ^ 1)
    }

    #[inline(always)]
    fn slot(self) -> u32 {
        self.0 >> 1
    }

    #[inline(always)]
    fn side(self) -> usize {
        (self.0 & 1) as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Where a vertex sits: a point of the plane, or the point at infinity that
/// closes the outer boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Site {
    Finite(Point),
    Infinite,
}

#[derive(Clone, Debug)]
pub(crate) struct Vertex<T> {
    pub(crate) site: Site,
    /// None for corners and the root.
    pub(crate) payload: Option<T>,
    /// One outgoing half-edge.
    pub(crate) edge: EdgeId,
}

#[derive(Clone, Debug)]
pub(crate) struct HalfEdge {
    pub(crate) origin: VertexId,
    /// Next half-edge counter-clockwise around the left face.
    pub(crate) next: EdgeId,
    /// Left face.
    pub(crate) face: FaceId,
    /// Constrained edges are never flipped.
    pub(crate) constrained: bool,
}

impl HalfEdge {
    fn new(origin: VertexId) -> Self {
        HalfEdge {
            origin,
            next: EdgeId(INVALID),
            face: FaceId(INVALID),
            constrained: false,
        }
    }
}

/// Ordinary triangles tile the rectangle; boundary triangles touch the root.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Ordinary,
    Boundary,
}

#[derive(Clone, Debug)]
pub(crate) struct Face {
    pub(crate) edge: EdgeId,
    pub(crate) kind: FaceKind,
}

/// An incrementally maintained Delaunay triangulation of a rectangle whose
/// vertices carry caller payloads of type `T`.
#[derive(Clone, Debug)]
pub struct Mesh<T> {
    width: Real,
    height: Real,
    pub(crate) verts: Arena<Vertex<T>>,
    pub(crate) edges: Arena<[HalfEdge; 2]>,
    pub(crate) faces: Arena<Face>,
    corners: [VertexId; 4],
    root: VertexId,
    /// Default start of point location: the last vertex touched.
    pub(crate) walk_hint: VertexId,
    /// The bottom side `(0,0) -> (w,0)`. Constrained and never split, so it
    /// always borders an ordinary face.
    pub(crate) anchor: EdgeId,
}

impl<T> Mesh<T> {
    /// Triangulate the rectangle `[0, width] x [0, height]`.
    ///
    /// The empty mesh has 2 ordinary faces split along the diagonal from
    /// `(0, 0)` to `(width, height)`, and 4 boundary faces joining each side
    /// to the root vertex. The 8 side half-edges are constrained.
    pub fn new(width: Real, height: Real) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MeshError::InvalidBounds { width, height });
        }

        let mut m = Mesh {
            width,
            height,
            verts: Arena::new(),
            edges: Arena::new(),
            faces: Arena::new(),
            corners: [VertexId(INVALID); 4],
            root: VertexId(INVALID),
            walk_hint: VertexId(INVALID),
            anchor: EdgeId(INVALID),
        };

        let c = [
            m.make_vertex(Site::Finite(Point::new(0.0, 0.0)), None),
            m.make_vertex(Site::Finite(Point::new(width, 0.0)), None),
            m.make_vertex(Site::Finite(Point::new(width, height)), None),
            m.make_vertex(Site::Finite(Point::new(0.0, height)), None),
        ];
        let root = m.make_vertex(Site::Infinite, None);

        // sides[i]: c[i] -> c[i+1], interior on the left
        let mut sides = [EdgeId(INVALID); 4];
        let mut spokes = [EdgeId(INVALID); 4];
        for i in 0..4 {
            sides[i] = m.make_edge_pair(c[i], c[(i + 1) % 4]);
            m.set_constrained(sides[i], true);
            // spokes[i]: c[i] -> root
            spokes[i] = m.make_edge_pair(c[i], root);
        }
        let diagonal = m.make_edge_pair(c[0], c[2]);

        m.make_face(FaceKind::Ordinary, [sides[0], sides[1], diagonal.twin()]);
        m.make_face(FaceKind::Ordinary, [diagonal, sides[2], sides[3]]);
        for i in 0..4 {
            let j = (i + 1) % 4;
            m.make_face(
                FaceKind::Boundary,
                [sides[i].twin(), spokes[i], spokes[j].twin()],
            );
        }

        for i in 0..4 {
            m.verts[c[i].0].edge = sides[i];
        }
        m.verts[root.0].edge = spokes[0].twin();
        m.corners = c;
        m.root = root;
        m.walk_hint = c[0];
        m.anchor = sides[0];

        m.debug_validate();
        Ok(m)
    }

    // ──────────────────────────── Bounds ─────────────────────────────────────

    #[inline]
    pub fn width(&self) -> Real {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.height
    }

    /// The corners in counter-clockwise order starting at the origin.
    #[inline]
    pub fn corners(&self) -> [VertexId; 4] {
        self.corners
    }

    #[inline]
    pub fn is_corner(&self, v: VertexId) -> bool {
        self.corners.contains(&v)
    }

    #[inline]
    pub(crate) fn root(&self) -> VertexId {
        self.root
    }

    /// Corners and the root: part of the frame, never user-visible.
    #[inline]
    pub(crate) fn is_frame_vertex(&self, v: VertexId) -> bool {
        v == self.root || self.is_corner(v)
    }

    /// True if the point is finite and inside the closed rectangle.
    pub(crate) fn in_bounds(&self, x: Real, y: Real) -> bool {
        x.is_finite() && y.is_finite() && x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    /// Pull a point into the strict interior of the rectangle.
    pub(crate) fn clamp_to_interior(&self, x: Real, y: Real) -> Point {
        let mx = self.width * BORDER_MARGIN_FACTOR;
        let my = self.height * BORDER_MARGIN_FACTOR;
        Point::new(x.clamp(mx, self.width - mx), y.clamp(my, self.height - my))
    }

    // ──────────────────────────── Navigation ─────────────────────────────────

    #[inline]
    pub(crate) fn he(&self, e: EdgeId) -> &HalfEdge {
        &self.edges[e.slot()][e.side()]
    }

    #[inline]
    pub(crate) fn he_mut(&mut self, e: EdgeId) -> &mut HalfEdge {
        &mut self.edges[e.slot()][e.side()]
    }

    #[inline]
    pub(crate) fn edge_alive(&self, e: EdgeId) -> bool {
        e.0 != INVALID && self.edges.contains(e.slot())
    }

    #[inline]
    pub(crate) fn next(&self, e: EdgeId) -> EdgeId {
        self.he(e).next
    }

    /// Previous half-edge around the left face (faces are triangles).
    #[inline]
    pub(crate) fn prev(&self, e: EdgeId) -> EdgeId {
        self.next(self.next(e))
    }

    #[inline]
    pub(crate) fn origin(&self, e: EdgeId) -> VertexId {
        self.he(e).origin
    }

    #[inline]
    pub(crate) fn target(&self, e: EdgeId) -> VertexId {
        self.he(e.twin()).origin
    }

    /// The vertex of the left face not on `e`.
    #[inline]
    pub(crate) fn apex(&self, e: EdgeId) -> VertexId {
        self.origin(self.prev(e))
    }

    #[inline]
    pub(crate) fn face(&self, e: EdgeId) -> FaceId {
        self.he(e).face
    }

    /// Next outgoing half-edge counter-clockwise around the origin.
    #[inline]
    pub(crate) fn rot_ccw(&self, e: EdgeId) -> EdgeId {
        self.prev(e).twin()
    }

    /// Next outgoing half-edge clockwise around the origin.
    #[inline]
    pub(crate) fn rot_cw(&self, e: EdgeId) -> EdgeId {
        self.next(e.twin())
    }

    #[inline]
    pub(crate) fn is_constrained(&self, e: EdgeId) -> bool {
        self.he(e).constrained
    }

    #[inline]
    pub(crate) fn face_kind(&self, f: FaceId) -> FaceKind {
        self.faces[f.0].kind
    }

    #[inline]
    pub(crate) fn is_boundary_face(&self, f: FaceId) -> bool {
        self.face_kind(f) == FaceKind::Boundary
    }

    /// True if either end of `e` is the root.
    #[inline]
    pub(crate) fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.origin(e) == self.root || self.target(e) == self.root
    }

    #[inline]
    pub(crate) fn vertex_edge(&self, v: VertexId) -> EdgeId {
        self.verts[v.0].edge
    }

    /// Position of a finite vertex. Geometry is never asked of the root.
    #[inline]
    pub(crate) fn pos(&self, v: VertexId) -> Point {
        match self.verts[v.0].site {
            Site::Finite(p) => p,
            Site::Infinite => panic!("geometric query on the point at infinity"),
        }
    }

    /// Outgoing half-edges of `v` in counter-clockwise order, starting at its
    /// stored edge.
    pub(crate) fn outgoing(&self, v: VertexId) -> Outgoing<'_, T> {
        let start = self.vertex_edge(v);
        Outgoing {
            mesh: self,
            start,
            current: Some(start),
        }
    }

    // ───────────────────────── Allocation helpers ────────────────────────────

    pub(crate) fn make_vertex(&mut self, site: Site, payload: Option<T>) -> VertexId {
        VertexId(self.verts.alloc(Vertex {
            site,
            payload,
            edge: EdgeId(INVALID),
        }))
    }

    /// Allocate a half-edge pair `a -> b` / `b -> a`. Returns the `a -> b` half.
    pub(crate) fn make_edge_pair(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let slot = self.edges.alloc([HalfEdge::new(a), HalfEdge::new(b)]);
        EdgeId(slot << 1)
    }

    /// Allocate a face and link `cycle` into a counter-clockwise 3-cycle on it.
    pub(crate) fn make_face(&mut self, kind: FaceKind, cycle: [EdgeId; 3]) -> FaceId {
        let f = FaceId(self.faces.alloc(Face {
            edge: cycle[0],
            kind,
        }));
        self.link_face(f, cycle);
        f
    }

    /// Relink an existing face record onto `cycle`.
    pub(crate) fn link_face(&mut self, f: FaceId, cycle: [EdgeId; 3]) {
        for i in 0..3 {
            let e = cycle[i];
            let he = self.he_mut(e);
            he.next = cycle[(i + 1) % 3];
            he.face = f;
        }
        self.faces[f.0].edge = cycle[0];
    }

    pub(crate) fn set_constrained(&mut self, e: EdgeId, constrained: bool) {
        self.he_mut(e).constrained = constrained;
        self.he_mut(e.twin()).constrained = constrained;
    }

    pub(crate) fn kill_edge(&mut self, e: EdgeId) {
        self.edges.free(e.slot());
    }

    pub(crate) fn kill_face(&mut self, f: FaceId) {
        self.faces.free(f.0);
    }

    /// Release a vertex record, handing back its payload.
    pub(crate) fn kill_vertex(&mut self, v: VertexId) -> Option<T> {
        self.verts.free(v.0).and_then(|vert| vert.payload)
    }

    /// Panics if the mesh is structurally broken. Compiled out of release
    /// builds.
    #[inline]
    pub(crate) fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_integrity() {
                panic!("mesh integrity violated: {}", err);
            }
        }
    }
}

/// Iterator over the outgoing half-edges of a vertex, counter-clockwise.
pub(crate) struct Outgoing<'a, T> {
    mesh: &'a Mesh<T>,
    start: EdgeId,
    current: Option<EdgeId>,
}

impl<T> Iterator for Outgoing<'_, T> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let e = self.current?;
        let n = self.mesh.rot_ccw(e);
        self.current = if n == self.start { None } else { Some(n) };
        Some(e)
    }
}
