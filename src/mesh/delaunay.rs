// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Delaunay repair by edge flipping.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::{EdgeId, FaceId, Mesh};
use crate::geom::{point_in_circumcircle, segments_cross};

impl<T> Mesh<T> {
    /// Check if an edge is locally Delaunay: the apex across it lies outside
    /// the circumcircle of its left face. Edges bordering a boundary face are
    /// always considered legal.
    pub(crate) fn edge_is_locally_delaunay(&self, e: EdgeId) -> bool {
        let t = e.twin();
        if self.is_boundary_face(self.face(e)) || self.is_boundary_face(self.face(t)) {
            return true;
        }
        let a = self.pos(self.origin(e));
        let b = self.pos(self.target(e));
        let c = self.pos(self.apex(e));
        let d = self.pos(self.apex(t));
        !point_in_circumcircle(d, a, b, c)
    }

    /// First flippable half-edge of `f` that violates the Delaunay condition.
    fn illegal_edge(&self, f: FaceId) -> Option<EdgeId> {
        let e0 = self.faces[f.0].edge;
        [e0, self.next(e0), self.prev(e0)]
            .into_iter()
            .find(|&e| !self.is_constrained(e) && !self.edge_is_locally_delaunay(e))
    }

    /// Flip an interior edge to the other diagonal of its quadrilateral.
    ///
    /// Returns false and leaves the mesh untouched if the edge is dead,
    /// constrained, borders a boundary face, or its quadrilateral is not
    /// strictly convex.
    pub fn flip_edge(&mut self, e: EdgeId) -> bool {
        if !self.edge_alive(e) || self.is_constrained(e) {
            return false;
        }
        let t = e.twin();
        if self.is_boundary_face(self.face(e)) || self.is_boundary_face(self.face(t)) {
            return false;
        }
        let x = self.pos(self.origin(e));
        let y = self.pos(self.target(e));
        let l = self.pos(self.apex(e));
        let r = self.pos(self.apex(t));
        if !segments_cross(x, y, l, r) {
            return false;
        }
        self.flip_unchecked(e);
        true
    }

    /// Replace edge `X -> Y` (faces `X,Y,L` and `Y,X,R`) by `R -> L`.
    /// Returns the two faces now sharing the new edge.
    ///
    /// ```text
    ///        L                 L
    ///       / \               /|\
    ///      /   \             / | \
    ///     X --> Y    =>     X  |  Y
    ///      \   /             \ | /
    ///       \ /               \|/
    ///        R                 R
    /// ```
    pub(crate) fn flip_unchecked(&mut self, e: EdgeId) -> (FaceId, FaceId) {
        let t = e.twin();
        let yl = self.next(e);
        let lx = self.next(yl);
        let xr = self.next(t);
        let ry = self.next(xr);

        let x = self.origin(e);
        let y = self.origin(t);
        let l = self.origin(lx);
        let r = self.origin(ry);
        let fl = self.face(e);
        let fr = self.face(t);

        self.he_mut(e).origin = r;
        self.he_mut(t).origin = l;
        self.link_face(fl, [e, lx, xr]);
        self.link_face(fr, [t, ry, yl]);

        if self.verts[x.0].edge == e {
            self.verts[x.0].edge = xr;
        }
        if self.verts[y.0].edge == t {
            self.verts[y.0].edge = yl;
        }

        tracing::trace!(edge = %e, from = %x, to = %y, "flipped to {} -> {}", r, l);
        (fl, fr)
    }

    /// Flip illegal edges until every face reachable from `seeds` through
    /// flips is locally Delaunay. Returns the number of flips.
    ///
    /// Faces wait in a FIFO; a face is queued at most once at a time and is
    /// requeued whenever a flip rewrites it.
    pub(crate) fn restore_delaunay<I>(&mut self, seeds: I) -> usize
    where
        I: IntoIterator<Item = FaceId>,
    {
        let max_flips = self.faces.len() * self.faces.len() + 1;
        self.restore_delaunay_limited(seeds, max_flips)
    }

    /// Repair with an explicit cap on the number of flips. Hitting the cap
    /// leaves the mesh possibly non-Delaunay and fails debug builds.
    fn restore_delaunay_limited<I>(&mut self, seeds: I, max_flips: usize) -> usize
    where
        I: IntoIterator<Item = FaceId>,
    {
        let mut queue: VecDeque<FaceId> = VecDeque::new();
        let mut queued: FxHashSet<FaceId> = FxHashSet::default();
        for f in seeds {
            if self.faces.contains(f.0) && queued.insert(f) {
                queue.push_back(f);
            }
        }

        let mut flips = 0;

        while let Some(f) = queue.pop_front() {
            queued.remove(&f);
            if self.is_boundary_face(f) {
                continue;
            }
            let Some(e) = self.illegal_edge(f) else {
                continue;
            };
            if flips >= max_flips {
                tracing::warn!(flips, "Delaunay repair hit its flip limit");
                debug_assert!(flips < max_flips, "Delaunay repair hit its flip limit after {} flips", flips);
                break;
            }
            let (a, b) = self.flip_unchecked(e);
            flips += 1;
            for g in [a, b] {
                if queued.insert(g) {
                    queue.push_back(g);
                }
            }
        }

        if flips > 0 {
            tracing::debug!(flips, "restored Delaunay property");
        }
        flips
    }

    /// Run Delaunay repair seeded with every ordinary face. Returns the
    /// number of flips; zero on a mesh that is already Delaunay.
    pub fn restore_all(&mut self) -> usize {
        let seeds: Vec<FaceId> = self
            .faces
            .iter()
            .filter(|(_, f)| f.kind == super::FaceKind::Ordinary)
            .map(|(i, _)| FaceId(i))
            .collect();
        let flips = self.restore_delaunay(seeds);
        self.debug_validate();
        flips
    }
}
