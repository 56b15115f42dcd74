// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Error types for mesh operations and integrity checking.

use thiserror::Error;

use crate::geom::Real;
use crate::mesh::{EdgeId, FaceId, VertexId};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Recoverable errors reported to callers. The mesh is left untouched when
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The domain rectangle must have finite, positive extent.
    #[error("invalid mesh bounds {width} x {height}")]
    InvalidBounds { width: Real, height: Real },

    /// The coordinates are not finite or lie outside the domain.
    #[error("point ({x}, {y}) is outside the mesh bounds")]
    OutOfBounds { x: Real, y: Real },

    /// A vertex already occupies the requested position.
    #[error("point ({x}, {y}) is already occupied by vertex {existing}")]
    DuplicatePosition {
        x: Real,
        y: Real,
        existing: VertexId,
    },

    /// Corners and the point at infinity can never be removed or moved.
    #[error("vertex {0} is a corner or the point at infinity")]
    ImmutableVertex(VertexId),

    /// The id does not name a live vertex.
    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexId),
}

/// A broken structural invariant. These indicate a bug in the mesh itself,
/// never a caller error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    #[error("half-edge {0} references a dead record")]
    DanglingEdge(EdgeId),

    #[error("half-edge {0} does not close a 3-cycle")]
    BrokenCycle(EdgeId),

    #[error("half-edge {edge} names face {face} but its cycle disagrees")]
    FaceMismatch { edge: EdgeId, face: FaceId },

    #[error("face {0} references a dead or foreign half-edge")]
    DanglingFace(FaceId),

    #[error("face {0} has the wrong boundary tag")]
    MisclassifiedFace(FaceId),

    #[error("ordinary face {0} is not counter-clockwise")]
    InvertedFace(FaceId),

    #[error("half-edge {0} is constrained but its twin is not")]
    AsymmetricConstraint(EdgeId),

    #[error("vertex {0} has no valid outgoing half-edge")]
    VertexEdgeMismatch(VertexId),

    #[error("vertex {vertex} has two half-edges to neighbor {neighbor}")]
    DuplicateNeighbor { vertex: VertexId, neighbor: VertexId },

    #[error("vertex {vertex}: rotation reaches {reached} of {outgoing} outgoing half-edges")]
    UnreachableEdges {
        vertex: VertexId,
        reached: usize,
        outgoing: usize,
    },

    #[error("expected 8 constrained half-edges between corners, found {0}")]
    CornerConstraints(usize),

    #[error("Euler relation violated: V={vertices} E={edges} F={faces}")]
    Euler {
        vertices: usize,
        edges: usize,
        faces: usize,
    },
}
