// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

//! Incrementally maintained planar Delaunay triangulation over a rectangle.
//!
//! The mesh is a half-edge structure stored in index arenas. Every
//! mutation (`add`, `remove`, `move_vertex`) is followed by local edge flips
//! that restore the Delaunay property.

mod arena;
pub mod error;
pub mod geom;
pub mod mesh;

pub use error::{IntegrityError, MeshError, Result};
pub use geom::{Orientation, Point, Real};
pub use mesh::{EdgeId, FaceId, FaceKind, Location, Mesh, VertexId, VerticesNear, BORDER_MARGIN_FACTOR};
