// Copyright 2025 Lars Brubaker
// WASM bindings for planar-delaunay

use planar_delaunay::{Mesh, Point, VertexId};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// A Delaunay mesh over a rectangle. Vertices are addressed from JavaScript
/// by the handle `add` returns.
#[wasm_bindgen]
pub struct MeshJs {
    inner: Mesh<u32>,
    handles: Vec<Option<VertexId>>,
}

#[wasm_bindgen]
impl MeshJs {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<MeshJs, JsError> {
        Ok(MeshJs {
            inner: Mesh::new(width, height)?,
            handles: Vec::new(),
        })
    }

    /// Insert a point and return its handle.
    pub fn add(&mut self, x: f64, y: f64) -> Result<u32, JsError> {
        let handle = self.handles.len() as u32;
        let v = self.inner.add(handle, x, y)?;
        self.handles.push(Some(v));
        Ok(handle)
    }

    pub fn remove(&mut self, handle: u32) -> Result<(), JsError> {
        let v = self.vertex(handle)?;
        self.inner.remove(v)?;
        self.handles[handle as usize] = None;
        Ok(())
    }

    /// Move a point by `(dx, dy)`; the target is clamped to the rectangle.
    pub fn move_by(&mut self, handle: u32, dx: f64, dy: f64) -> Result<(), JsError> {
        let v = self.vertex(handle)?;
        self.inner.move_vertex(v, dx, dy)?;
        Ok(())
    }

    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }

    /// Flat triangle corners [x0,y0, x1,y1, x2,y2, ...] of every ordinary face.
    pub fn triangles(&self) -> Vec<f64> {
        self.inner
            .triangles()
            .flat_map(|tri| tri.into_iter().flat_map(|p| [p.x, p.y]))
            .collect()
    }

    /// Flat segment endpoints [x0,y0, x1,y1, ...], one pair per edge.
    pub fn edges(&self) -> Vec<f64> {
        let mut out = Vec::new();
        for e in self.inner.edges() {
            if let Some((a, b)) = self.inner.edge_endpoints(e) {
                for v in [a, b] {
                    if let Some(p) = self.inner.position(v) {
                        out.extend([p.x, p.y]);
                    }
                }
            }
        }
        out
    }

    /// Handles of the points within `radius` of `(x, y)`.
    pub fn near(&self, x: f64, y: f64, radius: f64) -> Vec<u32> {
        self.inner
            .vertices_near(Point::new(x, y), radius * radius)
            .filter_map(|v| self.inner.payload(v).copied())
            .collect()
    }
}

impl MeshJs {
    fn vertex(&self, handle: u32) -> Result<VertexId, JsError> {
        self.handles
            .get(handle as usize)
            .copied()
            .flatten()
            .ok_or_else(|| JsError::new(&format!("unknown handle {}", handle)))
    }
}
