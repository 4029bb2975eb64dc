// SPDX-License-Identifier: MPL-2.0
//! CPU-side asset types and loading.
//!
//! These representations are independent of any renderer; the viewer's
//! shader pipeline uploads them to the GPU unchanged.

pub mod gltf;

pub use gltf::load_model;

use glam::Vec3;
use std::path::PathBuf;
use std::sync::Arc;

/// Minimal vertex with position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
}

/// CPU-side mesh ready to be uploaded to the GPU.
#[derive(Debug, Clone)]
pub struct CpuMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Axis-aligned bounding box over a mesh's vertex positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Computes the bounding box of `vertices`.
    ///
    /// An empty slice yields a degenerate box at the origin, which frames
    /// the camera at a safe minimum distance rather than dividing by zero.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in vertices {
            let p = Vec3::from_array(v.pos);
            min = min.min(p);
            max = max.max(p);
        }
        if vertices.is_empty() {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest of the box's width, height, and depth.
    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

/// A fully decoded model: flattened mesh, bounds, and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub mesh: Arc<CpuMesh>,
    pub aabb: Aabb,
    pub source: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(pos: [f32; 3]) -> Vertex {
        Vertex {
            pos,
            nrm: [0.0, 1.0, 0.0],
        }
    }

    #[test]
    fn aabb_spans_all_vertices() {
        let vertices = [
            vertex([-1.0, 0.0, 2.0]),
            vertex([3.0, -4.0, 0.0]),
            vertex([0.0, 5.0, -6.0]),
        ];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, -6.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 5.0, 2.0));
        assert_eq!(aabb.max_dimension(), 9.0);
    }

    #[test]
    fn aabb_of_empty_mesh_is_degenerate_at_origin() {
        let aabb = Aabb::from_vertices(&[]);
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.max_dimension(), 0.0);
    }

    #[test]
    fn aabb_center_is_midpoint() {
        let vertices = [vertex([0.0, 0.0, 0.0]), vertex([2.0, 4.0, 6.0])];
        let aabb = Aabb::from_vertices(&vertices);
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }
}
