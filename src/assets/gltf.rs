// SPDX-License-Identifier: MPL-2.0
//! glTF loading: flattens every primitive of a file into a single CPU mesh.
//!
//! Node transforms are baked into the vertices at load time so the viewer
//! needs no scene graph: the bounding box and the camera framing both work
//! on final world-space positions.

use crate::assets::{Aabb, CpuMesh, LoadedModel, Vertex};
use crate::error::{Error, Result};
use glam::{Mat3, Mat4, Vec3};
use gltf::mesh::util::ReadIndices;
use std::path::Path;
use std::sync::Arc;

/// Loads a `.gltf`/`.glb` file from disk and merges all primitives into a
/// single mesh with node transforms applied.
pub fn load_model(path: &Path) -> Result<LoadedModel> {
    let (doc, buffers, _images) = gltf::import(path)?;

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Prefer the default scene; fall back to the first one. Files with no
    // scene at all get their meshes merged without transforms.
    let scene = doc.default_scene().or_else(|| doc.scenes().next());
    match scene {
        Some(scene) => {
            for node in scene.nodes() {
                append_node(&node, Mat4::IDENTITY, &buffers, &mut vertices, &mut indices);
            }
        }
        None => {
            for mesh in doc.meshes() {
                append_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut vertices, &mut indices);
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        return Err(Error::Asset(format!(
            "no geometry found in {}",
            path.display()
        )));
    }

    let aabb = Aabb::from_vertices(&vertices);
    Ok(LoadedModel {
        mesh: Arc::new(CpuMesh { vertices, indices }),
        aabb,
        source: path.to_path_buf(),
    })
}

fn append_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        append_mesh(&mesh, transform, buffers, vertices, indices);
    }
    for child in node.children() {
        append_node(&child, transform, buffers, vertices, indices);
    }
}

fn append_mesh(
    mesh: &gltf::Mesh<'_>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
) {
    // Normals use the inverse-transpose so non-uniform scale keeps them
    // perpendicular to the surface.
    let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();

    for prim in mesh.primitives() {
        let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
        let pos = match reader.read_positions() {
            Some(it) => it.collect::<Vec<[f32; 3]>>(),
            None => continue,
        };
        let nrm: Vec<[f32; 3]> = match reader.read_normals() {
            Some(it) => it.collect(),
            None => vec![[0.0, 1.0, 0.0]; pos.len()],
        };

        let start = vertices.len() as u32;
        for i in 0..pos.len() {
            let p = transform.transform_point3(Vec3::from_array(pos[i]));
            let n = (normal_matrix * Vec3::from_array(nrm[i])).normalize_or_zero();
            vertices.push(Vertex {
                pos: p.to_array(),
                nrm: n.to_array(),
            });
        }

        match reader.read_indices() {
            Some(ReadIndices::U8(it)) => indices.extend(it.map(|v| start + u32::from(v))),
            Some(ReadIndices::U16(it)) => indices.extend(it.map(|v| start + u32::from(v))),
            Some(ReadIndices::U32(it)) => indices.extend(it.map(|v| start + v)),
            None => indices.extend((0..pos.len() as u32).map(|v| start + v)),
        }
    }
}
