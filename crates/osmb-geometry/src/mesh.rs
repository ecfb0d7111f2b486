// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPU-ready mesh data
//!
//! Flattened triangle-list data for the renderer. Corners are not shared
//! between faces, so every face keeps a hard edge.

use nalgebra::{Point3, Vector3};

/// Triangle-list mesh with flattened vertex data
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create mesh with pre-allocated capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append one triangle with its face normal on every corner
    pub fn push_triangle(&mut self, corners: [Point3<f64>; 3]) {
        let [a, b, c] = corners;
        let normal = (b - a).cross(&(c - a));
        let normal = if normal.norm() > 0.0 {
            normal.normalize()
        } else {
            Vector3::zeros()
        };

        let base = self.vertex_count() as u32;
        for p in [a, b, c] {
            self.positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            self.normals.extend_from_slice(&[
                normal.x as f32,
                normal.y as f32,
                normal.z as f32,
            ]);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &MeshData) {
        let vertex_offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|i| i + vertex_offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_triangle_counts() {
        let mut mesh = MeshData::new();
        mesh.push_triangle([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        // Face normal points up for a counter-clockwise triangle in the XY plane.
        assert_eq!(&mesh.normals[..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = MeshData::new();
        a.push_triangle([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let b = a.clone();
        a.merge(&b);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(a.indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
