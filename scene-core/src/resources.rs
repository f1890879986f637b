// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Interfaces to the resource-loading and audio collaborators
//!
//! The core never loads files or talks to the GPU or sound device itself.
//! Loaders hand it opaque handles and already-baked vertex data through a
//! [`ResourceProvider`], which owns whatever caches it keeps.

use crate::error::SceneError;
use glam::Vec3;
use std::rc::Rc;

/// Floats per baked vertex: position (3), texcoord (2), normal (3)
pub const VERTEX_STRIDE: usize = 8;

/// Offset of the normal inside a baked vertex
pub const NORMAL_OFFSET: usize = 5;

/// Floats per vertex before normals are baked: position (3), texcoord (2)
pub const RAW_VERTEX_STRIDE: usize = 5;

/// Opaque renderer handle for a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Opaque renderer handle for a texture or cube map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Interleaved triangle list with one face normal per vertex
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryData {
    vertices: Vec<f32>,
}

impl GeometryData {
    /// Wrap an already baked buffer (stride [`VERTEX_STRIDE`])
    ///
    /// A trailing partial vertex is dropped.
    pub fn from_baked(mut vertices: Vec<f32>) -> Self {
        vertices.truncate(vertices.len() - vertices.len() % VERTEX_STRIDE);
        GeometryData { vertices }
    }

    /// Bake face normals into a position + texcoord triangle stream
    ///
    /// Each triangle gets the normalized cross product of its two edges
    /// leaving the first vertex. A trailing partial triangle is dropped.
    pub fn from_triangles(raw: &[f32]) -> Self {
        let triangle_floats = RAW_VERTEX_STRIDE * 3;
        let mut vertices = Vec::with_capacity(raw.len() / RAW_VERTEX_STRIDE * VERTEX_STRIDE);

        for triangle in raw.chunks_exact(triangle_floats) {
            let corner = |i: usize| {
                let base = i * RAW_VERTEX_STRIDE;
                Vec3::new(triangle[base], triangle[base + 1], triangle[base + 2])
            };
            let (t1, t2, t3) = (corner(0), corner(1), corner(2));
            let normal = (t2 - t1).cross(t3 - t1).normalize_or_zero();

            for vertex in triangle.chunks_exact(RAW_VERTEX_STRIDE) {
                vertices.extend_from_slice(vertex);
                vertices.extend_from_slice(&normal.to_array());
            }
        }

        GeometryData { vertices }
    }

    /// Axis-aligned box spanning -1..1 on every axis
    pub fn cuboid() -> Self {
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        let mut vertices = Vec::with_capacity(faces.len() * 6 * VERTEX_STRIDE);

        for (normal, u, v) in faces {
            let corners = [
                (normal - u - v, [0.0, 0.0]),
                (normal + u - v, [1.0, 0.0]),
                (normal + u + v, [1.0, 1.0]),
                (normal - u - v, [0.0, 0.0]),
                (normal + u + v, [1.0, 1.0]),
                (normal - u + v, [0.0, 1.0]),
            ];
            for (corner, uv) in corners {
                vertices.extend_from_slice(&corner.to_array());
                vertices.extend_from_slice(&uv);
                vertices.extend_from_slice(&normal.to_array());
            }
        }

        GeometryData { vertices }
    }

    /// The raw interleaved buffer
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Number of whole triangles in the buffer
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / (VERTEX_STRIDE * 3)
    }

    /// Distinct face normals in buffer order
    pub fn face_normals(&self) -> Vec<Vec3> {
        let mut normals: Vec<Vec3> = Vec::new();
        for vertex in self.vertices.chunks_exact(VERTEX_STRIDE) {
            let normal = Vec3::from_slice(&vertex[NORMAL_OFFSET..]);
            if !normals.contains(&normal) {
                normals.push(normal);
            }
        }
        normals
    }
}

/// Playback settings of an audio component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    /// Gain in 0..1
    pub volume: f32,
    /// Start playing as soon as the entity is assembled
    pub autoplay: bool,
    /// Loop forever
    pub looping: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        AudioSettings {
            volume: 0.8,
            autoplay: false,
            looping: false,
        }
    }
}

/// A voice owned by the audio backend
pub trait AudioVoice {
    /// Start playback with the given settings
    fn play(&mut self, settings: &AudioSettings);

    /// Move the emitter in world space
    fn set_emitter_position(&mut self, position: Vec3);

    /// Stop playback and free the backend source
    fn close(&mut self);
}

/// Loader collaborator consulted during scene assembly
///
/// Implementations own their caches; the core only asks for handles by name.
pub trait ResourceProvider {
    /// Mesh handle and baked buffer for a geometry file
    fn geometry(&mut self, name: &str) -> Result<(GeometryHandle, Rc<GeometryData>), SceneError>;

    /// Texture handle for an image file
    fn texture(&mut self, name: &str) -> Result<TextureHandle, SceneError>;

    /// Cube-map handle built from face images in order
    fn cube_map(&mut self, faces: &[&str]) -> Result<TextureHandle, SceneError>;

    /// Fresh voice for an audio clip
    fn audio(&mut self, name: &str) -> Result<Box<dyn AudioVoice>, SceneError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_has_six_outward_normals() {
        let cube = GeometryData::cuboid();
        assert_eq!(cube.triangle_count(), 12);

        let normals = cube.face_normals();
        assert_eq!(normals.len(), 6);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!(normals.contains(&axis));
            assert!(normals.contains(&-axis));
        }
    }

    #[test]
    fn test_cuboid_normals_match_winding() {
        let cube = GeometryData::cuboid();
        for triangle in cube.vertices().chunks_exact(VERTEX_STRIDE * 3) {
            let corner = |i: usize| Vec3::from_slice(&triangle[i * VERTEX_STRIDE..]);
            let baked = Vec3::from_slice(&triangle[NORMAL_OFFSET..]);
            let computed = (corner(1) - corner(0)).cross(corner(2) - corner(0)).normalize();
            assert!(computed.abs_diff_eq(baked, 1e-6));
        }
    }

    #[test]
    fn test_from_triangles_bakes_normals() {
        // One triangle in the XZ plane wound to face +Y
        let raw = [
            0.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, 1.0, 0.0, //
            9.0, 9.0, // partial trailing data
        ];
        let geometry = GeometryData::from_triangles(&raw);
        assert_eq!(geometry.triangle_count(), 1);
        assert_eq!(geometry.vertices().len(), 3 * VERTEX_STRIDE);
        assert_eq!(geometry.face_normals(), vec![Vec3::Y]);
    }

    #[test]
    fn test_degenerate_triangle_gets_zero_normal() {
        let raw = [0.0; RAW_VERTEX_STRIDE * 3];
        let geometry = GeometryData::from_triangles(&raw);
        assert_eq!(geometry.face_normals(), vec![Vec3::ZERO]);
    }
}
