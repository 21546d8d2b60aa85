use serde::Deserialize;
use voxport_geom::Vec3;
use voxport_scene::ModelSize;

/// Which mesher turns a model into a [`MeshBuffer`](crate::MeshBuffer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshMode {
    /// One quad per exposed voxel face.
    Naive,
    /// Coplanar same-material faces merged into maximal rectangles.
    #[default]
    Greedy,
}

/// Immutable per-call settings shared by every mesher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshOptions {
    /// Per-axis scale applied to grid-space positions.
    pub build_scale: Vec3,
    /// Translate by `(-size.x/2, -size.y/2, 0)` grid units before scaling.
    pub center_xy: bool,
    /// Emit UVs that sample the palette texture texel of each face's material.
    pub palette_uvs: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            build_scale: Vec3::ONE,
            center_xy: true,
            palette_uvs: true,
        }
    }
}

impl MeshOptions {
    /// Grid-space offset applied to every position of a model of `size`.
    #[inline]
    pub fn origin_offset(&self, size: ModelSize) -> Vec3 {
        if self.center_xy {
            Vec3::new(-(size.x as f32) / 2.0, -(size.y as f32) / 2.0, 0.0)
        } else {
            Vec3::ZERO
        }
    }

    /// Maps a grid-space point into output space.
    #[inline]
    pub fn place(&self, grid: Vec3, offset: Vec3) -> Vec3 {
        (grid + offset).scale(self.build_scale)
    }
}
