use std::collections::BTreeMap;
use std::ops::Range;

use voxport_geom::{Aabb, Vec2, Vec3};
use voxport_scene::{ModelSize, PALETTE_TEXTURE_WIDTH, PaletteIndex};

use crate::face::Face;
use crate::options::MeshOptions;

/// Face-aligned rectangle in grid units.
///
/// `cell` is the minimum cell covered by the rectangle; `width` runs along the face's
/// primary in-plane axis and `height` along the secondary one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Quad {
    pub face: Face,
    pub cell: [i32; 3],
    pub width: u32,
    pub height: u32,
    pub index: PaletteIndex,
}

impl Quad {
    #[inline]
    pub fn unit(face: Face, cell: [i32; 3], index: PaletteIndex) -> Self {
        Self {
            face,
            cell,
            width: 1,
            height: 1,
            index,
        }
    }

    /// Number of unit faces this rectangle covers.
    #[inline]
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Grid-space corners, counter-clockwise around `+axis`.
    pub fn corners(&self) -> [Vec3; 4] {
        let d = self.face.axis();
        let (u, v) = self.face.plane_axes();
        let plane = self.cell[d] + i32::from(self.face.is_positive());
        let [x, y, z] = self.cell;
        let origin = Vec3::from_grid(x, y, z).with_axis(d, plane as f32);
        let du = Vec3::ZERO.with_axis(u, self.width as f32);
        let dv = Vec3::ZERO.with_axis(v, self.height as f32);
        [origin, origin + du, origin + du + dv, origin + dv]
    }
}

/// Triangles of one material, as a half-open range in triangle units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialGroup {
    pub palette_index: PaletteIndex,
    pub triangles: Range<u32>,
}

/// Mesh output handed to the host. Every quad is 4 vertices and 2 triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Option<Vec<Vec2>>,
    pub indices: Vec<u32>,
    pub material_groups: Vec<MaterialGroup>,
}

impl MeshBuffer {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index slice of one material group.
    pub fn group_indices(&self, group: &MaterialGroup) -> &[u32] {
        let start = group.triangles.start as usize * 3;
        let end = group.triangles.end as usize * 3;
        &self.indices[start..end]
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Appends one quad with the winding fixed up so it faces along `n`.
    fn push_quad(&mut self, corners: [Vec3; 4], n: Vec3, uv: Option<Vec2>) {
        let base = self.positions.len() as u32;
        let mut vs = corners;
        let e1 = vs[1] - vs[0];
        let e2 = vs[2] - vs[0];
        if e1.cross(e2).dot(n) < 0.0 {
            vs.swap(1, 3);
        }
        self.positions.extend_from_slice(&vs);
        self.normals.extend_from_slice(&[n; 4]);
        if let (Some(uvs), Some(uv)) = (self.uvs.as_mut(), uv) {
            uvs.extend_from_slice(&[uv; 4]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// UV sampling the centre of palette texel `index - 1`.
#[inline]
pub fn palette_uv(index: PaletteIndex) -> Vec2 {
    Vec2::new(
        (index.slot() as f32 + 0.5) / PALETTE_TEXTURE_WIDTH as f32,
        0.5,
    )
}

/// Collects quads per material, then lays them out group by group in ascending
/// palette order.
#[derive(Default, Clone)]
pub(crate) struct MeshBuild {
    groups: BTreeMap<PaletteIndex, Vec<Quad>>,
}

impl MeshBuild {
    #[inline]
    pub fn push(&mut self, quad: Quad) {
        self.groups.entry(quad.index).or_default().push(quad);
    }

    pub fn extend(&mut self, quads: impl IntoIterator<Item = Quad>) {
        for q in quads {
            self.push(q);
        }
    }

    /// Six unit faces of `cell`, independent of neighbours.
    pub fn push_cube(&mut self, cell: [i32; 3], index: PaletteIndex) {
        for face in Face::ALL {
            self.push(Quad::unit(face, cell, index));
        }
    }

    pub fn finish(self, size: ModelSize, options: &MeshOptions) -> MeshBuffer {
        let quads: usize = self.groups.values().map(Vec::len).sum();
        let mut out = MeshBuffer {
            positions: Vec::with_capacity(quads * 4),
            normals: Vec::with_capacity(quads * 4),
            uvs: options.palette_uvs.then(|| Vec::with_capacity(quads * 4)),
            indices: Vec::with_capacity(quads * 6),
            material_groups: Vec::with_capacity(self.groups.len()),
        };
        let offset = options.origin_offset(size);
        for (palette_index, group) in self.groups {
            let start = out.triangle_count() as u32;
            let uv = options.palette_uvs.then(|| palette_uv(palette_index));
            for quad in group {
                let corners = quad.corners().map(|c| options.place(c, offset));
                out.push_quad(corners, oriented_normal(quad.face, options.build_scale), uv);
            }
            out.material_groups.push(MaterialGroup {
                palette_index,
                triangles: start..out.triangle_count() as u32,
            });
        }
        out
    }
}

// A negative scale component mirrors the mesh, so the outward normal flips with it.
#[inline]
fn oriented_normal(face: Face, scale: Vec3) -> Vec3 {
    let n = face.normal();
    if scale.axis(face.axis()) < 0.0 { -n } else { n }
}
