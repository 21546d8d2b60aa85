use voxport_scene::{PaletteIndex, VoxelModel};

use crate::face::Face;

// Coordinates are u8, so nothing is ever stored past 256 cells on an axis.
const MAX_EXTENT: usize = 256;

/// Dense copy of a model's occupancy for O(1) neighbour lookups.
pub(crate) struct DenseGrid {
    sx: usize,
    sy: usize,
    sz: usize,
    cells: Vec<Option<PaletteIndex>>,
}

impl DenseGrid {
    pub fn from_model(model: &VoxelModel) -> Self {
        let extent = |axis: usize| (model.size.axis(axis) as usize).min(MAX_EXTENT);
        let (sx, sy, sz) = (extent(0), extent(1), extent(2));
        let mut cells = vec![None; sx * sy * sz];
        for ((x, y, z), index) in model.iter() {
            cells[(z as usize * sy + y as usize) * sx + x as usize] = Some(index);
        }
        Self { sx, sy, sz, cells }
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        match axis {
            0 => self.sx,
            1 => self.sy,
            _ => self.sz,
        }
    }

    /// Anything outside the grid reads as empty.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<PaletteIndex> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.sx || y >= self.sy || z >= self.sz {
            return None;
        }
        self.cells[(z * self.sy + y) * self.sx + x]
    }

    /// Material of the face of `cell` looking out through `face`, if that face is exposed.
    #[inline]
    pub fn exposed(&self, cell: [i32; 3], face: Face) -> Option<PaletteIndex> {
        let index = self.get(cell[0], cell[1], cell[2])?;
        let (dx, dy, dz) = face.delta();
        match self.get(cell[0] + dx, cell[1] + dy, cell[2] + dz) {
            Some(_) => None,
            None => Some(index),
        }
    }
}
