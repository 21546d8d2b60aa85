use std::collections::{BTreeMap, BTreeSet};

use crate::palette::{Palette, PaletteIndex};

/// Cell coordinate inside a model. Every axis is in `0..size`.
pub type Coord = (u8, u8, u8);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelSize {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl ModelSize {
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Extent along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(self, axis: usize) -> u32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    pub fn contains(self, x: i64, y: i64, z: i64) -> bool {
        (0..i64::from(self.x)).contains(&x)
            && (0..i64::from(self.y)).contains(&y)
            && (0..i64::from(self.z)).contains(&z)
    }

    #[inline]
    pub fn volume(self) -> u64 {
        u64::from(self.x) * u64::from(self.y) * u64::from(self.z)
    }
}

/// One decoded model: its grid size and the sparse set of occupied cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelModel {
    pub size: ModelSize,
    voxels: BTreeMap<Coord, PaletteIndex>,
    pub name: Option<String>,
}

impl VoxelModel {
    pub fn new(size: ModelSize) -> Self {
        Self {
            size,
            voxels: BTreeMap::new(),
            name: None,
        }
    }

    /// Stores a cell. Returns `false` (and stores nothing) if the cell lies outside `size`.
    pub fn insert(&mut self, cell: Coord, index: PaletteIndex) -> bool {
        let (x, y, z) = cell;
        if !self.size.contains(i64::from(x), i64::from(y), i64::from(z)) {
            return false;
        }
        self.voxels.insert(cell, index);
        true
    }

    #[inline]
    pub fn get(&self, cell: Coord) -> Option<PaletteIndex> {
        self.voxels.get(&cell).copied()
    }

    /// Lookup with signed coordinates; anything outside the grid reads as empty.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32, z: i32) -> Option<PaletteIndex> {
        if !self.size.contains(i64::from(x), i64::from(y), i64::from(z)) {
            return None;
        }
        self.get((x as u8, y as u8, z as u8))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Occupied cells in ascending `(x, y, z)` order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, PaletteIndex)> + '_ {
        self.voxels.iter().map(|(&c, &i)| (c, i))
    }

    /// Distinct palette indices used by this model, ascending.
    pub fn used_indices(&self) -> BTreeSet<PaletteIndex> {
        self.voxels.values().copied().collect()
    }
}

/// Output of one parse: every model in file order plus the shared palette.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneParseResult {
    pub models: Vec<VoxelModel>,
    pub palette: Palette,
}
