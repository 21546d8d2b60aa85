use std::collections::{BTreeMap, HashMap};

use voxport_geom::Vec3;
use voxport_scene::{Coord, IndexError, ModelSize, Palette, PaletteIndex, Rgba8, VoxelModel};

use crate::mesh_build::{MeshBuffer, MeshBuild};
use crate::options::MeshOptions;

/// Shared unit-cube mesh for every cell of one color.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPrototype {
    /// First palette index seen with this color.
    pub palette_index: PaletteIndex,
    pub color: Rgba8,
    /// Unit cube at the origin, build-scaled, never centred.
    pub mesh: MeshBuffer,
    /// Full extent of the collision box around one instance.
    pub collision_extent: Vec3,
}

/// Per-color prototypes plus a map from occupied cell to prototype.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatPaletteSet {
    pub size: ModelSize,
    pub center_xy: bool,
    pub build_scale: Vec3,
    pub prototypes: Vec<CellPrototype>,
    pub cells: BTreeMap<Coord, usize>,
}

impl FlatPaletteSet {
    /// Where the host places the prototype instance for `cell`.
    pub fn instance_origin(&self, cell: Coord) -> Vec3 {
        let options = MeshOptions {
            build_scale: self.build_scale,
            center_xy: self.center_xy,
            palette_uvs: false,
        };
        let (x, y, z) = cell;
        options.place(
            Vec3::from_grid(i32::from(x), i32::from(y), i32::from(z)),
            options.origin_offset(self.size),
        )
    }

    pub fn instance_count(&self, prototype: usize) -> usize {
        self.cells.values().filter(|&&p| p == prototype).count()
    }
}

/// Builds one prototype per distinct color used by `model`, deduplicated by color
/// equality in ascending cell order.
pub fn build_flat_palette(
    model: &VoxelModel,
    palette: &Palette,
    options: &MeshOptions,
) -> Result<FlatPaletteSet, IndexError> {
    let unit = MeshOptions {
        center_xy: false,
        ..*options
    };
    let mut by_color: HashMap<Rgba8, usize> = HashMap::new();
    let mut prototypes = Vec::new();
    let mut cells = BTreeMap::new();
    for (coord, index) in model.iter() {
        let color = palette.color(index)?;
        let proto = *by_color.entry(color).or_insert_with(|| {
            let mut build = MeshBuild::default();
            build.push_cube([0, 0, 0], index);
            prototypes.push(CellPrototype {
                palette_index: index,
                color,
                mesh: build.finish(ModelSize::new(1, 1, 1), &unit),
                collision_extent: options.build_scale,
            });
            prototypes.len() - 1
        });
        cells.insert(coord, proto);
    }
    log::debug!(
        "flat palette: {} prototypes for {} cells",
        prototypes.len(),
        cells.len()
    );
    Ok(FlatPaletteSet {
        size: model.size,
        center_xy: options.center_xy,
        build_scale: options.build_scale,
        prototypes,
        cells,
    })
}
