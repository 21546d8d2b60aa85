use voxport_scene::{Coord, VoxelModel};

use crate::mesh_build::{MeshBuffer, MeshBuild};
use crate::options::MeshOptions;

/// One closed unit cube per occupied cell, placed where the cell sits in the model.
/// Used by hosts that need per-voxel pieces (fracture chunks). Ascending cell order.
pub fn build_cell_meshes(model: &VoxelModel, options: &MeshOptions) -> Vec<(Coord, MeshBuffer)> {
    model
        .iter()
        .map(|(coord, index)| {
            let (x, y, z) = coord;
            let mut build = MeshBuild::default();
            build.push_cube([i32::from(x), i32::from(y), i32::from(z)], index);
            (coord, build.finish(model.size, options))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxport_geom::Vec3;
    use voxport_scene::{ModelSize, PaletteIndex};

    #[test]
    fn every_cell_is_a_closed_cube_even_when_buried() {
        let mut model = VoxelModel::new(ModelSize::new(2, 1, 1));
        let one = PaletteIndex::new(1).unwrap();
        model.insert((0, 0, 0), one);
        model.insert((1, 0, 0), PaletteIndex::new(4).unwrap());
        let opts = MeshOptions {
            center_xy: false,
            ..MeshOptions::default()
        };
        let cells = build_cell_meshes(&model, &opts);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].0, (0, 0, 0));
        assert_eq!(cells[1].0, (1, 0, 0));
        for (_, mesh) in &cells {
            assert_eq!(mesh.quad_count(), 6);
            assert_eq!(mesh.material_groups.len(), 1);
        }
        let b = cells[1].1.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(cells[1].1.material_groups[0].palette_index.get(), 4);
    }
}
