use voxport_scene::{Palette, VoxelModel};

use crate::face::Face;
use crate::grid::DenseGrid;
use crate::mesh_build::{MeshBuffer, MeshBuild, Quad};
use crate::options::MeshOptions;
use crate::warn_unresolved;

/// One unit quad per exposed face, cells in ascending order and faces in sweep order.
pub fn naive_quads(model: &VoxelModel) -> Vec<Quad> {
    let grid = DenseGrid::from_model(model);
    let mut quads = Vec::new();
    for ((x, y, z), _) in model.iter() {
        let cell = [i32::from(x), i32::from(y), i32::from(z)];
        for face in Face::ALL {
            if let Some(index) = grid.exposed(cell, face) {
                quads.push(Quad::unit(face, cell, index));
            }
        }
    }
    quads
}

/// Mesher without any face merging.
pub struct NaiveMesher;

impl NaiveMesher {
    pub fn build(model: &VoxelModel, palette: &Palette, options: &MeshOptions) -> MeshBuffer {
        warn_unresolved(model, palette);
        let mut build = MeshBuild::default();
        build.extend(naive_quads(model));
        build.finish(model.size, options)
    }
}
