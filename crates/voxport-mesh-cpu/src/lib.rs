//! CPU meshing for decoded voxel models: naive and greedy meshers plus the
//! per-cell and flat-palette paths. Meshers are pure functions over a borrowed model.
#![forbid(unsafe_code)]

mod cells;
mod face;
mod flat;
mod greedy;
mod grid;
mod mesh_build;
mod naive;
mod options;

pub use cells::build_cell_meshes;
pub use face::Face;
pub use flat::{CellPrototype, FlatPaletteSet, build_flat_palette};
pub use greedy::{GreedyMesher, greedy_quads, greedy_rects};
pub use mesh_build::{MaterialGroup, MeshBuffer, Quad, palette_uv};
pub use naive::{NaiveMesher, naive_quads};
pub use options::{MeshMode, MeshOptions};

use voxport_scene::{Palette, VoxelModel};

/// Meshes `model` with the mesher selected by `mode`.
pub fn build_model(
    model: &VoxelModel,
    palette: &Palette,
    mode: MeshMode,
    options: &MeshOptions,
) -> MeshBuffer {
    match mode {
        MeshMode::Naive => NaiveMesher::build(model, palette, options),
        MeshMode::Greedy => GreedyMesher::build(model, palette, options),
    }
}

// Meshing never fails; unresolvable materials only surface when the host binds colors.
fn warn_unresolved(model: &VoxelModel, palette: &Palette) {
    for index in model.used_indices() {
        if let Err(e) = palette.color(index) {
            log::warn!("{e}");
        }
    }
}
