//! Decoded voxel scene: palette, models, and the parse result handed to meshers.
#![forbid(unsafe_code)]

pub mod model;
pub mod palette;

pub use model::{Coord, ModelSize, SceneParseResult, VoxelModel};
pub use palette::{IndexError, PALETTE_TEXTURE_WIDTH, Palette, PaletteIndex, Rgba8};
