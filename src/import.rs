use std::fs;
use std::path::Path;

use rayon::prelude::*;
use voxport_io::{ChunkStream, VoxSceneParser, read_file_header};
use voxport_mesh_cpu::{
    FlatPaletteSet, MeshBuffer, build_cell_meshes, build_flat_palette, build_model,
};
use voxport_scene::{Coord, IndexError, ModelSize, Palette, VoxelModel};

use crate::config::ImportConfig;
use crate::error::ImportError;

/// What the host receives for one model, depending on the configured path.
#[derive(Clone, Debug)]
pub enum ModelOutput {
    Mesh(MeshBuffer),
    Flat(FlatPaletteSet),
    Cells(Vec<(Coord, MeshBuffer)>),
}

#[derive(Clone, Debug)]
pub struct ImportedModel {
    pub label: String,
    pub size: ModelSize,
    pub voxel_count: usize,
    pub output: ModelOutput,
}

#[derive(Clone, Debug)]
pub struct ImportedScene {
    pub version: u32,
    pub palette: Palette,
    pub models: Vec<ImportedModel>,
}

/// Model label: its node name, or `stem` when unnamed, followed by its ordinal.
pub fn model_label(name: Option<&str>, stem: &str, ordinal: usize) -> String {
    let base = name.filter(|n| !n.is_empty()).unwrap_or(stem);
    format!("{base}{ordinal}")
}

/// File stem used as the fallback label for unnamed models.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_owned())
}

pub fn import_file(
    path: impl AsRef<Path>,
    config: &ImportConfig,
) -> Result<ImportedScene, ImportError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(ImportError::io(path))?;
    import_bytes(&bytes, &file_stem(path), config)
}

/// Parses an archive and meshes every model, models in parallel.
pub fn import_bytes(
    bytes: &[u8],
    stem: &str,
    config: &ImportConfig,
) -> Result<ImportedScene, ImportError> {
    let version = read_file_header(&mut ChunkStream::new(bytes))?;
    let scene = VoxSceneParser::new(config.orientation).parse(bytes)?;
    let palette = scene.palette;
    let models = scene
        .models
        .par_iter()
        .enumerate()
        .map(|(i, model)| {
            let label = model_label(model.name.as_deref(), stem, i);
            let output = mesh_one(model, &palette, config)?;
            log::debug!("{label}: {} voxels", model.len());
            Ok(ImportedModel {
                label,
                size: model.size,
                voxel_count: model.len(),
                output,
            })
        })
        .collect::<Result<Vec<_>, IndexError>>()?;
    Ok(ImportedScene {
        version,
        palette,
        models,
    })
}

fn mesh_one(
    model: &VoxelModel,
    palette: &Palette,
    config: &ImportConfig,
) -> Result<ModelOutput, IndexError> {
    let options = config.mesh_options();
    if config.flat_palette {
        build_flat_palette(model, palette, &options).map(ModelOutput::Flat)
    } else if config.cell_meshes {
        Ok(ModelOutput::Cells(build_cell_meshes(model, &options)))
    } else {
        Ok(ModelOutput::Mesh(build_model(
            model,
            palette,
            config.mesh_mode,
            &options,
        )))
    }
}
