use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxport_geom::Vec3;
use voxport_io::OrientationMode;
use voxport_mesh_cpu::{MeshMode, MeshOptions};

use crate::error::ImportError;

/// Import settings, loaded from TOML. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub orientation: OrientationMode,
    pub mesh_mode: MeshMode,
    pub build_scale: [f32; 3],
    pub center_xy: bool,
    /// One shared cube per color instead of a merged mesh.
    pub flat_palette: bool,
    pub palette_uvs: bool,
    /// One closed cube mesh per occupied cell.
    pub cell_meshes: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            orientation: OrientationMode::Default,
            mesh_mode: MeshMode::Greedy,
            build_scale: [1.0, 1.0, 1.0],
            center_xy: true,
            flat_palette: false,
            palette_uvs: true,
            cell_meshes: false,
        }
    }
}

impl ImportConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ImportError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(ImportError::io(path))?;
        Self::from_toml_str(&s)
    }

    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            build_scale: Vec3::from(self.build_scale),
            center_xy: self.center_xy,
            palette_uvs: self.palette_uvs,
        }
    }
}
