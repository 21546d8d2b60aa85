//! Command-line parser.

use std::path::PathBuf;

use voxport_io::OrientationMode;
use voxport_mesh_cpu::MeshMode;

use crate::config::ImportConfig;

#[derive(Debug, clap::Parser)]
#[command(name = "voxport", version, about = "Decode .vox archives and export meshes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Write the log to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the header, models and palette size of an archive.
    Info {
        file: PathBuf,
        /// Coordinate transform applied while decoding.
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,
    },
    /// Mesh every model and write OBJ/MTL files plus the palette texture.
    Mesh(MeshArgs),
}

#[derive(Debug, clap::Args)]
pub struct MeshArgs {
    pub file: PathBuf,

    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,

    /// TOML import config; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Default, clap::Args)]
pub struct ConfigOverrides {
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Build scale, either `S` or `X,Y,Z`.
    #[arg(long, value_parser = parse_scale)]
    pub scale: Option<[f32; 3]>,

    /// Keep the grid origin instead of centring on X/Y.
    #[arg(long)]
    pub no_center: bool,

    /// One shared cube per color instead of a merged mesh.
    #[arg(long)]
    pub flat_palette: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ImportConfig) {
        if let Some(o) = self.orientation {
            config.orientation = o.into();
        }
        if let Some(m) = self.mode {
            config.mesh_mode = m.into();
        }
        if let Some(s) = self.scale {
            config.build_scale = s;
        }
        if self.no_center {
            config.center_xy = false;
        }
        if self.flat_palette {
            config.flat_palette = true;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OrientationArg {
    Default,
    XForward,
}

impl From<OrientationArg> for OrientationMode {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Default => OrientationMode::Default,
            OrientationArg::XForward => OrientationMode::XForward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Naive,
    Greedy,
}

impl From<ModeArg> for MeshMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Naive => MeshMode::Naive,
            ModeArg::Greedy => MeshMode::Greedy,
        }
    }
}

fn parse_scale(s: &str) -> Result<[f32; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [v] => Ok([v, v, v]),
        [x, y, z] => Ok([x, y, z]),
        _ => Err(format!("expected 1 or 3 components, got {}", parts.len())),
    }
}
