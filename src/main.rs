use std::error::Error;

use clap::Parser;
use voxport::cli::{Cli, Command};
use voxport::import::{ModelOutput, file_stem};
use voxport::{ImportConfig, import_file, logging, obj};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::install(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Command::Info { file, orientation } => {
            let mut config = ImportConfig::default();
            if let Some(o) = orientation {
                config.orientation = o.into();
            }
            let scene = import_file(&file, &config)?;
            println!("{}: version {}", file.display(), scene.version);
            println!("palette: {} colors", scene.palette.len());
            println!("models: {}", scene.models.len());
            for model in &scene.models {
                let s = model.size;
                let quads = match &model.output {
                    ModelOutput::Mesh(mesh) => mesh.quad_count(),
                    _ => 0,
                };
                println!(
                    "  {:<24} {}x{}x{}  {} voxels  {} quads",
                    model.label, s.x, s.y, s.z, model.voxel_count, quads
                );
            }
        }
        Command::Mesh(args) => {
            let mut config = match &args.config {
                Some(path) => ImportConfig::from_path(path)?,
                None => ImportConfig::default(),
            };
            args.overrides.apply(&mut config);
            log::debug!("import config: {config:?}");
            let scene = import_file(&args.file, &config)?;
            let written = obj::export_scene(&scene, &args.out, &file_stem(&args.file))?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
