use std::fs::File;
use std::path::Path;

use log::LevelFilter;

use crate::error::ImportError;

/// Installs the global logger: `env_logger` on stderr (filtered by `RUST_LOG`,
/// default `info`), or a `simplelog` file logger when `log_file` is given.
pub fn install(verbose: bool, log_file: Option<&Path>) -> Result<(), ImportError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(ImportError::io(path))?;
            let config = simplelog::ConfigBuilder::new()
                .set_location_level(LevelFilter::Off)
                .build();
            simplelog::WriteLogger::init(level, config, file)?;
        }
        None => {
            let env = env_logger::Env::default().default_filter_or(level.as_str());
            env_logger::Builder::from_env(env).try_init()?;
        }
    }
    Ok(())
}
