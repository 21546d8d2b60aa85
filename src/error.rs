use std::io;
use std::path::PathBuf;

use voxport_io::FormatError;
use voxport_scene::IndexError;

/// Everything that can stop an import run.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> ImportError {
        let path = path.into();
        move |source| ImportError::Io { path, source }
    }
}
