//! Host side of the `.vox` importer: configuration, logging, parallel meshing of
//! every model and OBJ export.

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod obj;

pub use config::ImportConfig;
pub use error::ImportError;
pub use import::{ImportedModel, ImportedScene, ModelOutput, import_bytes, import_file, model_label};
