//! Reader for the chunked `.vox` voxel archive format.
//!
//! The archive is a flat sequence of sibling chunks after an 8-byte file header.
//! [`ChunkStream`] yields raw chunks, [`dict`] decodes the string maps embedded in
//! scene chunks, and [`VoxSceneParser`] dispatches chunks by tag into a
//! [`SceneParseResult`](voxport_scene::SceneParseResult).
#![forbid(unsafe_code)]

pub mod dict;
pub mod error;
pub mod node;
pub mod parser;
pub mod stream;

pub use dict::{Dict, read_dictionary, read_string};
pub use error::FormatError;
pub use node::TransformNode;
pub use parser::{MAX_VERSION, OrientationMode, VOX_MAGIC, VoxSceneParser, parse, read_file_header};
pub use stream::{Chunk, ChunkHeader, ChunkStream, ChunkTag};
