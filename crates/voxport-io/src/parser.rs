use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxport_scene::{ModelSize, Palette, PaletteIndex, Rgba8, SceneParseResult, VoxelModel};

use crate::error::FormatError;
use crate::node::TransformNode;
use crate::stream::{Chunk, ChunkStream, ChunkTag};

pub const VOX_MAGIC: [u8; 4] = *b"VOX ";
/// Newest archive version this reader accepts.
pub const MAX_VERSION: u32 = 150;

/// Coordinate transform applied to raw voxel records while decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Mirror X: `(sx - x - 1, y, z)`.
    #[default]
    Default,
    /// Swap the size's X/Y, then map `(x, y, z)` to `(sx - y - 1, sy - x - 1, z)`.
    XForward,
}

impl OrientationMode {
    #[inline]
    fn transform_size(self, x: u32, y: u32, z: u32) -> ModelSize {
        match self {
            OrientationMode::Default => ModelSize::new(x, y, z),
            OrientationMode::XForward => ModelSize::new(y, x, z),
        }
    }

    /// Maps a raw record into model space; `size` is the already transformed size.
    #[inline]
    fn transform_cell(self, size: ModelSize, x: u8, y: u8, z: u8) -> (i64, i64, i64) {
        let (sx, sy) = (i64::from(size.x), i64::from(size.y));
        let (x, y, z) = (i64::from(x), i64::from(y), i64::from(z));
        match self {
            OrientationMode::Default => (sx - x - 1, y, z),
            OrientationMode::XForward => (sx - y - 1, sy - x - 1, z),
        }
    }
}

/// Validates the 8-byte file header and returns the archive version.
pub fn read_file_header(stream: &mut ChunkStream<'_>) -> Result<u32, FormatError> {
    let mut magic = [0u8; 4];
    magic.copy_from_slice(stream.read_bytes(4)?);
    if magic != VOX_MAGIC {
        return Err(FormatError::BadMagic(magic));
    }
    let version = stream.read_u32()?;
    if version > MAX_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    Ok(version)
}

/// Decodes a whole archive into its models and palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoxSceneParser {
    orientation: OrientationMode,
}

impl VoxSceneParser {
    pub fn new(orientation: OrientationMode) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> OrientationMode {
        self.orientation
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<SceneParseResult, FormatError> {
        let bytes = fs::read(path)?;
        self.parse(&bytes)
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<SceneParseResult, FormatError> {
        let mut stream = ChunkStream::new(bytes);
        let version = read_file_header(&mut stream)?;
        log::debug!("vox version {version}");

        let mut scene = SceneBuilder::new(self.orientation);
        for chunk in stream.chunks() {
            scene.apply(chunk?)?;
        }
        Ok(scene.finish())
    }
}

/// Parses `bytes` with the given orientation. See [`VoxSceneParser::parse`].
pub fn parse(bytes: &[u8], orientation: OrientationMode) -> Result<SceneParseResult, FormatError> {
    VoxSceneParser::new(orientation).parse(bytes)
}

// Accumulated state across chunks. SIZE must precede the XYZI it describes.
struct SceneBuilder {
    orientation: OrientationMode,
    pending_size: Option<ModelSize>,
    models: Vec<VoxelModel>,
    palette: Palette,
    names: Vec<Option<String>>,
    declared_models: Option<i32>,
}

impl SceneBuilder {
    fn new(orientation: OrientationMode) -> Self {
        Self {
            orientation,
            pending_size: None,
            models: Vec::new(),
            palette: Palette::new(),
            names: Vec::new(),
            declared_models: None,
        }
    }

    fn apply(&mut self, chunk: Chunk<'_>) -> Result<(), FormatError> {
        let Chunk {
            header,
            offset,
            mut body,
        } = chunk;
        log::debug!(
            "chunk {} at {offset}: content {} children {}",
            header.tag,
            header.content_length,
            header.children_length
        );
        match header.tag {
            ChunkTag::MAIN => {}
            ChunkTag::PACK => {
                self.declared_models = Some(body.read_i32()?);
            }
            ChunkTag::SIZE => {
                let (x, y, z) = (body.read_i32()?, body.read_i32()?, body.read_i32()?);
                if x < 0 || y < 0 || z < 0 {
                    return Err(FormatError::NegativeSize { x, y, z });
                }
                self.pending_size =
                    Some(self.orientation.transform_size(x as u32, y as u32, z as u32));
            }
            ChunkTag::XYZI => {
                let size = self
                    .pending_size
                    .ok_or(FormatError::MissingSize { offset })?;
                let model = self.read_voxels(size, &mut body)?;
                self.models.push(model);
            }
            ChunkTag::RGBA => {
                for _ in 0..header.content_length / 4 {
                    let [r, g, b, a] = [
                        body.read_u8()?,
                        body.read_u8()?,
                        body.read_u8()?,
                        body.read_u8()?,
                    ];
                    self.palette.push(Rgba8::new(r, g, b, a));
                }
            }
            // Deprecated material chunk; the body is skipped with the chunk.
            ChunkTag::MATT => {}
            ChunkTag::NTRN => {
                let node = TransformNode::decode(&mut body)?;
                self.names.push(node.name);
            }
            other => {
                log::debug!("skipping chunk {other} ({} bytes)", header.content_length);
            }
        }
        Ok(())
    }

    fn read_voxels(
        &self,
        size: ModelSize,
        body: &mut ChunkStream<'_>,
    ) -> Result<VoxelModel, FormatError> {
        let count = body.read_u32()?;
        let mut model = VoxelModel::new(size);
        let mut outside = 0usize;
        for _ in 0..count {
            let record = body.read_bytes(4)?;
            let Some(index) = PaletteIndex::new(record[3]) else {
                continue;
            };
            let (x, y, z) = self
                .orientation
                .transform_cell(size, record[0], record[1], record[2]);
            let inside = size.contains(x, y, z) && model.insert((x as u8, y as u8, z as u8), index);
            if !inside {
                outside += 1;
            }
        }
        if outside > 0 {
            log::warn!("dropped {outside} voxels outside model size {size:?}");
        }
        Ok(model)
    }

    fn finish(self) -> SceneParseResult {
        let SceneBuilder {
            mut models,
            palette,
            names,
            declared_models,
            ..
        } = self;
        if let Some(declared) = declared_models {
            if usize::try_from(declared).ok() != Some(models.len()) {
                log::debug!("PACK declares {declared} models, found {}", models.len());
            }
        }
        for (model, name) in models.iter_mut().zip(names) {
            model.name = name;
        }
        log::info!(
            "parsed {} models, {} palette colors",
            models.len(),
            palette.len()
        );
        SceneParseResult { models, palette }
    }
}
