/// Structural problems that abort a parse. No partial result is ever produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("not a vox archive (magic {0:?})")]
    BadMagic([u8; 4]),

    #[error("unsupported vox version {0}")]
    UnsupportedVersion(u32),

    #[error("truncated data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("SIZE chunk declares negative model size ({x}, {y}, {z})")]
    NegativeSize { x: i32, y: i32, z: i32 },

    #[error("voxel data at offset {offset} has no preceding SIZE chunk")]
    MissingSize { offset: usize },

    #[error("failed to read archive")]
    Io(#[from] std::io::Error),
}
