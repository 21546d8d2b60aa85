use std::num::NonZeroU8;

/// Width of the palette texture handed to the host (one texel per palette slot).
pub const PALETTE_TEXTURE_WIDTH: usize = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalized `[r, g, b, a]` in `0.0..=1.0`.
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// Material of an occupied cell. Always in `1..=255`; "empty" is the absence of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaletteIndex(NonZeroU8);

impl PaletteIndex {
    /// Returns `None` for the reserved empty index `0`.
    #[inline]
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Position of this index's color in `Palette::colors`.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("palette of {len} colors too short to contain index {index}")]
pub struct IndexError {
    pub index: u8,
    pub len: usize,
}

/// Ordered RGBA colors; `PaletteIndex(i)` addresses `colors[i - 1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<Rgba8>,
}

impl Palette {
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    pub fn from_colors(colors: impl IntoIterator<Item = Rgba8>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn push(&mut self, color: Rgba8) {
        self.colors.push(color);
    }

    pub fn color(&self, index: PaletteIndex) -> Result<Rgba8, IndexError> {
        self.colors.get(index.slot()).copied().ok_or(IndexError {
            index: index.get(),
            len: self.colors.len(),
        })
    }

    /// 256x1 RGBA8 texture; texel `i` holds `colors[i]`, missing slots are transparent black.
    pub fn texture_rgba8(&self) -> Vec<u8> {
        let mut texels = vec![0u8; PALETTE_TEXTURE_WIDTH * 4];
        for (texel, color) in texels.chunks_exact_mut(4).zip(&self.colors) {
            texel.copy_from_slice(&color.to_array());
        }
        texels
    }
}
