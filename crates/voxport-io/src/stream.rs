use std::fmt;

use crate::error::FormatError;

/// Four-byte chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    pub const MAIN: ChunkTag = ChunkTag(*b"MAIN");
    pub const PACK: ChunkTag = ChunkTag(*b"PACK");
    pub const SIZE: ChunkTag = ChunkTag(*b"SIZE");
    pub const XYZI: ChunkTag = ChunkTag(*b"XYZI");
    pub const RGBA: ChunkTag = ChunkTag(*b"RGBA");
    pub const MATT: ChunkTag = ChunkTag(*b"MATT");
    pub const NTRN: ChunkTag = ChunkTag(*b"nTRN");
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({self})")
    }
}

/// `children_length` is recorded but never used to scope nested chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: ChunkTag,
    pub content_length: u32,
    pub children_length: u32,
}

/// Sequential little-endian reader over an in-memory byte source.
///
/// The position only moves forward. Every read that needs more bytes than remain
/// fails with [`FormatError::Truncated`] and consumes nothing.
#[derive(Clone, Debug)]
pub struct ChunkStream<'a> {
    data: &'a [u8],
    pos: usize,
    // Absolute offset of `data[0]` in the archive, for error reporting.
    base: usize,
}

impl<'a> ChunkStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if n > self.remaining() {
            return Err(FormatError::Truncated {
                offset: self.position(),
                needed: n,
                remaining: self.remaining(),
            });
        }
        let data = self.data;
        let out = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), FormatError> {
        self.read_bytes(n).map(|_| ())
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.read_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.read_array().map(i32::from_le_bytes)
    }

    #[inline]
    pub fn read_tag(&mut self) -> Result<ChunkTag, FormatError> {
        self.read_array().map(ChunkTag)
    }

    pub fn read_header(&mut self) -> Result<ChunkHeader, FormatError> {
        let tag = self.read_tag()?;
        let content_length = self.read_u32()?;
        let children_length = self.read_u32()?;
        Ok(ChunkHeader {
            tag,
            content_length,
            children_length,
        })
    }

    /// Splits off the next `n` bytes as an independent, bounded stream.
    pub fn sub_stream(&mut self, n: usize) -> Result<ChunkStream<'a>, FormatError> {
        let base = self.position();
        let data = self.read_bytes(n)?;
        Ok(ChunkStream { data, pos: 0, base })
    }

    /// Iterates the remaining bytes as a flat sequence of sibling chunks.
    pub fn chunks(&mut self) -> Chunks<'_, 'a> {
        Chunks {
            stream: self,
            failed: false,
        }
    }
}

/// One chunk: its header and a stream bounded to exactly `content_length` bytes.
#[derive(Clone, Debug)]
pub struct Chunk<'a> {
    pub header: ChunkHeader,
    pub offset: usize,
    pub body: ChunkStream<'a>,
}

/// Flat chunk iterator. Stops after the first error.
pub struct Chunks<'s, 'a> {
    stream: &'s mut ChunkStream<'a>,
    failed: bool,
}

impl<'a> Iterator for Chunks<'_, 'a> {
    type Item = Result<Chunk<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.stream.at_end() {
            return None;
        }
        let offset = self.stream.position();
        let next = self.stream.read_header().and_then(|header| {
            let body = self.stream.sub_stream(header.content_length as usize)?;
            Ok(Chunk {
                header,
                offset,
                body,
            })
        });
        self.failed = next.is_err();
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], content: &[u8], children: u32) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(content.len() as u32).to_le_bytes());
        out.extend_from_slice(&children.to_le_bytes());
        out.extend_from_slice(content);
        out
    }

    #[test]
    fn reads_little_endian_fields() {
        let data = [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let mut s = ChunkStream::new(&data);
        assert_eq!(s.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(s.read_i32().unwrap(), -1);
        assert_eq!(s.read_u8().unwrap(), 0x7f);
        assert!(s.at_end());
    }

    #[test]
    fn short_read_fails_without_consuming() {
        let data = [1u8, 2, 3];
        let mut s = ChunkStream::new(&data);
        match s.read_u32() {
            Err(FormatError::Truncated {
                offset,
                needed,
                remaining,
            }) => {
                assert_eq!((offset, needed, remaining), (0, 4, 3));
            }
            other => panic!("expected truncation, got {other:?}"),
        }
        assert_eq!(s.position(), 0);
        assert_eq!(s.read_bytes(3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn chunks_are_flat_siblings() {
        // MAIN declares children, but they are still read as siblings of MAIN.
        let mut data = chunk(b"MAIN", &[], 40);
        data.extend(chunk(b"SIZE", &[0; 12], 0));
        data.extend(chunk(b"ABCD", &[9, 9], 0));
        let mut s = ChunkStream::new(&data);
        let tags: Vec<ChunkTag> = s.chunks().map(|c| c.unwrap().header.tag).collect();
        assert_eq!(tags, vec![ChunkTag::MAIN, ChunkTag::SIZE, ChunkTag(*b"ABCD")]);
        assert!(s.at_end());
    }

    #[test]
    fn chunk_body_is_bounded_and_offsets_absolute() {
        let mut data = chunk(b"AAAA", &[1, 2], 0);
        data.extend(chunk(b"BBBB", &[3, 4, 5, 6], 0));
        let mut s = ChunkStream::new(&data);
        let chunks: Vec<Chunk<'_>> = s.chunks().map(Result::unwrap).collect();
        assert_eq!(chunks[1].offset, 14);
        let mut body = chunks[1].body.clone();
        assert_eq!(body.position(), 26);
        assert_eq!(body.read_u32().unwrap(), u32::from_le_bytes([3, 4, 5, 6]));
        assert!(body.read_u8().is_err());
    }

    #[test]
    fn oversized_content_length_is_truncation() {
        let mut data = b"JUNK".to_vec();
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&[0; 10]);
        let mut s = ChunkStream::new(&data);
        let mut it = s.chunks();
        assert!(matches!(it.next(), Some(Err(FormatError::Truncated { .. }))));
        assert!(it.next().is_none());
    }

    #[test]
    fn tag_display_escapes_non_ascii() {
        assert_eq!(ChunkTag::NTRN.to_string(), "nTRN");
        assert_eq!(ChunkTag([b'A', 0, b'B', 0xff]).to_string(), "A\\x00B\\xff");
    }
}
