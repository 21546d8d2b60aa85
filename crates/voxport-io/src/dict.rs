//! Length-prefixed string maps (`DICT`) embedded in scene chunks.

use hashbrown::HashMap;

use crate::error::FormatError;
use crate::stream::ChunkStream;

pub type Dict = HashMap<String, String>;

// Smallest possible encoded key/value pair: two empty strings.
const MIN_PAIR_BYTES: usize = 8;

/// Reads `{length: u32, bytes}` with no terminator. Invalid UTF-8 is replaced, not rejected.
pub fn read_string(stream: &mut ChunkStream<'_>) -> Result<String, FormatError> {
    let len = stream.read_u32()? as usize;
    let bytes = stream.read_bytes(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Reads `{count: u32}` followed by `count` key/value string pairs. Later duplicates win.
pub fn read_dictionary(stream: &mut ChunkStream<'_>) -> Result<Dict, FormatError> {
    let count = stream.read_u32()? as usize;
    let mut dict = Dict::with_capacity(count.min(stream.remaining() / MIN_PAIR_BYTES));
    for _ in 0..count {
        let key = read_string(stream)?;
        let value = read_string(stream)?;
        dict.insert(key, value);
    }
    Ok(dict)
}
