use crate::dict::read_dictionary;
use crate::error::FormatError;
use crate::stream::ChunkStream;

const NAME_ATTRIBUTE: &str = "_name";

/// Decoded `nTRN` transform node. Only the name survives decoding; the remaining
/// attributes and all frame dictionaries are read to keep the stream aligned and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformNode {
    pub node_id: i32,
    pub name: Option<String>,
    pub child_id: i32,
    pub reserved_id: i32,
    pub layer_id: i32,
    pub frame_count: i32,
}

impl TransformNode {
    pub fn decode(body: &mut ChunkStream<'_>) -> Result<Self, FormatError> {
        let node_id = body.read_i32()?;
        let name = read_dictionary(body)?.remove(NAME_ATTRIBUTE);
        let child_id = body.read_i32()?;
        let reserved_id = body.read_i32()?;
        let layer_id = body.read_i32()?;
        let frame_count = body.read_i32()?;
        if reserved_id != -1 {
            log::debug!("nTRN node {node_id}: reserved id is {reserved_id}, expected -1");
        }
        for _ in 0..frame_count.max(0) {
            read_dictionary(body)?;
        }
        Ok(Self {
            node_id,
            name,
            child_id,
            reserved_id,
            layer_id,
            frame_count,
        })
    }
}
