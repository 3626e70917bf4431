/// Wire format of the tree snapshot handed over by the scan collaborator.
///
/// The snapshot is a plain nested JSON document. It is deserialised into
/// [`SnapshotNode`] and then flattened into the arena [`FileTree`] by
/// [`FileTree::from_snapshot`](super::FileTree::from_snapshot).
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One node of the nested snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "directory", alias = "isDirectory", alias = "is_dir")]
    pub is_dir: bool,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    /// A file node. The name is the last path segment.
    pub fn file(path: &str, size: u64) -> Self {
        Self {
            name: last_segment(path).to_string(),
            path: path.to_string(),
            is_dir: false,
            size,
            extension: None,
            children: Vec::new(),
        }
    }

    /// A directory node whose size is the sum of its children's sizes.
    pub fn dir(path: &str, children: Vec<SnapshotNode>) -> Self {
        let size = children.iter().map(|c| c.size).sum();
        Self {
            name: last_segment(path).to_string(),
            path: path.to_string(),
            is_dir: true,
            size,
            extension: None,
            children,
        }
    }

    /// Override the size, e.g. to model a directory whose aggregated size
    /// includes entries the snapshot does not list.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

/// Parse a snapshot from a JSON string.
pub fn parse_snapshot(json: &str) -> serde_json::Result<SnapshotNode> {
    deserialize_unbounded(serde_json::de::StrRead::new(json))
}

/// Read and parse a snapshot file.
pub fn read_snapshot(path: &Path) -> Result<SnapshotNode> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let reader = std::io::BufReader::new(file);
    deserialize_unbounded(serde_json::de::IoRead::new(reader)).map_err(|e| Error::json(path, e))
}

/// Each directory level costs two levels of JSON nesting, so serde_json's
/// default limit of 128 would reject trees deeper than ~63 directories.
/// The limit is lifted and `serde_stacker` grows the stack on demand.
fn deserialize_unbounded<'de, R: serde_json::de::Read<'de>>(
    read: R,
) -> serde_json::Result<SnapshotNode> {
    let mut json = serde_json::Deserializer::new(read);
    json.disable_recursion_limit();
    let node = SnapshotNode::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(node)
}

fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => &trimmed[pos + 1..],
        None if trimmed.is_empty() => path,
        None => trimmed,
    }
}
