/*! Error types for axtree operations. */

use super::NodeId;

/// Errors that can occur while capturing, building, or querying a snapshot tree.
///
/// Construction errors are fatal: a partially built tree is never returned.
#[derive(Debug, thiserror::Error)]
pub enum AxTreeError {
  #[error("empty node set: snapshot contained no records")]
  EmptyNodeSet,

  #[error("duplicate node id in snapshot: {0}")]
  DuplicateNodeId(NodeId),

  #[error("dangling child reference: no record for node {0}")]
  DanglingChildReference(NodeId),

  #[error("node {0} is referenced as a child more than once")]
  DuplicateChildReference(NodeId),

  #[error("no root candidate: every record is referenced as a child")]
  MissingRoot,

  #[error("ambiguous root: {0} and {1} both lack an incoming child reference")]
  AmbiguousRoot(NodeId, NodeId),

  #[error("node {0} is not reachable from the root")]
  UnreachableNode(NodeId),

  #[error("invalid value for property '{name}' on node {node}")]
  InvalidProperty { node: NodeId, name: String },

  #[error("element is not described by the accessibility tree: {0}")]
  ElementNotDescribed(String),

  #[error("snapshot fetch failed: {0}")]
  SnapshotFetch(String),

  #[error("malformed snapshot payload: {0}")]
  MalformedSnapshot(#[from] serde_json::Error),
}

/// Result type for axtree operations.
pub type AxTreeResult<T> = Result<T, AxTreeError>;
