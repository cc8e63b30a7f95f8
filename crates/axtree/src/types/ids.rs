/*! Identifier newtypes. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Opaque accessibility node id, unique within one snapshot.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct NodeId(pub String);

/// Stable identifier correlating a document element with its accessibility
/// record across both representations.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct BackendNodeId(pub u64);
