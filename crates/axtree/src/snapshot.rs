/*!
Snapshot wire schema and the snapshot-fetch capability.

A snapshot is one flat, immutable set of accessibility node records fetched
at a point in time. The transport that produces it lives outside this crate;
it is injected through [`FetchSnapshot`], one request/response exchange
returning the full record set.
*/

use crate::a11y::Scalar;
use crate::types::{AxTreeResult, BackendNodeId, NodeId};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Wrapper around a scalar payload field (`{ "value": ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueWrapper {
  /// The wrapped scalar.
  pub value: Scalar,
}

/// One raw `{name, value}` property entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyPayload {
  /// Property name; matched case-insensitively against the schema.
  pub name: String,
  /// Raw property value.
  pub value: ValueWrapper,
}

/// One raw accessibility node record, as fetched by the snapshot collaborator.
///
/// Every field but `id` is optional; missing fields degrade to defaults when
/// the tree is built (role `"unknown"`, empty name, omitted optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePayload {
  /// Node id, unique within the snapshot.
  pub id: NodeId,

  /// Node role.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role: Option<ValueWrapper>,

  /// Accessible name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<ValueWrapper>,

  /// Current value (text fields, ranges).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<ValueWrapper>,

  /// Accessible description.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<ValueWrapper>,

  /// Generic property bag; validated against the schema at build time.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub properties: Vec<PropertyPayload>,

  /// Ordered child ids; every id must have a matching record.
  #[serde(default, rename = "childIds", skip_serializing_if = "Vec::is_empty")]
  pub child_ids: Vec<NodeId>,

  /// Backend id of the document element this record describes.
  #[serde(
    default,
    rename = "backendDOMNodeId",
    skip_serializing_if = "Option::is_none"
  )]
  pub backend_dom_node_id: Option<BackendNodeId>,
}

/// Deserialize a raw JSON snapshot response: an array of node records.
pub fn parse_records(raw: &str) -> AxTreeResult<Vec<NodePayload>> {
  Ok(serde_json::from_str(raw)?)
}

/// Capability A: fetch the full flat record set for the current document.
///
/// Retry and timeout policy belong to the implementor, not this crate.
pub trait FetchSnapshot {
  /// Perform one request/response exchange and return the record set.
  fn fetch(&self) -> impl Future<Output = AxTreeResult<Vec<NodePayload>>> + Send;
}
