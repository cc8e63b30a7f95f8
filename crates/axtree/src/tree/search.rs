/*!
Tree search and external-handle correlation.

Search is deterministic: depth-first, a node before its children, children
left to right. Correlation maps an opaque element handle to a node by asking
an injected resolver for the handle's backend node id, then searching for it.
*/

use super::{AxNode, AxTree};
use crate::types::{AxTreeResult, BackendNodeId};
use std::future::Future;

/// Capability B: resolve an opaque element handle to a backend node id.
///
/// Resolution is asynchronous and may fail
/// ([`AxTreeError::ElementNotDescribed`](crate::AxTreeError::ElementNotDescribed)).
/// That failure is distinct from a successful resolution that matches no node
/// in a given tree, which [`AxTree::find_by_handle`] reports as `Ok(None)`.
/// Retry, timeout, and cancellation policy belong to the implementor.
pub trait ResolveBackendId {
  /// The opaque handle type this resolver understands.
  type Handle;

  /// Resolve `handle` to a backend node id.
  fn backend_node_id(
    &self,
    handle: &Self::Handle,
  ) -> impl Future<Output = AxTreeResult<BackendNodeId>> + Send;
}

impl AxNode {
  /// Depth-first pre-order search of this subtree; first match wins.
  pub fn find_in_subtree(&self, mut predicate: impl FnMut(&AxNode) -> bool) -> Option<&AxNode> {
    let mut stack = vec![self];
    while let Some(node) = stack.pop() {
      if predicate(node) {
        return Some(node);
      }
      // Reversed so the leftmost child pops first.
      stack.extend(node.children.iter().rev());
    }
    None
  }
}

impl AxTree {
  /// Depth-first pre-order search over the whole tree; first match wins.
  pub fn find(&self, predicate: impl FnMut(&AxNode) -> bool) -> Option<&AxNode> {
    self.root().find_in_subtree(predicate)
  }

  /// Find the node describing the document element with `backend_node_id`.
  pub fn find_by_backend_id(&self, backend_node_id: BackendNodeId) -> Option<&AxNode> {
    self.find(|node| node.backend_dom_node_id == Some(backend_node_id))
  }

  /// Resolve `handle` through `resolver`, then locate its node in this tree.
  ///
  /// A resolver failure propagates as an error; a handle that resolves to an
  /// id no node carries is `Ok(None)`.
  pub async fn find_by_handle<'t, R: ResolveBackendId>(
    &'t self,
    resolver: &R,
    handle: &R::Handle,
  ) -> AxTreeResult<Option<&'t AxNode>> {
    let backend_node_id = resolver.backend_node_id(handle).await?;
    Ok(self.find_by_backend_id(backend_node_id))
  }
}
