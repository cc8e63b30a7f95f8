/*!
Accessibility tree assembly.

A snapshot arrives as a flat record set referencing children by id. Building
runs two passes: the first wraps every record into an [`AxNode`], validating
its properties against the schema and deriving the classification flags; the
second attaches children in child-id order. The root is the unique record
with no incoming child reference, and every structural defect (dangling or
duplicated references, zero or many roots, unreachable cycles) aborts the
build - a partially built tree is never returned.

Once built, a tree is immutable. Classification and serialization take
`&self` and are safe to call from any number of readers; the one cross-node
aggregate (`has_focusable_child`) is computed bottom-up while children are
attached, so no "not yet computed" state exists afterwards.

Assembly and teardown walk explicit stacks rather than recursing, so deep
trees cannot overflow the call stack.
*/

mod classify;
mod search;
mod serialize;

pub use search::ResolveBackendId;
pub use serialize::SerializedNode;

use crate::a11y::{Parsed, Property, PropertySet, Scalar};
use crate::snapshot::{FetchSnapshot, NodePayload};
use crate::types::{AxTreeError, AxTreeResult, BackendNodeId, NodeId};
use std::collections::{HashMap, HashSet};

/// One accessibility node: the raw record fields plus state derived once at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AxNode {
  id: NodeId,
  backend_dom_node_id: Option<BackendNodeId>,
  role: String,
  name: String,
  value: Option<Scalar>,
  description: Option<String>,
  properties: PropertySet,

  // Flags derived from the property set at construction.
  editable: bool,
  richly_editable: bool,
  focusable: bool,
  expanded: bool,
  hidden: bool,

  // Computed bottom-up when children are attached; final thereafter.
  has_focusable_child: bool,

  children: Vec<AxNode>,
}

impl AxNode {
  /// Wrap one raw record. Returns the node (childless for now) together with
  /// the ids its children will be attached from.
  fn from_payload(payload: NodePayload) -> AxTreeResult<(Self, Vec<NodeId>)> {
    let NodePayload {
      id,
      role,
      name,
      value,
      description,
      properties,
      child_ids,
      backend_dom_node_id,
    } = payload;

    let mut set = PropertySet::default();
    let mut editable = false;
    let mut richly_editable = false;
    for raw in &properties {
      match Property::parse(&raw.name, &raw.value.value) {
        Parsed::Property(property) => {
          if let Property::Editable(mode) = &property {
            editable = true;
            richly_editable = mode == "richtext";
          }
          set.insert(property);
        }
        Parsed::UnknownName => {
          log::warn!(
            "skipping unknown accessibility property '{}' on node {id}",
            raw.name
          );
        }
        Parsed::InvalidValue => {
          return Err(AxTreeError::InvalidProperty {
            node: id,
            name: raw.name.to_ascii_lowercase(),
          });
        }
      }
    }

    let role = role.map_or_else(|| "unknown".to_owned(), |w| w.value.into_string());
    let name = name.map_or_else(String::new, |w| w.value.into_string());
    let value = value.map(|w| w.value);
    let description = description.map(|w| w.value.into_string());

    let focusable = set.focusable.unwrap_or(false);
    let expanded = set.expanded.unwrap_or(false);
    let hidden = set.hidden.unwrap_or(false);

    Ok((
      Self {
        id,
        backend_dom_node_id,
        role,
        name,
        value,
        description,
        properties: set,
        editable,
        richly_editable,
        focusable,
        expanded,
        hidden,
        has_focusable_child: false,
        children: Vec::new(),
      },
      child_ids,
    ))
  }

  /// Attach children, deriving the focusable-descendant aggregate from their
  /// already-final values.
  fn with_children(mut self, children: Vec<AxNode>) -> Self {
    self.has_focusable_child = children
      .iter()
      .any(|child| child.focusable || child.has_focusable_child);
    self.children = children;
    self
  }

  /// Node id, unique within the snapshot this tree was built from.
  pub const fn id(&self) -> &NodeId {
    &self.id
  }

  /// Backend id of the document element this node describes, if known.
  pub const fn backend_dom_node_id(&self) -> Option<BackendNodeId> {
    self.backend_dom_node_id
  }

  /// Node role; `"unknown"` when the record carried none.
  pub fn role(&self) -> &str {
    &self.role
  }

  /// Accessible name; empty when the record carried none.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Raw value from the record's dedicated value field.
  pub const fn value(&self) -> Option<&Scalar> {
    self.value.as_ref()
  }

  /// Accessible description, if the record carried one.
  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  /// Whether this node accepts keyboard focus.
  pub const fn focusable(&self) -> bool {
    self.focusable
  }

  /// Whether this node is expanded (tree items, disclosure triangles).
  pub const fn expanded(&self) -> bool {
    self.expanded
  }

  /// Ordered children, exclusively owned by this node.
  pub fn children(&self) -> &[AxNode] {
    &self.children
  }
}

// Default drop glue recurses once per depth level; drain descendants into a
// worklist so deep trees cannot overflow the stack.
impl Drop for AxNode {
  fn drop(&mut self) {
    let mut pending = std::mem::take(&mut self.children);
    while let Some(mut node) = pending.pop() {
      pending.append(&mut node.children);
    }
  }
}

/// A rooted, immutable accessibility tree built from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AxTree {
  root: AxNode,
}

enum Step {
  Enter(NodeId),
  Exit(AxNode, Vec<NodeId>),
}

impl AxTree {
  /// Build a tree from one flat record set.
  ///
  /// The root is the unique record no other record references as a child.
  /// Any structural defect fails the whole build; see [`AxTreeError`].
  pub fn build(records: Vec<NodePayload>) -> AxTreeResult<Self> {
    if records.is_empty() {
      return Err(AxTreeError::EmptyNodeSet);
    }

    // First pass: wrap every record, keyed by id. Input order is kept so
    // validation reports the same defect for the same record set.
    let mut pending: HashMap<NodeId, (AxNode, Vec<NodeId>)> =
      HashMap::with_capacity(records.len());
    let mut order: Vec<NodeId> = Vec::with_capacity(records.len());
    for payload in records {
      let id = payload.id.clone();
      let wrapped = AxNode::from_payload(payload)?;
      if pending.insert(id.clone(), wrapped).is_some() {
        return Err(AxTreeError::DuplicateNodeId(id));
      }
      order.push(id);
    }

    // Validate references: every child id must name a record, and no record
    // may be claimed by two parents.
    let mut referenced: HashSet<NodeId> = HashSet::with_capacity(order.len());
    for id in &order {
      let Some((_, child_ids)) = pending.get(id) else {
        continue;
      };
      for child_id in child_ids {
        if !pending.contains_key(child_id) {
          return Err(AxTreeError::DanglingChildReference(child_id.clone()));
        }
        if !referenced.insert(child_id.clone()) {
          return Err(AxTreeError::DuplicateChildReference(child_id.clone()));
        }
      }
    }

    // The root is the unique unreferenced record.
    let mut root_id: Option<&NodeId> = None;
    for id in &order {
      if referenced.contains(id) {
        continue;
      }
      match root_id {
        None => root_id = Some(id),
        Some(first) => {
          return Err(AxTreeError::AmbiguousRoot(first.clone(), id.clone()));
        }
      }
    }
    let root_id = root_id.ok_or(AxTreeError::MissingRoot)?.clone();

    // Second pass: attach children bottom-up with an explicit stack. Each
    // node exits only after all of its children have exited, so children are
    // complete (focusable aggregate included) when attached.
    let mut built: HashMap<NodeId, AxNode> = HashMap::with_capacity(order.len());
    let mut stack = vec![Step::Enter(root_id.clone())];
    while let Some(step) = stack.pop() {
      match step {
        Step::Enter(id) => {
          // Presence is guaranteed by reference validation; single visit by
          // duplicate-reference detection.
          let Some((node, child_ids)) = pending.remove(&id) else {
            continue;
          };
          let enters: Vec<NodeId> = child_ids.clone();
          stack.push(Step::Exit(node, child_ids));
          for child_id in enters.into_iter().rev() {
            stack.push(Step::Enter(child_id));
          }
        }
        Step::Exit(node, child_ids) => {
          let mut children = Vec::with_capacity(child_ids.len());
          for child_id in &child_ids {
            let Some(child) = built.remove(child_id) else {
              return Err(AxTreeError::DanglingChildReference(child_id.clone()));
            };
            children.push(child);
          }
          let id = node.id.clone();
          built.insert(id, node.with_children(children));
        }
      }
    }

    // Records the walk never reached sit on a cycle disconnected from the root.
    if let Some(id) = order.iter().find(|id| pending.contains_key(*id)) {
      return Err(AxTreeError::UnreachableNode(id.clone()));
    }

    log::debug!(
      "built accessibility tree: {} nodes, root {root_id}",
      order.len()
    );

    let root = built.remove(&root_id).ok_or(AxTreeError::MissingRoot)?;
    Ok(Self { root })
  }

  /// Fetch a snapshot from `source` and build its tree.
  pub async fn capture<S: FetchSnapshot>(source: &S) -> AxTreeResult<Self> {
    let records = source.fetch().await?;
    Self::build(records)
  }

  /// The root node.
  pub const fn root(&self) -> &AxNode {
    &self.root
  }
}
