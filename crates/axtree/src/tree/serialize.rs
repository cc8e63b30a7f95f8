/*!
Canonical consumer-facing records.

Serialization is per node: [`AxNode::serialize`] builds one record with
strict rules about which optional fields may appear. [`AxTree::snapshot`]
assembles the whole tree, optionally restricted to interesting nodes with the
children of pruned nodes hoisted into their nearest kept ancestor.

Tree walks here use explicit stacks, and serialized records drain their
descendants on drop, so depth is bounded by the heap rather than the call
stack.
*/

#![allow(missing_docs)]

use super::{AxNode, AxTree};
use crate::a11y::{Scalar, Tristate};
use crate::types::NodeId;
use serde::Serialize;
use std::collections::HashSet;
use ts_rs::TS;

/// Canonical record for one accessibility node.
///
/// `role` and `name` are always present; consumers must tolerate the absence
/// of every other field.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SerializedNode {
  /// Node role; `"unknown"` when the snapshot carried none.
  pub role: String,
  /// Accessible name; empty when the snapshot carried none.
  pub name: String,

  // Plain fields, copied only when present.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<Scalar>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyshortcuts: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub roledescription: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub valuetext: Option<String>,

  // Boolean fields, present only when true.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub disabled: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expanded: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub focused: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub modal: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub multiline: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub multiselectable: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub readonly: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub required: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected: Option<bool>,

  // Tristate fields: `true`, `false`, or the literal "mixed".
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(type = "boolean | \"mixed\" | null")]
  pub checked: Option<Tristate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(type = "boolean | \"mixed\" | null")]
  pub pressed: Option<Tristate>,

  // Numeric fields, passed through unchanged.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub valuemax: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub valuemin: Option<f64>,

  // Token fields, omitted when the token is the literal "false".
  #[serde(skip_serializing_if = "Option::is_none")]
  pub autocomplete: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub haspopup: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub invalid: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub orientation: Option<String>,

  /// Serialized children, populated by snapshot assembly.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<SerializedNode>,
}

// Default drop glue recurses once per depth level; drain descendants into a
// worklist so deep records cannot overflow the stack.
impl Drop for SerializedNode {
  fn drop(&mut self) {
    let mut pending = std::mem::take(&mut self.children);
    while let Some(mut node) = pending.pop() {
      pending.append(&mut node.children);
    }
  }
}

/// Boolean output fields appear only when the property is true.
const fn truthy(property: Option<bool>) -> Option<bool> {
  match property {
    Some(true) => Some(true),
    Some(false) | None => None,
  }
}

/// Token output fields are omitted when the token is the literal `"false"`.
fn token(property: &Option<String>) -> Option<String> {
  property
    .as_ref()
    .filter(|value| value.as_str() != "false")
    .cloned()
}

impl AxNode {
  /// Build the canonical record for this node alone; `children` stays empty.
  pub fn serialize(&self) -> SerializedNode {
    let props = &self.properties;
    SerializedNode {
      role: self.role.clone(),
      name: self.name.clone(),
      value: self.value.clone(),
      description: self.description.clone(),
      keyshortcuts: props.keyshortcuts.clone(),
      roledescription: props.roledescription.clone(),
      valuetext: props.valuetext.clone(),
      disabled: truthy(props.disabled),
      expanded: truthy(props.expanded),
      // Frame-level focus is not node-level focus.
      focused: if self.role == "WebArea" {
        None
      } else {
        truthy(props.focused)
      },
      modal: truthy(props.modal),
      multiline: truthy(props.multiline),
      multiselectable: truthy(props.multiselectable),
      readonly: truthy(props.readonly),
      required: truthy(props.required),
      selected: truthy(props.selected),
      checked: props.checked,
      pressed: props.pressed,
      level: props.level,
      valuemax: props.valuemax,
      valuemin: props.valuemin,
      autocomplete: token(&props.autocomplete),
      haspopup: token(&props.haspopup),
      invalid: token(&props.invalid),
      orientation: token(&props.orientation),
      children: Vec::new(),
    }
  }

  /// Serialize this subtree.
  ///
  /// With `interesting_only`, nodes that are not interesting are pruned and
  /// their children hoisted into the nearest kept ancestor; the walk stops
  /// below leaf nodes and flips `inside_control` below controls. Returns
  /// `None` when pruning leaves nothing.
  ///
  /// The result is a single record: when pruning removes this node itself
  /// and several of its descendants survive at the top level, the first
  /// survivor in document order is returned and the rest are discarded.
  pub fn snapshot(&self, interesting_only: bool) -> Option<SerializedNode> {
    let keep = interesting_only.then(|| {
      let mut keep = HashSet::new();
      collect_interesting(self, &mut keep);
      keep
    });
    serialize_tree(self, keep.as_ref()).into_iter().next()
  }
}

impl AxTree {
  /// Serialize the whole tree; see [`AxNode::snapshot`].
  pub fn snapshot(&self, interesting_only: bool) -> Option<SerializedNode> {
    self.root().snapshot(interesting_only)
  }
}

// Iterative to avoid stack overflow on deep trees; `inside_control` rides
// along on the stack.
fn collect_interesting<'t>(root: &'t AxNode, keep: &mut HashSet<&'t NodeId>) {
  let mut stack = vec![(root, false)];
  while let Some((node, inside_control)) = stack.pop() {
    if node.is_interesting(inside_control) {
      keep.insert(&node.id);
    }
    if node.is_leaf_node() {
      continue;
    }
    let inside_control = inside_control || node.is_control();
    for child in node.children.iter().rev() {
      stack.push((child, inside_control));
    }
  }
}

// Post-order over an explicit stack: Enter schedules the children, Exit folds
// the completed child level into the parent's. The bottom level collects the
// result for `root` itself.
fn serialize_tree(root: &AxNode, keep: Option<&HashSet<&NodeId>>) -> Vec<SerializedNode> {
  enum Walk<'t> {
    Enter(&'t AxNode),
    Exit(&'t AxNode),
  }

  let mut stack = vec![Walk::Enter(root)];
  let mut levels: Vec<Vec<SerializedNode>> = vec![Vec::new()];
  while let Some(step) = stack.pop() {
    match step {
      Walk::Enter(node) => {
        stack.push(Walk::Exit(node));
        levels.push(Vec::new());
        for child in node.children.iter().rev() {
          stack.push(Walk::Enter(child));
        }
      }
      Walk::Exit(node) => {
        let children = levels.pop().unwrap_or_default();
        // Every Exit has its Enter's level above the bottom one.
        let Some(parent) = levels.last_mut() else {
          continue;
        };
        // A pruned node contributes its children in its place.
        if keep.is_some_and(|keep| !keep.contains(&node.id)) {
          parent.extend(children);
        } else {
          let mut serialized = node.serialize();
          serialized.children = children;
          parent.push(serialized);
        }
      }
    }
  }
  levels.pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::super::fixtures::*;
  use super::super::AxTree;
  use serde_json::json;

  fn serialized(payload: crate::snapshot::NodePayload) -> serde_json::Value {
    let tree = AxTree::build(vec![payload]).expect("tree");
    serde_json::to_value(tree.root().serialize()).expect("json")
  }

  #[test]
  fn bare_node_serializes_to_role_and_name_only() {
    let out = serialized(record("n", "unknown", &[]));
    assert_eq!(out, json!({ "role": "unknown", "name": "" }));
  }

  #[test]
  fn name_value_description_come_from_dedicated_fields() {
    let mut payload = named(record("n", "textbox", &[]), "Email");
    payload.value = Some(wrap("me@example.org"));
    payload.description = Some(wrap("account email"));

    let out = serialized(payload);
    assert_eq!(
      out,
      json!({
        "role": "textbox",
        "name": "Email",
        "value": "me@example.org",
        "description": "account email",
      })
    );
  }

  #[test]
  fn string_properties_copy_from_the_property_bag() {
    let payload = with_property(
      with_property(record("n", "button", &[]), "keyshortcuts", "Ctrl+S"),
      "roledescription",
      "save button",
    );
    let out = serialized(payload);
    assert_eq!(out["keyshortcuts"], json!("Ctrl+S"));
    assert_eq!(out["roledescription"], json!("save button"));
  }

  #[test]
  fn false_booleans_are_omitted() {
    let payload = with_property(
      with_property(record("n", "button", &[]), "disabled", false),
      "required",
      true,
    );
    let out = serialized(payload);
    assert_eq!(out.get("disabled"), None);
    assert_eq!(out["required"], json!(true));
  }

  #[test]
  fn web_area_never_reports_node_level_focus() {
    let out = serialized(with_property(record("n", "WebArea", &[]), "focused", true));
    assert_eq!(out.get("focused"), None);

    let out = serialized(with_property(record("n", "button", &[]), "focused", true));
    assert_eq!(out["focused"], json!(true));
  }

  #[test]
  fn tristates_map_mixed_to_the_literal_string() {
    let out = serialized(with_property(record("n", "checkbox", &[]), "checked", "mixed"));
    assert_eq!(out["checked"], json!("mixed"));

    let out = serialized(with_property(record("n", "checkbox", &[]), "checked", "true"));
    assert_eq!(out["checked"], json!(true));

    let out = serialized(with_property(record("n", "button", &[]), "pressed", "false"));
    assert_eq!(out["pressed"], json!(false));

    let out = serialized(record("n", "checkbox", &[]));
    assert_eq!(out.get("checked"), None);
  }

  #[test]
  fn numbers_pass_through_unchanged() {
    let payload = with_property(
      with_property(
        with_property(record("n", "slider", &[]), "valuemin", 0.0),
        "valuemax",
        1.5,
      ),
      "level",
      2.0,
    );
    let out = serialized(payload);
    assert_eq!(out["valuemin"], json!(0.0));
    assert_eq!(out["valuemax"], json!(1.5));
    assert_eq!(out["level"], json!(2.0));
  }

  #[test]
  fn false_tokens_are_omitted() {
    let out = serialized(with_property(record("n", "textbox", &[]), "invalid", "false"));
    assert_eq!(out.get("invalid"), None);

    let out = serialized(with_property(record("n", "textbox", &[]), "invalid", "spelling"));
    assert_eq!(out["invalid"], json!("spelling"));

    let out = serialized(with_property(record("n", "textbox", &[]), "haspopup", "menu"));
    assert_eq!(out["haspopup"], json!("menu"));
  }

  #[test]
  fn full_snapshot_preserves_structure() {
    let tree = AxTree::build(scenario()).expect("tree");
    let out = tree.snapshot(false).expect("root record");

    assert_eq!(out.role, "WebArea");
    assert_eq!(out.children.len(), 2);
    assert_eq!(out.children[0].role, "button");
    assert_eq!(out.children[0].children.len(), 1);
    assert_eq!(out.children[0].children[0].role, "text");
    assert_eq!(out.children[1].role, "generic");
  }

  #[test]
  fn interesting_snapshot_prunes_scaffolding() {
    let tree = AxTree::build(scenario()).expect("tree");
    let out = tree.snapshot(true).expect("record");

    // R is structural, B is an unnamed leaf, C sits inside a control:
    // only the button survives, promoted to the top.
    assert_eq!(out.role, "button");
    assert_eq!(out.name, "Submit");
    assert!(out.children.is_empty());
  }

  #[test]
  fn first_top_level_survivor_wins_when_the_root_is_pruned() {
    let records = vec![
      record("R", "generic", &["A", "B"]),
      with_property(named(record("A", "button", &[]), "First"), "focusable", true),
      with_property(named(record("B", "button", &[]), "Second"), "focusable", true),
    ];
    let tree = AxTree::build(records).expect("tree");
    let out = tree.snapshot(true).expect("record");

    // Document order decides which survivor becomes the record.
    assert_eq!(out.role, "button");
    assert_eq!(out.name, "First");
    assert!(out.children.is_empty());
  }

  #[test]
  fn children_of_pruned_nodes_hoist_to_the_kept_ancestor() {
    let records = vec![
      with_property(named(record("R", "WebArea", &["w"]), "Doc"), "focusable", true),
      record("w", "generic", &["A"]),
      with_property(named(record("A", "button", &[]), "Go"), "focusable", true),
    ];
    let tree = AxTree::build(records).expect("tree");
    let out = tree.snapshot(true).expect("record");

    assert_eq!(out.role, "WebArea");
    assert_eq!(out.children.len(), 1);
    assert_eq!(out.children[0].role, "button");
  }

  #[test]
  fn snapshot_with_nothing_interesting_is_none() {
    let records = vec![
      record("R", "generic", &["k"]),
      record("k", "generic", &[]),
    ];
    let tree = AxTree::build(records).expect("tree");
    assert!(tree.snapshot(true).is_none());
  }

  #[test]
  fn subtree_snapshot_starts_at_the_given_node() {
    let tree = AxTree::build(scenario()).expect("tree");
    let a = tree.find(|node| node.id() == &id("A")).expect("A");

    let out = a.snapshot(false).expect("record");
    assert_eq!(out.role, "button");
    assert_eq!(out.children.len(), 1);
  }
}

#[cfg(test)]
mod proptests {
  use super::super::fixtures::*;
  use super::super::AxTree;
  use proptest::prelude::*;

  proptest! {
    /// Serialized token fields never carry the literal "false".
    #[test]
    fn tokens_never_serialize_as_false(value in "[a-z]{0,8}") {
      let payload = with_property(record("n", "textbox", &[]), "autocomplete", value.as_str());
      let tree = AxTree::build(vec![payload]).expect("tree");
      let out = tree.root().serialize();

      if value == "false" {
        prop_assert!(out.autocomplete.is_none());
      } else {
        prop_assert_eq!(out.autocomplete.as_deref(), Some(value.as_str()));
      }
    }

    /// Optional boolean fields appear iff the property is present and true.
    #[test]
    fn booleans_appear_iff_true(present in any::<bool>(), flag in any::<bool>()) {
      let base = record("n", "button", &[]);
      let payload = if present {
        with_property(base, "multiline", flag)
      } else {
        base
      };
      let tree = AxTree::build(vec![payload]).expect("tree");
      let out = tree.root().serialize();

      prop_assert_eq!(out.multiline, (present && flag).then_some(true));
    }
  }
}
