/*!
Node classification.

Pure predicates over a node and its already-built children, encoding the
platform conventions for what assistive technology should see: structural
scaffolding is hidden, controls and meaningful text always surface. Rule
order carries priority - explicit presentational roles override the generic
focusable-descendant rule.
*/

use super::AxNode;

impl AxNode {
  /// Is this node a text field without rich-text editing?
  pub fn is_plain_text_field(&self) -> bool {
    if self.richly_editable {
      return false;
    }
    if self.editable {
      return true;
    }
    matches!(self.role.as_str(), "textbox" | "combobox" | "searchbox")
  }

  /// Is this node pure text content?
  pub fn is_text_only_object(&self) -> bool {
    matches!(self.role.as_str(), "linebreak" | "text" | "inlinetextbox")
  }

  /// Does some transitive descendant accept keyboard focus?
  ///
  /// Computed bottom-up while the tree is assembled; the tree never mutates
  /// afterwards, so repeated reads always agree.
  pub const fn has_focusable_child(&self) -> bool {
    self.has_focusable_child
  }

  /// Is this node childless for consumer purposes, regardless of its
  /// structural children?
  pub fn is_leaf_node(&self) -> bool {
    if self.children.is_empty() {
      return true;
    }
    if self.is_plain_text_field() || self.is_text_only_object() {
      return true;
    }
    // These roles are presentational: their structure never surfaces.
    if matches!(
      self.role.as_str(),
      "doc-cover"
        | "graphics-symbol"
        | "img"
        | "meter"
        | "scrollbar"
        | "slider"
        | "separator"
        | "progressbar"
    ) {
      return true;
    }
    if self.has_focusable_child {
      return false;
    }
    if self.focusable && !self.name.is_empty() {
      return true;
    }
    self.role == "heading" && !self.name.is_empty()
  }

  /// Is this node an interactive control?
  pub fn is_control(&self) -> bool {
    matches!(
      self.role.as_str(),
      "button"
        | "checkbox"
        | "colorwell"
        | "combobox"
        | "disclosuretriangle"
        | "listbox"
        | "menu"
        | "menubar"
        | "menuitem"
        | "menuitemcheckbox"
        | "menuitemradio"
        | "radio"
        | "scrollbar"
        | "searchbox"
        | "slider"
        | "spinbutton"
        | "switch"
        | "tab"
        | "textbox"
        | "tree"
    )
  }

  /// Is this node worth exposing to an assistive-technology consumer?
  ///
  /// `inside_control` suppresses non-focusable descendants of a control.
  pub fn is_interesting(&self, inside_control: bool) -> bool {
    if self.role == "ignored" || self.hidden {
      return false;
    }
    if self.focusable || self.richly_editable {
      return true;
    }
    if self.is_control() {
      return true;
    }
    if inside_control {
      return false;
    }
    self.is_leaf_node() && !self.name.is_empty()
  }
}
