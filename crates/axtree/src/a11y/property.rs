/*!
Enumerated accessibility property schema.

Each known property name has one expected value kind (boolean, tristate,
number, token, or string). Raw `{name, value}` pairs are validated against
this schema while the tree is built, so a malformed value surfaces as a
construction-time error instead of a silent serialization default. Names the
schema does not know about are skipped: upstream protocols grow properties,
and an unknown name must not break classification.

Property names are matched case-insensitively.
*/

use super::Scalar;
use serde::Serialize;

/// Tristate property value: `true`, `false`, or the literal `"mixed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
  True,
  False,
  Mixed,
}

impl Tristate {
  /// Parse a raw scalar. Accepts JSON booleans as well as the strings
  /// `"true"`, `"false"`, and `"mixed"`.
  fn parse(raw: &Scalar) -> Option<Self> {
    match raw {
      Scalar::Boolean(true) => Some(Self::True),
      Scalar::Boolean(false) => Some(Self::False),
      Scalar::String(s) => match s.as_str() {
        "true" => Some(Self::True),
        "false" => Some(Self::False),
        "mixed" => Some(Self::Mixed),
        _ => None,
      },
      Scalar::Number(_) => None,
    }
  }
}

// Wire form is `true`, `false`, or the string "mixed".
impl Serialize for Tristate {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::True => serializer.serialize_bool(true),
      Self::False => serializer.serialize_bool(false),
      Self::Mixed => serializer.serialize_str("mixed"),
    }
  }
}

/// One parsed accessibility property: a known name paired with a value of
/// its expected kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
  // Booleans
  Disabled(bool),
  Expanded(bool),
  Focused(bool),
  Modal(bool),
  Multiline(bool),
  Multiselectable(bool),
  Readonly(bool),
  Required(bool),
  Selected(bool),
  Focusable(bool),
  Hidden(bool),

  // Tristates
  Checked(Tristate),
  Pressed(Tristate),

  // Numbers
  Level(f64),
  Valuemax(f64),
  Valuemin(f64),

  // Tokens
  Autocomplete(String),
  Haspopup(String),
  Invalid(String),
  Orientation(String),

  // Strings
  Keyshortcuts(String),
  Roledescription(String),
  Valuetext(String),

  /// Editing mode token; the value `"richtext"` selects rich editing.
  Editable(String),
}

/// Outcome of parsing one raw `{name, value}` pair against the schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Parsed {
  /// Name and value kind both matched.
  Property(Property),
  /// Name is not part of the schema; callers skip it.
  UnknownName,
  /// Known name with a value of the wrong kind; construction must fail.
  InvalidValue,
}

impl Property {
  /// Parse a named raw property value.
  pub(crate) fn parse(name: &str, raw: &Scalar) -> Parsed {
    let name = name.to_ascii_lowercase();

    let known = match name.as_str() {
      "disabled" => raw.as_bool().map(Self::Disabled),
      "expanded" => raw.as_bool().map(Self::Expanded),
      "focused" => raw.as_bool().map(Self::Focused),
      "modal" => raw.as_bool().map(Self::Modal),
      "multiline" => raw.as_bool().map(Self::Multiline),
      "multiselectable" => raw.as_bool().map(Self::Multiselectable),
      "readonly" => raw.as_bool().map(Self::Readonly),
      "required" => raw.as_bool().map(Self::Required),
      "selected" => raw.as_bool().map(Self::Selected),
      "focusable" => raw.as_bool().map(Self::Focusable),
      "hidden" => raw.as_bool().map(Self::Hidden),
      "checked" => Tristate::parse(raw).map(Self::Checked),
      "pressed" => Tristate::parse(raw).map(Self::Pressed),
      "level" => raw.as_f64().map(Self::Level),
      "valuemax" => raw.as_f64().map(Self::Valuemax),
      "valuemin" => raw.as_f64().map(Self::Valuemin),
      "autocomplete" => raw.as_str().map(|s| Self::Autocomplete(s.to_owned())),
      "haspopup" => raw.as_str().map(|s| Self::Haspopup(s.to_owned())),
      "invalid" => raw.as_str().map(|s| Self::Invalid(s.to_owned())),
      "orientation" => raw.as_str().map(|s| Self::Orientation(s.to_owned())),
      "keyshortcuts" => raw.as_str().map(|s| Self::Keyshortcuts(s.to_owned())),
      "roledescription" => raw.as_str().map(|s| Self::Roledescription(s.to_owned())),
      "valuetext" => raw.as_str().map(|s| Self::Valuetext(s.to_owned())),
      "editable" => raw.as_str().map(|s| Self::Editable(s.to_owned())),
      _ => return Parsed::UnknownName,
    };

    match known {
      Some(property) => Parsed::Property(property),
      None => Parsed::InvalidValue,
    }
  }
}

/// Typed view over one node's parsed property set.
///
/// Every field is `None` until the matching property is inserted; a field is
/// written at most once per snapshot record.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PropertySet {
  pub(crate) disabled: Option<bool>,
  pub(crate) expanded: Option<bool>,
  pub(crate) focused: Option<bool>,
  pub(crate) modal: Option<bool>,
  pub(crate) multiline: Option<bool>,
  pub(crate) multiselectable: Option<bool>,
  pub(crate) readonly: Option<bool>,
  pub(crate) required: Option<bool>,
  pub(crate) selected: Option<bool>,
  pub(crate) focusable: Option<bool>,
  pub(crate) hidden: Option<bool>,

  pub(crate) checked: Option<Tristate>,
  pub(crate) pressed: Option<Tristate>,

  pub(crate) level: Option<f64>,
  pub(crate) valuemax: Option<f64>,
  pub(crate) valuemin: Option<f64>,

  pub(crate) autocomplete: Option<String>,
  pub(crate) haspopup: Option<String>,
  pub(crate) invalid: Option<String>,
  pub(crate) orientation: Option<String>,

  pub(crate) keyshortcuts: Option<String>,
  pub(crate) roledescription: Option<String>,
  pub(crate) valuetext: Option<String>,

  pub(crate) editable: Option<String>,
}

impl PropertySet {
  pub(crate) fn insert(&mut self, property: Property) {
    match property {
      Property::Disabled(b) => self.disabled = Some(b),
      Property::Expanded(b) => self.expanded = Some(b),
      Property::Focused(b) => self.focused = Some(b),
      Property::Modal(b) => self.modal = Some(b),
      Property::Multiline(b) => self.multiline = Some(b),
      Property::Multiselectable(b) => self.multiselectable = Some(b),
      Property::Readonly(b) => self.readonly = Some(b),
      Property::Required(b) => self.required = Some(b),
      Property::Selected(b) => self.selected = Some(b),
      Property::Focusable(b) => self.focusable = Some(b),
      Property::Hidden(b) => self.hidden = Some(b),
      Property::Checked(t) => self.checked = Some(t),
      Property::Pressed(t) => self.pressed = Some(t),
      Property::Level(n) => self.level = Some(n),
      Property::Valuemax(n) => self.valuemax = Some(n),
      Property::Valuemin(n) => self.valuemin = Some(n),
      Property::Autocomplete(s) => self.autocomplete = Some(s),
      Property::Haspopup(s) => self.haspopup = Some(s),
      Property::Invalid(s) => self.invalid = Some(s),
      Property::Orientation(s) => self.orientation = Some(s),
      Property::Keyshortcuts(s) => self.keyshortcuts = Some(s),
      Property::Roledescription(s) => self.roledescription = Some(s),
      Property::Valuetext(s) => self.valuetext = Some(s),
      Property::Editable(s) => self.editable = Some(s),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn boolean_property_requires_bool() {
    assert_eq!(
      Property::parse("focusable", &Scalar::from(true)),
      Parsed::Property(Property::Focusable(true))
    );
    assert_eq!(
      Property::parse("focusable", &Scalar::from("true")),
      Parsed::InvalidValue
    );
  }

  #[test]
  fn names_match_case_insensitively() {
    assert_eq!(
      Property::parse("Hidden", &Scalar::from(true)),
      Parsed::Property(Property::Hidden(true))
    );
    assert_eq!(
      Property::parse("KEYSHORTCUTS", &Scalar::from("Ctrl+S")),
      Parsed::Property(Property::Keyshortcuts("Ctrl+S".into()))
    );
  }

  #[test]
  fn unknown_names_are_skipped_not_rejected() {
    assert_eq!(
      Property::parse("live", &Scalar::from("polite")),
      Parsed::UnknownName
    );
  }

  #[test]
  fn tristate_accepts_bools_and_literals() {
    assert_eq!(
      Property::parse("checked", &Scalar::from("mixed")),
      Parsed::Property(Property::Checked(Tristate::Mixed))
    );
    assert_eq!(
      Property::parse("checked", &Scalar::from(true)),
      Parsed::Property(Property::Checked(Tristate::True))
    );
    assert_eq!(
      Property::parse("pressed", &Scalar::from("false")),
      Parsed::Property(Property::Pressed(Tristate::False))
    );
    assert_eq!(
      Property::parse("checked", &Scalar::from("maybe")),
      Parsed::InvalidValue
    );
    assert_eq!(
      Property::parse("pressed", &Scalar::from(1.0)),
      Parsed::InvalidValue
    );
  }

  #[test]
  fn numeric_property_requires_number() {
    assert_eq!(
      Property::parse("level", &Scalar::from(2.0)),
      Parsed::Property(Property::Level(2.0))
    );
    assert_eq!(
      Property::parse("valuemax", &Scalar::from("high")),
      Parsed::InvalidValue
    );
  }

  #[test]
  fn editable_is_a_token() {
    assert_eq!(
      Property::parse("editable", &Scalar::from("richtext")),
      Parsed::Property(Property::Editable("richtext".into()))
    );
    assert_eq!(
      Property::parse("editable", &Scalar::from(true)),
      Parsed::InvalidValue
    );
  }

  #[test]
  fn tristate_wire_form() {
    assert_eq!(
      serde_json::to_value(Tristate::Mixed).expect("json"),
      serde_json::json!("mixed")
    );
    assert_eq!(
      serde_json::to_value(Tristate::True).expect("json"),
      serde_json::json!(true)
    );
    assert_eq!(
      serde_json::to_value(Tristate::False).expect("json"),
      serde_json::json!(false)
    );
  }

  #[test]
  fn insert_routes_to_the_matching_field() {
    let mut set = PropertySet::default();
    set.insert(Property::Checked(Tristate::Mixed));
    set.insert(Property::Level(3.0));
    set.insert(Property::Haspopup("menu".into()));

    assert_eq!(set.checked, Some(Tristate::Mixed));
    assert_eq!(set.level, Some(3.0));
    assert_eq!(set.haspopup.as_deref(), Some("menu"));
    assert_eq!(set.pressed, None);
  }
}
