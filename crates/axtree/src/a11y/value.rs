/*!
Scalar payload values.

Raw snapshot records carry scalar field values: strings, numbers, or
booleans. `Scalar` is the untagged union of those kinds; it appears both in
the input wire schema and, passed through unchanged, in serialized output.
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A scalar value from a snapshot payload.
///
/// Numbers are unified f64 for JSON compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Scalar {
  /// Boolean state (flags, boolean properties)
  Boolean(bool),

  /// Numeric value (levels, ranges)
  /// Integers are stored as whole f64 values.
  Number(f64),

  /// Text content (names, tokens, text-field values)
  String(String),
}

impl Scalar {
  /// Get as string reference if this is a String value.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      Self::Number(_) | Self::Boolean(_) => None,
    }
  }

  /// Get as f64 if this is a Number value.
  pub const fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Number(n) => Some(*n),
      Self::String(_) | Self::Boolean(_) => None,
    }
  }

  /// Get as bool if this is a Boolean value.
  pub const fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Boolean(b) => Some(*b),
      Self::String(_) | Self::Number(_) => None,
    }
  }

  /// Get as owned String, converting numbers and bools to their string
  /// representation.
  #[allow(clippy::cast_possible_truncation)] // Intentional: formatting display value
  pub fn into_string(self) -> String {
    match self {
      Self::String(s) => s,
      Self::Number(n) => {
        // Format integers without decimal point
        if n.fract() == 0.0 {
          format!("{}", n as i64)
        } else {
          n.to_string()
        }
      }
      Self::Boolean(b) => b.to_string(),
    }
  }

  pub const fn is_string(&self) -> bool {
    matches!(self, Self::String(_))
  }

  pub const fn is_number(&self) -> bool {
    matches!(self, Self::Number(_))
  }

  pub const fn is_boolean(&self) -> bool {
    matches!(self, Self::Boolean(_))
  }
}

impl From<String> for Scalar {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<&str> for Scalar {
  fn from(s: &str) -> Self {
    Self::String(s.to_owned())
  }
}

impl From<f64> for Scalar {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl From<i32> for Scalar {
  fn from(n: i32) -> Self {
    Self::Number(f64::from(n))
  }
}

impl From<bool> for Scalar {
  fn from(b: bool) -> Self {
    Self::Boolean(b)
  }
}
