/*!
Accessibility property vocabulary.

Scalar payload values and the enumerated property schema that raw
`{name, value}` pairs are validated against at construction time.
*/

#![allow(missing_docs)]

mod property;
mod value;

pub use property::{Property, Tristate};
pub(crate) use property::{Parsed, PropertySet};
pub use value::Scalar;
