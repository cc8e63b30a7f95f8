/*! Core types for axtree. */

#![allow(missing_docs)]

mod error;
mod ids;

pub use error::{AxTreeError, AxTreeResult};
pub use ids::{BackendNodeId, NodeId};
