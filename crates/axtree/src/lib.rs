/*!
axtree - accessibility snapshot trees.

Builds a rooted, immutable tree from one flat accessibility snapshot,
classifies nodes by platform conventions (leaf, control, interesting to
assistive technology), and serializes them into canonical consumer records.
The transport that produces snapshots and resolves element handles is
injected through the [`FetchSnapshot`] and [`ResolveBackendId`] traits.

```ignore
use axtree::{parse_records, AxTree};

// Build from a raw snapshot response.
let tree = AxTree::build(parse_records(raw_json)?)?;

// Canonical whole-tree snapshot, structural scaffolding pruned.
let serialized = tree.snapshot(true);

// Correlate an external element handle with its node.
let node = tree.find_by_handle(&resolver, &handle).await?;
```
*/

pub mod a11y;
mod snapshot;
mod tree;

mod types;
pub use types::*;

pub use crate::snapshot::{parse_records, FetchSnapshot, NodePayload, PropertyPayload, ValueWrapper};
pub use crate::tree::{AxNode, AxTree, ResolveBackendId, SerializedNode};
