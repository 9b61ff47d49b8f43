//! # Graph RePair - Digram Compression of Directed Graphs
//!
//! Generalizes RePair grammar compression from symbol sequences to directed
//! graphs. A *digram* is a directed edge keyed by the labels of its two
//! endpoints; compression repeatedly picks the most frequent digram and
//! replaces each occurrence with a compression node that snapshots the two
//! members it absorbed. Decompression expands compression nodes, innermost
//! first, back into ordinary nodes.
//!
//! Two notions of equality are provided:
//! 1. **Strict equality** (`==`): same members at the same positions, same
//!    edge targets in the same order, compared by node uid
//! 2. **Structural equivalence** ([`Graph::equivalent`]): same labels and the
//!    same multiset of outgoing labels per node, identities and order ignored
//!
//! ## Example
//!
//! ```
//! use graph_repair::{Graph, Repair};
//!
//! let mut graph = Graph::new();
//! for _ in 0..4 {
//!     let a = graph.insert("a");
//!     let b = graph.insert("b");
//!     graph.add_edge(a, b).unwrap();
//! }
//! let original = graph.clone();
//!
//! let repair = Repair::new();
//! let compressed = repair.compress(graph);
//! println!("{} members after compression", compressed.len());
//!
//! let restored = repair.decompress(&compressed).unwrap();
//! assert!(restored.equivalent(&original));
//! ```
//!
//! ## Performance
//!
//! - Each pass rescans all member edges: O(E) per pass
//! - Every replacement removes one member, so at most N passes
//! - Nodes live in a generational arena (SlotMap); snapshots and edge
//!   origins refer to keys that are never reused

mod digram;
mod equivalence;
mod error;
mod expand;
mod factory;
mod graph;
mod id_gen;
mod node;
mod repair;
mod topology;

#[cfg(test)]
mod tests;

pub use digram::{Occurrence, Pattern};
pub use error::GraphError;
pub use factory::{GraphFactory, GraphKind};
pub use graph::{Graph, GraphStats};
pub use id_gen::{GraphId, Uid};
pub use node::{Edge, Label, Node, NodeKey, Replaced, Snapshot};
pub use repair::{Repair, RepairConfig};
pub use topology::Topology;
