//! RePair-style grammar compression of directed graphs.
//!
//! RePair repeatedly replaces the most frequent pair of adjacent symbols with
//! a new rule. Here a "pair" is a directed edge, keyed by the labels of its
//! endpoints, and every replaced occurrence becomes a compression node that
//! carries a snapshot of the two members it stands in for.
//!
//! # Example
//!
//! ```
//! use graph_repair::{Graph, Repair};
//!
//! let mut graph = Graph::new();
//! for _ in 0..3 {
//!     let a = graph.insert('a');
//!     let b = graph.insert('b');
//!     graph.add_edge(a, b).unwrap();
//! }
//! let original = graph.clone();
//!
//! let repair = Repair::new();
//! let compressed = repair.compress(graph);
//! assert_eq!(compressed.len(), 3);
//!
//! let restored = repair.decompress(&compressed).unwrap();
//! assert!(restored.equivalent(&original));
//! ```

use crate::digram::{Occurrence, Pattern};
use crate::graph::Graph;
use crate::node::{Edge, Label, Node, NodeKey, Replaced, Snapshot};
use crate::topology::Topology;
use ahash::AHashSet as HashSet;
use std::hash::Hash;
use tracing::{debug, trace};

/// Tuning for [`Repair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairConfig {
    min_frequency: usize,
    max_passes: Option<usize>,
}

impl RepairConfig {
    pub fn new() -> Self {
        Self {
            min_frequency: 2,
            max_passes: None,
        }
    }

    /// Minimum number of occurrences a digram needs to be replaced.
    ///
    /// Values below 2 are raised to 2.
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.min_frequency = min_frequency.max(2);
        self
    }

    /// Caps the number of detect/replace passes per `compress` call, which
    /// also caps snapshot nesting depth.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    pub fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Compression and decompression engine.
///
/// Holds only its configuration: everything needed to decompress a graph
/// lives in the graph's own compression nodes.
#[derive(Debug, Clone, Default)]
pub struct Repair {
    config: RepairConfig,
}

impl Repair {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RepairConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RepairConfig {
        &self.config
    }

    /// Compresses `graph` until no digram recurs often enough.
    ///
    /// A graph without a recurring digram is returned untouched. If any
    /// compression node is created the topology is demoted to
    /// [`Topology::Generic`], since its guarantees no longer hold.
    pub fn compress<T: Hash + Eq + Clone>(&self, mut graph: Graph<T>) -> Graph<T> {
        let nodes_before = graph.len();
        let mut passes = 0;
        let mut created = 0;

        loop {
            if self.config.max_passes.is_some_and(|max| passes >= max) {
                break;
            }

            let Some(pattern) = graph.find_best_pattern(self.config.min_frequency) else {
                break;
            };

            let replaced = graph.replace_pattern(&pattern);
            debug!(
                pass = passes,
                frequency = pattern.frequency(),
                replaced,
                "replaced digram"
            );
            if replaced == 0 {
                break;
            }

            created += replaced;
            passes += 1;
        }

        if created > 0 {
            graph.topology = Topology::Generic;
        }

        debug!(
            passes,
            created,
            nodes_before,
            nodes_after = graph.len(),
            "compression finished"
        );
        graph
    }
}

impl<T: Hash + Eq + Clone> Graph<T> {
    /// Replaces every non-overlapping occurrence of `pattern` with its own
    /// compression node, in scan order.
    ///
    /// An occurrence touching a member already consumed in this pass is
    /// skipped; parallel edges between one pair therefore share a single
    /// compression node. Returns the number of compression nodes created.
    pub(crate) fn replace_pattern(&mut self, pattern: &Pattern<T>) -> usize {
        let label = Label::digram(pattern.first().clone(), pattern.second().clone());
        let mut consumed: HashSet<NodeKey> = HashSet::default();
        let mut count = 0;

        for &Occurrence { source, target } in pattern.occurrences() {
            if consumed.contains(&source) || consumed.contains(&target) {
                continue;
            }

            if self.fuse(source, target, label.clone()).is_some() {
                consumed.insert(source);
                consumed.insert(target);
                count += 1;
            }
        }

        count
    }

    /// Replaces the members `source` and `target` with one compression node.
    ///
    /// The new node takes `source`'s position. Edges running between the two
    /// members stay with them inside the snapshot; every other edge of either
    /// member moves to the new node, `source`'s first. Every edge elsewhere
    /// that pointed at either member is redirected to the new node in place.
    fn fuse(&mut self, source: NodeKey, target: NodeKey, label: Label<T>) -> Option<NodeKey> {
        if source == target || !self.contains(source) || !self.contains(target) {
            return None;
        }
        let source_pos = self.members.iter().position(|&k| k == source)?;
        let target_pos = self.members.iter().position(|&k| k == target)?;

        let mut first = self.take(source)?;
        let mut second = self.take(target)?;

        let internal = |edge: &Edge| edge.target() == source || edge.target() == target;
        let mut outgoing: Vec<Edge> = Vec::with_capacity(first.edges.len() + second.edges.len());
        for member in [&mut first, &mut second] {
            member.owner = None;
            let (inner, outer): (Vec<Edge>, Vec<Edge>) =
                member.edges.drain(..).partition(|edge| internal(edge));
            member.edges = inner;
            outgoing.extend(outer);
        }

        let snapshot = Snapshot::new(vec![
            Replaced::new(source, first),
            Replaced::new(target, second),
        ]);
        let mut node = Node::compression(label, snapshot);
        node.owner = Some(self.id());
        node.edges = outgoing;
        let fused = self.store(node);

        self.members[source_pos] = fused;
        self.members.remove(target_pos);

        for node in self.arena.values_mut() {
            for edge in node.edges.iter_mut() {
                if edge.target() == source || edge.target() == target {
                    edge.retarget(fused);
                }
            }
        }

        trace!(?source, ?target, ?fused, "fused occurrence");
        Some(fused)
    }
}
