//! Digram detection over member edges.

use crate::graph::Graph;
use crate::node::{Label, NodeKey};
use ahash::AHashMap as HashMap;
use std::hash::Hash;

/// One edge instantiating a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub source: NodeKey,
    pub target: NodeKey,
}

/// A recurring single-edge shape, keyed by `(source label, target label)`,
/// with its occurrences in scan order.
#[derive(Debug, Clone)]
pub struct Pattern<T> {
    first: Label<T>,
    second: Label<T>,
    occurrences: Vec<Occurrence>,
}

impl<T> Pattern<T> {
    pub fn first(&self) -> &Label<T> {
        &self.first
    }

    pub fn second(&self) -> &Label<T> {
        &self.second
    }

    /// Occurrences in scan order. Parallel edges appear once per edge.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn frequency(&self) -> usize {
        self.occurrences.len()
    }
}

impl<T: Hash + Eq + Clone> Graph<T> {
    /// Builds the digram table.
    ///
    /// Members are scanned in order and, within each member, edges in order.
    /// Only edges between two members are counted; parallel edges count once
    /// each. Patterns are returned in first-encountered order.
    pub fn digrams(&self) -> Vec<Pattern<T>> {
        let mut index: HashMap<(&Label<T>, &Label<T>), usize> = HashMap::default();
        let mut patterns: Vec<Pattern<T>> = Vec::new();

        for (source, node) in self.nodes() {
            for edge in node.edges() {
                let target = edge.target();
                if !self.contains(target) {
                    continue;
                }
                let Some(target_node) = self.node(target) else {
                    continue;
                };

                let occurrence = Occurrence { source, target };
                let key = (node.label(), target_node.label());
                match index.get(&key) {
                    Some(&i) => patterns[i].occurrences.push(occurrence),
                    None => {
                        index.insert(key, patterns.len());
                        patterns.push(Pattern {
                            first: node.label().clone(),
                            second: target_node.label().clone(),
                            occurrences: vec![occurrence],
                        });
                    }
                }
            }
        }

        patterns
    }

    /// Returns the most frequent digram occurring at least `min_frequency`
    /// times, ties going to the one encountered first.
    pub fn find_best_pattern(&self, min_frequency: usize) -> Option<Pattern<T>> {
        let mut best: Option<Pattern<T>> = None;

        for pattern in self.digrams() {
            if pattern.frequency() < min_frequency {
                continue;
            }
            let better = best
                .as_ref()
                .map_or(true, |b| pattern.frequency() > b.frequency());
            if better {
                best = Some(pattern);
            }
        }

        best
    }
}
