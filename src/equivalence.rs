//! Structural (value) equivalence between graphs.
//!
//! Unlike strict equality, identities and ordering are ignored: a member is
//! described only by its label and the multiset of its edge-target labels.

use crate::graph::Graph;
use crate::node::{Label, Node};
use ahash::AHashMap as HashMap;
use std::hash::Hash;

/// Label of a member together with the multiset of labels it points at.
#[derive(PartialEq)]
struct Signature<'a, T: Hash + Eq> {
    label: &'a Label<T>,
    targets: HashMap<&'a Label<T>, usize>,
}

impl<T: Hash + Eq> Graph<T> {
    fn signature<'a>(&'a self, node: &'a Node<T>) -> Signature<'a, T> {
        let mut targets = HashMap::default();
        for edge in node.edges() {
            if let Some(target) = self.node(edge.target()) {
                *targets.entry(target.label()).or_insert(0) += 1;
            }
        }
        Signature {
            label: node.label(),
            targets,
        }
    }

    /// Returns true if there is a bijection between the members of both graphs
    /// that preserves labels and outgoing-label multisets.
    ///
    /// **Warning:** quadratic in the number of members; meant for verification.
    pub fn equivalent(&self, other: &Graph<T>) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut unmatched: Vec<Signature<'_, T>> =
            other.nodes().map(|(_, node)| other.signature(node)).collect();

        // Signature equality is an equivalence relation, so a greedy match
        // finds a bijection whenever one exists.
        for (_, node) in self.nodes() {
            let signature = self.signature(node);
            match unmatched.iter().position(|candidate| *candidate == signature) {
                Some(index) => {
                    unmatched.swap_remove(index);
                }
                None => return false,
            }
        }

        unmatched.is_empty()
    }
}
