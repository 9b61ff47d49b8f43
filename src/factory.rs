//! Seeded construction of test graphs.
//!
//! All randomness flows through the factory's own [`StdRng`], so the same
//! seed always yields the same payloads, member order and edges.

use crate::error::GraphError;
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shape of the graphs a [`GraphFactory`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Complete,
    HubAndSpoke,
    Generic,
}

/// Builds graphs of one kind with a fixed number of nodes.
///
/// Nodes carry strings made of a number in `0..=1000` followed by five ASCII
/// letters; payloads are not necessarily unique. No edges are created beyond
/// what the kind mandates; use [`connect_randomly`](Self::connect_randomly).
#[derive(Debug, Clone)]
pub struct GraphFactory {
    kind: GraphKind,
    nodes: usize,
    rng: StdRng,
    blank: bool,
}

impl GraphFactory {
    pub fn alphanumeric(kind: GraphKind, nodes: usize, seed: u64) -> Self {
        Self {
            kind,
            nodes,
            rng: StdRng::seed_from_u64(seed),
            blank: false,
        }
    }

    /// A factory whose nodes all carry the empty string, in creation order.
    pub fn blank(kind: GraphKind, nodes: usize) -> Self {
        Self {
            kind,
            nodes,
            rng: StdRng::seed_from_u64(0),
            blank: true,
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Draws one payload.
    pub fn random_alphanumeric(&mut self) -> String {
        let number: u32 = self.rng.gen_range(0..=1000);
        let letters: String = (0..5)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect();
        format!("{}{}", number, letters)
    }

    fn payload(&mut self) -> String {
        if self.blank {
            String::new()
        } else {
            self.random_alphanumeric()
        }
    }

    /// Builds a graph with the configured number of members, the hub of a
    /// hub-and-spoke graph included.
    pub fn build(&mut self) -> Graph<String> {
        let (mut graph, remaining) = match self.kind {
            GraphKind::Complete => (Graph::complete(), self.nodes),
            GraphKind::HubAndSpoke => {
                let hub = self.payload();
                (Graph::hub_and_spoke(hub), self.nodes.saturating_sub(1))
            }
            GraphKind::Generic => (Graph::new(), self.nodes),
        };

        for _ in 0..remaining {
            let payload = self.payload();
            graph.insert(payload);
        }

        if !self.blank {
            graph.shuffle_members(&mut self.rng);
        }
        graph
    }

    /// Adds `edges` random edges between distinct members of `graph`.
    ///
    /// Returns the number of edges added, 0 when the graph has fewer than two
    /// members.
    pub fn connect_randomly<T>(
        &mut self,
        graph: &mut Graph<T>,
        edges: usize,
    ) -> Result<usize, GraphError> {
        let members = graph.members().to_vec();
        if members.len() < 2 {
            return Ok(0);
        }

        for _ in 0..edges {
            let from = self.rng.gen_range(0..members.len());
            let mut to = self.rng.gen_range(0..members.len() - 1);
            if to >= from {
                to += 1;
            }
            graph.add_edge(members[from], members[to])?;
        }
        Ok(edges)
    }
}

impl<T> Graph<T> {
    pub(crate) fn shuffle_members<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.members.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Topology;

    #[test]
    fn test_payload_format() {
        let mut factory = GraphFactory::alphanumeric(GraphKind::Generic, 0, 7);
        for _ in 0..50 {
            let payload = factory.random_alphanumeric();
            let digits = payload.chars().take_while(|c| c.is_ascii_digit()).count();
            assert!((1..=4).contains(&digits));
            assert!(payload[..digits].parse::<u32>().unwrap() <= 1000);

            let letters = &payload[digits..];
            assert_eq!(letters.len(), 5);
            assert!(letters.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let mut first = GraphFactory::alphanumeric(GraphKind::Generic, 20, 42);
        let mut second = GraphFactory::alphanumeric(GraphKind::Generic, 20, 42);
        let mut a = first.build();
        let mut b = second.build();
        first.connect_randomly(&mut a, 30).unwrap();
        second.connect_randomly(&mut b, 30).unwrap();

        let values_a: Vec<_> = a.nodes().map(|(_, n)| n.value().cloned()).collect();
        let values_b: Vec<_> = b.nodes().map(|(_, n)| n.value().cloned()).collect();
        assert_eq!(values_a, values_b);
        assert!(a.equivalent(&b));
    }

    #[test]
    fn test_kinds() {
        let complete = GraphFactory::alphanumeric(GraphKind::Complete, 5, 1).build();
        assert_eq!(complete.len(), 5);
        assert_eq!(complete.edge_count(), 20);
        assert_eq!(complete.topology(), Topology::Complete);

        let hub = GraphFactory::alphanumeric(GraphKind::HubAndSpoke, 5, 1).build();
        assert_eq!(hub.len(), 5);
        assert_eq!(hub.edge_count(), 8);

        let generic = GraphFactory::alphanumeric(GraphKind::Generic, 5, 1).build();
        assert_eq!(generic.len(), 5);
        assert_eq!(generic.edge_count(), 0);
    }

    #[test]
    fn test_blank() {
        let graph = GraphFactory::blank(GraphKind::HubAndSpoke, 3).build();
        assert_eq!(graph.len(), 3);
        assert!(graph.nodes().all(|(_, n)| n.value().is_some_and(String::is_empty)));
    }

    #[test]
    fn test_connect_randomly_avoids_self_loops() {
        let mut factory = GraphFactory::alphanumeric(GraphKind::Generic, 4, 3);
        let mut graph = factory.build();
        assert_eq!(factory.connect_randomly(&mut graph, 100).unwrap(), 100);
        assert_eq!(graph.edge_count(), 100);

        let mut single = GraphFactory::alphanumeric(GraphKind::Generic, 1, 3).build();
        assert_eq!(factory.connect_randomly(&mut single, 10).unwrap(), 0);
    }
}
