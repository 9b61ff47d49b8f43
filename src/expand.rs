//! Decompression: expands compression nodes back into ordinary nodes.

use crate::error::GraphError;
use crate::graph::Graph;
use crate::id_gen::Uid;
use crate::node::{Edge, Node, NodeKey, Snapshot};
use crate::repair::Repair;
use crate::topology::Topology;
use ahash::AHashMap as HashMap;
use tracing::debug;

/// State for one decompression run.
///
/// Nodes are placed first and edges resolved afterwards, so an edge may point
/// at a member that is expanded later in the walk.
struct Expansion<'g, T> {
    source: &'g Graph<T>,
    out: Graph<T>,
    /// Source key (member, absorbed member or compression node) to output key.
    resolved: HashMap<NodeKey, NodeKey>,
    /// Edges still to be connected, in discovery order.
    pending: Vec<Edge>,
    expanded: usize,
}

impl<'g, T: Clone> Expansion<'g, T> {
    fn new(source: &'g Graph<T>) -> Self {
        Self {
            source,
            out: Graph::new(),
            resolved: HashMap::default(),
            pending: Vec::new(),
            expanded: 0,
        }
    }

    fn place(&mut self, key: NodeKey, uid: Uid, node: &'g Node<T>) -> NodeKey {
        let placed = self
            .out
            .push_member(Node::with_uid(uid, node.label().clone()));
        self.resolved.insert(key, placed);
        self.pending.extend_from_slice(node.edges());
        placed
    }

    /// Expands a compression node, innermost members first, and returns the
    /// output key of its entry member.
    ///
    /// The node's own edges are the ones currently leaving its members; the
    /// edges between its members come from the snapshot.
    fn expand(
        &mut self,
        key: NodeKey,
        node: &'g Node<T>,
        snapshot: &'g Snapshot<T>,
    ) -> Result<NodeKey, GraphError> {
        let mut entry = None;

        for member in snapshot.members() {
            let placed = match member.node().snapshot() {
                Some(inner) => self.expand(member.key(), member.node(), inner)?,
                None => self.place(member.key(), Uid::fresh(), member.node()),
            };
            entry.get_or_insert(placed);
        }

        let entry = entry.ok_or_else(|| {
            GraphError::InvariantViolation(format!(
                "compression node {} has an empty snapshot",
                key.uid()
            ))
        })?;
        self.resolved.insert(key, entry);
        self.pending.extend_from_slice(node.edges());
        self.expanded += 1;
        Ok(entry)
    }

    /// Maps an edge endpoint to its output node through the node it was
    /// created against. Ordinary nodes outside the member set are copied over
    /// unowned.
    fn resolve(&mut self, origin: NodeKey) -> Result<NodeKey, GraphError> {
        if let Some(&placed) = self.resolved.get(&origin) {
            return Ok(placed);
        }

        let source = self.source;
        match source.node(origin) {
            Some(node) if !node.is_compression() && !source.contains(origin) => {
                let copy = self
                    .out
                    .store(Node::with_uid(node.uid(), node.label().clone()));
                self.resolved.insert(origin, copy);
                Ok(copy)
            }
            _ => Err(GraphError::InvariantViolation(format!(
                "edge endpoint {} does not resolve to any node",
                origin.uid()
            ))),
        }
    }

    fn connect(&mut self) -> Result<(), GraphError> {
        for edge in std::mem::take(&mut self.pending) {
            let from = self.resolved.get(&edge.source()).copied().ok_or_else(|| {
                GraphError::InvariantViolation(format!(
                    "edge source {} was not expanded",
                    edge.source().uid()
                ))
            })?;
            let to = self.resolve(edge.origin())?;
            if to == from {
                continue;
            }
            if let Some(node) = self.out.node_mut(from) {
                node.edges.push(Edge::new(from, to));
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Graph<T> {
        self.out.topology = match self.source.topology() {
            Topology::HubAndSpoke { hub } => match self.resolved.get(&hub) {
                Some(&hub) => Topology::HubAndSpoke { hub },
                None => Topology::Generic,
            },
            other => other,
        };
        self.out
    }
}

impl Repair {
    /// Expands every compression node of `graph`, recursively.
    ///
    /// Members are emitted in order, each compression node replaced in place
    /// by the ordinary nodes of its snapshot. Ordinary members keep their uid;
    /// expanded nodes get fresh ones. Each edge leaves the member that created
    /// it and reaches the node it was created against. An edge created from or
    /// against a compression node itself uses that node's entry member.
    ///
    /// Edits made to the compressed graph carry over: edges added to or
    /// removed from a compression node, and nodes deleted after compression,
    /// are reflected in the result.
    ///
    /// Only the graph's own content is read. A graph without compression nodes
    /// comes back strictly equal to the input.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvariantViolation`] if a snapshot is empty or an edge
    /// refers to a node that is no longer in the graph.
    pub fn decompress<T: Clone>(&self, graph: &Graph<T>) -> Result<Graph<T>, GraphError> {
        let mut expansion = Expansion::new(graph);

        for (key, node) in graph.nodes() {
            match node.snapshot() {
                Some(snapshot) => {
                    expansion.expand(key, node, snapshot)?;
                }
                None => {
                    expansion.place(key, node.uid(), node);
                }
            }
        }

        expansion.connect()?;

        debug!(
            nodes_before = graph.len(),
            expanded = expansion.expanded,
            nodes_after = expansion.out.len(),
            "decompression finished"
        );
        Ok(expansion.finish())
    }
}
