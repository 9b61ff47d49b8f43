//! Directed graph with ordered, owned membership.
//!
//! Nodes live in a graph-owned arena and are addressed by [`NodeKey`]. The
//! arena may also hold nodes that are not members (created standalone, or
//! deleted but not yet released); edges may point at those, which is how
//! edges leaving the member set are expressed.
//!
//! # Example
//!
//! ```
//! use graph_repair::Graph;
//!
//! let mut graph = Graph::new();
//! let a = graph.insert('a');
//! let b = graph.insert('b');
//! graph.add_edge(a, b).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

use crate::error::GraphError;
use crate::id_gen::GraphId;
use crate::node::{Edge, Node, NodeKey, Slot};
use crate::topology::Topology;
use slotmap::SlotMap;
use std::fmt;
use tracing::trace;

/// A directed graph whose members are kept in insertion order.
///
/// Every member has `owner == Some(self.id())`; every other node in the arena
/// is unowned. Multiple edges between the same pair are kept and counted.
pub struct Graph<T> {
    id: GraphId,
    pub(crate) topology: Topology,
    pub(crate) arena: SlotMap<Slot, Node<T>>,
    pub(crate) members: Vec<NodeKey>,
}

impl<T> Graph<T> {
    /// Creates an empty graph without structural constraints.
    pub fn new() -> Self {
        Self::with_topology(Topology::Generic)
    }

    /// Creates an empty graph that keeps every member linked to every other.
    pub fn complete() -> Self {
        Self::with_topology(Topology::Complete)
    }

    /// Creates a hub-and-spoke graph whose only member is the hub.
    pub fn hub_and_spoke(hub: T) -> Self {
        let mut graph = Self::new();
        let hub = graph.insert(hub);
        graph.topology = Topology::HubAndSpoke { hub };
        graph
    }

    fn with_topology(topology: Topology) -> Self {
        Self {
            id: GraphId::generate(),
            topology,
            arena: SlotMap::with_key(),
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member keys in order.
    pub fn members(&self) -> &[NodeKey] {
        &self.members
    }

    /// Looks up any node in the arena, member or not.
    ///
    /// Returns `None` for a key issued by an unrelated graph.
    pub fn node(&self, key: NodeKey) -> Option<&Node<T>> {
        self.arena
            .get(key.slot())
            .filter(|node| node.uid() == key.uid())
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node<T>> {
        self.arena
            .get_mut(key.slot())
            .filter(|node| node.uid() == key.uid())
    }

    /// Iterates over members in order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node<T>)> + '_ {
        self.members
            .iter()
            .filter_map(move |&key| self.node(key).map(|node| (key, node)))
    }

    /// Returns true if `key` is a member of this graph.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.node(key).is_some_and(|node| node.owner == Some(self.id))
    }

    /// Total number of edges leaving members, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.nodes().map(|(_, node)| node.edges.len()).sum()
    }

    /// Creates a standalone node in the arena without making it a member.
    pub fn create_node(&mut self, value: T) -> NodeKey {
        self.store(Node::new(value))
    }

    /// Creates a node and adds it as a member.
    pub fn insert(&mut self, value: T) -> NodeKey {
        let key = self.create_node(value);
        self.claim(key);
        key
    }

    /// Adds a node of this arena as a member.
    ///
    /// Re-adding a member is a no-op.
    pub fn add_node(&mut self, key: NodeKey) -> Result<(), GraphError> {
        self.expect_node(key)?;
        self.claim(key);
        Ok(())
    }

    /// Adds an edge `from -> to`.
    ///
    /// `from` becomes a member if it is not one already; `to` may be any node
    /// of the arena. A self-loop is ignored.
    pub fn add_edge(&mut self, from: NodeKey, to: NodeKey) -> Result<(), GraphError> {
        self.expect_node(from)?;
        self.expect_node(to)?;

        self.claim(from);
        if from == to {
            trace!(?from, "ignoring self-loop");
            return Ok(());
        }

        self.link(from, to);
        Ok(())
    }

    /// Removes every edge `from -> to`.
    ///
    /// At least one endpoint must be a member.
    pub fn delete_edge(&mut self, from: NodeKey, to: NodeKey) -> Result<(), GraphError> {
        let (from_member, to_member) = (self.contains(from), self.contains(to));
        if !from_member && !to_member {
            return Err(GraphError::OwnershipViolation {
                node: from.uid(),
                graph: self.id,
            });
        }
        self.expect_node(from)?;
        self.expect_node(to)?;
        self.topology
            .check_delete_edge(from, to, from_member && to_member)?;

        let node = self.expect_node_mut(from)?;
        let before = node.edges.len();
        node.edges.retain(|edge| edge.target() != to);
        let removed = before - node.edges.len();

        if removed == 0 {
            return Err(GraphError::NotFound(format!("edge {:?} -> {:?}", from, to)));
        }

        trace!(?from, ?to, removed, "deleted edges");
        Ok(())
    }

    /// Removes a member.
    ///
    /// Its own edges are cleared and every edge pointing at it from the rest
    /// of the arena is removed. The node stays in the arena, unowned, until
    /// [`release`](Self::release)d.
    pub fn delete_node(&mut self, key: NodeKey) -> Result<(), GraphError> {
        if !self.contains(key) {
            return Err(GraphError::OwnershipViolation {
                node: key.uid(),
                graph: self.id,
            });
        }
        self.topology.check_delete_node(key)?;

        let node = self.expect_node_mut(key)?;
        node.edges.clear();
        node.owner = None;
        self.members.retain(|&m| m != key);
        self.scrub(key);

        trace!(uid = %key.uid(), "deleted node");
        Ok(())
    }

    /// Takes an unowned node out of the arena so it can be adopted elsewhere.
    pub fn release(&mut self, key: NodeKey) -> Result<Node<T>, GraphError> {
        if self.contains(key) {
            return Err(GraphError::InvariantViolation(format!(
                "node {} must be deleted from graph {} before it is released",
                key.uid(),
                self.id
            )));
        }
        let node = self
            .take(key)
            .ok_or_else(|| GraphError::NotFound(format!("node {}", key.uid())))?;
        self.scrub(key);
        Ok(node)
    }

    /// Adds a node released from another graph as a member, keeping its uid.
    pub fn adopt(&mut self, node: Node<T>) -> Result<NodeKey, GraphError> {
        if let Some(owner) = node.owner {
            return Err(GraphError::InvariantViolation(format!(
                "node {} is still owned by graph {}",
                node.uid(),
                owner
            )));
        }
        if node.is_compression() || !node.edges.is_empty() {
            return Err(GraphError::InvariantViolation(format!(
                "node {} refers to nodes of another graph",
                node.uid()
            )));
        }
        if self.arena.values().any(|other| other.uid() == node.uid()) {
            return Err(GraphError::InvariantViolation(format!(
                "node {} is already present",
                node.uid()
            )));
        }

        let key = self.store(node);
        self.claim(key);
        Ok(key)
    }

    /// Summary counts over members and their snapshots.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.len(),
            edges: self.edge_count(),
            ..GraphStats::default()
        };

        for (_, node) in self.nodes() {
            match node.snapshot() {
                Some(snapshot) => {
                    stats.compression_nodes += snapshot.compression_count();
                    stats.expanded_nodes += snapshot.leaf_count();
                    stats.depth = stats.depth.max(snapshot.depth());
                }
                None => stats.expanded_nodes += 1,
            }
        }

        stats
    }

    /// Puts `node` into the arena without making it a member.
    pub(crate) fn store(&mut self, node: Node<T>) -> NodeKey {
        let uid = node.uid();
        NodeKey::new(self.arena.insert(node), uid)
    }

    /// Appends `node` as a member without consulting the topology.
    pub(crate) fn push_member(&mut self, mut node: Node<T>) -> NodeKey {
        node.owner = Some(self.id);
        let key = self.store(node);
        self.members.push(key);
        key
    }

    /// Takes a node out of the arena, members and references untouched.
    pub(crate) fn take(&mut self, key: NodeKey) -> Option<Node<T>> {
        self.node(key)?;
        self.arena.remove(key.slot())
    }

    fn expect_node(&self, key: NodeKey) -> Result<&Node<T>, GraphError> {
        self.node(key)
            .ok_or_else(|| GraphError::NotFound(format!("node {}", key.uid())))
    }

    fn expect_node_mut(&mut self, key: NodeKey) -> Result<&mut Node<T>, GraphError> {
        self.node_mut(key)
            .ok_or_else(|| GraphError::NotFound(format!("node {}", key.uid())))
    }

    /// Makes `key` a member and applies the topology's links.
    fn claim(&mut self, key: NodeKey) {
        let id = self.id;
        let Some(node) = self.node_mut(key) else {
            return;
        };
        if node.owner == Some(id) {
            return;
        }

        node.owner = Some(id);
        self.members.push(key);
        trace!(uid = %key.uid(), graph = %id, "added node");

        for (from, to) in self.topology.links_for(key, &self.members) {
            self.link(from, to);
        }
    }

    fn link(&mut self, from: NodeKey, to: NodeKey) {
        if let Some(node) = self.node_mut(from) {
            node.edges.push(Edge::new(from, to));
            trace!(?from, ?to, "added edge");
        }
    }

    /// Drops every visible edge pointing at `key`.
    fn scrub(&mut self, key: NodeKey) {
        for node in self.arena.values_mut() {
            node.edges.retain(|edge| edge.target() != key);
        }
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Graph<T> {
    /// Copies nodes, uids and edges under a fresh graph identity.
    fn clone(&self) -> Self {
        let id = GraphId::generate();
        let mut arena = self.arena.clone();
        for node in arena.values_mut() {
            if node.owner.is_some() {
                node.owner = Some(id);
            }
        }

        Self {
            id,
            topology: self.topology,
            arena,
            members: self.members.clone(),
        }
    }
}

/// Strict equality.
///
/// Two graphs are equal iff they hold the same number of members and, at
/// every position, the members have the same uid and the same edge targets
/// (by uid) in the same order.
///
/// **Warning:** this walks every edge of both graphs. It is meant for
/// verification, not for hot paths.
impl<T> PartialEq for Graph<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.members.len() != other.members.len() {
            return false;
        }

        self.nodes().zip(other.nodes()).all(|((_, a), (_, b))| {
            a.uid() == b.uid()
                && a.edges.len() == b.edges.len()
                && a.edges.iter().zip(&b.edges).all(|(ea, eb)| {
                    let ua = self.node(ea.target()).map(Node::uid);
                    let ub = other.node(eb.target()).map(Node::uid);
                    ua.is_some() && ua == ub
                })
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("topology", &self.topology)
            .field("nodes", &self.nodes().map(|(_, n)| n).collect::<Vec<_>>())
            .finish()
    }
}

/// Renders each member followed by its adjacent nodes, one per indented line.
impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, node) in self.nodes() {
            writeln!(f, "{}", node)?;
            for edge in &node.edges {
                if let Some(target) = self.node(edge.target()) {
                    writeln!(f, "\t{}", target)?;
                }
            }
        }
        Ok(())
    }
}

/// Statistics about a graph, possibly compressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of members
    pub nodes: usize,
    /// Number of edges leaving members
    pub edges: usize,
    /// Compression nodes among members and inside their snapshots
    pub compression_nodes: usize,
    /// Number of ordinary nodes the graph decompresses into
    pub expanded_nodes: usize,
    /// Deepest snapshot nesting (0 when uncompressed)
    pub depth: usize,
}

impl GraphStats {
    /// Returns members as a percentage of the expanded node count.
    ///
    /// Lower is better. 100% means no compression.
    pub fn compression_ratio(&self) -> f64 {
        if self.expanded_nodes == 0 {
            0.0
        } else {
            (self.nodes as f64 / self.expanded_nodes as f64) * 100.0
        }
    }
}
