use crate::id_gen::{GraphId, Uid};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Slot of a node inside a graph's arena.
    ///
    /// Slots are generational: once a node leaves the arena its slot is never
    /// handed out again, so snapshots and edge origins may keep referring to it.
    pub(crate) struct Slot;
}

/// Handle of a node inside a graph.
///
/// A handle pairs the arena slot with the node's uid and only resolves where
/// that very node sits at that slot: in the graph that issued it, or in a
/// clone of that graph. Anywhere else lookups miss instead of landing on
/// whatever node happens to occupy the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    slot: Slot,
    uid: Uid,
}

impl NodeKey {
    pub(crate) fn new(slot: Slot, uid: Uid) -> Self {
        Self { slot, uid }
    }

    pub(crate) fn slot(&self) -> Slot {
        self.slot
    }

    /// Uid of the node this handle refers to.
    pub fn uid(&self) -> Uid {
        self.uid
    }
}

/// The comparable payload a pattern is keyed on.
///
/// Ordinary nodes carry `Value`; compression nodes carry the `Digram` of the
/// two labels they replaced, so every node synthesized from the same pattern
/// shares one label and can take part in higher-level patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<T> {
    Value(T),
    Digram(Box<(Label<T>, Label<T>)>),
}

impl<T> Label<T> {
    pub(crate) fn digram(first: Label<T>, second: Label<T>) -> Self {
        Label::Digram(Box::new((first, second)))
    }

    /// Returns the payload of an ordinary node.
    pub fn value(&self) -> Option<&T> {
        match self {
            Label::Value(v) => Some(v),
            Label::Digram(_) => None,
        }
    }

    pub fn is_digram(&self) -> bool {
        matches!(self, Label::Digram(_))
    }
}

impl<T: fmt::Display> fmt::Display for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Value(v) => write!(f, "{}", v),
            Label::Digram(pair) => write!(f, "<{} {}>", pair.0, pair.1),
        }
    }
}

/// A directed adjacency entry.
///
/// `source` is the node that created the edge and `origin` the node it was
/// created against; neither changes afterwards. `target` is the endpoint
/// currently visible in the graph. Compression moves `target` onto the
/// compression node that absorbed the endpoint and hands the edge itself to
/// the compression node that absorbed its source, which is what lets
/// decompression reconnect both ends to the right members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: NodeKey,
    target: NodeKey,
    origin: NodeKey,
}

impl Edge {
    pub(crate) fn new(source: NodeKey, target: NodeKey) -> Self {
        Self {
            source,
            target,
            origin: target,
        }
    }

    pub fn source(&self) -> NodeKey {
        self.source
    }

    pub fn target(&self) -> NodeKey {
        self.target
    }

    pub fn origin(&self) -> NodeKey {
        self.origin
    }

    pub(crate) fn retarget(&mut self, target: NodeKey) {
        self.target = target;
    }
}

/// A graph node: identity, label, ordered adjacency and owning graph.
///
/// A node whose label is a [`Label::Digram`] is a compression node and
/// always carries a [`Snapshot`] of the members it replaced.
#[derive(Debug, Clone)]
pub struct Node<T> {
    uid: Uid,
    label: Label<T>,
    snapshot: Option<Box<Snapshot<T>>>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) owner: Option<GraphId>,
}

impl<T> Node<T> {
    /// Creates an unowned node with a fresh uid.
    pub(crate) fn new(value: T) -> Self {
        Self::with_uid(Uid::fresh(), Label::Value(value))
    }

    pub(crate) fn with_uid(uid: Uid, label: Label<T>) -> Self {
        Self {
            uid,
            label,
            snapshot: None,
            edges: Vec::new(),
            owner: None,
        }
    }

    pub(crate) fn compression(label: Label<T>, snapshot: Snapshot<T>) -> Self {
        Self {
            uid: Uid::fresh(),
            label,
            snapshot: Some(Box::new(snapshot)),
            edges: Vec::new(),
            owner: None,
        }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn label(&self) -> &Label<T> {
        &self.label
    }

    /// The payload of an ordinary node, `None` for compression nodes.
    pub fn value(&self) -> Option<&T> {
        self.label.value()
    }

    pub fn snapshot(&self) -> Option<&Snapshot<T>> {
        self.snapshot.as_deref()
    }

    pub fn is_compression(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The graph currently holding this node as a member.
    pub fn owner(&self) -> Option<GraphId> {
        self.owner
    }

    /// Number of edges from this node to `target`, counting duplicates.
    pub fn edge_count_to(&self, target: NodeKey) -> usize {
        self.edges.iter().filter(|e| e.target == target).count()
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.uid)
    }
}

/// One member absorbed by a compression node, stored under the key it had
/// in the arena when it was replaced.
#[derive(Debug, Clone)]
pub struct Replaced<T> {
    key: NodeKey,
    node: Node<T>,
}

impl<T> Replaced<T> {
    pub(crate) fn new(key: NodeKey, node: Node<T>) -> Self {
        Self { key, node }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The member as it was at the moment of replacement.
    ///
    /// Only the edges running between the two replaced members stay here;
    /// edges leaving the pair move to the compression node.
    pub fn node(&self) -> &Node<T> {
        &self.node
    }
}

/// Immutable record of the members a compression node stands in for,
/// in replacement order (source first, then target).
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    members: Vec<Replaced<T>>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(members: Vec<Replaced<T>>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Replaced<T>] {
        &self.members
    }

    /// The member edges into the compression node are redirected to on expansion.
    pub fn entry(&self) -> Option<&Replaced<T>> {
        self.members.first()
    }

    /// Nesting depth: 1 when no member is itself a compression node.
    pub fn depth(&self) -> usize {
        1 + self
            .members
            .iter()
            .filter_map(|m| m.node.snapshot())
            .map(Snapshot::depth)
            .max()
            .unwrap_or(0)
    }

    /// Number of ordinary nodes this snapshot expands into.
    pub fn leaf_count(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.node.snapshot().map_or(1, Snapshot::leaf_count))
            .sum()
    }

    /// Number of compression nodes in this snapshot, itself included.
    pub fn compression_count(&self) -> usize {
        1 + self
            .members
            .iter()
            .filter_map(|m| m.node.snapshot())
            .map(Snapshot::compression_count)
            .sum::<usize>()
    }
}
