//! Structural guarantees a graph can be created with.
//!
//! The graph core consults its [`Topology`] before and after membership and
//! edge changes; the topology never touches the arena itself.

use crate::error::GraphError;
use crate::node::NodeKey;

/// Shape a graph maintains while it is edited through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// No constraints.
    #[default]
    Generic,
    /// Every member has an edge to every other member.
    Complete,
    /// Every spoke is linked to and from the hub.
    HubAndSpoke { hub: NodeKey },
}

impl Topology {
    /// Short name used in messages and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Generic => "generic",
            Topology::Complete => "complete",
            Topology::HubAndSpoke { .. } => "hub-and-spoke",
        }
    }

    /// Edges that must be created once `added` has joined `members`.
    pub(crate) fn links_for(&self, added: NodeKey, members: &[NodeKey]) -> Vec<(NodeKey, NodeKey)> {
        match *self {
            Topology::Generic => Vec::new(),
            Topology::Complete => members
                .iter()
                .filter(|&&m| m != added)
                .flat_map(|&m| [(added, m), (m, added)])
                .collect(),
            Topology::HubAndSpoke { hub } if hub != added => vec![(hub, added), (added, hub)],
            Topology::HubAndSpoke { .. } => Vec::new(),
        }
    }

    pub(crate) fn check_delete_edge(
        &self,
        from: NodeKey,
        to: NodeKey,
        both_members: bool,
    ) -> Result<(), GraphError> {
        let required = match *self {
            Topology::Complete => both_members,
            Topology::HubAndSpoke { hub } => both_members && (from == hub || to == hub),
            Topology::Generic => false,
        };
        if required {
            return Err(GraphError::InvariantViolation(format!(
                "{} graph requires the edge {} -> {}",
                self.name(),
                from.uid(),
                to.uid()
            )));
        }
        Ok(())
    }

    pub(crate) fn check_delete_node(&self, node: NodeKey) -> Result<(), GraphError> {
        match *self {
            Topology::HubAndSpoke { hub } if hub == node => Err(GraphError::InvariantViolation(
                format!("cannot delete the hub of a {} graph", self.name()),
            )),
            _ => Ok(()),
        }
    }
}
