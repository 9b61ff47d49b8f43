mod scenarios;

use crate::Graph;

/// Builds a graph with one member per value and edges given as index pairs.
///
/// Indices wrap around the member count; self-loops are dropped by
/// `add_edge`.
pub(crate) fn build_graph(values: &[u8], edges: &[(usize, usize)]) -> Graph<u8> {
    let mut graph = Graph::new();
    let keys: Vec<_> = values.iter().map(|&v| graph.insert(v)).collect();
    if keys.is_empty() {
        return graph;
    }
    for &(from, to) in edges {
        graph
            .add_edge(keys[from % keys.len()], keys[to % keys.len()])
            .expect("members belong to the graph");
    }
    graph
}
