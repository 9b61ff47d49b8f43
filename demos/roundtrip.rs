use graph_repair::{GraphFactory, GraphKind, Repair, RepairConfig};
use std::env;
use tracing_subscriber::EnvFilter;

/// Builds a random graph, compresses it and verifies the round trip.
///
/// Usage: cargo run --example roundtrip [nodes] [edges] [seed]
/// Set RUST_LOG=graph_repair=debug to follow the passes.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let arg = |i: usize, default: u64| -> u64 {
        args.get(i).map_or(Ok(default), |s| s.parse()).unwrap_or_else(|_| {
            eprintln!("Usage: {} [nodes] [edges] [seed]", args[0]);
            std::process::exit(1);
        })
    };
    let nodes = arg(1, 40) as usize;
    let edges = arg(2, 120) as usize;
    let seed = arg(3, 7);

    // A blank factory gives every node the same payload, which compresses well
    let mut factory = GraphFactory::blank(GraphKind::Generic, nodes);
    let mut graph = factory.build();
    let mut wiring = GraphFactory::alphanumeric(GraphKind::Generic, 0, seed);
    wiring
        .connect_randomly(&mut graph, edges)
        .expect("members belong to the graph");
    let original = graph.clone();

    let repair = Repair::with_config(RepairConfig::default());
    let compressed = repair.compress(graph);
    let restored = repair
        .decompress(&compressed)
        .expect("compressed graph is well formed");

    if !restored.equivalent(&original) {
        eprintln!("Round trip mismatch");
        std::process::exit(1);
    }

    let before = original.stats();
    let after = compressed.stats();

    println!("\n=== Statistics ===");
    println!(
        "Topology: {} -> {}",
        original.topology().name(),
        compressed.topology().name()
    );
    println!("Nodes before compression: {}", before.nodes);
    println!("Edges before compression: {}", before.edges);
    println!("Nodes after compression: {}", after.nodes);
    println!("Compression nodes created: {}", after.compression_nodes);
    println!("Deepest nesting: {}", after.depth);
    println!("Compression ratio: {:.2}%", after.compression_ratio());
}
