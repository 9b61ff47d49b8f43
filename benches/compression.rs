use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_repair::{Graph, GraphFactory, GraphKind, Repair};

/// Generate many copies of a small `a -> b -> c` motif
fn generate_motifs(size: usize) -> Graph<char> {
    let mut graph = Graph::new();
    for _ in 0..size / 3 {
        let a = graph.insert('a');
        let b = graph.insert('b');
        let c = graph.insert('c');
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
    }
    graph
}

/// Generate a random graph over a small alphabet (high repetition)
fn generate_small_alphabet(size: usize) -> Graph<u8> {
    let mut graph = Graph::new();
    let mut seed = 12345u64;
    let mut next = || {
        // Simple LCG random
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        seed >> 16
    };

    let keys: Vec<_> = (0..size).map(|_| graph.insert((next() % 4) as u8)).collect();
    for _ in 0..size * 2 {
        let from = keys[(next() as usize) % size];
        let to = keys[(next() as usize) % size];
        graph.add_edge(from, to).unwrap();
    }
    graph
}

/// Generate a factory graph with random alphanumeric payloads (low repetition)
fn generate_low_repetition(size: usize) -> Graph<String> {
    let mut factory = GraphFactory::alphanumeric(GraphKind::Generic, size, 42);
    let mut graph = factory.build();
    factory.connect_randomly(&mut graph, size * 2).unwrap();
    graph
}

fn bench_compress(c: &mut Criterion) {
    let sizes = [30, 300, 1_500];
    let mut group = c.benchmark_group("compress");

    for size in sizes.iter() {
        let motifs = generate_motifs(*size);
        let small_alphabet = generate_small_alphabet(*size);
        let low_repetition = generate_low_repetition(*size);

        group.bench_with_input(BenchmarkId::new("motifs", size), &motifs, |b, graph| {
            b.iter(|| black_box(Repair::new().compress(black_box(graph.clone()))));
        });

        group.bench_with_input(
            BenchmarkId::new("small_alphabet", size),
            &small_alphabet,
            |b, graph| {
                b.iter(|| black_box(Repair::new().compress(black_box(graph.clone()))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("low_repetition", size),
            &low_repetition,
            |b, graph| {
                b.iter(|| black_box(Repair::new().compress(black_box(graph.clone()))));
            },
        );
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let sizes = [30, 300, 1_500];
    let mut group = c.benchmark_group("decompress");

    for size in sizes.iter() {
        // Prepare pre-compressed graphs
        let repair = Repair::new();
        let motifs = repair.compress(generate_motifs(*size));
        let small_alphabet = repair.compress(generate_small_alphabet(*size));

        group.bench_with_input(BenchmarkId::new("motifs", size), &motifs, |b, graph| {
            b.iter(|| black_box(repair.decompress(black_box(graph)).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("small_alphabet", size),
            &small_alphabet,
            |b, graph| {
                b.iter(|| black_box(repair.decompress(black_box(graph)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
