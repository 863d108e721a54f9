//! Criterion benchmarks for cluster composition and scene building.
//! Focus sizes: n in {10, 100, 1000} repositories.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use vaultmap::analysis::heuristic_analysis;
use vaultmap::scenes::{ecosystem_graph, repository_graph};
use vaultmap::{compose, Architecture, Inventory, RepoRecord, Scheme};

const ARCHS: [&str; 6] = ["library", "frontend", "backend", "research", "fullstack", "mobile"];
const FAMILIES: [&str; 6] = ["fib0", "sspr", "fcag", "tropical", "claude", "misc"];

fn random_inventory(n: usize, seed: u64) -> Inventory {
    let mut rng = StdRng::seed_from_u64(seed);
    let repos = (0..n)
        .map(|i| {
            let fam = FAMILIES[rng.gen_range(0..FAMILIES.len())];
            let arch = ARCHS[rng.gen_range(0..ARCHS.len())];
            RepoRecord {
                architecture: Some(Architecture::from(arch.to_string())),
                description: "A react dashboard with a fastapi backend".to_string(),
                ..RepoRecord::new(format!("{fam}-repo-{i}"))
            }
        })
        .collect();
    Inventory::from_repos(repos)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let arch = Scheme::architecture();
    let eco = Scheme::ecosystem();
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("compose_architecture", n), &n, |b, &n| {
            b.iter_batched(
                || random_inventory(n, 42).by_architecture(),
                |groups| {
                    let _ = compose(&arch, &groups, &[]);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("repository_graph", n), &n, |b, &n| {
            let inv = random_inventory(n, 43);
            b.iter(|| repository_graph(&inv, &arch))
        });
        group.bench_with_input(BenchmarkId::new("ecosystem_graph", n), &n, |b, &n| {
            let inv = random_inventory(n, 44);
            b.iter(|| ecosystem_graph(&inv, &eco))
        });
    }
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let inv = random_inventory(100, 7);
    c.bench_function("heuristic_analysis_100", |b| {
        b.iter(|| {
            for r in &inv.repos {
                let _ = heuristic_analysis(r);
            }
        })
    });
}

criterion_group!(benches, bench_layout, bench_analysis);
criterion_main!(benches);
