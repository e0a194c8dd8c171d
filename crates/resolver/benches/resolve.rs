use anymod_resolver::{LogicalName, RegisterOptions, Resolver, TextHandler};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tempfile::TempDir;

// ============================================================================
// Benchmark: Extension Table Merging
// ============================================================================

fn bench_merged_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("merged_table");
    let temp = TempDir::new().unwrap();

    for bindings in [0usize, 8, 64] {
        let mut resolver = Resolver::builder().search_path(temp.path()).build().unwrap();
        let extensions: Vec<String> = (0..bindings).map(|i| format!("ext{i}")).collect();
        if !extensions.is_empty() {
            resolver
                .registry_mut()
                .register::<TextHandler>(RegisterOptions::new().extensions(extensions))
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(bindings), &resolver, |b, resolver| {
            b.iter(|| black_box(resolver.merged_table()));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Resolution (cold probe vs. cache hit)
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("pkg")).unwrap();
    std::fs::write(temp.path().join("pkg/settings.txt"), "key = value\n".repeat(64)).unwrap();

    let mut resolver = Resolver::builder().search_path(temp.path()).build().unwrap();
    let name = LogicalName::new("pkg.settings").unwrap();

    group.bench_function("find", |b| {
        b.iter(|| black_box(resolver.find(&name)));
    });

    group.bench_function("cold", |b| {
        b.iter(|| {
            resolver.forget("pkg.settings");
            black_box(resolver.resolve("pkg.settings").unwrap());
        });
    });

    resolver.resolve("pkg.settings").unwrap();
    group.bench_function("cached", |b| {
        b.iter(|| black_box(resolver.resolve("pkg.settings").unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_merged_table, bench_resolve);
criterion_main!(benches);
