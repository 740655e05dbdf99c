//! In-memory registry benchmarks.
//!
//! Measures the per-call cost of the registry operations so regressions in
//! locking or indexing show up as timing changes.

#![allow(clippy::expect_used, missing_docs)]

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use user_registry::domain::UserDraft;
use user_registry::outbound::registry::InMemoryUserRegistry;

static EMAIL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Draft with an email no other benchmark iteration has used.
fn unique_draft(first_name: &str) -> UserDraft {
    let n = EMAIL_SEQ.fetch_add(1, Ordering::Relaxed);
    UserDraft::try_from_parts(
        first_name,
        "Doe",
        format!("user{n}@example.com"),
        30,
        Some("+15551234567".to_owned()),
    )
    .expect("benchmark draft is valid")
}

fn populated(count: usize) -> InMemoryUserRegistry {
    let registry = InMemoryUserRegistry::new();
    for _ in 0..count {
        registry.create(unique_draft("User")).expect("seed user");
    }
    registry
}

fn bench_create(c: &mut Criterion) {
    let registry = InMemoryUserRegistry::new();
    c.bench_function("registry/create", |b| {
        b.iter_batched(
            || unique_draft("John"),
            |draft| black_box(registry.create(draft).expect("create")),
            BatchSize::SmallInput,
        );
    });
}

fn bench_get(c: &mut Criterion) {
    let registry = populated(1_000);
    let mut id = 0_u64;
    c.bench_function("registry/get", |b| {
        b.iter(|| {
            id = id % 1_000 + 1;
            black_box(registry.get(id.into()).expect("get"))
        });
    });
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/list");
    for size in [10, 1_000] {
        let registry = populated(size);
        group.bench_function(format!("{size}_users"), |b| {
            b.iter(|| black_box(registry.list().expect("list")));
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let registry = populated(1_000);
    let mut id = 0_u64;
    c.bench_function("registry/update", |b| {
        b.iter_batched(
            || unique_draft("Updated"),
            |draft| {
                id = id % 1_000 + 1;
                black_box(registry.update(id.into(), draft).expect("update"))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_delete(c: &mut Criterion) {
    let registry = InMemoryUserRegistry::new();
    c.bench_function("registry/delete", |b| {
        b.iter_batched(
            || registry.create(unique_draft("Doomed")).expect("create").id(),
            |id| registry.delete(id).expect("delete"),
            BatchSize::SmallInput,
        );
    });
}

fn bench_exists_and_count(c: &mut Criterion) {
    let registry = populated(1_000);
    c.bench_function("registry/exists", |b| {
        b.iter(|| black_box(registry.exists(500_u64.into())));
    });
    c.bench_function("registry/count", |b| {
        b.iter(|| black_box(registry.count()));
    });
}

criterion_group!(
    benches,
    bench_create,
    bench_get,
    bench_list,
    bench_update,
    bench_delete,
    bench_exists_and_count
);
criterion_main!(benches);
