#![allow(missing_docs, unreachable_pub)]
use alloy_primitives::{keccak256, B256};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proptest::{prelude::*, strategy::ValueTree, test_runner::TestRunner};

/// Benchmarks different implementations of the ordered root calculation.
pub fn trie_root_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ordered trie root calculation");

    for size in [10, 100, 1_000] {
        let group_name = |description: &str| format!("ordered root | size: {size} | {description}");

        let items = &generate_test_data(size)[..];
        assert_eq!(triehash_ordered_trie_root(items), hash_builder_root(items));

        group.bench_function(group_name("triehash::ordered_trie_root"), |b| {
            b.iter(|| triehash_ordered_trie_root(black_box(items)));
        });

        group.bench_function(group_name("HashBuilder"), |b| {
            b.iter(|| hash_builder_root(black_box(items)));
        });
    }
}

fn generate_test_data(size: usize) -> Vec<Vec<u8>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 1..=128), size)
        .new_tree(&mut TestRunner::new(ProptestConfig::default()))
        .unwrap()
        .current()
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = trie_root_benchmark
}
criterion_main!(benches);

#[derive(Default, Debug, Clone, PartialEq, Eq)]
struct KeccakHasher;

impl hash_db::Hasher for KeccakHasher {
    type Out = B256;
    type StdHasher = plain_hasher::PlainHasher;

    const LENGTH: usize = 32;

    fn hash(x: &[u8]) -> Self::Out {
        keccak256(x)
    }
}

mod implementations {
    use super::*;
    use mpt_rlp::Encodable;
    use mpt_trie::ordered_trie_root_with_encoder;

    pub fn triehash_ordered_trie_root(items: &[Vec<u8>]) -> B256 {
        triehash::ordered_trie_root::<KeccakHasher, _>(items.iter().map(|item| {
            let mut buf = Vec::new();
            item.as_slice().encode(&mut buf);
            buf
        }))
    }

    pub fn hash_builder_root(items: &[Vec<u8>]) -> B256 {
        ordered_trie_root_with_encoder(items, |item, buf| item.as_slice().encode(buf))
    }
}
use implementations::*;
