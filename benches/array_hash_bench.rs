use array_hash::{ArrayHash, SlotHasher};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hashbrown::HashSet;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Word-like keys of 3..=10 lowercase letters.
fn key(n: u64) -> String {
    let len = 3 + (n % 8) as usize;
    let mut x = n;
    (0..len)
        .map(|_| {
            x = x.rotate_right(5) ^ 0x9e37_79b9_7f4a_7c15;
            (b'a' + (x % 26) as u8) as char
        })
        .collect()
}

fn bench_insert_fresh_20k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(20_000).map(key).collect();
    c.bench_function("array_hash::insert_fresh_20k", |b| {
        b.iter_batched(
            ArrayHash::new,
            |mut t| {
                for k in &keys {
                    let _ = t.insert(k).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    // Reference set container, as the word-list driver compares against.
    c.bench_function("hashbrown_set::insert_fresh_20k", |b| {
        b.iter_batched(
            HashSet::<Vec<u8>>::new,
            |mut s| {
                for k in &keys {
                    s.insert(k.as_bytes().to_vec());
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_duplicates_20k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(2).take(20_000).map(key).collect();
    let mut t = ArrayHash::new();
    for k in &keys {
        t.insert(k).unwrap();
    }
    c.bench_function("array_hash::insert_duplicate_20k", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(t.insert(k).unwrap());
            }
        })
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(7).take(20_000).map(key).collect();
    let mut t = ArrayHash::new();
    let mut s = HashSet::new();
    for k in &keys {
        t.insert(k).unwrap();
        s.insert(k.as_bytes().to_vec());
    }
    // Precompute 10k random query keys using LCG
    let n = keys.len();
    let mut x = 0x9e3779b97f4a7c15u64;
    let queries: Vec<String> = (0..10_000)
        .map(|_| {
            x = x.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(x as usize) % n].clone()
        })
        .collect();
    c.bench_function("array_hash::find_hit_10k_on_20k", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(t.find(k).unwrap());
            }
        })
    });
    c.bench_function("hashbrown_set::find_hit_10k_on_20k", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(s.contains(k.as_bytes()));
            }
        })
    });
}

fn bench_find_miss_10k(c: &mut Criterion) {
    let mut t = ArrayHash::new();
    for k in lcg(11).take(20_000).map(key) {
        t.insert(k).unwrap();
    }
    let misses: Vec<String> = lcg(0xdead_beef)
        .take(10_000)
        .map(|x| format!("{}#", key(x)))
        .collect();
    c.bench_function("array_hash::find_miss_10k_on_20k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(t.find(k).unwrap());
            }
        })
    });
}

fn bench_iter_all(c: &mut Criterion) {
    let mut t = ArrayHash::new();
    for k in lcg(999).take(20_000).map(key) {
        t.insert(k).unwrap();
    }
    c.bench_function("array_hash::iter_all_20k", |b| {
        b.iter(|| {
            let mut bytes = 0usize;
            for k in t.iter() {
                bytes = bytes.wrapping_add(k.len());
            }
            black_box(bytes)
        })
    });
    c.bench_function("array_hash::cursor_walk_20k", |b| {
        b.iter(|| {
            let mut n = 0usize;
            let mut cur = t.begin();
            while cur != t.end() {
                n += 1;
                cur.advance(&t).unwrap();
            }
            black_box(n)
        })
    });
}

// Every key in one bucket: each insert copies the whole bucket.
fn bench_single_bucket_2k(c: &mut Criterion) {
    struct OneBucket;
    impl SlotHasher for OneBucket {
        fn hash_key(&self, _key: &[u8]) -> u64 {
            0
        }
    }
    let keys: Vec<String> = lcg(5).take(2_000).map(|x| format!("{x:016x}")).collect();
    c.bench_function("array_hash::single_bucket_insert_2k", |b| {
        b.iter_batched(
            || ArrayHash::<OneBucket>::with_hasher(OneBucket),
            |mut t| {
                for k in &keys {
                    let _ = t.insert(k).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_20k, bench_insert_duplicates_20k, bench_single_bucket_2k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_find_hit_10k,
              bench_find_miss_10k,
              bench_iter_all
}
criterion_main!(benches_insert, benches_ops);
