use core::hash::Hash;
use core::hint::black_box;
use std::collections::BTreeMap;

use array_hash::ArrayMap;
use array_hash::DefaultHashBuilder;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;

trait BenchKey: Clone + Hash + Eq + Ord {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{key:016X}")))
    }
}

const SIZES: &[usize] = &[8, 16, 32, 64, 128, 256, 512];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn shuffled<K: Clone>(keys: &[K]) -> Vec<K> {
    let mut keys = keys.to_vec();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn bench_insert_random<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("array_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = ArrayMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i).unwrap());
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = HashbrownMap::with_hasher(DefaultHashBuilder::default());
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("btree_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = BTreeMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = (0..size as u64 * 2).map(K::new).collect::<Vec<_>>();
        let present = keys.iter().step_by(2).cloned();

        let array_map: ArrayMap<K, usize> = present.clone().zip(0..).collect();
        let hashbrown_map: HashbrownMap<K, usize, DefaultHashBuilder> =
            present.clone().zip(0..).collect();
        let btree_map: BTreeMap<K, usize> = present.zip(0..).collect();

        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_function(format!("array_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    for key in &keys {
                        black_box(array_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    for key in &keys {
                        black_box(hashbrown_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("btree_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    for key in &keys {
                        black_box(btree_map.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        let array_map: ArrayMap<K, usize> = keys.iter().cloned().zip(0..).collect();
        let hashbrown_map: HashbrownMap<K, usize, DefaultHashBuilder> =
            keys.iter().cloned().zip(0..).collect();
        let btree_map: BTreeMap<K, usize> = keys.iter().cloned().zip(0..).collect();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("array_map/{size}"), |b| {
            b.iter_batched(
                || (array_map.clone(), shuffled(&keys)),
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || (hashbrown_map.clone(), shuffled(&keys)),
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("btree_map/{size}"), |b| {
            b.iter_batched(
                || (btree_map.clone(), shuffled(&keys)),
                |(mut map, keys)| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        let array_map: ArrayMap<K, usize> = keys.iter().cloned().zip(0..).collect();
        let hashbrown_map: HashbrownMap<K, usize, DefaultHashBuilder> =
            keys.iter().cloned().zip(0..).collect();
        let btree_map: BTreeMap<K, usize> = keys.iter().cloned().zip(0..).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("array_map/{size}"), |b| {
            b.iter(|| black_box(array_map.values().sum::<usize>()))
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| black_box(hashbrown_map.values().sum::<usize>()))
        });
        group.bench_function(format!("btree_map/{size}"), |b| {
            b.iter(|| black_box(btree_map.values().sum::<usize>()))
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert(u64),
    Find(u64),
    Remove(u64),
}

/// Operations over a Zipf-skewed key space, so a few hot keys dominate the
/// way they do in small configuration-style maps.
fn zipf_operations(size: usize) -> Vec<Operation> {
    let mut rng = SmallRng::from_os_rng();
    let keys = Zipf::new(size as f32 * 2.0, 1.0).unwrap();
    (0..size * 3)
        .map(|_| {
            let key = keys.sample(&mut rng) as u64;
            match rng.random_range(0..3) {
                0 => Operation::Insert(key),
                1 => Operation::Find(key),
                _ => Operation::Remove(key),
            }
        })
        .collect()
}

fn bench_mixed_zipf<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let operations = zipf_operations(size);
        group.throughput(Throughput::Elements(operations.len() as u64));

        group.bench_function(format!("array_map/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = ArrayMap::new();
                    for operation in operations {
                        match operation {
                            Operation::Insert(key) => {
                                black_box(map.insert(K::new(key), key).unwrap());
                            }
                            Operation::Find(key) => {
                                black_box(map.get(&K::new(key)));
                            }
                            Operation::Remove(key) => {
                                black_box(map.remove(&K::new(key)));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = HashbrownMap::with_hasher(DefaultHashBuilder::default());
                    for operation in operations {
                        match operation {
                            Operation::Insert(key) => {
                                black_box(map.insert(K::new(key), key));
                            }
                            Operation::Find(key) => {
                                black_box(map.get(&K::new(key)));
                            }
                            Operation::Remove(key) => {
                                black_box(map.remove(&K::new(key)));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("btree_map/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = BTreeMap::new();
                    for operation in operations {
                        match operation {
                            Operation::Insert(key) => {
                                black_box(map.insert(K::new(key), key));
                            }
                            Operation::Find(key) => {
                                black_box(map.get(&K::new(key)));
                            }
                            Operation::Remove(key) => {
                                black_box(map.remove(&K::new(key)));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey>,
    bench_insert_random::<StringKey>,
    bench_find_hit_miss::<SmallKey>,
    bench_find_hit_miss::<StringKey>,
    bench_remove::<SmallKey>,
    bench_remove::<StringKey>,
    bench_iteration::<SmallKey>,
    bench_iteration::<StringKey>,
    bench_mixed_zipf::<SmallKey>,
    bench_mixed_zipf::<StringKey>,
);

criterion_main!(benches);
