use std::sync::Arc;

use array_hash::ArrayMap;
use array_hash::ArrayPool;
use array_hash::DefaultHashBuilder;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Entries inserted into each map before it is drained again.
    #[arg(short = 'e', long = "entries", default_value_t = 40)]
    entries: usize,

    /// Number of short-lived maps built against the shared pool.
    #[arg(short = 'r', long = "rounds", default_value_t = 16)]
    rounds: usize,
}

fn main() {
    let args = Args::parse();
    let pool = Arc::new(ArrayPool::new());

    println!(
        "Growing one map to {} entries and shrinking it back",
        args.entries
    );

    let mut map = ArrayMap::with_pool_and_hasher(Arc::clone(&pool), DefaultHashBuilder::default());
    let mut capacity = map.capacity();
    for key in 0..args.entries as u64 {
        map.insert(key, key * 2).expect("pooled maps are mutable");
        if map.capacity() != capacity {
            println!(
                "  grow   {:>4} -> {:>4} at len {}",
                capacity,
                map.capacity(),
                map.len()
            );
            capacity = map.capacity();
        }
    }
    for key in 0..args.entries as u64 {
        map.remove(&key);
        if map.capacity() != capacity {
            println!(
                "  shrink {:>4} -> {:>4} at len {}",
                capacity,
                map.capacity(),
                map.len()
            );
            capacity = map.capacity();
        }
    }

    println!(
        "Pooled after one cycle: {} x 4, {} x 8",
        pool.pooled(4),
        pool.pooled(8)
    );

    println!("Building {} small maps against the pool...", args.rounds);
    let maps = (0..args.rounds)
        .map(|round| {
            let mut map =
                ArrayMap::with_pool_and_hasher(Arc::clone(&pool), DefaultHashBuilder::default());
            for key in 0..(round % 8) as u64 + 1 {
                map.insert(key, round as u64).expect("pooled maps are mutable");
            }
            map
        })
        .collect::<Vec<_>>();

    let live = maps.iter().map(ArrayMap::len).sum::<usize>();
    println!("  {} maps holding {} entries", maps.len(), live);
    drop(maps);

    println!(
        "Pooled after dropping them: {} x 4, {} x 8",
        pool.pooled(4),
        pool.pooled(8)
    );

    let stats = pool.stats();
    println!("Pool statistics:");
    println!("  Hits: {}", stats.hits);
    println!("  Misses: {}", stats.misses);
    println!("  Recycled: {}", stats.recycled);
    println!("  Discarded: {}", stats.discarded);
    println!("  Corruptions: {}", stats.corruptions);
    let requests = stats.hits + stats.misses;
    if requests > 0 {
        println!(
            "  Hit rate: {:.1}%",
            stats.hits as f64 / requests as f64 * 100.0
        );
    }
}
