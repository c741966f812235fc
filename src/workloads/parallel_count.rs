// Parallel count: four threads count odd values over fixed quarters of an
// array, each accumulating into its own result slot. With adjacent slots
// the writes share a cache line (false sharing); with slots 16 ints apart
// they do not.

use std::hint::black_box;
use std::thread;

use rand::Rng;
use rayon::prelude::*;

use super::seeded_rng;

pub const WORKERS: usize = 4;

/// Room for four slots spaced [`SlotSpacing::Far`] apart.
pub const SLOTS: usize = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSpacing {
    Near,
    Far,
}

impl SlotSpacing {
    pub fn stride(self) -> usize {
        match self {
            SlotSpacing::Near => 1,
            SlotSpacing::Far => 16,
        }
    }
}

/// `n` values drawn uniformly from `0..=255`.
pub fn random_bytes(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = seeded_rng(seed);
    (0..n).map(|_| rng.gen_range(0..=255)).collect()
}

pub fn count_odd(data: &[i32]) -> i32 {
    data.iter().map(|x| x % 2).sum()
}

/// Counts odd values with [`WORKERS`] scoped threads over fixed quarters of
/// `data`, each writing its running count into a slot of `slots`.
pub fn count_odd_partitioned(data: &[i32], slots: &mut [i32; SLOTS], spacing: SlotSpacing) -> i32 {
    let n = data.len();
    let bounds = [0, n / 4, n / 2, n * 3 / 4, n];
    let stride = spacing.stride();

    thread::scope(|s| {
        for (worker, slot) in slots.iter_mut().step_by(stride).take(WORKERS).enumerate() {
            let part = &data[bounds[worker]..bounds[worker + 1]];
            s.spawn(move || count_into(slot, part));
        }
    });

    slots.iter().step_by(stride).take(WORKERS).sum()
}

fn count_into(slot: &mut i32, part: &[i32]) {
    *slot = 0;
    for &x in part {
        // Keep the running count in memory so neighbouring slots contend.
        *black_box(&mut *slot) += x % 2;
    }
}

/// Same count with rayon splitting the work across its pool.
pub fn count_odd_rayon(data: &[i32]) -> i32 {
    let chunk = (data.len() / rayon::current_num_threads()).max(1);
    data.par_chunks(chunk).map(count_odd).sum()
}
