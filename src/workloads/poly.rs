// Polymorphic containers: a vector of boxed trait objects (shuffled, then
// sorted by concrete type) against the segmented `Collection`.

use std::any::TypeId;

use rand::seq::SliceRandom;
use rand::Rng;

use super::seeded_rng;
use crate::poly::Collection;

pub trait Counter {
    fn value(&self) -> i32;
    fn kind(&self) -> TypeId;
}

/// `seq` is the insertion ordinal; it also gives each value the footprint
/// of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct One {
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Two {
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Three {
    pub seq: u64,
}

macro_rules! counters {
    ($($name:ident => $value:expr),+ $(,)?) => {
        $(
            impl Counter for $name {
                fn value(&self) -> i32 {
                    $value
                }

                fn kind(&self) -> TypeId {
                    TypeId::of::<$name>()
                }
            }
        )+
        crate::poly_variants!(dyn Counter => $($name),+);
    };
}

counters!(One => 1, Two => 2, Three => 3);

/// The concrete type of the `seq`-th value, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    One,
    Two,
    Three,
}

pub fn picks(n: usize, seed: u64) -> Vec<Pick> {
    let mut rng = seeded_rng(seed);
    (0..n)
        .map(|_| match rng.gen_range(1..=3) {
            1 => Pick::One,
            2 => Pick::Two,
            _ => Pick::Three,
        })
        .collect()
}

fn boxed(pick: Pick, seq: u64) -> Box<dyn Counter> {
    match pick {
        Pick::One => Box::new(One { seq }),
        Pick::Two => Box::new(Two { seq }),
        Pick::Three => Box::new(Three { seq }),
    }
}

/// Boxed counters in random order, each allocated separately.
pub fn boxed_counters(n: usize, seed: u64) -> Vec<Box<dyn Counter>> {
    let mut counters: Vec<Box<dyn Counter>> = picks(n, seed)
        .into_iter()
        .zip(0u64..)
        .map(|(pick, seq)| boxed(pick, seq))
        .collect();
    counters.shuffle(&mut seeded_rng(seed.wrapping_add(1)));
    counters
}

/// Groups the boxes by concrete type so consecutive calls hit the same vtable.
pub fn sort_by_kind(counters: &mut [Box<dyn Counter>]) {
    counters.sort_by_key(|c| c.kind());
}

pub fn counter_collection(n: usize, seed: u64) -> Collection<dyn Counter> {
    let mut collection = Collection::new();
    for (pick, seq) in picks(n, seed).into_iter().zip(0u64..) {
        match pick {
            Pick::One => collection.insert(One { seq }),
            Pick::Two => collection.insert(Two { seq }),
            Pick::Three => collection.insert(Three { seq }),
        }
    }
    collection
}

pub fn sum_boxed(counters: &[Box<dyn Counter>]) -> i64 {
    counters.iter().map(|c| i64::from(c.value())).sum()
}

pub fn sum_collection(collection: &Collection<dyn Counter>) -> i64 {
    let mut sum = 0i64;
    collection.for_each(|c| sum += i64::from(c.value()));
    sum
}
