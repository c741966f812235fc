// Member ordering: the same ordered-set lookups over records whose hot
// fields (`id`, `value`) come before or after a block of cold bytes.
//
// `#[repr(C)]` pins the declared field order; the default representation
// would let the compiler move the cold block out of the way.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::Rng;

use super::seeded_rng;

pub trait Record: Ord + Sized {
    fn new(id: usize, value: i32) -> Self;
    fn value(&self) -> i32;
}

/// Hot fields first, small cold block after.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HotFirst {
    pub id: usize,
    pub value: i32,
    pub cold: [u8; 8],
}

/// Large cold block first, hot fields at the end.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HotLast {
    pub cold: [u8; 128],
    pub id: usize,
    pub value: i32,
}

// Records compare by id only.
macro_rules! keyed_by_id {
    ($($record:ident),+) => {
        $(
            impl PartialEq for $record {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $record {}

            impl PartialOrd for $record {
                fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }

            impl Ord for $record {
                fn cmp(&self, other: &Self) -> Ordering {
                    self.id.cmp(&other.id)
                }
            }
        )+
    };
}

keyed_by_id!(HotFirst, HotLast);

impl Record for HotFirst {
    fn new(id: usize, value: i32) -> Self {
        HotFirst {
            id,
            value,
            cold: [0; 8],
        }
    }

    fn value(&self) -> i32 {
        self.value
    }
}

impl Record for HotLast {
    fn new(id: usize, value: i32) -> Self {
        HotLast {
            cold: [0; 128],
            id,
            value,
        }
    }

    fn value(&self) -> i32 {
        self.value
    }
}

/// Records `0..n` with `value = 2 * id`.
pub fn build_set<R: Record>(n: usize) -> BTreeSet<R> {
    (0..n).map(|id| R::new(id, (2 * id) as i32)).collect()
}

/// `n` lower-bound lookups of uniformly random ids, summing the values found.
/// The id sequence depends only on `seed`, so repeated calls do equal work.
pub fn lookup_sum<R: Record>(set: &BTreeSet<R>, n: usize, seed: u64) -> i64 {
    if n == 0 {
        return 0;
    }
    let mut rng = seeded_rng(seed);
    let mut sum = 0i64;
    for _ in 0..n {
        let probe = R::new(rng.gen_range(0..n), 0);
        if let Some(found) = set.range(probe..).next() {
            sum += i64::from(found.value());
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_field_order_is_kept() {
        assert_eq!(mem::offset_of!(HotFirst, id), 0);
        assert_eq!(mem::offset_of!(HotLast, id), 128);
        assert!(mem::size_of::<HotLast>() > mem::size_of::<HotFirst>());
    }

    #[test]
    fn test_ordering_ignores_payload() {
        let a = HotFirst::new(3, 10);
        let b = HotFirst::new(3, 99);
        assert_eq!(a, b);
        assert!(HotFirst::new(2, 0) < a);
    }

    #[test]
    fn test_lookup_finds_lower_bound() {
        let set: BTreeSet<HotLast> = [1, 5, 9].iter().map(|&id| HotLast::new(id, id as i32)).collect();
        let found = set.range(HotLast::new(6, 0)..).next().map(Record::value);
        assert_eq!(found, Some(9));
    }

    #[test]
    fn test_layouts_give_same_sum() {
        let n = 2_000;
        let first = lookup_sum(&build_set::<HotFirst>(n), n, 42);
        let last = lookup_sum(&build_set::<HotLast>(n), n, 42);
        assert_eq!(first, last);
        assert!(first > 0);
        assert_eq!(first % 2, 0);
        assert_eq!(lookup_sum(&build_set::<HotFirst>(n), n, 42), first);
    }

    #[test]
    fn test_empty_set() {
        let set = build_set::<HotFirst>(0);
        assert_eq!(lookup_sum(&set, 0, 1), 0);
    }
}
