use std::cell::Cell;
use std::rc::Rc;

use layout_bench::poly::{Collection, Variant};
use layout_bench::poly_variants;
use proptest::prelude::*;

trait Shape {
    fn value(&self) -> i64;
    fn kind(&self) -> u8;
    fn payload(&self) -> u32;
    fn scale(&mut self, factor: u32);
}

#[derive(Debug, Clone, Copy)]
struct D1 {
    payload: u32,
}

#[derive(Debug, Clone, Copy)]
struct D2 {
    payload: u32,
    _wide: [u64; 2],
}

#[derive(Debug, Clone, Copy)]
struct D3 {
    _tag: u8,
    payload: u32,
}

macro_rules! shapes {
    ($($name:ident => $value:expr),+) => {
        $(
            impl Shape for $name {
                fn value(&self) -> i64 {
                    $value
                }

                fn kind(&self) -> u8 {
                    $value as u8
                }

                fn payload(&self) -> u32 {
                    self.payload
                }

                fn scale(&mut self, factor: u32) {
                    self.payload *= factor;
                }
            }
        )+
    };
}

shapes!(D1 => 1, D2 => 2, D3 => 3);
poly_variants!(dyn Shape => D1, D2, D3);

fn d1(payload: u32) -> D1 {
    D1 { payload }
}

fn d2(payload: u32) -> D2 {
    D2 { payload, _wide: [0; 2] }
}

fn d3(payload: u32) -> D3 {
    D3 { _tag: 0, payload }
}

fn insert_kind(collection: &mut Collection<dyn Shape>, kind: u8, payload: u32) {
    match kind {
        0 => collection.insert(d1(payload)),
        1 => collection.insert(d2(payload)),
        _ => collection.insert(d3(payload)),
    }
}

fn visited(collection: &Collection<dyn Shape>) -> Vec<(u8, u32)> {
    let mut seen = Vec::new();
    collection.for_each(|s| seen.push((s.kind(), s.payload())));
    seen
}

fn sum(collection: &Collection<dyn Shape>) -> i64 {
    let mut total = 0;
    collection.for_each(|s| total += s.value());
    total
}

#[test]
fn test_mixed_inserts_sum_to_ten() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    collection.insert(d1(0));
    collection.insert(d2(0));
    collection.insert(d1(0));
    collection.insert(d3(0));
    collection.insert(d2(0));
    collection.insert(d1(0));

    assert_eq!(sum(&collection), 3 * 1 + 2 * 2 + 1 * 3);
}

#[test]
fn test_empty_collection_visits_nothing() {
    let collection: Collection<dyn Shape> = Collection::default();
    let mut visits = 0;
    let mut total = 0;

    let mut f = collection.for_each(|s| {
        visits += 1;
        total += s.value();
    });
    // the callback comes back ready to use
    let probe = d3(0);
    f(&probe);
    drop(f);

    assert_eq!(visits, 1);
    assert_eq!(total, 3);
    assert_eq!(collection.segment_count(), 0);
}

#[test]
fn test_one_segment_per_type_regardless_of_interleaving() {
    let patterns: [&[u8]; 4] = [
        &[0, 1, 2],
        &[2, 2, 1, 0, 0, 1],
        &[0, 0, 0, 0, 1, 1, 2],
        &[1, 2, 0, 2, 1, 0, 1, 2, 0],
    ];

    for pattern in patterns {
        let mut collection: Collection<dyn Shape> = Collection::new();
        for (seq, &kind) in pattern.iter().enumerate() {
            insert_kind(&mut collection, kind, seq as u32);
        }
        assert_eq!(collection.segment_count(), 3, "pattern {pattern:?}");
        let lens: usize = collection.segments().map(|s| s.len).sum();
        assert_eq!(lens, pattern.len());
    }
}

#[test]
fn test_segments_are_homogeneous() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    for seq in 0..300u32 {
        insert_kind(&mut collection, (seq * 7 % 3) as u8, seq);
    }

    let kinds: Vec<u8> = visited(&collection).into_iter().map(|(kind, _)| kind).collect();
    let switches = kinds.windows(2).filter(|w| w[0] != w[1]).count();
    assert_eq!(switches, collection.segment_count() - 1);
}

#[test]
fn test_strides_match_concrete_sizes() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    collection.insert(d1(1));
    collection.insert(d2(2));
    collection.insert(d3(3));

    let strides: Vec<usize> = collection.segments().map(|s| s.stride).collect();
    assert_eq!(
        strides,
        vec![
            std::mem::size_of::<D1>(),
            std::mem::size_of::<D2>(),
            std::mem::size_of::<D3>()
        ]
    );
}

#[test]
fn test_traversal_is_repeatable() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    for seq in 0..1_000u32 {
        insert_kind(&mut collection, (seq % 3) as u8, seq);
    }

    let first = sum(&collection);
    assert_eq!(sum(&collection), first);
    assert_eq!(sum(&collection), first);
    assert_eq!(visited(&collection), visited(&collection));
}

#[test]
fn test_growth_keeps_every_value() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    for payload in 0..100_000u32 {
        collection.insert(d2(payload));
    }

    let payloads: Vec<u32> = visited(&collection).into_iter().map(|(_, p)| p).collect();
    assert_eq!(payloads.len(), 100_000);
    assert!(payloads.iter().copied().eq(0..100_000u32));
}

#[test]
fn test_for_each_mut_updates_in_place() {
    let mut collection: Collection<dyn Shape> = Collection::new();
    collection.insert(d1(1));
    collection.insert(d3(2));
    collection.insert(d1(3));

    collection.for_each_mut(|s| s.scale(10));

    let mut payloads: Vec<u32> = visited(&collection).into_iter().map(|(_, p)| p).collect();
    payloads.sort_unstable();
    assert_eq!(payloads, vec![10, 20, 30]);
}

#[test]
fn test_callback_threads_through_collections() {
    let mut left: Collection<dyn Shape> = Collection::new();
    let mut right: Collection<dyn Shape> = Collection::new();
    left.insert(d1(0));
    left.insert(d2(0));
    right.insert(d3(0));

    let mut total = 0;
    let f = left.for_each(|s| total += s.value());
    let f = right.for_each(f);
    drop(f);
    assert_eq!(total, 6);
}

#[test]
fn test_upcast_keeps_address_and_dispatch() {
    let mut values = [d2(4), d2(5)];

    let base = values.as_ptr();
    let viewed = <D2 as Variant<dyn Shape>>::upcast(base);
    assert_eq!(viewed.cast::<u8>(), base.cast::<u8>());
    assert_eq!(unsafe { &*viewed }.payload(), 4);

    let second = values[1..].as_mut_ptr();
    let viewed = <D2 as Variant<dyn Shape>>::upcast_mut(second);
    assert_eq!(viewed.cast::<u8>(), second.cast::<u8>());
    unsafe { &mut *viewed }.scale(3);
    assert_eq!(values[1].payload, 15);
}

#[test]
fn test_small_variants_read_back_exactly() {
    trait Byte {
        fn byte(&self) -> u8;
    }
    struct Tiny(u8);
    impl Byte for Tiny {
        fn byte(&self) -> u8 {
            self.0
        }
    }
    poly_variants!(dyn Byte => Tiny);

    let mut collection: Collection<dyn Byte> = Collection::new();
    for byte in 1..=9u8 {
        collection.insert(Tiny(byte));
    }

    let mut seen = Vec::new();
    collection.for_each(|b| seen.push(b.byte()));
    assert_eq!(seen, (1..=9u8).collect::<Vec<_>>());
    assert_eq!(collection.segments().map(|s| s.stride).collect::<Vec<_>>(), vec![1]);
}

struct Tracked {
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

trait Probe {}
impl Probe for Tracked {}
impl Probe for u16 {}
poly_variants!(dyn Probe => Tracked, u16);

#[test]
fn test_dropping_collection_drops_every_value() {
    let drops = Rc::new(Cell::new(0));
    let mut collection: Collection<dyn Probe> = Collection::new();
    for _ in 0..5 {
        collection.insert(Tracked {
            drops: Rc::clone(&drops),
        });
        collection.insert(7u16);
    }

    let mut visits = 0;
    collection.for_each(|_| visits += 1);
    assert_eq!(visits, 10);
    assert_eq!(drops.get(), 0);

    drop(collection);
    assert_eq!(drops.get(), 5);
}

proptest! {
    #[test]
    fn prop_every_insert_visited_once(ops in prop::collection::vec((0u8..3, any::<u32>()), 0..300)) {
        let mut collection: Collection<dyn Shape> = Collection::new();
        for &(kind, payload) in &ops {
            insert_kind(&mut collection, kind, payload);
        }

        let mut seen = visited(&collection);
        let mut expected: Vec<(u8, u32)> = ops.iter().map(|&(kind, payload)| (kind + 1, payload)).collect();
        seen.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_per_type_order_preserved(kinds in prop::collection::vec(0u8..3, 0..300)) {
        let mut collection: Collection<dyn Shape> = Collection::new();
        for (seq, &kind) in kinds.iter().enumerate() {
            insert_kind(&mut collection, kind, seq as u32);
        }

        let seen = visited(&collection);
        for kind in 1..=3u8 {
            let order: Vec<u32> = seen.iter().filter(|(k, _)| *k == kind).map(|&(_, seq)| seq).collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
