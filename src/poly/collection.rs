use std::any::{self, TypeId};
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::segment::{Segment, SegmentBase};
use super::Variant;

/// Dense identifier handed to a concrete type the first time it is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey(usize);

impl SegmentKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Summary of one segment, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentInfo {
    pub key: SegmentKey,
    pub type_name: &'static str,
    pub len: usize,
    pub stride: usize,
}

/// Heterogeneous container storing each concrete type contiguously.
///
/// Values go in through [`insert`](Self::insert) and come out only through
/// whole-collection traversal with [`for_each`](Self::for_each) or
/// [`for_each_mut`](Self::for_each_mut). There is no removal, lookup or
/// indexed access. Segments are visited in the order their types were first
/// inserted; values within a segment in insertion order.
pub struct Collection<B: ?Sized + 'static> {
    keys: FxHashMap<TypeId, SegmentKey>,
    segments: Vec<Box<dyn SegmentBase<B>>>,
}

impl<B: ?Sized + 'static> Collection<B> {
    pub fn new() -> Self {
        Collection {
            keys: FxHashMap::default(),
            segments: Vec::new(),
        }
    }

    /// Stores `value` in the segment for `T`, creating that segment on first use.
    ///
    /// Only registered variants of `B` are accepted:
    ///
    /// ```compile_fail
    /// # use layout_bench::poly::Collection;
    /// trait Shape {}
    /// struct Square;
    /// impl Shape for Square {}
    /// // no `poly_variants!(dyn Shape => Square)`
    /// let mut shapes: Collection<dyn Shape> = Collection::new();
    /// shapes.insert(Square);
    /// ```
    pub fn insert<T: Variant<B>>(&mut self, value: T) {
        self.segment_mut::<T>().insert(value);
    }

    /// Calls `f` on every stored value and hands `f` back.
    ///
    /// Layout is resolved once per segment; visiting an element is a pointer
    /// bump plus the call to `f`.
    ///
    /// Values are only reachable through shared references here:
    ///
    /// ```compile_fail
    /// # use layout_bench::poly::Collection;
    /// # use layout_bench::poly_variants;
    /// trait Bump { fn bump(&mut self); }
    /// struct Cell(u32);
    /// impl Bump for Cell { fn bump(&mut self) { self.0 += 1; } }
    /// poly_variants!(dyn Bump => Cell);
    ///
    /// let mut cells: Collection<dyn Bump> = Collection::new();
    /// cells.insert(Cell(0));
    /// cells.for_each(|c| c.bump());
    /// ```
    pub fn for_each<F>(&self, mut f: F) -> F
    where
        F: FnMut(&B),
    {
        for segment in &self.segments {
            segment.view().for_each(&mut f);
        }
        f
    }

    /// Like [`for_each`](Self::for_each), with mutable access to each value.
    pub fn for_each_mut<F>(&mut self, mut f: F) -> F
    where
        F: FnMut(&mut B),
    {
        for segment in &mut self.segments {
            segment.view_mut().for_each(&mut f);
        }
        f
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = SegmentInfo> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| SegmentInfo {
                key: SegmentKey(index),
                type_name: segment.type_name(),
                len: segment.len(),
                stride: segment.stride(),
            })
    }

    fn segment_mut<T: Variant<B>>(&mut self) -> &mut Segment<T, B> {
        let segments = &mut self.segments;
        let key = *self.keys.entry(TypeId::of::<T>()).or_insert_with(|| {
            let key = SegmentKey(segments.len());
            debug!(
                key = key.0,
                type_name = any::type_name::<T>(),
                "registering segment"
            );
            segments.push(Box::new(Segment::<T, B>::new()));
            key
        });

        match self.segments[key.0]
            .as_any_mut()
            .downcast_mut::<Segment<T, B>>()
        {
            Some(segment) => segment,
            None => unreachable!(
                "segment {} does not hold {}",
                key.0,
                any::type_name::<T>()
            ),
        }
    }
}

impl<B: ?Sized + 'static> Default for Collection<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized + 'static> fmt::Debug for Collection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments()).finish()
    }
}
