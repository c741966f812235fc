use std::any::{self, Any};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;

use super::Variant;

// ============================================================================
// Stride views
// ============================================================================

/// Shared walk over one segment: the first element seen as `B`, the byte
/// stride between elements and the number of elements left.
///
/// The pointer metadata (the vtable for `dyn` interfaces) is fixed when the
/// view is created; advancing only adds `stride` bytes to the address.
pub struct SegmentView<'a, B: ?Sized> {
    cursor: *const B,
    stride: usize,
    remaining: usize,
    _marker: PhantomData<&'a B>,
}

impl<'a, B: ?Sized> SegmentView<'a, B> {
    /// # Safety
    ///
    /// `first` must point at the first of `len` initialised elements spaced
    /// `stride` bytes apart, each viewable as `B` with the metadata carried by
    /// `first`, and all of them must stay borrowed for `'a`.
    pub(super) unsafe fn new(first: *const B, stride: usize, len: usize) -> Self {
        SegmentView {
            cursor: first,
            stride,
            remaining: len,
            _marker: PhantomData,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<'a, B: ?Sized> Iterator for SegmentView<'a, B> {
    type Item = &'a B;

    #[inline]
    fn next(&mut self) -> Option<&'a B> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.cursor;
        self.remaining -= 1;
        self.cursor = current.wrapping_byte_add(self.stride);
        // SAFETY: `remaining` was non-zero, so `current` addresses a live
        // element inside the segment borrowed for 'a.
        Some(unsafe { &*current })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B: ?Sized> ExactSizeIterator for SegmentView<'_, B> {}
impl<B: ?Sized> FusedIterator for SegmentView<'_, B> {}

/// Exclusive counterpart of [`SegmentView`], yielding `&mut B`.
pub struct SegmentViewMut<'a, B: ?Sized> {
    cursor: *mut B,
    stride: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut B>,
}

impl<'a, B: ?Sized> SegmentViewMut<'a, B> {
    /// # Safety
    ///
    /// Same as [`SegmentView::new`], and the elements must be exclusively
    /// borrowed for `'a`.
    pub(super) unsafe fn new(first: *mut B, stride: usize, len: usize) -> Self {
        SegmentViewMut {
            cursor: first,
            stride,
            remaining: len,
            _marker: PhantomData,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<'a, B: ?Sized> Iterator for SegmentViewMut<'a, B> {
    type Item = &'a mut B;

    #[inline]
    fn next(&mut self) -> Option<&'a mut B> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.cursor;
        self.remaining -= 1;
        self.cursor = current.wrapping_byte_add(self.stride);
        // SAFETY: each element is handed out at most once, so the returned
        // references never overlap.
        Some(unsafe { &mut *current })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B: ?Sized> ExactSizeIterator for SegmentViewMut<'_, B> {}
impl<B: ?Sized> FusedIterator for SegmentViewMut<'_, B> {}

// ============================================================================
// Segments
// ============================================================================

/// Type-erased side of a segment, as seen by the collection.
///
/// Every method here is called at most once per segment during a traversal;
/// the per-element work happens in the returned view.
pub trait SegmentBase<B: ?Sized> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size in bytes of one stored element.
    fn stride(&self) -> usize;

    fn type_name(&self) -> &'static str;

    /// Any view is invalidated by the next insert into the same segment; the
    /// borrow checker enforces this through the `&self` borrow.
    fn view(&self) -> SegmentView<'_, B>;

    fn view_mut(&mut self) -> SegmentViewMut<'_, B>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Contiguous storage for every value of one concrete type `T`.
pub struct Segment<T, B: ?Sized> {
    store: Vec<T>,
    _base: PhantomData<fn() -> *const B>,
}

impl<T: Variant<B>, B: ?Sized + 'static> Segment<T, B> {
    pub fn new() -> Self {
        Segment {
            store: Vec::new(),
            _base: PhantomData,
        }
    }

    /// Appends `value`. Growth is geometric, so this is amortised O(1).
    pub fn insert(&mut self, value: T) {
        self.store.push(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.store
    }
}

impl<T: Variant<B>, B: ?Sized + 'static> Default for Segment<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Variant<B>, B: ?Sized + 'static> SegmentBase<B> for Segment<T, B> {
    fn len(&self) -> usize {
        self.store.len()
    }

    fn stride(&self) -> usize {
        mem::size_of::<T>()
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn view(&self) -> SegmentView<'_, B> {
        let first = self.store.as_ptr();
        let base = T::upcast(first);
        debug_assert_eq!(base.cast::<u8>(), first.cast::<u8>());
        // SAFETY: `base` is the `Variant` cast of the vector's data pointer,
        // so it shares its address and provenance over all `len` elements.
        unsafe { SegmentView::new(base, mem::size_of::<T>(), self.store.len()) }
    }

    fn view_mut(&mut self) -> SegmentViewMut<'_, B> {
        let len = self.store.len();
        let first = self.store.as_mut_ptr();
        let base = T::upcast_mut(first);
        debug_assert_eq!(base.cast::<u8>(), first.cast::<u8>());
        // SAFETY: as in `view`, with the store exclusively borrowed.
        unsafe { SegmentViewMut::new(base, mem::size_of::<T>(), len) }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T, B: ?Sized> fmt::Debug for Segment<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("type", &any::type_name::<T>())
            .field("len", &self.store.len())
            .finish()
    }
}
