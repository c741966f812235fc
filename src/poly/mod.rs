//! Segmented polymorphic collection.
//!
//! A [`Collection<B>`] stores values of many concrete types that all expose the
//! interface `B` (usually a `dyn Trait`). Values of one concrete type live
//! together in a single contiguous [`Segment`], so traversal resolves layout
//! once per segment and then walks memory with a fixed stride. Only the
//! callback's own trait method calls dispatch dynamically.
//!
//! ```
//! use layout_bench::poly::Collection;
//! use layout_bench::poly_variants;
//!
//! trait Shape {
//!     fn area(&self) -> f64;
//! }
//!
//! struct Square(f64);
//! struct Circle(f64);
//!
//! impl Shape for Square {
//!     fn area(&self) -> f64 { self.0 * self.0 }
//! }
//!
//! impl Shape for Circle {
//!     fn area(&self) -> f64 { std::f64::consts::PI * self.0 * self.0 }
//! }
//!
//! poly_variants!(dyn Shape => Square, Circle);
//!
//! let mut shapes: Collection<dyn Shape> = Collection::new();
//! shapes.insert(Square(2.0));
//! shapes.insert(Circle(1.0));
//! shapes.insert(Square(3.0));
//!
//! let mut total = 0.0;
//! shapes.for_each(|shape| total += shape.area());
//! assert!((total - (13.0 + std::f64::consts::PI)).abs() < 1e-9);
//! assert_eq!(shapes.segment_count(), 2);
//! ```

mod collection;
mod segment;

pub use collection::{Collection, SegmentInfo, SegmentKey};
pub use segment::{Segment, SegmentBase, SegmentView, SegmentViewMut};

/// A concrete type that can be stored in a [`Collection<B>`] and viewed as `B`.
///
/// # Safety
///
/// `upcast` and `upcast_mut` must be plain unsizing casts: the returned pointer
/// has the same address and provenance as the argument and points at the same
/// object. Segments rely on this to reach element `i` by offsetting the first
/// element's pointer by `i * size_of::<Self>()` bytes.
///
/// Implement it with [`poly_variants!`](crate::poly_variants) rather than by hand.
pub unsafe trait Variant<B: ?Sized>: Sized + 'static {
    fn upcast(ptr: *const Self) -> *const B;
    fn upcast_mut(ptr: *mut Self) -> *mut B;
}

/// Implements [`Variant`] for each listed type against the given interface.
///
/// ```
/// # use layout_bench::poly_variants;
/// trait Named { fn name(&self) -> &str; }
/// struct A;
/// impl Named for A { fn name(&self) -> &str { "a" } }
///
/// poly_variants!(dyn Named => A);
/// ```
///
/// The generated bodies are implicit coercions, so only a real unsizing
/// target type-checks. Registering one sized type as a view of another is
/// rejected:
///
/// ```compile_fail
/// # use layout_bench::poly_variants;
/// struct Big(u64);
/// struct Small(u8);
///
/// poly_variants!(Big => Small);
/// ```
///
/// So is a trait the type does not implement:
///
/// ```compile_fail
/// # use layout_bench::poly_variants;
/// trait Named { fn name(&self) -> &str; }
/// struct Anonymous;
///
/// poly_variants!(dyn Named => Anonymous);
/// ```
#[macro_export]
macro_rules! poly_variants {
    ($base:ty => $($variant:ty),+ $(,)?) => {
        $(
            // SAFETY: the only conversions accepted here are unsizing
            // coercions (or identity), which keep address and provenance.
            unsafe impl $crate::poly::Variant<$base> for $variant {
                #[inline]
                fn upcast(ptr: *const Self) -> *const $base {
                    ptr
                }

                #[inline]
                fn upcast_mut(ptr: *mut Self) -> *mut $base {
                    ptr
                }
            }
        )+
    };
}
