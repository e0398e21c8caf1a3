//! Numeric bounds for edge capacities and flow totals.

use core::fmt::Debug;
use num_traits::{Num, Signed};

/// A scalar usable as an edge capacity, terminal capacity or flow total.
///
/// Terminal residuals fold both terminal arcs into one signed value, so the
/// type must be signed. Integer types give exact results; floating-point types
/// accumulate rounding error across augmentations.
pub trait Capacity: Num + Signed + Copy + PartialOrd + Debug {}

impl<T> Capacity for T where T: Num + Signed + Copy + PartialOrd + Debug {}

/// Whether `c` leaves room to push flow.
///
/// Compares against zero instead of using `Signed::is_positive`, which holds
/// for `+0.0`.
#[inline(always)]
pub(crate) fn has_residual<C: Capacity>(c: C) -> bool {
    c > C::zero()
}

/// Whether two weights can be ordered against each other (neither is NaN).
#[inline(always)]
pub(crate) fn comparable<C: PartialOrd>(a: C, b: C) -> bool {
    a.partial_cmp(&a).is_some() && b.partial_cmp(&b).is_some()
}

/// Returns the smaller of two partially ordered values, preferring `a` on ties
/// and on unordered comparisons.
#[inline(always)]
pub(crate) fn min_of<C: PartialOrd>(a: C, b: C) -> C {
    if b < a {
        b
    } else {
        a
    }
}
