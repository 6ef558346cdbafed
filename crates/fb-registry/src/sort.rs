//! The weight sorter.

use std::cmp::Reverse;

/// Stable sort of `(weight, item)` pairs, highest weight first.
///
/// Equal weights keep their relative input order.  `slice::sort_by_key` is a
/// stable merge sort, which is what makes ties deterministic within a single
/// call; an unstable sort would be free to swap them.
#[inline]
pub fn sort_by_weight_desc<T>(items: &mut [(i64, T)]) {
    items.sort_by_key(|&(weight, _)| Reverse(weight));
}
