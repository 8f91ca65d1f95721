//! Jenks natural breaks classification partitions numeric data into a fixed number
//! of contiguous classes with the least total within-class variance. The method was
//! published by [George Jenks](https://en.wikipedia.org/wiki/Jenks_natural_breaks_optimization)
//! (1977) for choropleth maps, building on Fisher's (1958)
//! [dynamic programming](https://en.wikipedia.org/wiki/Dynamic_programming) solution to
//! optimal grouping on a single dimension.
//!
//! The result is a list of class boundaries (the minimum, the last value of every
//! class except the final one, and the maximum), which is what a map legend needs.

use num_traits::cast::FromPrimitive;
use num_traits::{Bounded, Float};
use num_traits::{Num, NumCast};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Debug;

#[cfg(not(target_arch = "wasm32"))]
mod ffi;
#[cfg(not(target_arch = "wasm32"))]
pub use crate::ffi::{ExternalArray, drop_jenks_result, jenks_ffi};

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use crate::wasm::{jenks_classes_wasm, jenks_wasm};

mod breaks;
mod errors;
mod matrices;
pub use crate::errors::JenksErr;

use crate::breaks::{extract_breaks, extract_classes};
use crate::matrices::Matrices;

/// A trait that encompasses most common numeric types (integer **and** floating point)
pub trait JenksNum: Num + Copy + NumCast + PartialOrd + FromPrimitive + Bounded + Debug {}
impl<T: Num + Copy + NumCast + PartialOrd + FromPrimitive + Bounded + Debug> JenksNum for T {}

/// return a sorted **copy** of the input. NaN compares equal to everything
fn numeric_sort<T: JenksNum>(arr: &[T]) -> Vec<T> {
    let mut xs = arr.to_vec();
    xs.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    xs
}

/// Assumes sorted input
fn unique_count_sorted<T: JenksNum>(input: &[T]) -> usize {
    if input.is_empty() {
        0
    } else {
        1 + input.windows(2).filter(|win| win[0] != win[1]).count()
    }
}

/// The matrices never hold anything larger than `(n · (max - min))²`, so if that
/// fits in `T`, building them can't overflow. Assumes sorted input
fn check_range<T: JenksNum>(sorted: &[T]) -> Result<(), JenksErr> {
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Ok(());
    };
    let range = last.to_f64().ok_or(JenksErr::ConversionError)?
        - first.to_f64().ok_or(JenksErr::ConversionError)?;
    let bound = (sorted.len() as f64 * range).powi(2);
    let max = T::max_value().to_f64().ok_or(JenksErr::ConversionError)?;
    if bound > max {
        return Err(JenksErr::RangeOverflowError);
    }
    Ok(())
}

/// Validate the request and hand back sorted data along with the class count.
/// Sorted input is borrowed as-is; anything else is sorted into a copy.
fn prepare<T: JenksNum>(
    data: &[T],
    nclasses: u8,
    is_sorted: bool,
) -> Result<(Cow<'_, [T]>, usize), JenksErr> {
    if data.is_empty() {
        return Err(JenksErr::EmptyInputError);
    }
    if nclasses == 0 {
        return Err(JenksErr::TooFewClassesError);
    }
    let nclasses = usize::try_from(nclasses)?;
    if nclasses > data.len() {
        return Err(JenksErr::TooManyClassesError);
    }
    let sorted: Cow<'_, [T]> = if is_sorted {
        Cow::Borrowed(data)
    } else {
        Cow::Owned(numeric_sort(data))
    };
    // with fewer distinct values than classes, the backtrace runs off the front of the data
    if unique_count_sorted(&sorted) < nclasses {
        return Err(JenksErr::TooFewDistinctValuesError);
    }
    check_range(&sorted)?;
    Ok((sorted, nclasses))
}

/// Classify `data` into `nclasses` contiguous classes, minimising the sum of
/// squared deviations from each class mean, and return the `nclasses + 1` class
/// boundaries: `[min, break_1, …, break_(k-1), max]`. Each break is the largest
/// value of its class, taken from the input.
///
/// If `is_sorted` is `false` a sorted copy of `data` is classified; the input is
/// never modified. If it's `true` the ordering is trusted without being checked.
///
/// The matrices behind the classification take O(n² · k) time and O(n · k) space,
/// and are discarded once the boundaries have been read from them.
///
/// # Errors
/// An empty input, zero classes, more classes than values, or more classes than
/// distinct values are rejected before any work is done. So is data whose
/// `(n · (max - min))²` doesn't fit in `T`: for `i32` that means `n · (max - min)`
/// may be at most 46,340. Use a wider type for wider data.
///
/// # References
/// 1. Jenks, G. F. (1977). Optimal Data Classification for Choropleth Maps. Occasional paper No. 2, Department of Geography, University of Kansas.
/// 2. <https://macwright.com/2013/02/18/literate-jenks>
///
/// # Example
///
/// ```
/// use jenks::natural_breaks;
///
/// let input = vec![1.0f64, 2.0, 3.0, 101.0, 102.0, 103.0, 501.0, 502.0, 503.0];
/// let result = natural_breaks(&input, 3, true).unwrap();
/// assert_eq!(result, vec![1.0, 3.0, 103.0, 503.0]);
/// ```
pub fn natural_breaks<T: JenksNum>(
    data: &[T],
    nclasses: u8,
    is_sorted: bool,
) -> Result<Vec<T>, JenksErr> {
    let (sorted, nclasses) = prepare(data, nclasses, is_sorted)?;
    let matrices = Matrices::generate(&sorted, nclasses).ok_or(JenksErr::ConversionError)?;
    extract_breaks(&sorted, &matrices.lower_class_limits, nclasses)
}

/// Classify `data` exactly as [`natural_breaks`] does, returning the members of
/// each class rather than its boundaries.
///
/// # Example
///
/// ```
/// use jenks::natural_break_classes;
///
/// let input = vec![400, 1, 466, 2, 432, 3];
/// let result = natural_break_classes(&input, 2, false).unwrap();
/// assert_eq!(result, vec![vec![1, 2, 3], vec![400, 432, 466]]);
/// ```
pub fn natural_break_classes<T: JenksNum>(
    data: &[T],
    nclasses: u8,
    is_sorted: bool,
) -> Result<Vec<Vec<T>>, JenksErr> {
    let (sorted, nclasses) = prepare(data, nclasses, is_sorted)?;
    let matrices = Matrices::generate(&sorted, nclasses).ok_or(JenksErr::ConversionError)?;
    extract_classes(&sorted, &matrices.lower_class_limits, nclasses)
}

/// Boundaries for every class count from 1 to `max_classes`: entry `i` holds the
/// result of [`natural_breaks`] with `i + 1` classes. The matrices are built once,
/// since a table built for `k` classes also holds every smaller classification.
///
/// # Example
///
/// ```
/// use jenks::natural_breaks_upto;
///
/// let input = vec![1.0f64, 2.0, 3.0, 101.0, 102.0, 103.0, 501.0, 502.0, 503.0];
/// let result = natural_breaks_upto(&input, 3, true).unwrap();
/// assert_eq!(result[0], vec![1.0, 503.0]);
/// assert_eq!(result[1], vec![1.0, 103.0, 503.0]);
/// assert_eq!(result[2], vec![1.0, 3.0, 103.0, 503.0]);
/// ```
pub fn natural_breaks_upto<T: JenksNum>(
    data: &[T],
    max_classes: u8,
    is_sorted: bool,
) -> Result<Vec<Vec<T>>, JenksErr> {
    let (sorted, max_classes) = prepare(data, max_classes, is_sorted)?;
    let matrices = Matrices::generate(&sorted, max_classes).ok_or(JenksErr::ConversionError)?;
    (1..=max_classes)
        .map(|nclasses| extract_breaks(&sorted, &matrices.lower_class_limits, nclasses))
        .collect()
}

/// The boundaries returned by [natural_breaks] are values from the data, which
/// can’t always be used for labelling, since they might have many decimal places.
/// To create a legend, the values should be rounded, but the rounding might be
/// either too loose (and would result in spurious decimal places), or too strict,
/// resulting in classes ranging “from x to x”. A better approach is to choose the
/// roundest number that separates the highest point of a class from the lowest point
/// in the _following_ class, giving just enough precision to distinguish the classes.
///
/// # References
/// <https://observablehq.com/@visionscarto/natural-breaks#round>
pub fn roundbreaks<T: Float + Bounded + Debug + FromPrimitive>(
    data: &[T],
    nclasses: u8,
) -> Result<Vec<T>, JenksErr> {
    let classes = natural_break_classes(data, nclasses, false)?;
    let two = T::from(2.0).ok_or(JenksErr::ConversionError)?;
    let ten = T::from(10.0).ok_or(JenksErr::ConversionError)?;
    classes
        .windows(2)
        .map(|pair| {
            let low = *pair[0].last().ok_or(JenksErr::LowWindowError)?;
            let high = *pair[1].first().ok_or(JenksErr::HighWindowError)?;
            let p = ten.powf((T::one() - (high - low).log10()).floor());
            Ok((((high + low) / two) * p).floor() / p)
        })
        .collect::<Result<Vec<T>, _>>()
}


#[cfg(test)]
mod proptests {
    use super::{natural_break_classes, natural_breaks, numeric_sort, unique_count_sorted};
    use proptest::prelude::*;

    fn sum_of_squares(class: &[f64]) -> f64 {
        let mean = class.iter().sum::<f64>() / class.len() as f64;
        class.iter().map(|x| (x - mean) * (x - mean)).sum()
    }

    /// Smallest total within-class sum of squares over every way of cutting
    /// `data` into `nclasses` contiguous runs.
    fn brute_force(data: &[f64], nclasses: usize) -> f64 {
        let gaps = data.len() - 1;
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << gaps) {
            if mask.count_ones() as usize != nclasses - 1 {
                continue;
            }
            let mut start = 0;
            let mut total = 0.0;
            for gap in 0..gaps {
                if mask & (1 << gap) != 0 {
                    total += sum_of_squares(&data[start..=gap]);
                    start = gap + 1;
                }
            }
            total += sum_of_squares(&data[start..]);
            best = best.min(total);
        }
        best
    }

    fn distinct(values: &[i32]) -> usize {
        unique_count_sorted(&numeric_sort(values))
    }

    proptest! {
        #[test]
        fn prop_bounds_are_min_and_max(
            values in prop::collection::vec(-1000i32..1000, 1..40),
            k in 1u8..8,
        ) {
            let k = k.min(u8::try_from(distinct(&values)).unwrap_or(u8::MAX));
            let data: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            let breaks = natural_breaks(&data, k, false).unwrap();
            let min = data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(breaks.len(), usize::from(k) + 1);
            prop_assert_eq!(breaks[0], min);
            prop_assert_eq!(breaks[usize::from(k)], max);
        }

        #[test]
        fn prop_breaks_are_non_decreasing(
            values in prop::collection::vec(-1000i32..1000, 1..40),
            k in 1u8..8,
        ) {
            let k = k.min(u8::try_from(distinct(&values)).unwrap_or(u8::MAX));
            let values: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
            let breaks = natural_breaks(&values, k, false).unwrap();
            prop_assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_resorting_is_idempotent(
            values in prop::collection::vec(-1000i32..1000, 1..40),
            k in 1u8..8,
        ) {
            let k = k.min(u8::try_from(distinct(&values)).unwrap_or(u8::MAX));
            let data: Vec<f64> = values.iter().map(|&v| f64::from(v) / 8.0).collect();
            let sorted = numeric_sort(&data);
            prop_assert_eq!(
                natural_breaks(&data, k, false).unwrap(),
                natural_breaks(&sorted, k, true).unwrap()
            );
        }

        #[test]
        fn prop_deterministic(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40),
            k in 1u8..8,
        ) {
            let sorted = numeric_sort(&values);
            let k = k.min(u8::try_from(unique_count_sorted(&sorted)).unwrap_or(u8::MAX));
            let a = natural_breaks(&values, k, false).unwrap();
            let b = natural_breaks(&values, k, false).unwrap();
            let a: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
            let b: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_classes_partition_input(
            values in prop::collection::vec(-1000i32..1000, 1..40),
            k in 1u8..8,
        ) {
            let k = k.min(u8::try_from(distinct(&values)).unwrap_or(u8::MAX));
            let values: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
            let classes = natural_break_classes(&values, k, false).unwrap();
            let breaks = natural_breaks(&values, k, false).unwrap();
            prop_assert_eq!(classes.len(), usize::from(k));
            prop_assert!(classes.iter().all(|class| !class.is_empty()));
            let flat: Vec<i64> = classes.iter().flatten().copied().collect();
            prop_assert_eq!(flat, numeric_sort(&values));
            for (idx, class) in classes.iter().enumerate().take(classes.len() - 1) {
                prop_assert_eq!(class.last().copied(), Some(breaks[idx + 1]));
            }
        }

        #[test]
        fn prop_offset_keeps_optimum(
            values in prop::collection::btree_set(0u16..1000, 1..9),
            seed in 0usize..8,
            offset in 1u32..1_000_000,
        ) {
            let offset = f64::from(offset) * 1e6;
            let data: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            let shifted: Vec<f64> = data.iter().map(|v| v + offset).collect();
            let k = seed % data.len() + 1;
            let classes = natural_break_classes(&shifted, u8::try_from(k).unwrap(), true).unwrap();
            // offset + v is exact, so removing the offset recovers the original values
            let ours: f64 = classes
                .iter()
                .map(|c| {
                    let unshifted: Vec<f64> = c.iter().map(|v| v - offset).collect();
                    sum_of_squares(&unshifted)
                })
                .sum();
            let best = brute_force(&data, k);
            prop_assert!((ours - best).abs() <= 1e-6 * (1.0 + best));
        }

        #[test]
        fn prop_matches_brute_force(
            values in prop::collection::btree_set(0u16..1000, 1..9),
            seed in 0usize..8,
        ) {
            let data: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            let k = seed % data.len() + 1;
            let classes = natural_break_classes(&data, u8::try_from(k).unwrap(), true).unwrap();
            let ours: f64 = classes.iter().map(|c| sum_of_squares(c)).sum();
            let best = brute_force(&data, k);
            prop_assert!((ours - best).abs() <= 1e-6 * (1.0 + best));
        }
    }
}
