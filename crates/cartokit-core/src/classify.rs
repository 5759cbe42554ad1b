// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Threshold derivation for quantitative fills.
//!
//! Every function here returns exactly `count - 1` ascending thresholds, for
//! any input, so callers never have to repair the length invariant.

use cartokit_ir::ClassificationMethod;

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// `(min, max)` of the finite values, if any.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Thresholds splitting `values` into `count` classes.
///
/// `Manual` has no rule of its own; it derives equal intervals, which callers
/// use when a manual classification has to grow or shrink.
pub fn derive_thresholds(values: &[f64], method: ClassificationMethod, count: usize) -> Vec<f64> {
    let breaks = count.saturating_sub(1);
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return vec![0.0; breaks];
    }
    match method {
        ClassificationMethod::EqualInterval | ClassificationMethod::Manual => {
            equal_interval(&sorted, count)
        }
        ClassificationMethod::Quantile => quantile(&sorted, count),
        ClassificationMethod::Jenks => jenks(&sorted, count),
    }
}

fn equal_interval(sorted: &[f64], count: usize) -> Vec<f64> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let step = (max - min) / count as f64;
    (1..count).map(|i| min + step * i as f64).collect()
}

/// R-7 quantile, the estimator most charting libraries use.
fn quantile_at(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

fn quantile(sorted: &[f64], count: usize) -> Vec<f64> {
    (1..count)
        .map(|i| quantile_at(sorted, i as f64 / count as f64))
        .collect()
}

/// Optimal 1D k-means (Ckmeans) with divide-and-conquer row filling.
///
/// Thresholds are the smallest member of every cluster but the first. With
/// fewer distinct values than classes the tail is padded with the maximum.
fn jenks(sorted: &[f64], count: usize) -> Vec<f64> {
    let breaks = count.saturating_sub(1);
    let mut distinct = sorted.to_vec();
    distinct.dedup();
    let k = count.min(distinct.len()).max(1);
    let n = sorted.len();

    let mut sum = vec![0.0; n + 1];
    let mut sum_sq = vec![0.0; n + 1];
    for (i, v) in sorted.iter().enumerate() {
        sum[i + 1] = sum[i] + v;
        sum_sq[i + 1] = sum_sq[i] + v * v;
    }
    // Within-cluster sum of squares of sorted[a..=b].
    let ssq = |a: usize, b: usize| {
        let len = (b - a + 1) as f64;
        let s = sum[b + 1] - sum[a];
        (sum_sq[b + 1] - sum_sq[a] - s * s / len).max(0.0)
    };

    let mut cost = vec![vec![f64::INFINITY; n]; k];
    let mut split = vec![vec![0usize; n]; k];
    for j in 0..n {
        cost[0][j] = ssq(0, j);
    }
    for row in 1..k {
        fill_row(row, row, n - 1, row, n - 1, &mut cost, &mut split, &ssq);
    }

    let mut starts = Vec::with_capacity(k);
    let mut j = n - 1;
    for row in (1..k).rev() {
        let m = split[row][j];
        starts.push(sorted[m]);
        j = m - 1;
    }
    starts.reverse();

    let max = sorted[n - 1];
    starts.resize(breaks, max);
    starts.truncate(breaks);
    starts
}

#[allow(clippy::too_many_arguments)]
fn fill_row(
    row: usize,
    j_lo: usize,
    j_hi: usize,
    m_lo: usize,
    m_hi: usize,
    cost: &mut [Vec<f64>],
    split: &mut [Vec<usize>],
    ssq: &dyn Fn(usize, usize) -> f64,
) {
    if j_lo > j_hi {
        return;
    }
    let j = (j_lo + j_hi) / 2;
    let lo = m_lo.max(row);
    let hi = m_hi.min(j);
    let mut best = (f64::INFINITY, lo);
    for m in lo..=hi {
        let candidate = cost[row - 1][m - 1] + ssq(m, j);
        if candidate < best.0 {
            best = (candidate, m);
        }
    }
    cost[row][j] = best.0;
    split[row][j] = best.1;
    if j > j_lo {
        fill_row(row, j_lo, j - 1, m_lo, best.1, cost, split, ssq);
    }
    fill_row(row, j + 1, j_hi, best.1, m_hi, cost, split, ssq);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equal_interval_splits_range_evenly() {
        let t = derive_thresholds(&[0.0, 10.0, 5.0], ClassificationMethod::EqualInterval, 5);
        assert_eq!(t, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn quantile_interpolates() {
        let t = derive_thresholds(&[1.0, 2.0, 3.0, 4.0, 5.0], ClassificationMethod::Quantile, 2);
        assert_eq!(t, vec![3.0]);
    }

    #[test]
    fn jenks_finds_natural_gaps() {
        let values = [1.0, 1.1, 1.2, 10.0, 10.5, 11.0, 50.0, 51.0];
        let t = derive_thresholds(&values, ClassificationMethod::Jenks, 3);
        assert_eq!(t, vec![10.0, 50.0]);
    }

    #[test]
    fn jenks_pads_when_values_are_few() {
        let t = derive_thresholds(&[3.0, 3.0, 7.0], ClassificationMethod::Jenks, 5);
        assert_eq!(t, vec![7.0, 7.0, 7.0, 7.0]);
    }

    #[test]
    fn empty_input_still_has_count_minus_one_thresholds() {
        let t = derive_thresholds(&[], ClassificationMethod::Quantile, 4);
        assert_eq!(t.len(), 3);
    }

    proptest! {
        #[test]
        fn thresholds_have_count_minus_one_entries(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 0..60),
            count in 2usize..=9,
            method in prop_oneof![
                Just(ClassificationMethod::EqualInterval),
                Just(ClassificationMethod::Quantile),
                Just(ClassificationMethod::Jenks),
                Just(ClassificationMethod::Manual),
            ],
        ) {
            let t = derive_thresholds(&values, method, count);
            prop_assert_eq!(t.len(), count - 1);
            prop_assert!(t.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
