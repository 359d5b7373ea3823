//! Rank transforms shared by the nonparametric tests and Spearman
//! correlation. Ties receive the mean of the ranks they span.

use std::cmp::Ordering;

/// Average ranks of a sample, 1-based.
///
/// Equal values share the mean of the rank positions they occupy, the
/// convention every tie-corrected test here assumes.
///
/// # Examples
///
/// ```
/// use galton_stats::rank::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 20.0, 30.0]), vec![1.0, 2.0, 3.0]);
/// assert_eq!(average_ranks(&[1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.5, 2.5, 4.0]);
/// ```
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j hold the same value; they share rank (i+j)/2 + 1
        let shared = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = shared;
        }
        i = j + 1;
    }
    ranks
}

/// Sum of `t^3 - t` over tie groups of size `t`.
///
/// This is the correction term shared by Kruskal-Wallis and the
/// Mann-Whitney normal approximation; it is zero when no ties exist.
pub fn tie_term(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut total = 0.0;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        let t = (j - i + 1) as f64;
        total += t * t * t - t;
        i = j + 1;
    }
    total
}
