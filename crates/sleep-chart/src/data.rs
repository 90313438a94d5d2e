//! Chart data preparation.
//!
//! Pure functions that turn column values into what a chart draws: bins,
//! frequency counts, box statistics, group proportions. Nothing here knows
//! about SVG.

use std::collections::BTreeMap;

use sleep_analysis::quantile;

use crate::scale::extent;

/// Bin count of every histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Age bins as `[lower, upper)` with their display labels.
pub const AGE_GROUPS: [(f64, f64, &str); 4] = [
    (27.0, 35.0, "27-34"),
    (35.0, 43.0, "35-42"),
    (43.0, 51.0, "43-50"),
    (51.0, 60.0, "51-59"),
];

/// Equal-width bins over the range of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Values per bin.
    pub counts: Vec<usize>,
}

/// Bin `values` into `bins` equal-width bins spanning their min and max.
///
/// The last bin includes the maximum. Non-finite values are ignored. A
/// single distinct value is centred in a unit-wide range, and no values at
/// all give empty bins over `[0, 1]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (lo, hi) = match extent(finite.iter().copied()) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for value in finite {
        let idx = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Histogram { edges, counts }
}

/// Frequency of each distinct value, most frequent first.
///
/// Ties keep first-seen order. Nulls are not counted.
pub fn value_counts(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        let count = counts.entry(value.as_str()).or_insert(0);
        if *count == 0 {
            order.push(value.clone());
        }
        *count += 1;
    }
    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| {
            let count = counts.get(value.as_str()).copied().unwrap_or(0);
            (value, count)
        })
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Five-number summary with 1.5 IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

/// Box plot statistics, or `None` without any finite value.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
    let whisker_low = inside.clone().next().unwrap_or(q1);
    let whisker_high = inside.last().unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(low_fence..=high_fence).contains(v))
        .collect();

    Some(BoxStats {
        whisker_low,
        q1,
        median,
        q3,
        whisker_high,
        outliers,
    })
}

/// Label of the age bin containing `age`, if any.
pub fn age_group(age: f64) -> Option<&'static str> {
    AGE_GROUPS
        .iter()
        .find(|(lower, upper, _)| age >= *lower && age < *upper)
        .map(|(_, _, label)| *label)
}

/// Share of each category within each group.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionTable {
    /// Group labels, sorted.
    pub groups: Vec<String>,
    /// Category labels, sorted.
    pub categories: Vec<String>,
    /// `shares[g][c]`: fraction of group `g` falling in category `c`.
    pub shares: Vec<Vec<f64>>,
}


/// Cross-tabulate `(group, category)` pairs, normalizing each group to 1.
pub fn proportions(pairs: &[(String, String)]) -> ProportionTable {
    let mut counts: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    let mut categories: Vec<String> = pairs.iter().map(|(_, category)| category.clone()).collect();
    categories.sort();
    categories.dedup();

    for (group, category) in pairs {
        *counts
            .entry(group.as_str())
            .or_default()
            .entry(category.as_str())
            .or_insert(0) += 1;
    }

    let mut groups = Vec::with_capacity(counts.len());
    let mut shares = Vec::with_capacity(counts.len());
    for (group, per_category) in &counts {
        let total: usize = per_category.values().sum();
        groups.push((*group).to_string());
        shares.push(
            categories
                .iter()
                .map(|category| {
                    let count = per_category.get(category.as_str()).copied().unwrap_or(0);
                    count as f64 / total as f64
                })
                .collect(),
        );
    }

    ProportionTable {
        groups,
        categories,
        shares,
    }
}
