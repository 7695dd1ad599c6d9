//! Normalization and percentile cutoff

use super::{Frequency, Histogram, HistogramError, HistogramResult};
use std::cmp::Ordering;

/// Divide every value by the total. A zero total yields zeros.
pub fn normalize<V: Frequency>(histogram: &Histogram<V>) -> Histogram<f64> {
    let total = histogram.total();
    histogram
        .iter()
        .map(|(term, value)| {
            let share = if total > 0.0 { value.to_f64() / total } else { 0.0 };
            (term.clone(), share)
        })
        .collect()
}

/// The `p`-th percentile of `values`, linearly interpolated between the two
/// closest ranks. `None` for an empty input.
pub fn percentile(values: &[f64], p: f64) -> HistogramResult<Option<f64>> {
    check_percentile(p)?;
    if values.is_empty() {
        return Ok(None);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;
    Ok(Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction))
}

/// Keep entries whose value is at least the `p`-th percentile of all values.
/// Entries equal to the cutoff are kept.
pub fn percentile_filter<V: Frequency>(histogram: &Histogram<V>, p: f64) -> HistogramResult<Histogram<V>> {
    let values: Vec<f64> = histogram.values().map(Frequency::to_f64).collect();
    let Some(cutoff) = percentile(&values, p)? else {
        return Ok(Histogram::new());
    };

    let mut kept = histogram.clone();
    kept.retain(|_, value| value.to_f64() >= cutoff);
    tracing::debug!(
        percentile = p,
        cutoff,
        before = histogram.len(),
        after = kept.len(),
        "applied percentile cutoff"
    );
    Ok(kept)
}

fn check_percentile(p: f64) -> HistogramResult<()> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(HistogramError::InvalidPercentile(p))
    }
}
