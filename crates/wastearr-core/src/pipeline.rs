use std::collections::HashMap;

use crate::model::{Item, Rating};

/// Filters and truncation applied to a scored item set. All thresholds are
/// inclusive.
#[derive(Debug, Default, Clone)]
pub struct SelectionOptions {
    pub min_waste_score: Option<i32>,
    pub min_size_bytes: Option<u64>,
    pub max_rating: Option<f64>,
    pub top: Option<usize>,
}

/// Report-time aggregate over the selected items.
#[derive(Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total_size_bytes: u64,
    pub avg_waste_score: i32,
    /// Present only when at least one item has a known rating.
    pub rating_stats: Option<RatingStats>,
}

/// Statistics over items with a known numeric rating only.
#[derive(Debug, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub mode: f64,
    pub median: f64,
}

/// Filter, sort, and truncate a scored item set.
///
/// Items with unknown ratings always survive the max-rating filter — they
/// have no numeric value a threshold could exclude. Ordering is waste score
/// descending with a size-then-name tie-break so output is reproducible
/// regardless of fetch order. Top-N truncation is applied last.
pub fn select(mut items: Vec<Item>, options: &SelectionOptions) -> Vec<Item> {
    if let Some(min_score) = options.min_waste_score {
        items.retain(|item| item.waste_score >= min_score);
    }

    if let Some(min_size) = options.min_size_bytes {
        items.retain(|item| item.size_bytes >= min_size);
    }

    if let Some(max_rating) = options.max_rating {
        items.retain(|item| match item.rating {
            Rating::Known(value) => value <= max_rating,
            Rating::Unknown => true,
        });
    }

    items.sort_by(|a, b| {
        b.waste_score
            .cmp(&a.waste_score)
            .then(b.size_bytes.cmp(&a.size_bytes))
            .then_with(|| a.name.cmp(&b.name))
    });

    if let Some(top) = options.top {
        items.truncate(top);
    }

    items
}

/// Aggregate the final item set. An empty set yields a zeroed summary, never
/// a division by zero.
pub fn summarize(items: &[Item]) -> Summary {
    if items.is_empty() {
        return Summary {
            count: 0,
            total_size_bytes: 0,
            avg_waste_score: 0,
            rating_stats: None,
        };
    }

    let count = items.len();
    let total_size_bytes = items.iter().map(|item| item.size_bytes).sum();
    let waste_total: i64 = items.iter().map(|item| i64::from(item.waste_score)).sum();
    let avg_waste_score = (waste_total as f64 / count as f64).round() as i32;

    let known: Vec<f64> = items.iter().filter_map(|item| item.rating.value()).collect();

    Summary {
        count,
        total_size_bytes,
        avg_waste_score,
        rating_stats: rating_stats(&known),
    }
}

fn rating_stats(values: &[f64]) -> Option<RatingStats> {
    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(RatingStats {
        mean,
        mode: mode(values).unwrap_or(mean),
        median: median(values),
    })
}

/// Mode over one-decimal buckets. `None` when no single value is strictly
/// most frequent, in which case the caller falls back to the mean.
fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for &value in values {
        *counts.entry((value * 10.0).round() as i64).or_insert(0) += 1;
    }

    let (&bucket, &best) = counts.iter().max_by_key(|(_, count)| **count)?;
    let contenders = counts.values().filter(|&&count| count == best).count();
    if contenders > 1 {
        return None;
    }

    Some(bucket as f64 / 10.0)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
