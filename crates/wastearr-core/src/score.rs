use crate::model::{Item, ItemType, Rating};

/// Ceiling for the base size score, applied before type normalization so
/// very large items cannot grow without bound.
const SIZE_SCORE_CAP: f64 = 80.0;

/// Rating assumed for unrated items when looking up the multiplier. Never
/// written back as a real rating.
const ASSUMED_RATING: f64 = 6.0;

const GIB: f64 = (1u64 << 30) as f64;

/// Base size score 0-80: linear up to 1 GB, logarithmic above.
fn size_score(size_bytes: u64) -> f64 {
    let size_gb = size_bytes as f64 / GIB;

    let score = if size_gb <= 1.0 {
        size_gb * 10.0
    } else {
        10.0 + size_gb.log10() * 30.0
    };
    score.min(SIZE_SCORE_CAP)
}

/// Multi-season content is expected to be larger, so TV gets a 40% size
/// discount while movies are held to strict size efficiency.
fn size_factor(item_type: ItemType) -> f64 {
    match item_type {
        ItemType::Tv => 0.6,
        ItemType::Movie => 1.0,
    }
}

/// Piecewise rating multiplier. The TV curve is more forgiving than the
/// movie curve at every threshold.
fn rating_multiplier(item_type: ItemType, rating: f64) -> f64 {
    match item_type {
        ItemType::Tv => {
            if rating >= 8.0 {
                0.05
            } else if rating >= 7.5 {
                0.15
            } else if rating >= 7.0 {
                0.35
            } else if rating >= 6.5 {
                0.55
            } else if rating >= 6.0 {
                0.75
            } else {
                1.1
            }
        }
        ItemType::Movie => {
            if rating >= 8.0 {
                0.1
            } else if rating >= 7.5 {
                0.2
            } else if rating >= 7.0 {
                0.4
            } else if rating >= 6.5 {
                0.6
            } else if rating >= 6.0 {
                0.8
            } else {
                1.2
            }
        }
    }
}

/// Bounded 0-100 waste score. Pure and total: every input combination maps
/// to a score, clamped and rounded half away from zero.
pub fn waste_score(size_bytes: u64, rating: Rating, item_type: ItemType) -> i32 {
    let effective_rating = rating.value().unwrap_or(ASSUMED_RATING);
    let normalized_size = size_score(size_bytes) * size_factor(item_type);
    let score = normalized_size * rating_multiplier(item_type, effective_rating);
    score.clamp(0.0, 100.0).round() as i32
}

/// Recompute `waste_score` for every item in place.
pub fn score_items(items: &mut [Item]) {
    for item in items.iter_mut() {
        item.waste_score = waste_score(item.size_bytes, item.rating, item.item_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1 << 20;
    const GIB_BYTES: u64 = 1 << 30;

    #[test]
    fn small_highly_rated_series_scores_zero() {
        // 500 MB at 8.5: size_score ~4.88, x0.6 ~2.93, x0.05 rounds to 0.
        let score = waste_score(500 * MIB, Rating::Known(8.5), ItemType::Tv);
        assert_eq!(score, 0);
    }

    #[test]
    fn ten_gig_poorly_rated_movie_scores_48() {
        // size_score = 10 + 30*log10(10) = 40, x1.2 below the 6.0 threshold.
        let score = waste_score(10 * GIB_BYTES, Rating::Known(5.0), ItemType::Movie);
        assert_eq!(score, 48);
    }

    #[test]
    fn fifty_gig_unrated_movie_scores_49() {
        // Unknown rating is assumed 6.0: size_score ~60.97, x0.8 ~48.8.
        let score = waste_score(50 * GIB_BYTES, Rating::Unknown, ItemType::Movie);
        assert_eq!(score, 49);
    }

    #[test]
    fn unknown_rating_scores_like_assumed_six() {
        for size in [100 * MIB, GIB_BYTES, 20 * GIB_BYTES] {
            assert_eq!(
                waste_score(size, Rating::Unknown, ItemType::Movie),
                waste_score(size, Rating::Known(6.0), ItemType::Movie),
            );
            assert_eq!(
                waste_score(size, Rating::Unknown, ItemType::Tv),
                waste_score(size, Rating::Known(6.0), ItemType::Tv),
            );
        }
    }

    #[test]
    fn score_is_bounded_for_extreme_inputs() {
        let ratings = [
            Rating::Known(0.1),
            Rating::Known(5.9),
            Rating::Known(6.0),
            Rating::Known(10.0),
            Rating::Unknown,
        ];
        let sizes = [0, 1, MIB, GIB_BYTES, 100 * GIB_BYTES, u64::MAX];

        for &rating in &ratings {
            for &size in &sizes {
                for item_type in ItemType::ALL {
                    let score = waste_score(size, rating, item_type);
                    assert!((0..=100).contains(&score), "score {} out of bounds", score);
                }
            }
        }
    }

    #[test]
    fn score_is_non_decreasing_in_size() {
        let sizes: Vec<u64> = (0..60).map(|i| (i as u64) * 2 * GIB_BYTES / 3).collect();

        for item_type in ItemType::ALL {
            let mut last = 0;
            for &size in &sizes {
                let score = waste_score(size, Rating::Known(5.0), item_type);
                assert!(score >= last, "score decreased as size grew");
                last = score;
            }
        }
    }

    #[test]
    fn score_is_non_increasing_in_rating() {
        // One sample per multiplier tier, ascending quality.
        let ratings = [5.0, 6.0, 6.5, 7.0, 7.5, 8.0, 9.5];

        for item_type in ItemType::ALL {
            let mut last = i32::MAX;
            for &rating in &ratings {
                let score = waste_score(30 * GIB_BYTES, Rating::Known(rating), item_type);
                assert!(score <= last, "score increased with a better rating");
                last = score;
            }
        }
    }

    #[test]
    fn tv_curve_is_more_forgiving_than_movie_curve() {
        for &rating in &[5.0, 6.0, 6.5, 7.0, 7.5, 8.0] {
            let tv = waste_score(30 * GIB_BYTES, Rating::Known(rating), ItemType::Tv);
            let movie = waste_score(30 * GIB_BYTES, Rating::Known(rating), ItemType::Movie);
            assert!(tv < movie, "tv should score below movie at rating {}", rating);
        }
    }

    #[test]
    fn base_size_score_caps_at_80() {
        assert_eq!(size_score(u64::MAX), 80.0);
        // 1 GB sits exactly on the linear/log boundary.
        assert!((size_score(GIB_BYTES) - 10.0).abs() < 1e-9);
    }
}
