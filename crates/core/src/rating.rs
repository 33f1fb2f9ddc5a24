//! Rating score validation and weighted aggregate math.
//!
//! The aggregate contract: `average_rating = Σ(score·weight) / Σ(weight)`
//! over all rating rows for a target, `total_ratings` = row count. An
//! empty set yields `0.0` / `0`. The repository layer persists these onto
//! the denormalized columns after every rating mutation; this module is
//! the single definition of the computation.

use crate::error::CoreError;

/// Lowest accepted rating score.
pub const MIN_SCORE: i16 = 1;

/// Highest accepted rating score.
pub const MAX_SCORE: i16 = 5;

/// Weight assigned to a rating when none is specified.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One rating row's contribution to an aggregate: `(score, weight)`.
pub type RatingSample = (i16, f64);

/// The denormalized aggregate pair stored on a rateable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub average_rating: f64,
    pub total_ratings: i64,
}

impl RatingAggregate {
    /// The aggregate of an entity with no ratings.
    pub const EMPTY: RatingAggregate = RatingAggregate {
        average_rating: 0.0,
        total_ratings: 0,
    };
}

/// Validate that a score lies in the accepted `1..=5` range.
pub fn validate_score(score: i16) -> Result<(), CoreError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(CoreError::InvalidRating(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        )))
    }
}

/// Compute the weighted aggregate over a target's rating samples.
///
/// A weight of 2.0 counts that rating twice; the default weight of 1.0
/// makes the unweighted mean the common case. Samples with non-positive
/// weight are excluded from the average but still counted in
/// `total_ratings` (the row exists; its influence is zero).
pub fn aggregate(samples: &[RatingSample]) -> RatingAggregate {
    let total_ratings = samples.len() as i64;

    let weight_sum: f64 = samples.iter().filter(|(_, w)| *w > 0.0).map(|(_, w)| w).sum();
    if weight_sum == 0.0 {
        return RatingAggregate {
            average_rating: 0.0,
            total_ratings,
        };
    }

    let weighted_sum: f64 = samples
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(score, w)| f64::from(*score) * w)
        .sum();

    RatingAggregate {
        average_rating: weighted_sum / weight_sum,
        total_ratings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_in_range_accepted() {
        for score in MIN_SCORE..=MAX_SCORE {
            assert!(validate_score(score).is_ok());
        }
    }

    #[test]
    fn scores_out_of_range_rejected() {
        for score in [0, 6, -1, 100] {
            let result = validate_score(score);
            assert!(matches!(result, Err(CoreError::InvalidRating(_))));
        }
    }

    #[test]
    fn empty_set_yields_zero_aggregate() {
        assert_eq!(aggregate(&[]), RatingAggregate::EMPTY);
    }

    #[test]
    fn unweighted_mean_is_arithmetic_mean() {
        let agg = aggregate(&[(4, 1.0), (2, 1.0)]);
        assert_eq!(agg.total_ratings, 2);
        assert!((agg.average_rating - 3.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_mean_counts_weight() {
        // Scores {5, 3, 4} with weights {1, 1, 2}: (5 + 3 + 8) / 4 = 4.0.
        let agg = aggregate(&[(5, 1.0), (3, 1.0), (4, 2.0)]);
        assert_eq!(agg.total_ratings, 3);
        assert!((agg.average_rating - 4.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_is_its_own_average() {
        let agg = aggregate(&[(5, 1.0)]);
        assert_eq!(agg.total_ratings, 1);
        assert!((agg.average_rating - 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_weight_sample_counts_toward_total_only() {
        let agg = aggregate(&[(5, 0.0), (1, 1.0)]);
        assert_eq!(agg.total_ratings, 2);
        assert!((agg.average_rating - 1.0).abs() < 1e-9);
    }
}
