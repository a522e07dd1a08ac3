//! Borrower ratings and the derived average rating of a book.
//!
//! A rating is an integer in `1..=10` given when a loan is closed. The book's
//! average is recomputed from every rated lending of that book, never
//! incrementally, and stored rounded to one decimal place (half away from zero).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 10;

/// A validated borrower rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw rating.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `value` is outside `1..=10`.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (MIN_RATING..=MAX_RATING).contains(v))
            .map(Self)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
                ))
            })
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round to one decimal place, half away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the given ratings rounded to one decimal, or `None` when empty.
#[must_use]
pub fn average_rating<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), rating| {
            (sum + u32::from(rating.get()), count + 1)
        });

    if count == 0 {
        return None;
    }
    Some(round_to_tenth(f64::from(sum) / f64::from(count)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn ratings(values: &[i64]) -> Vec<Rating> {
        values.iter().map(|v| Rating::new(*v).unwrap()).collect()
    }

    #[rstest]
    #[case(&[8, 6, 10], 8.0)]
    #[case(&[7, 9], 8.0)]
    #[case(&[9], 9.0)]
    #[case(&[1, 2], 1.5)]
    #[case(&[7, 8, 8], 7.7)]
    #[case(&[10, 10, 9], 9.7)]
    fn average_is_rounded_to_one_decimal(#[case] values: &[i64], #[case] expected: f64) {
        assert_eq!(average_rating(ratings(values)), Some(expected));
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average_rating(Vec::new()), None);
    }

    #[test]
    fn rounding_goes_half_away_from_zero() {
        assert_eq!(round_to_tenth(8.25), 8.3);
        assert_eq!(round_to_tenth(8.24), 8.2);
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    #[case(-3)]
    #[case(300)]
    fn out_of_range_rating_is_rejected(#[case] value: i64) {
        let err = Rating::new(value).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("between 1 and 10"));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::new(10).unwrap().get(), 10);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("11").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().get(), 4);
    }
}
