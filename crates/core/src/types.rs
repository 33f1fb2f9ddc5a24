use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The two kinds of rateable entity in the directory.
///
/// Stored in `rateable_type` columns as `"dish"` / `"restaurant"` and used
/// verbatim in URL path segments (`/reviews/{type}/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateableKind {
    Dish,
    Restaurant,
}

impl RateableKind {
    /// The column/path value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            RateableKind::Dish => "dish",
            RateableKind::Restaurant => "restaurant",
        }
    }

    /// The table holding entities of this kind.
    pub fn table(self) -> &'static str {
        match self {
            RateableKind::Dish => "dishes",
            RateableKind::Restaurant => "restaurants",
        }
    }
}

impl fmt::Display for RateableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateableKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dish" => Ok(RateableKind::Dish),
            "restaurant" => Ok(RateableKind::Restaurant),
            other => Err(CoreError::Validation(format!(
                "Invalid rateable type '{other}'. Must be 'dish' or 'restaurant'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rateable_kind_round_trips_through_str() {
        assert_eq!("dish".parse::<RateableKind>().unwrap(), RateableKind::Dish);
        assert_eq!(
            "restaurant".parse::<RateableKind>().unwrap(),
            RateableKind::Restaurant
        );
        assert_eq!(RateableKind::Dish.as_str(), "dish");
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!("cafe".parse::<RateableKind>().is_err());
        assert!("".parse::<RateableKind>().is_err());
        assert!("Dish".parse::<RateableKind>().is_err());
    }
}
