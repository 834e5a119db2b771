use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned recipe identifier.
pub type RecipeId = i64;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Day of the week a recipe belongs to. Ordered in calendar order,
/// starting on Monday.
///
/// Stored and serialized as the full English name (`"Monday"`); deserializing
/// goes through [`FromStr`], so abbreviations are accepted too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "String")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All seven days in calendar order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Full English name, as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    /// Accepts the full name or the three-letter abbreviation, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let full = day.as_str().to_ascii_lowercase();
                needle == full || needle == full[..3]
            })
            .ok_or_else(|| DayParseError(s.to_owned()))
    }
}

impl TryFrom<String> for Day {
    type Error = DayParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Error returned when parsing an invalid [`Day`] string.
#[derive(Debug, Clone)]
pub struct DayParseError(pub String);

impl fmt::Display for DayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid day: {:?} (expected Monday..Sunday or Mon..Sun)",
            self.0
        )
    }
}

impl std::error::Error for DayParseError {}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A recipe in the recipe book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub day: Day,
    /// Only active recipes are eligible for the weekly plan.
    pub active: bool,
}

/// Column values for inserting or updating a recipe row.
#[derive(Debug, Clone)]
pub struct NewRecipe<'a> {
    pub name: &'a str,
    pub day: Day,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
