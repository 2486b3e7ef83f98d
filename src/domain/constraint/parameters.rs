//! Parameter shapes, one per constraint category.
//!
//! Decoding is null-tolerant: an absent or `null` field takes its default.
//! Keys outside every category's vocabulary are kept in `extra` as an
//! unvalidated pass-through; keys owned by another category are rejected by
//! the schema before these types ever see them.

use serde::de::{Deserializer, IntoDeserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ConstraintCategory;

/// Open key/value map of opaque values. Never pattern-matched on.
pub type OpaqueMap = serde_json::Map<String, serde_json::Value>;

/// Treats an explicit `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How strongly a constraint restricts the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionValue {
    Default,
    MustNot,
    PreferNot,
    Prefer,
    Must,
}

/// Empty strings are what older backends send for "no restriction".
fn restriction_value<'de, D>(deserializer: D) -> Result<Option<RestrictionValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => RestrictionValue::deserialize(value.into_deserializer()).map(Some),
    }
}

/// Inclusive date window, `[start, end]` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DateRangeRepr", into = "(String, String)")]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateRangeRepr {
    Pair(String, String),
    Object {
        #[serde(alias = "startDate")]
        start_date: String,
        #[serde(alias = "endDate")]
        end_date: String,
    },
}

impl From<DateRangeRepr> for DateRange {
    fn from(repr: DateRangeRepr) -> Self {
        match repr {
            DateRangeRepr::Pair(start, end) => Self { start, end },
            DateRangeRepr::Object {
                start_date,
                end_date,
            } => Self {
                start: start_date,
                end: end_date,
            },
        }
    }
}

impl From<DateRange> for (String, String) {
    fn from(range: DateRange) -> Self {
        (range.start, range.end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalParameters {
    #[serde(
        default,
        alias = "restrictionValue",
        deserialize_with = "restriction_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub restriction_value: Option<RestrictionValue>,
    #[serde(default, alias = "backToBack", deserialize_with = "null_as_default")]
    pub back_to_back: bool,
    #[serde(default, alias = "restDays", deserialize_with = "null_as_default")]
    pub rest_days: u32,
    #[serde(default, alias = "daysOfWeek", deserialize_with = "null_as_default")]
    pub days_of_week: Vec<String>,
    #[serde(default, alias = "dateRange", deserialize_with = "null_as_default")]
    pub date_range: DateRange,
    #[serde(flatten)]
    pub extra: OpaqueMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueParameters {
    #[serde(
        default,
        alias = "restrictionValue",
        deserialize_with = "restriction_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub restriction_value: Option<RestrictionValue>,
    #[serde(default, alias = "homeAway", deserialize_with = "null_as_default")]
    pub home_away: bool,
    #[serde(default, alias = "travelConsiderations", deserialize_with = "null_as_default")]
    pub travel_considerations: bool,
    #[serde(default, alias = "venueAvailability", deserialize_with = "null_as_default")]
    pub venue_availability: Vec<String>,
    #[serde(default, alias = "venueCapacity", deserialize_with = "null_as_default")]
    pub venue_capacity: u32,
    #[serde(flatten)]
    pub extra: OpaqueMap,
}

/// Team parameters. The preference and availability maps are opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamParameters {
    #[serde(
        default,
        alias = "restrictionValue",
        deserialize_with = "restriction_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub restriction_value: Option<RestrictionValue>,
    #[serde(default, alias = "teamPreferences", deserialize_with = "null_as_default")]
    pub team_preferences: OpaqueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rivalries: Vec<String>,
    #[serde(default, alias = "competitiveBalance", deserialize_with = "null_as_default")]
    pub competitive_balance: bool,
    #[serde(default, alias = "teamAvailability", deserialize_with = "null_as_default")]
    pub team_availability: OpaqueMap,
    #[serde(flatten)]
    pub extra: OpaqueMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralParameters {
    #[serde(
        default,
        alias = "restrictionValue",
        deserialize_with = "restriction_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub restriction_value: Option<RestrictionValue>,
    #[serde(default, alias = "gameFrequencyLimit", deserialize_with = "null_as_default")]
    pub game_frequency_limit: u32,
    #[serde(default, alias = "seasonStructure", deserialize_with = "null_as_default")]
    pub season_structure: String,
    #[serde(flatten)]
    pub extra: OpaqueMap,
}

/// Parameters whose concrete shape is dictated by the constraint category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConstraintParameters {
    Temporal(TemporalParameters),
    Venue(VenueParameters),
    Team(TeamParameters),
    General(GeneralParameters),
}

impl ConstraintParameters {
    /// Returns the default parameters for a category.
    pub fn default_for(category: ConstraintCategory) -> Self {
        match category {
            ConstraintCategory::Temporal => Self::Temporal(TemporalParameters::default()),
            ConstraintCategory::Venue => Self::Venue(VenueParameters::default()),
            ConstraintCategory::Team => Self::Team(TeamParameters::default()),
            ConstraintCategory::General => Self::General(GeneralParameters::default()),
        }
    }

    /// Decodes a parameter object as the shape of `category`.
    pub fn decode(
        category: ConstraintCategory,
        raw: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            ConstraintCategory::Temporal => Self::Temporal(serde_json::from_value(raw)?),
            ConstraintCategory::Venue => Self::Venue(serde_json::from_value(raw)?),
            ConstraintCategory::Team => Self::Team(serde_json::from_value(raw)?),
            ConstraintCategory::General => Self::General(serde_json::from_value(raw)?),
        })
    }

    /// Returns the category of this parameter shape.
    pub fn category(&self) -> ConstraintCategory {
        match self {
            Self::Temporal(_) => ConstraintCategory::Temporal,
            Self::Venue(_) => ConstraintCategory::Venue,
            Self::Team(_) => ConstraintCategory::Team,
            Self::General(_) => ConstraintCategory::General,
        }
    }
}

/// Returns the parameter keys that belong to exactly one category.
///
/// Both wire spellings are listed, snake_case first.
pub fn owned_fields(category: ConstraintCategory) -> &'static [&'static str] {
    match category {
        ConstraintCategory::Temporal => &[
            "back_to_back",
            "rest_days",
            "days_of_week",
            "date_range",
            "backToBack",
            "restDays",
            "daysOfWeek",
            "dateRange",
        ],
        ConstraintCategory::Venue => &[
            "home_away",
            "travel_considerations",
            "venue_availability",
            "venue_capacity",
            "homeAway",
            "travelConsiderations",
            "venueAvailability",
            "venueCapacity",
        ],
        ConstraintCategory::Team => &[
            "team_preferences",
            "rivalries",
            "competitive_balance",
            "team_availability",
            "teamPreferences",
            "competitiveBalance",
            "teamAvailability",
        ],
        ConstraintCategory::General => &[
            "game_frequency_limit",
            "season_structure",
            "gameFrequencyLimit",
            "seasonStructure",
        ],
    }
}

impl fmt::Display for RestrictionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RestrictionValue::Default => "Default",
            RestrictionValue::MustNot => "MustNot",
            RestrictionValue::PreferNot => "PreferNot",
            RestrictionValue::Prefer => "Prefer",
            RestrictionValue::Must => "Must",
        };
        f.write_str(s)
    }
}
