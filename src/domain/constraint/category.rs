//! Constraint categories and their closed sets of subtypes.
//!
//! Each of the four categories owns a fixed vocabulary of wire names. Every
//! vocabulary includes `Default`, which is why a bare `"Default"` type can
//! only be placed in a category by looking at the parameters beside it.

use serde::{Serialize, Serializer};
use std::fmt;

/// Generates a subtype enum with its wire-name table.
macro_rules! constraint_kind {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every subtype in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire name of this subtype.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Looks up a subtype by its wire name.
            pub fn from_wire(raw: &str) -> Option<Self> {
                match raw {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

constraint_kind! {
    /// Time-based scheduling constraints.
    TemporalKind {
        Default => "Default",
        BackToBack => "BackToBackConstraint",
        RestDays => "RestDaysConstraint",
        DaysOfWeek => "DaysOfWeekConstraint",
        DateRange => "DateRangeConstraint",
    }
}

constraint_kind! {
    /// Venue and travel constraints.
    VenueKind {
        Default => "Default",
        HomeAway => "HomeAwayConstraint",
        TravelConsiderations => "TravelConsiderationsConstraint",
        VenueAvailability => "VenueAvailabilityConstraint",
        VenueCapacity => "VenueCapacityConstraint",
    }
}

constraint_kind! {
    /// Team preference and matchup constraints.
    TeamKind {
        Default => "Default",
        TeamPreferences => "TeamPreferencesConstraint",
        Rivalries => "RivalriesConstraint",
        CompetitiveBalance => "CompetitiveBalanceConstraint",
        TeamAvailability => "TeamAvailabilityConstraint",
    }
}

constraint_kind! {
    /// Season-wide constraints.
    GeneralKind {
        Default => "Default",
        GameFrequencyLimit => "GameFrequencyLimitConstraint",
        SeasonStructure => "SeasonStructureConstraint",
    }
}

/// The four constraint categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstraintCategory {
    Temporal,
    Venue,
    Team,
    General,
}

impl ConstraintCategory {
    /// Categories in the order ambiguous types are resolved against.
    pub const ALL: [ConstraintCategory; 4] = [
        ConstraintCategory::Temporal,
        ConstraintCategory::Venue,
        ConstraintCategory::Team,
        ConstraintCategory::General,
    ];

    /// Returns the `Default` subtype of this category.
    pub fn default_type(&self) -> ConstraintType {
        match self {
            ConstraintCategory::Temporal => ConstraintType::Temporal(TemporalKind::Default),
            ConstraintCategory::Venue => ConstraintType::Venue(VenueKind::Default),
            ConstraintCategory::Team => ConstraintType::Team(TeamKind::Default),
            ConstraintCategory::General => ConstraintType::General(GeneralKind::Default),
        }
    }
}

impl fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintCategory::Temporal => "Temporal",
            ConstraintCategory::Venue => "Venue",
            ConstraintCategory::Team => "Team",
            ConstraintCategory::General => "General",
        };
        f.write_str(s)
    }
}

/// A constraint type: exactly one subtype of exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    Temporal(TemporalKind),
    Venue(VenueKind),
    Team(TeamKind),
    General(GeneralKind),
}

impl ConstraintType {
    /// Returns the category this type belongs to.
    pub fn category(&self) -> ConstraintCategory {
        match self {
            ConstraintType::Temporal(_) => ConstraintCategory::Temporal,
            ConstraintType::Venue(_) => ConstraintCategory::Venue,
            ConstraintType::Team(_) => ConstraintCategory::Team,
            ConstraintType::General(_) => ConstraintCategory::General,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::Temporal(kind) => kind.as_str(),
            ConstraintType::Venue(kind) => kind.as_str(),
            ConstraintType::Team(kind) => kind.as_str(),
            ConstraintType::General(kind) => kind.as_str(),
        }
    }

    /// Returns true for the `Default` subtype of any category.
    pub fn is_default(&self) -> bool {
        *self == self.category().default_type()
    }

    /// Returns every category whose vocabulary contains `raw`.
    ///
    /// Non-default wire names are unique across categories, so the result has
    /// at most one entry unless `raw` is `"Default"`.
    pub fn candidates(raw: &str) -> Vec<ConstraintType> {
        let mut found = Vec::new();
        if let Some(kind) = TemporalKind::from_wire(raw) {
            found.push(ConstraintType::Temporal(kind));
        }
        if let Some(kind) = VenueKind::from_wire(raw) {
            found.push(ConstraintType::Venue(kind));
        }
        if let Some(kind) = TeamKind::from_wire(raw) {
            found.push(ConstraintType::Team(kind));
        }
        if let Some(kind) = GeneralKind::from_wire(raw) {
            found.push(ConstraintType::General(kind));
        }
        found
    }
}

impl Default for ConstraintType {
    fn default() -> Self {
        ConstraintType::General(GeneralKind::Default)
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.as_str())
    }
}

impl Serialize for ConstraintType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn wire_names_round_trip_through_lookup() {
        for kind in TemporalKind::ALL {
            assert_eq!(TemporalKind::from_wire(kind.as_str()), Some(*kind));
        }
        for kind in GeneralKind::ALL {
            assert_eq!(GeneralKind::from_wire(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn non_default_wire_names_are_unique_across_categories() {
        let mut seen = HashSet::new();
        let names = TemporalKind::ALL
            .iter()
            .map(|k| k.as_str())
            .chain(VenueKind::ALL.iter().map(|k| k.as_str()))
            .chain(TeamKind::ALL.iter().map(|k| k.as_str()))
            .chain(GeneralKind::ALL.iter().map(|k| k.as_str()))
            .filter(|name| *name != "Default");
        for name in names {
            assert!(seen.insert(name), "duplicate wire name {name}");
        }
    }

    #[test]
    fn candidates_for_specific_type_has_one_entry() {
        let found = ConstraintType::candidates("RivalriesConstraint");
        assert_eq!(found, vec![ConstraintType::Team(TeamKind::Rivalries)]);
    }

    #[test]
    fn candidates_for_default_spans_all_categories() {
        let found = ConstraintType::candidates("Default");
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(ConstraintType::is_default));
    }

    #[test]
    fn candidates_for_unknown_type_is_empty() {
        assert!(ConstraintType::candidates("WeatherConstraint").is_empty());
    }

    #[test]
    fn default_type_is_general_default() {
        let ty = ConstraintType::default();
        assert_eq!(ty.category(), ConstraintCategory::General);
        assert!(ty.is_default());
        assert_eq!(ty.to_string(), "General.Default");
    }

    #[test]
    fn type_serializes_as_wire_name() {
        let ty = ConstraintType::Venue(VenueKind::HomeAway);
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"HomeAwayConstraint\"");
    }
}
