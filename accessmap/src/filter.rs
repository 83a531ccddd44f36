//! Filter evaluator: derives the visible subset of streets and crossings from the current control values.
//!
//! [`filter`] is a pure function over borrowed datasets. It never copies or modifies entities, it only selects them,
//! keeping their positional ids so that the reconciler can refer back to the source entity.

use std::fmt::{Display, Formatter};

use crate::error::AccessMapError;
use crate::model::{Crossing, CrossingId, Quality, StreetId, StreetSegment};

/// Filter control of the map page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Street quality selector.
    Quality,
    /// Sidewalk presence selector.
    Sidewalk,
    /// Paved surface selector.
    Paved,
    /// Obstacle presence selector.
    Obstacles,
    /// Zebra marking selector for crossings.
    Zebra,
}

impl ControlId {
    /// All controls.
    pub const ALL: [ControlId; 5] = [
        ControlId::Quality,
        ControlId::Sidewalk,
        ControlId::Paved,
        ControlId::Obstacles,
        ControlId::Zebra,
    ];

    /// Id of the control element in the page markup.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ControlId::Quality => "qualityFilter",
            ControlId::Sidewalk => "sidewalkFilter",
            ControlId::Paved => "pavedFilter",
            ControlId::Obstacles => "obstacleFilter",
            ControlId::Zebra => "zebraFilter",
        }
    }

    /// Finds the control by the id of its element.
    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.dom_id() == id)
    }
}

impl Display for ControlId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Street quality predicate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum QualityFilter {
    /// Any quality.
    #[default]
    All,
    /// Only streets with the given quality.
    Only(Quality),
}

impl QualityFilter {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "all" => Some(Self::All),
            other => Quality::from_name(other).map(Self::Only),
        }
    }

    /// Returns true if a street with the given quality passes the filter.
    pub fn accepts(&self, quality: Quality) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => *expected == quality,
        }
    }
}

/// Predicate over a boolean attribute.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Presence {
    /// Attribute is ignored.
    #[default]
    All,
    /// Attribute must be set.
    Yes,
    /// Attribute must not be set.
    No,
}

impl Presence {
    /// Returns true if an entity with the given attribute value passes the filter.
    pub fn accepts(&self, value: bool) -> bool {
        match self {
            Self::All => true,
            Self::Yes => value,
            Self::No => !value,
        }
    }

    fn parse_yes_no(value: &str) -> Option<Self> {
        match value {
            "" | "all" => Some(Self::All),
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    fn parse_true_false(value: &str) -> Option<Self> {
        match value {
            "" | "all" => Some(Self::All),
            "true" => Some(Self::Yes),
            "false" => Some(Self::No),
            _ => None,
        }
    }
}

/// Current values of all filter controls. Every predicate defaults to "all".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Street quality.
    pub quality: QualityFilter,
    /// Sidewalk presence.
    pub sidewalk: Presence,
    /// Paved surface.
    pub paved: Presence,
    /// Obstacle presence.
    pub obstacles: Presence,
    /// Zebra marking of crossings.
    pub zebra: Presence,
}

impl FilterSet {
    /// Updates one predicate from the value reported by its control.
    ///
    /// Empty value means "all". If the value is not recognized, an error is returned and the filter set is not
    /// changed.
    pub fn apply_control(&mut self, control: ControlId, value: &str) -> Result<(), AccessMapError> {
        let value = value.trim();
        let invalid = || AccessMapError::InvalidPredicate {
            control,
            value: value.to_string(),
        };

        match control {
            ControlId::Quality => self.quality = QualityFilter::parse(value).ok_or_else(invalid)?,
            ControlId::Sidewalk => self.sidewalk = Presence::parse_yes_no(value).ok_or_else(invalid)?,
            ControlId::Paved => self.paved = Presence::parse_true_false(value).ok_or_else(invalid)?,
            ControlId::Obstacles => {
                self.obstacles = Presence::parse_yes_no(value).ok_or_else(invalid)?
            }
            ControlId::Zebra => self.zebra = Presence::parse_yes_no(value).ok_or_else(invalid)?,
        }

        Ok(())
    }

    /// Builder-style version of [`FilterSet::apply_control`].
    pub fn with_control(mut self, control: ControlId, value: &str) -> Result<Self, AccessMapError> {
        self.apply_control(control, value)?;
        Ok(self)
    }

    /// Returns true if the street satisfies all street predicates.
    pub fn accepts_street(&self, street: &StreetSegment) -> bool {
        self.quality.accepts(street.quality)
            && self.sidewalk.accepts(street.sidewalk)
            && self.paved.accepts(street.paved)
            && self.obstacles.accepts(street.has_obstacles())
    }

    /// Returns true if the crossing satisfies the crossing predicate.
    pub fn accepts_crossing(&self, crossing: &Crossing) -> bool {
        self.zebra.accepts(crossing.zebra)
    }
}

/// Subset of the loaded datasets that passed the filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    streets: Vec<(StreetId, &'a StreetSegment)>,
    crossings: Vec<(CrossingId, &'a Crossing)>,
}

impl<'a> FilteredView<'a> {
    /// Streets that passed the filters, in the order of the source list.
    pub fn streets(&self) -> &[(StreetId, &'a StreetSegment)] {
        &self.streets
    }

    /// Crossings that passed the filters, in the order of the source list.
    pub fn crossings(&self) -> &[(CrossingId, &'a Crossing)] {
        &self.crossings
    }

    /// Total number of obstacles on the visible streets.
    pub fn obstacle_count(&self) -> usize {
        self.streets.iter().map(|(_, s)| s.obstacles.len()).sum()
    }
}

/// Selects streets and crossings that satisfy the given filters.
pub fn filter<'a>(
    streets: &'a [StreetSegment],
    crossings: &'a [Crossing],
    filters: &FilterSet,
) -> FilteredView<'a> {
    let streets = streets
        .iter()
        .enumerate()
        .filter(|(_, street)| filters.accepts_street(street))
        .map(|(index, street)| (StreetId(index), street))
        .collect();

    let crossings = crossings
        .iter()
        .enumerate()
        .filter(|(_, crossing)| filters.accepts_crossing(crossing))
        .map(|(index, crossing)| (CrossingId(index), crossing))
        .collect();

    FilteredView { streets, crossings }
}
