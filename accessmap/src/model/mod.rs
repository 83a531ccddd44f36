//! Entities displayed on the accessibility map.
//!
//! All entities are loaded once from the JSON fixtures and are never modified afterwards. Streets and crossings have
//! no explicit identifiers: an entity is identified by its position in the loaded list ([`StreetId`],
//! [`CrossingId`]).

mod crossing;
mod institution;
mod street;

pub use crossing::{Crossing, CrossingId};
pub use institution::{Institution, InstitutionId};
pub use street::{Obstacle, Quality, StreetId, StreetSegment};
