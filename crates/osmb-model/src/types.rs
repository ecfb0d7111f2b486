// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for OSM building data representation
//!
//! This module defines the fundamental types used throughout the building
//! modeling system: element identifiers, geographic coordinates, bounding
//! extents, and the closed classification unions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe OSM node identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Type-safe identifier for a way or relation
///
/// OSM keeps separate id spaces for ways and relations; lookups that need to
/// distinguish the two go through the document's typed accessors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId(id)
    }
}

/// A geographic coordinate in degrees
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct LonLat {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LonLat {
    /// Create a new coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// An axis-aligned bounding box, ordered [left, bottom, right, top]
///
/// Used both for geographic extents (degrees) before reprojection and for
/// planar extents (meters) afterwards. `left <= right` and `bottom <= top`
/// hold for any box produced from real geometry; the seeded [`Extents::EMPTY`]
/// box deliberately violates them so an empty accumulation is detectable.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Extents {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Extents {
    /// Seed value for folds over an unknown point set
    ///
    /// Inverted on both axes, so the first included point fixes all four
    /// edges and a box that never saw a point stays degenerate.
    pub const EMPTY: Extents = Extents {
        left: 180.0,
        bottom: 90.0,
        right: -180.0,
        top: -90.0,
    };

    /// Create a box from its four edges
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// The box containing exactly one point
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Grow the box to include a point
    pub fn include(&mut self, x: f64, y: f64) {
        self.left = self.left.min(x);
        self.bottom = self.bottom.min(y);
        self.right = self.right.max(x);
        self.top = self.top.max(y);
    }

    /// The smallest box containing both inputs
    ///
    /// Union is monotonic: the result is never smaller than either input.
    pub fn union(&self, other: &Extents) -> Extents {
        Extents {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }

    /// Midpoint of the box, as a coordinate
    pub fn center(&self) -> LonLat {
        LonLat::new((self.left + self.right) / 2.0, (self.bottom + self.top) / 2.0)
    }

    /// Horizontal size
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical size
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// True when the edge ordering invariant is violated
    ///
    /// Only a seeded box that never included a point, or genuinely broken
    /// input geometry, is degenerate.
    pub fn is_degenerate(&self) -> bool {
        self.left > self.right || self.bottom > self.top
    }

    /// True when the two boxes share any area or edge
    pub fn intersects(&self, other: &Extents) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.bottom <= other.top
            && other.bottom <= self.top
    }

    /// True when `other` lies entirely within this box
    pub fn contains(&self, other: &Extents) -> bool {
        self.left <= other.left
            && self.bottom <= other.bottom
            && self.right >= other.right
            && self.top >= other.top
    }
}

/// Which kind of root entity an identifier refers to
///
/// The document source API distinguishes only ways and relations; the finer
/// [`BuildingKind`] classification happens after the document is in hand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Way,
    Relation,
}

/// Classification of the root building entity
///
/// Produced exactly once by the classifier and carried on the assembled
/// building; never re-derived from tags at other call sites.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// A plain closed way tagged as a building
    Way,
    /// A relation tagged type=multipolygon
    Multipolygon,
    /// Any other relation (typically type=building with outline/part members)
    Relation,
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildingKind::Way => "way",
            BuildingKind::Multipolygon => "multipolygon",
            BuildingKind::Relation => "relation",
        };
        write!(f, "{name}")
    }
}

/// Structural form of one building part
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// Footprint from a single closed way
    Way,
    /// Footprint from a multipolygon relation (outer ring plus holes)
    Multipolygon,
}

/// Roof archetype from the `roof:shape` tag
///
/// Unrecognized values are preserved with their original string so the
/// parameterizer can surface them as an explicit unsupported-shape error.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofShape {
    Flat,
    Dome,
    Skillion,
    Onion,
    Gabled,
    Pyramidal,
    Unknown(String),
}

impl RoofShape {
    /// Parse a `roof:shape` tag value
    pub fn parse(s: &str) -> Self {
        match s {
            "flat" => RoofShape::Flat,
            "dome" => RoofShape::Dome,
            "skillion" => RoofShape::Skillion,
            "onion" => RoofShape::Onion,
            "gabled" => RoofShape::Gabled,
            "pyramidal" => RoofShape::Pyramidal,
            _ => RoofShape::Unknown(s.to_string()),
        }
    }

    /// The tag value this shape was parsed from
    pub fn name(&self) -> &str {
        match self {
            RoofShape::Flat => "flat",
            RoofShape::Dome => "dome",
            RoofShape::Skillion => "skillion",
            RoofShape::Onion => "onion",
            RoofShape::Gabled => "gabled",
            RoofShape::Pyramidal => "pyramidal",
            RoofShape::Unknown(s) => s,
        }
    }
}

impl Default for RoofShape {
    fn default() -> Self {
        RoofShape::Flat
    }
}

impl fmt::Display for RoofShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Roof ridge orientation relative to the footprint's long axis
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoofOrientation {
    #[default]
    Along,
    Across,
}

impl RoofOrientation {
    /// Parse a `roof:orientation` tag value; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "along" => Some(RoofOrientation::Along),
            "across" => Some(RoofOrientation::Across),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_union_is_monotonic() {
        let a = Extents::new(0.0, 0.0, 1.0, 1.0);
        let b = Extents::new(0.5, -1.0, 2.0, 0.5);
        let u = a.union(&b);
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert_eq!(u, Extents::new(0.0, -1.0, 2.0, 1.0));
    }

    #[test]
    fn empty_extents_is_degenerate_until_included() {
        let mut e = Extents::EMPTY;
        assert!(e.is_degenerate());
        e.include(10.0, 20.0);
        assert!(!e.is_degenerate());
        assert_eq!(e, Extents::from_point(10.0, 20.0));
    }

    #[test]
    fn extents_center_is_midpoint() {
        let e = Extents::new(2.0, 4.0, 4.0, 8.0);
        assert_eq!(e.center(), LonLat::new(3.0, 6.0));
    }

    #[test]
    fn extents_intersection() {
        let a = Extents::new(0.0, 0.0, 2.0, 2.0);
        let b = Extents::new(1.0, 1.0, 3.0, 3.0);
        let c = Extents::new(5.0, 5.0, 6.0, 6.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn roof_shape_parse_round_trips() {
        assert_eq!(RoofShape::parse("dome"), RoofShape::Dome);
        assert_eq!(RoofShape::parse("hipped").name(), "hipped");
        assert_eq!(RoofShape::default(), RoofShape::Flat);
    }

    #[test]
    fn roof_orientation_parse() {
        assert_eq!(RoofOrientation::parse("across"), Some(RoofOrientation::Across));
        assert_eq!(RoofOrientation::parse("diagonal"), None);
    }
}
