// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building and roof attribute resolution
//!
//! Every part resolves the same 17 fields through three tiers: a value
//! specified on the element's own tags, a value inherited from the outer
//! element's resolved set, and a field-specific computed default. The fold
//! is the same for every field — first present tier wins — with the
//! defaults supplied per field.
//!
//! Roof height is the one field whose default depends on other resolved
//! fields; it goes through an ordered rule table keyed by roof shape.

use crate::error::Result;
use crate::types::{ElementId, RoofOrientation, RoofShape};
use crate::units::{normalize_length, parse_number};
use crate::TagQuery;
use log::warn;
use serde::{Deserialize, Serialize};

/// Assumed storey height when deriving heights from level counts
pub const METERS_PER_LEVEL: f64 = 3.0;

/// Default body height for an element with no height information at all
pub const DEFAULT_BUILDING_HEIGHT: f64 = 3.0;

/// Attribute values read directly from one element's own tags
///
/// Every field is optional; absence means the tier contributes nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecifiedOptions {
    pub building: SpecifiedBuilding,
    pub roof: SpecifiedRoof,
}

/// Specified-tier building attributes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecifiedBuilding {
    pub colour: Option<String>,
    pub elevation: Option<f64>,
    pub height: Option<f64>,
    pub levels: Option<f64>,
    pub levels_underground: Option<f64>,
    pub material: Option<String>,
    pub min_height: Option<f64>,
    pub min_level: Option<f64>,
    pub walls: Option<String>,
}

/// Specified-tier roof attributes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecifiedRoof {
    pub angle: Option<f64>,
    pub colour: Option<String>,
    pub direction: Option<f64>,
    pub height: Option<f64>,
    pub levels: Option<f64>,
    pub material: Option<String>,
    pub orientation: Option<RoofOrientation>,
    pub shape: Option<RoofShape>,
}

impl SpecifiedOptions {
    /// Read the specified tier from an element's tags
    ///
    /// Length-valued tags (`height`, `min_height`, `roof:height`) go through
    /// length normalization; numeric tags must parse. A malformed value is a
    /// fatal typed error.
    pub fn from_tags(tags: &impl TagQuery) -> Result<Self> {
        let len = |key: &str| -> Result<Option<f64>> {
            tags.tag(key).map(|v| normalize_length(key, v)).transpose()
        };
        let num = |key: &str| -> Result<Option<f64>> {
            tags.tag(key).map(|v| parse_number(key, v)).transpose()
        };
        let text = |key: &str| tags.tag(key).map(str::to_owned);

        let orientation = tags.tag("roof:orientation").and_then(|v| {
            let parsed = RoofOrientation::parse(v);
            if parsed.is_none() {
                warn!("ignoring unknown roof:orientation '{v}'");
            }
            parsed
        });

        Ok(Self {
            building: SpecifiedBuilding {
                colour: text("colour"),
                elevation: num("ele")?,
                height: len("height")?,
                levels: num("building:levels")?,
                levels_underground: num("building:levels:underground")?,
                material: text("building:material"),
                min_height: len("min_height")?,
                min_level: num("building:min_level")?,
                walls: text("walls"),
            },
            roof: SpecifiedRoof {
                angle: num("roof:angle")?,
                colour: text("roof:colour"),
                direction: num("roof:direction")?,
                height: len("roof:height")?,
                levels: num("roof:levels")?,
                material: text("roof:material"),
                orientation,
                shape: tags.tag("roof:shape").map(RoofShape::parse),
            },
        })
    }
}

/// Fully resolved attribute bundle for one part
///
/// Computed once at part construction and immutable afterwards. Fields with
/// a defined computed default are concrete; the rest stay optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionSet {
    pub building: BuildingOptions,
    pub roof: RoofOptions,
}

/// Resolved building attributes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingOptions {
    pub colour: Option<String>,
    /// Ground elevation in meters, default 0
    pub elevation: f64,
    /// Full height of the part in meters, roof included
    pub height: f64,
    pub levels: Option<f64>,
    pub levels_underground: Option<f64>,
    pub material: Option<String>,
    /// Height above ground where the body starts, default 0
    pub min_height: f64,
    pub min_level: Option<f64>,
    pub walls: Option<String>,
}

/// Resolved roof attributes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoofOptions {
    pub angle: Option<f64>,
    pub colour: Option<String>,
    pub direction: Option<f64>,
    /// Vertical size of the roof volume in meters
    pub height: f64,
    pub levels: Option<f64>,
    pub material: Option<String>,
    pub orientation: RoofOrientation,
    pub shape: RoofShape,
}

/// Per-part inputs to resolution beyond the tag tiers
#[derive(Clone, Debug)]
pub struct ResolveContext {
    /// The part's identifier, for diagnostics
    pub id: ElementId,
    /// Radius of the largest circle inscribed in the part's footprint
    pub inscribed_radius: f64,
    /// Value of the element's `building:part` tag, if present
    pub part_role: Option<String>,
}

/// The three-tier fold: first present tier wins
fn first_present<T>(specified: Option<T>, inherited: Option<T>, default: impl FnOnce() -> T) -> T {
    specified.or(inherited).unwrap_or_else(default)
}

/// The fold for fields without a computed default
fn carried<T>(specified: Option<T>, inherited: Option<T>) -> Option<T> {
    specified.or(inherited)
}

/// Ordered roof-height rule table, first matching rule wins
///
/// Runs only when neither the specified nor the inherited tier supplied a
/// value. The onion shape's zero-height substitution is deliberately not
/// here; it is a shape-specific post-processing step in the parameterizer.
fn default_roof_height(levels: Option<f64>, shape: &RoofShape, inscribed_radius: f64) -> f64 {
    if let Some(levels) = levels {
        return levels * METERS_PER_LEVEL;
    }
    match shape {
        RoofShape::Flat => 0.0,
        RoofShape::Dome | RoofShape::Pyramidal => inscribed_radius,
        _ => 0.0,
    }
}

/// Computed default for the full body height
fn default_building_height(levels: Option<f64>, roof_height: f64, part_role: Option<&str>) -> f64 {
    if let Some(levels) = levels {
        return levels * METERS_PER_LEVEL + roof_height;
    }
    if part_role == Some("roof") {
        // A bare roof part has no body below it.
        return roof_height;
    }
    DEFAULT_BUILDING_HEIGHT
}

impl OptionSet {
    /// Resolve all 17 fields for one part
    ///
    /// `inherited` is the outer element's resolved set; the outer element
    /// itself passes `None`. Dependent fields resolve in order: shape and
    /// levels first, then roof height, then body height.
    pub fn resolve(
        specified: &SpecifiedOptions,
        inherited: Option<&OptionSet>,
        ctx: &ResolveContext,
    ) -> OptionSet {
        let inh_b = inherited.map(|o| &o.building);
        let inh_r = inherited.map(|o| &o.roof);

        let shape = first_present(
            specified.roof.shape.clone(),
            inh_r.map(|r| r.shape.clone()),
            RoofShape::default,
        );
        let orientation = first_present(
            specified.roof.orientation,
            inh_r.map(|r| r.orientation),
            RoofOrientation::default,
        );
        let levels = carried(specified.building.levels, inh_b.and_then(|b| b.levels));
        let roof_levels = carried(specified.roof.levels, inh_r.and_then(|r| r.levels));

        let roof_height = first_present(specified.roof.height, inh_r.map(|r| r.height), || {
            default_roof_height(roof_levels, &shape, ctx.inscribed_radius)
        });
        let height = first_present(specified.building.height, inh_b.map(|b| b.height), || {
            default_building_height(levels, roof_height, ctx.part_role.as_deref())
        });
        let min_level = carried(specified.building.min_level, inh_b.and_then(|b| b.min_level));
        let min_height = first_present(specified.building.min_height, inh_b.map(|b| b.min_height), || {
            min_level.map_or(0.0, |l| l * METERS_PER_LEVEL)
        });

        let resolved = OptionSet {
            building: BuildingOptions {
                colour: carried(
                    specified.building.colour.clone(),
                    inh_b.and_then(|b| b.colour.clone()),
                ),
                elevation: first_present(
                    specified.building.elevation,
                    inh_b.map(|b| b.elevation),
                    || 0.0,
                ),
                height,
                levels,
                levels_underground: carried(
                    specified.building.levels_underground,
                    inh_b.and_then(|b| b.levels_underground),
                ),
                material: carried(
                    specified.building.material.clone(),
                    inh_b.and_then(|b| b.material.clone()),
                ),
                min_height,
                min_level,
                walls: carried(
                    specified.building.walls.clone(),
                    inh_b.and_then(|b| b.walls.clone()),
                ),
            },
            roof: RoofOptions {
                angle: carried(specified.roof.angle, inh_r.and_then(|r| r.angle)),
                colour: carried(
                    specified.roof.colour.clone(),
                    inh_r.and_then(|r| r.colour.clone()),
                ),
                direction: carried(specified.roof.direction, inh_r.and_then(|r| r.direction)),
                height: roof_height,
                levels: roof_levels,
                material: carried(
                    specified.roof.material.clone(),
                    inh_r.and_then(|r| r.material.clone()),
                ),
                orientation,
                shape,
            },
        };

        // A part must not structurally exceed its parent's recorded height.
        if ctx.part_role.is_some() {
            if let Some(parent) = inherited {
                if resolved.building.height > parent.building.height {
                    warn!(
                        "part {} is taller than its building ({} > {})",
                        ctx.id, resolved.building.height, parent.building.height
                    );
                }
            }
        }

        resolved
    }
}
