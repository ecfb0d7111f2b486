// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single building part
//!
//! A part is one renderable unit: a footprint over the shared projected
//! node table plus a resolved option set. The outer element is itself a
//! part with no inherited tier; every other part inherits the outer
//! element's resolved options.

use crate::shape::{multipolygon_footprint, way_footprint};
use log::warn;
use osmb_geometry::{roof_geometry, wall_extrusion_depth, Footprint, RoofGeometry};
use osmb_model::{
    ElementId, NodeTable, OptionSet, PartInfo, PartKind, ResolveContext, Result, SpecifiedOptions,
    TagQuery,
};
use osmb_xml::{OsmDocument, OsmRelation, OsmWay, TagSet};
use std::sync::Arc;

/// One renderable building part
///
/// Options are resolved once at construction and immutable afterwards.
#[derive(Clone, Debug)]
pub struct BuildingPart {
    id: ElementId,
    kind: PartKind,
    nodes: Arc<NodeTable>,
    footprint: Footprint,
    options: OptionSet,
}

/// Everything the renderer needs for one part
///
/// One footprint, one resolved option set, one roof parameter bundle. The
/// roof is absent when its shape has no parameterization; that condition
/// is surfaced as a diagnostic where the unit is assembled.
#[derive(Debug)]
pub struct RenderUnit<'a> {
    pub footprint: &'a Footprint,
    pub options: &'a OptionSet,
    /// Extrusion depth of the wall body
    pub wall_depth: f64,
    /// Height above ground where the body starts
    pub base_offset: f64,
    pub roof: Option<RoofGeometry>,
}

impl BuildingPart {
    /// Build a part from a closed way
    pub(crate) fn from_way(
        way: &OsmWay,
        nodes: &Arc<NodeTable>,
        inherited: Option<&OptionSet>,
    ) -> Result<Self> {
        let footprint = way_footprint(way, nodes)?;
        Self::with_footprint(way.id(), PartKind::Way, footprint, way.tags(), nodes, inherited)
    }

    /// Build a part from a multipolygon relation
    pub(crate) fn from_relation(
        relation: &OsmRelation,
        document: &OsmDocument,
        nodes: &Arc<NodeTable>,
        inherited: Option<&OptionSet>,
    ) -> Result<Self> {
        let footprint = multipolygon_footprint(relation, document, nodes)?;
        Self::with_footprint(
            relation.id(),
            PartKind::Multipolygon,
            footprint,
            relation.tags(),
            nodes,
            inherited,
        )
    }

    fn with_footprint(
        id: ElementId,
        kind: PartKind,
        footprint: Footprint,
        tags: &TagSet,
        nodes: &Arc<NodeTable>,
        inherited: Option<&OptionSet>,
    ) -> Result<Self> {
        let specified = SpecifiedOptions::from_tags(tags)?;
        let ctx = ResolveContext {
            id,
            inscribed_radius: footprint.inscribed_radius(),
            part_role: tags.tag("building:part").map(str::to_owned),
        };
        let options = OptionSet::resolve(&specified, inherited, &ctx);
        Ok(Self {
            id,
            kind,
            nodes: Arc::clone(nodes),
            footprint,
            options,
        })
    }

    /// The part's identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Structural form of the part
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// The shared projected node table
    pub fn nodes(&self) -> &Arc<NodeTable> {
        &self.nodes
    }

    /// The part's footprint polygon
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// The resolved option set
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Derive the roof parameter bundle
    ///
    /// Unsupported shapes (gabled, unrecognized values) are an explicit
    /// error here, left to the caller to degrade or propagate.
    pub fn roof(&self) -> osmb_geometry::Result<RoofGeometry> {
        roof_geometry(&self.options, &self.footprint)
    }

    /// Extrusion depth of the wall body
    pub fn wall_depth(&self) -> f64 {
        wall_extrusion_depth(&self.options)
    }

    /// Assemble the renderer handoff for this part
    ///
    /// A roof without a parameterization degrades to a bare body with a
    /// diagnostic.
    pub fn render_unit(&self) -> RenderUnit<'_> {
        let roof = match self.roof() {
            Ok(roof) => Some(roof),
            Err(e) => {
                warn!("part {}: no roof geometry: {e}", self.id);
                None
            }
        };
        RenderUnit {
            footprint: &self.footprint,
            options: &self.options,
            wall_depth: self.wall_depth(),
            base_offset: self.options.building.min_height,
            roof,
        }
    }

    /// Serializable snapshot of this part
    pub fn info(&self) -> PartInfo {
        PartInfo {
            id: self.id,
            kind: self.kind,
            options: self.options.clone(),
        }
    }
}
