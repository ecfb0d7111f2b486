// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof parameterization
//!
//! Turns a part's resolved options plus its footprint into the parameter
//! bundle the renderer needs, keyed by roof shape. Shapes without a
//! parameterization (gabled, anything unrecognized) are an explicit error,
//! never a silent no-op.

use crate::error::{Error, Result};
use crate::footprint::Footprint;
use crate::mesh::MeshData;
use nalgebra::{Point2, Point3};
use osmb_model::{OptionSet, RoofShape};
use std::f64::consts::TAU;

/// Colatitude where the onion sphere cap is truncated, in radians
pub const ONION_CAP_COLATITUDE: f64 = 2.53;

/// Geometric parameters of one roof, keyed by archetype
///
/// Elevations are heights above the part's ground plane where the roof
/// volume starts; the renderer places the primitive there.
#[derive(Clone, Debug, PartialEq)]
pub enum RoofGeometry {
    /// No roof volume; the body extrusion is capped flat
    Flat,
    /// Hemisphere scaled vertically to the roof height
    Dome {
        radius: f64,
        center: Point2<f64>,
        elevation: f64,
        vertical_scale: f64,
    },
    /// Single sloped plane over the footprint extrusion
    Skillion {
        /// Slope azimuth in radians, derived from `roof:direction`
        azimuth: f64,
        /// Pitch angle in degrees, when specified
        pitch: Option<f64>,
        depth: f64,
        elevation: f64,
    },
    /// Sphere truncated at a fixed colatitude cap
    Onion {
        radius: f64,
        center: Point2<f64>,
        elevation: f64,
        vertical_scale: f64,
        cap_colatitude: f64,
    },
    /// Triangle fan from every footprint edge to the apex
    Pyramidal {
        elevation: f64,
        depth: f64,
        mesh: MeshData,
    },
}

/// Derive the roof parameter bundle for one part
pub fn roof_geometry(options: &OptionSet, footprint: &Footprint) -> Result<RoofGeometry> {
    let building = &options.building;
    let roof = &options.roof;

    match &roof.shape {
        RoofShape::Flat => Ok(RoofGeometry::Flat),

        RoofShape::Dome => {
            let radius = positive_radius(footprint)?;
            Ok(RoofGeometry::Dome {
                radius,
                center: footprint.center(),
                elevation: building.height - roof.height,
                vertical_scale: roof.height / radius,
            })
        }

        RoofShape::Skillion => Ok(RoofGeometry::Skillion {
            azimuth: (360.0 - roof.direction.unwrap_or(0.0)) / 360.0 * TAU,
            pitch: roof.angle,
            depth: roof.height,
            elevation: building.height - roof.height,
        }),

        RoofShape::Onion => {
            let radius = positive_radius(footprint)?;
            // The generic fallback chain can leave an onion at height zero;
            // the radius stands in for the height in that case.
            let height = if roof.height == 0.0 { radius } else { roof.height };
            Ok(RoofGeometry::Onion {
                radius,
                center: footprint.center(),
                elevation: building.height - height,
                vertical_scale: height / radius,
                cap_colatitude: ONION_CAP_COLATITUDE,
            })
        }

        RoofShape::Pyramidal => Ok(RoofGeometry::Pyramidal {
            elevation: building.height - roof.height,
            depth: roof.height,
            mesh: pyramid_mesh(footprint, roof.height)?,
        }),

        RoofShape::Gabled => Err(Error::unsupported_roof_shape("gabled")),
        RoofShape::Unknown(name) => Err(Error::unsupported_roof_shape(name.clone())),
    }
}

/// Extrusion depth of the wall body below the roof
pub fn wall_extrusion_depth(options: &OptionSet) -> f64 {
    options.building.height - options.building.min_height - options.roof.height
}

fn positive_radius(footprint: &Footprint) -> Result<f64> {
    let radius = footprint.inscribed_radius();
    if radius > 0.0 {
        Ok(radius)
    } else {
        Err(Error::footprint("degenerate footprint has no radius"))
    }
}

/// Fan every footprint edge to the apex above the centroid
///
/// The ring is normalized to counter-clockwise winding first; with the
/// closing point retained, a ring of n points yields n - 1 triangles.
fn pyramid_mesh(footprint: &Footprint, depth: f64) -> Result<MeshData> {
    let ring = footprint.ccw_ring();
    if ring.len() < 4 {
        return Err(Error::footprint("pyramidal roof needs a closed ring"));
    }
    let center = footprint.center();
    let apex = Point3::new(center.x, center.y, depth);

    let mut mesh = MeshData::with_capacity((ring.len() - 1) * 3, (ring.len() - 1) * 3);
    for edge in ring.windows(2) {
        mesh.push_triangle([
            Point3::new(edge[0].x, edge[0].y, 0.0),
            apex,
            Point3::new(edge[1].x, edge[1].y, 0.0),
        ]);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use osmb_model::{ElementId, OptionSet, ResolveContext, SpecifiedOptions};
    use std::collections::HashMap;

    fn unit_square() -> Footprint {
        Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap()
    }

    fn options(pairs: &[(&str, &str)], footprint: &Footprint) -> OptionSet {
        let tags: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let specified = SpecifiedOptions::from_tags(&tags).unwrap();
        OptionSet::resolve(
            &specified,
            None,
            &ResolveContext {
                id: ElementId(1),
                inscribed_radius: footprint.inscribed_radius(),
                part_role: None,
            },
        )
    }

    #[test]
    fn flat_roof_has_no_volume() {
        let fp = unit_square();
        let opts = options(&[("height", "6")], &fp);
        assert_eq!(roof_geometry(&opts, &fp).unwrap(), RoofGeometry::Flat);
        assert_eq!(wall_extrusion_depth(&opts), 6.0);
    }

    #[test]
    fn wall_depth_subtracts_min_height_and_roof() {
        let fp = unit_square();
        let opts = options(
            &[("height", "6"), ("min_height", "2"), ("roof:shape", "skillion"), ("roof:height", "1")],
            &fp,
        );
        assert_eq!(wall_extrusion_depth(&opts), 3.0);
    }

    #[test]
    fn pyramidal_fan_has_one_triangle_per_edge() {
        let fp = unit_square();
        let opts = options(&[("roof:shape", "pyramidal"), ("roof:height", "3"), ("height", "9")], &fp);
        match roof_geometry(&opts, &fp).unwrap() {
            RoofGeometry::Pyramidal { elevation, depth, mesh } => {
                // 5-point closed ring, 4 edges, 4 triangles
                assert_eq!(mesh.triangle_count(), fp.point_count() - 1);
                assert_eq!(depth, 3.0);
                assert_eq!(elevation, 6.0);
                // Second corner of the first triangle is the apex at the centroid.
                assert_relative_eq!(mesh.positions[3], 0.5, epsilon = 1e-6);
                assert_relative_eq!(mesh.positions[4], 0.5, epsilon = 1e-6);
                assert_relative_eq!(mesh.positions[5], 3.0, epsilon = 1e-6);
            }
            other => panic!("expected pyramidal geometry, got {other:?}"),
        }
    }

    #[test]
    fn pyramidal_normalizes_clockwise_rings() {
        let mut reversed = unit_square().outer().to_vec();
        reversed.reverse();
        let fp = Footprint::new(reversed).unwrap();
        let opts = options(&[("roof:shape", "pyramidal"), ("roof:height", "2")], &fp);
        match roof_geometry(&opts, &fp).unwrap() {
            RoofGeometry::Pyramidal { mesh, .. } => {
                assert_eq!(mesh.triangle_count(), 4);
            }
            other => panic!("expected pyramidal geometry, got {other:?}"),
        }
    }

    #[test]
    fn dome_scales_to_roof_height() {
        let fp = unit_square();
        let opts = options(&[("roof:shape", "dome"), ("roof:height", "1"), ("height", "4")], &fp);
        match roof_geometry(&opts, &fp).unwrap() {
            RoofGeometry::Dome { radius, elevation, vertical_scale, center } => {
                assert_eq!(radius, 0.5);
                assert_eq!(elevation, 3.0);
                assert_eq!(vertical_scale, 2.0);
                assert_relative_eq!(center.x, 0.5);
            }
            other => panic!("expected dome geometry, got {other:?}"),
        }
    }

    #[test]
    fn onion_substitutes_radius_for_zero_height() {
        let fp = unit_square();
        let opts = options(&[("roof:shape", "onion"), ("height", "4")], &fp);
        assert_eq!(opts.roof.height, 0.0);
        match roof_geometry(&opts, &fp).unwrap() {
            RoofGeometry::Onion { radius, vertical_scale, elevation, cap_colatitude, .. } => {
                assert_eq!(radius, 0.5);
                assert_eq!(vertical_scale, 1.0);
                assert_eq!(elevation, 3.5);
                assert_eq!(cap_colatitude, ONION_CAP_COLATITUDE);
            }
            other => panic!("expected onion geometry, got {other:?}"),
        }
    }

    #[test]
    fn skillion_azimuth_from_direction() {
        let fp = unit_square();
        let opts = options(
            &[("roof:shape", "skillion"), ("roof:height", "2"), ("roof:direction", "90"), ("roof:angle", "15"), ("height", "5")],
            &fp,
        );
        match roof_geometry(&opts, &fp).unwrap() {
            RoofGeometry::Skillion { azimuth, pitch, depth, elevation } => {
                assert_relative_eq!(azimuth, 0.75 * TAU, epsilon = 1e-12);
                assert_eq!(pitch, Some(15.0));
                assert_eq!(depth, 2.0);
                assert_eq!(elevation, 3.0);
            }
            other => panic!("expected skillion geometry, got {other:?}"),
        }
    }

    #[test]
    fn gabled_is_explicitly_unsupported() {
        let fp = unit_square();
        let opts = options(&[("roof:shape", "gabled")], &fp);
        match roof_geometry(&opts, &fp) {
            Err(Error::UnsupportedRoofShape(name)) => assert_eq!(name, "gabled"),
            other => panic!("expected unsupported shape, got {other:?}"),
        }
    }

    #[test]
    fn unknown_shape_is_explicitly_unsupported() {
        let fp = unit_square();
        let opts = options(&[("roof:shape", "hipped")], &fp);
        match roof_geometry(&opts, &fp) {
            Err(Error::UnsupportedRoofShape(name)) => assert_eq!(name, "hipped"),
            other => panic!("expected unsupported shape, got {other:?}"),
        }
    }
}
