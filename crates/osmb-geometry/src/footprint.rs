// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint polygons
//!
//! A footprint is the 2D polygon derived from a closed way's projected node
//! sequence: the outer ring as given (closing point retained) plus optional
//! holes contributed by multipolygon inner rings. All extent, width, and
//! radius queries the attribute resolver and roof parameterizer need live
//! here.

use crate::error::{Error, Result};
use nalgebra::Point2;
use osmb_model::Extents;

/// A 2D polygon with optional holes
///
/// The outer ring keeps the source node sequence, so a closed way of n
/// distinct corners carries n + 1 points with `outer[0] == outer[n]`.
/// Queries that must not double-count the closing point use the distinct
/// ring internally.
#[derive(Clone, Debug, PartialEq)]
pub struct Footprint {
    outer: Vec<Point2<f64>>,
    holes: Vec<Vec<Point2<f64>>>,
}

/// Strip a duplicated closing point from a ring
fn distinct(ring: &[Point2<f64>]) -> &[Point2<f64>] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Shoelace signed area over a ring; positive for counter-clockwise
fn signed_area(ring: &[Point2<f64>]) -> f64 {
    let pts = distinct(ring);
    if pts.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..pts.len() {
        let a = &pts[i];
        let b = &pts[(i + 1) % pts.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

impl Footprint {
    /// Create a footprint from an ordered point ring
    pub fn new(outer: Vec<Point2<f64>>) -> Result<Self> {
        if outer.is_empty() {
            return Err(Error::footprint("empty outer ring"));
        }
        Ok(Self {
            outer,
            holes: Vec::new(),
        })
    }

    /// Attach a hole ring
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// The outer ring as stored
    pub fn outer(&self) -> &[Point2<f64>] {
        &self.outer
    }

    /// Holes as stored
    pub fn holes(&self) -> &[Vec<Point2<f64>>] {
        &self.holes
    }

    /// Number of points in the outer ring, closing point included
    pub fn point_count(&self) -> usize {
        self.outer.len()
    }

    /// Bounding box of the outer ring
    pub fn extents(&self) -> Extents {
        let mut extents = Extents::from_point(self.outer[0].x, self.outer[0].y);
        for p in &self.outer[1..] {
            extents.include(p.x, p.y);
        }
        extents
    }

    /// The maximum dimension of the bounding box
    pub fn width(&self) -> f64 {
        let e = self.extents();
        e.width().max(e.height())
    }

    /// Radius of the largest circle inscribed in the bounding box
    ///
    /// Half the smaller box dimension; an approximation of the true
    /// inscribed circle that matches the dome and onion sizing rules.
    pub fn inscribed_radius(&self) -> f64 {
        let e = self.extents();
        e.width().min(e.height()) / 2.0
    }

    /// Centroid as the mean of the distinct outer vertices
    pub fn center(&self) -> Point2<f64> {
        let pts = distinct(&self.outer);
        let n = pts.len() as f64;
        let (sx, sy) = pts
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2::new(sx / n, sy / n)
    }

    /// Signed area of the outer ring; positive for counter-clockwise
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.outer)
    }

    /// True when the outer ring winds clockwise
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// The outer ring normalized to counter-clockwise winding
    pub fn ccw_ring(&self) -> Vec<Point2<f64>> {
        let mut ring = self.outer.clone();
        if self.is_clockwise() {
            ring.reverse();
        }
        ring
    }

    /// Triangulate the footprint, holes included
    ///
    /// Returns triangle indices into the flattened vertex array of the
    /// distinct outer ring followed by the distinct hole rings.
    pub fn triangulate(&self) -> Result<Vec<usize>> {
        let outer = distinct(&self.outer);
        if outer.len() < 3 {
            return Err(Error::triangulation(
                "need at least 3 points to triangulate",
            ));
        }

        let mut vertices = Vec::with_capacity(
            (outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>()) * 2,
        );
        for p in outer {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            let hole = distinct(hole);
            if hole.len() < 3 {
                continue;
            }
            hole_indices.push(vertices.len() / 2);
            for p in hole {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::triangulation(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Footprint {
        Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn square_extents() {
        assert_eq!(square().extents(), Extents::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn width_and_inscribed_radius() {
        let fp = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(fp.width(), 4.0);
        assert_eq!(fp.inscribed_radius(), 1.0);
    }

    #[test]
    fn center_ignores_closing_point() {
        let c = square().center();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
    }

    #[test]
    fn winding() {
        let fp = square();
        assert!(fp.signed_area() > 0.0);
        assert!(!fp.is_clockwise());

        let mut reversed = fp.outer().to_vec();
        reversed.reverse();
        let cw = Footprint::new(reversed).unwrap();
        assert!(cw.is_clockwise());
        assert!(signed_area(&cw.ccw_ring()) > 0.0);
    }

    #[test]
    fn triangulates_square() {
        let indices = square().triangulate().unwrap();
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn triangulates_with_hole() {
        let mut fp = Footprint::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        fp.add_hole(vec![
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 6.0),
            Point2::new(6.0, 6.0),
            Point2::new(6.0, 4.0),
            Point2::new(4.0, 4.0),
        ]);
        let indices = fp.triangulate().unwrap();
        // 8 triangles for a square ring with a square hole
        assert_eq!(indices.len(), 24);
    }

    #[test]
    fn empty_ring_is_an_error() {
        assert!(Footprint::new(Vec::new()).is_err());
    }
}
