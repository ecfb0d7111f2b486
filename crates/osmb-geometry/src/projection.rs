// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local tangent-plane projection
//!
//! Rotates geographic coordinates so the home point lands on (0, 0) of a
//! local planar frame, on a sphere of mean Earth radius. The derivation
//! goes through a 3D position on the sphere and back to the plane; the
//! output feeds polygon construction directly, so the exact trigonometric
//! form matters, not just its small-angle behavior.

use nalgebra::Point2;
use osmb_model::LonLat;

/// Mean Earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Project a geographic point into the home-centered planar frame
///
/// Input in degrees, output in meters. `reposition(home, home)` is the
/// origin. Non-finite inputs propagate as non-finite outputs.
pub fn reposition(point: LonLat, home: LonLat) -> Point2<f64> {
    let phi = (90.0 - point.lat).to_radians();
    let theta = (point.lon - home.lon).to_radians();
    let theta_prime = home.lat.to_radians();

    let x = EARTH_RADIUS * theta.sin() * phi.sin();
    let y = EARTH_RADIUS * phi.cos();
    let z = EARTH_RADIUS * phi.sin() * theta.cos();

    let planar = (z * z + y * y).sqrt();
    let arg = (y / z).atan() - theta_prime;

    Point2::new(x, arg.sin() * planar)
}
