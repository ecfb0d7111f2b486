// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length and number normalization for tag values
//!
//! OSM length tags come in several formats: a bare number in meters, a
//! number with an explicit `m` suffix, or imperial feet/inches (`15'6"`).
//! A value that fits none of these is a typed error, not a NaN.

use crate::error::{ModelError, Result};

/// Common unit scales for reference
pub mod scales {
    /// Feet to meters
    pub const FOOT: f64 = 0.3048;
    /// Inches to meters
    pub const INCH: f64 = 0.0254;
}

/// Convert a length tag value in any supported format to meters
///
/// Accepted formats: `"12"`, `"12.5"`, `"12 m"`, `"12m"`, `"15'"`,
/// `"15'6\""`. The tag key is carried only for error reporting.
pub fn normalize_length(key: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::malformed_length(key, value));
    }

    if let Some((feet, inches)) = trimmed.split_once('\'') {
        let feet: f64 = feet
            .trim()
            .parse()
            .map_err(|_| ModelError::malformed_length(key, value))?;
        let inches = inches.trim().trim_end_matches('"').trim();
        let inches: f64 = if inches.is_empty() {
            0.0
        } else {
            inches
                .parse()
                .map_err(|_| ModelError::malformed_length(key, value))?
        };
        return Ok((feet + inches / 12.0) * scales::FOOT);
    }

    let meters = trimmed
        .strip_suffix('m')
        .map(str::trim_end)
        .unwrap_or(trimmed);
    meters
        .parse()
        .map_err(|_| ModelError::malformed_length(key, value))
}

/// Parse a plain numeric tag value (levels, angles, directions)
pub fn parse_number(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ModelError::malformed_number(key, value))
}
