//! Angle helpers shared by the distance algorithms.

// remainder of x/y in the range [-y/2, y/2]
fn remainder(x: f64, y: f64) -> f64 {
    let z = if x.is_finite() { x % y } else { f64::NAN };
    // keep the sign of a zero input
    let z = if x == 0.0 { x } else { z };

    if z < -y / 2.0 {
        z + y
    } else if z < y / 2.0 {
        z
    } else {
        z - y
    }
}

/// Reduce an angle in degrees to `(-180, 180]`.
///
/// Non finite angles are mapped to `NaN`.
pub(crate) fn normalize_degrees(x: f64) -> f64 {
    let y = remainder(x, 360.0);
    if y == -180.0 { 180.0 } else { y }
}

/// Convert an angle in radians into a compass bearing in `[0, 360)` degrees.
pub(crate) fn compass_degrees(radians: f64) -> f64 {
    let degrees = radians.to_degrees().rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if degrees >= 360.0 { 0.0 } else { degrees }
}
