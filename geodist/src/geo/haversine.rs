use super::{DistanceAlgorithm, GeoError, GeographicPoint};
use crate::defaults::EARTH_RADIUS;

/// Great-circle distance on a sphere using the haversine formula.
///
/// Closed form, no iteration and no failure mode. It is a fast cross-check
/// of [`VincentyInverse`] (both agree to within ~0.2% for short distances)
/// and the fallback when the iterative solver does not converge.
///
/// [Wikipedia Haversine formula](https://en.wikipedia.org/wiki/Haversine_formula)
///
/// [`VincentyInverse`]: super::vincenty::VincentyInverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    radius: f64,
}

impl Haversine {
    /// Sphere of radius [`EARTH_RADIUS`].
    pub const EARTH: Self = Self {
        radius: EARTH_RADIUS,
    };

    /// Creates the formula for a sphere of the given radius in meters.
    pub fn new(radius: f64) -> Result<Self, GeoError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeoError::InvalidRadius { value: radius });
        }

        Ok(Self { radius })
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance in meters between `p1` and `p2`.
    ///
    /// ```
    /// use geodist::geo::{GeographicPoint, haversine::Haversine};
    ///
    /// let p1 = GeographicPoint::new(23.205402, 120.335066);
    /// let p2 = GeographicPoint::new(23.202188, 120.339733);
    ///
    /// let meters = Haversine::EARTH.distance(p1, p2);
    /// assert!((meters - 596.671).abs() < 0.001);
    /// ```
    pub fn distance(&self, p1: GeographicPoint, p2: GeographicPoint) -> f64 {
        let (lat1, lon1) = p1.to_radians();
        let (lat2, lon2) = p2.to_radians();

        let sin_half_dlat = ((lat2 - lat1) / 2.0).sin();
        let sin_half_dlon = ((lon2 - lon1) / 2.0).sin();

        let h = sin_half_dlat * sin_half_dlat
            + lat1.cos() * lat2.cos() * sin_half_dlon * sin_half_dlon;
        // rounding can push h slightly out of asin's domain
        let h = h.clamp(0.0, 1.0);

        2.0 * self.radius * h.sqrt().asin()
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::EARTH
    }
}

impl DistanceAlgorithm for Haversine {
    fn distance(&self, p1: GeographicPoint, p2: GeographicPoint) -> Result<f64, GeoError> {
        Ok(Haversine::distance(self, p1, p2))
    }
}
