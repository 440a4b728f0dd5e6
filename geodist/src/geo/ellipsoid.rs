use super::GeoError;
use crate::defaults::{WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

/// Reference ellipsoid parameters
///
/// for earth, use [`Ellipsoid::WGS84`] (the [`Default`]).
///
/// The semi minor axis is derived: `b = (1 - f) * a`.
///
/// ```
/// use geodist::geo::Ellipsoid;
///
/// let wgs84 = Ellipsoid::WGS84;
/// assert!((wgs84.semi_minor_axis() - 6_356_752.314245).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi Major Axis in meter / Radius at equator
    semi_major_axis: f64,
    /// flattening `f = (a - b) / a`
    flattening: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984, used by GPS.
    pub const WGS84: Self = Self {
        semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
        flattening: 1.0 / WGS84_INVERSE_FLATTENING,
    };

    /// Geodetic Reference System 1980.
    pub const GRS80: Self = Self {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_222_101,
    };

    /// Creates an ellipsoid from its semi major axis (meters) and flattening.
    ///
    /// The semi major axis must be finite and positive and the flattening
    /// must be within `(0, 1)`.
    pub fn new(semi_major_axis: f64, flattening: f64) -> Result<Self, GeoError> {
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(GeoError::InvalidSemiMajorAxis {
                value: semi_major_axis,
            });
        }
        if !(flattening > 0.0 && flattening < 1.0) {
            return Err(GeoError::InvalidFlattening { value: flattening });
        }

        Ok(Self {
            semi_major_axis,
            flattening,
        })
    }

    /// Creates an ellipsoid from its semi major axis and inverse flattening `1/f`.
    ///
    /// ```
    /// use geodist::geo::Ellipsoid;
    ///
    /// let ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257223563).unwrap();
    /// assert_eq!(ellipsoid, Ellipsoid::WGS84);
    /// ```
    pub fn from_inverse_flattening(
        semi_major_axis: f64,
        inverse_flattening: f64,
    ) -> Result<Self, GeoError> {
        Self::new(semi_major_axis, 1.0 / inverse_flattening)
    }

    #[inline]
    pub const fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    #[inline]
    pub const fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Semi minor axis in meter / Radius at pole
    #[inline]
    pub const fn semi_minor_axis(&self) -> f64 {
        (1.0 - self.flattening) * self.semi_major_axis
    }

    /// `(a² - b²) / b²`, scales `cos²α` into `u²` in the inverse solution.
    pub fn second_eccentricity_squared(&self) -> f64 {
        let a = self.semi_major_axis;
        let b = self.semi_minor_axis();
        (a * a - b * b) / (b * b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
