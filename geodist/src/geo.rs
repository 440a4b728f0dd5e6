mod angle;
pub mod ellipsoid;
pub mod haversine;
pub mod vincenty;

pub use self::{
    ellipsoid::Ellipsoid,
    haversine::Haversine,
    vincenty::{InverseSolution, Vincenty, VincentyInverse},
};

use anyhow::{Context as _, anyhow, ensure};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error(
        "latitude out of range [{min}, {max}]: {value}",
        min = GeographicPoint::MIN_LATITUDE,
        max = GeographicPoint::MAX_LATITUDE
    )]
    LatitudeOutOfRange { value: f64 },
    #[error(
        "longitude out of range [{min}, {max}]: {value}",
        min = GeographicPoint::MIN_LONGITUDE,
        max = GeographicPoint::MAX_LONGITUDE
    )]
    LongitudeOutOfRange { value: f64 },
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,
    #[error("semi major axis must be finite and positive, got {value}")]
    InvalidSemiMajorAxis { value: f64 },
    #[error("flattening must be within (0.0, 1.0), got {value}")]
    InvalidFlattening { value: f64 },
    #[error("sphere radius must be finite and positive, got {value}")]
    InvalidRadius { value: f64 },
    #[error("the iteration limit must be at least 1")]
    InvalidIterationLimit,
    #[error("convergence tolerance must be finite and positive, got {value}")]
    InvalidTolerance { value: f64 },
    #[error("vincenty inverse formula did not converge after {iterations} iterations")]
    NonConvergent { iterations: usize },
    #[error("geo computation produced a non-finite value")]
    NonFiniteComputation,
}

/// A point on the surface of the Earth, in decimal degrees.
///
/// Latitude is expected within `[-90, 90]` and longitude within
/// `[-180, 180]`. [`GeographicPoint::new`] does not enforce it: the
/// distance formulas are defined for any real value and the result of an
/// out-of-range input is the caller's responsibility. Use
/// [`GeographicPoint::try_new`] (or parsing) to validate.
///
/// # Examples
///
/// ```
/// use geodist::geo::GeographicPoint;
///
/// // Eastern longitude (Paris)
/// let paris = GeographicPoint::try_new(48.8566, 2.3522).unwrap();
/// // Western longitude (San Francisco)
/// let san_francisco = GeographicPoint::try_new(37.7749, -122.4194).unwrap();
///
/// assert!(paris.longitude > 0.0);
/// assert!(san_francisco.longitude < 0.0);
///
/// let parsed: GeographicPoint = "48.8566, 2.3522".parse().unwrap();
/// assert_eq!(parsed, paris);
/// assert_eq!(parsed.to_string(), "48.8566º, 2.3522º");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeographicPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeographicPoint {
    pub const MIN_LATITUDE: f64 = -90.0;
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MIN_LONGITUDE: f64 = -180.0;
    pub const MAX_LONGITUDE: f64 = 180.0;

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a point, rejecting non finite and out of range coordinates.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let point = Self::new(latitude, longitude);
        point.check_canonical()?;
        Ok(point)
    }

    /// Check the coordinates are finite and within the canonical ranges.
    pub fn check_canonical(&self) -> Result<(), GeoError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(GeoError::NonFiniteCoordinate);
        }
        if !(Self::MIN_LATITUDE..=Self::MAX_LATITUDE).contains(&self.latitude) {
            return Err(GeoError::LatitudeOutOfRange {
                value: self.latitude,
            });
        }
        if !(Self::MIN_LONGITUDE..=Self::MAX_LONGITUDE).contains(&self.longitude) {
            return Err(GeoError::LongitudeOutOfRange {
                value: self.longitude,
            });
        }

        Ok(())
    }

    pub fn is_canonical(&self) -> bool {
        self.check_canonical().is_ok()
    }

    /// `(latitude, longitude)` in radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for GeographicPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for GeographicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DEGREE_SUFFIX}, {}{DEGREE_SUFFIX}",
            self.latitude, self.longitude
        )
    }
}

impl FromStr for GeographicPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let Some(latitude_raw) = parts.next() else {
            return Err(anyhow!(
                "Failed to parse GeographicPoint: expected format `<latitude>, <longitude>`"
            ));
        };
        let Some(longitude_raw) = parts.next() else {
            return Err(anyhow!(
                "Failed to parse GeographicPoint: expected format `<latitude>, <longitude>`"
            ));
        };
        ensure!(
            parts.next().is_none(),
            "Failed to parse GeographicPoint: expected a single comma separator"
        );

        let latitude =
            parse_coordinate_degrees(latitude_raw).context("Failed to parse latitude")?;
        let longitude =
            parse_coordinate_degrees(longitude_raw).context("Failed to parse longitude")?;

        Self::try_new(latitude, longitude)
            .map_err(|error| anyhow!("Failed to parse GeographicPoint: {error}"))
    }
}

/// Common capability of the distance formulas.
pub trait DistanceAlgorithm {
    /// Distance in meters between two points.
    ///
    /// Iterative methods may fail to converge for some point pairs
    /// (notably nearly antipodal pairs), in which case an error is returned
    /// rather than a wrong distance.
    fn distance(&self, point1: GeographicPoint, point2: GeographicPoint) -> Result<f64, GeoError>;
}

/// Selects one of the distance formulas with its default parameters.
///
/// ```
/// use geodist::geo::{DistanceMethod, GeographicPoint};
///
/// let method: DistanceMethod = "haversine".parse().unwrap();
/// let paris = GeographicPoint::new(48.8566, 2.3522);
/// let london = GeographicPoint::new(51.5074, -0.1278);
///
/// let meters = method.distance(paris, london).unwrap();
/// assert!((meters - 343_940.9).abs() < 1.0);
/// assert_eq!(method.to_string(), "haversine");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMethod {
    /// Spherical model, [`Haversine::EARTH`]
    Haversine,
    /// Ellipsoidal model, [`VincentyInverse`] on [`Ellipsoid::WGS84`]
    #[default]
    VincentyInverse,
}

impl DistanceMethod {
    pub fn distance(
        self,
        point1: GeographicPoint,
        point2: GeographicPoint,
    ) -> Result<f64, GeoError> {
        match self {
            Self::Haversine => Ok(Haversine::EARTH.distance(point1, point2)),
            Self::VincentyInverse => Vincenty::default().distance(point1, point2),
        }
    }
}

impl DistanceAlgorithm for DistanceMethod {
    fn distance(&self, point1: GeographicPoint, point2: GeographicPoint) -> Result<f64, GeoError> {
        DistanceMethod::distance(*self, point1, point2)
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Haversine => f.write_str("haversine"),
            Self::VincentyInverse => f.write_str("vincenty"),
        }
    }
}

impl FromStr for DistanceMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haversine" => Ok(Self::Haversine),
            "vincenty" | "vincenty-inverse" => Ok(Self::VincentyInverse),
            other => Err(anyhow!(
                "Failed to parse DistanceMethod `{other}`: expected `haversine` or `vincenty`"
            )),
        }
    }
}

const DEGREE_SUFFIX: char = '\u{00BA}';
const ALT_DEGREE_SUFFIX: char = '\u{00B0}';

fn parse_coordinate_degrees(input: &str) -> anyhow::Result<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(DEGREE_SUFFIX)
        .or_else(|| trimmed.strip_suffix(ALT_DEGREE_SUFFIX))
        .unwrap_or(trimmed)
        .trim();

    ensure!(!trimmed.is_empty(), "cannot parse from empty string");

    trimmed
        .parse::<f64>()
        .map_err(|error| anyhow!("failed to parse `{input}`: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_western_longitude() {
        assert!(GeographicPoint::try_new(37.7749, -122.4194).is_ok());
    }

    #[test]
    fn rejects_invalid_latitude() {
        assert_eq!(
            GeographicPoint::try_new(91.0, 0.0).unwrap_err(),
            GeoError::LatitudeOutOfRange { value: 91.0 }
        );
    }

    #[test]
    fn rejects_invalid_longitude() {
        assert_eq!(
            GeographicPoint::try_new(0.0, 181.0).unwrap_err(),
            GeoError::LongitudeOutOfRange { value: 181.0 }
        );
    }

    #[test]
    fn rejects_non_finite_coordinate_degrees() {
        assert_eq!(
            GeographicPoint::try_new(f64::NAN, 0.0).unwrap_err(),
            GeoError::NonFiniteCoordinate
        );
        assert_eq!(
            GeographicPoint::try_new(0.0, f64::NEG_INFINITY).unwrap_err(),
            GeoError::NonFiniteCoordinate
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(GeographicPoint::new(90.0, 180.0).is_canonical());
        assert!(GeographicPoint::new(-90.0, -180.0).is_canonical());
        assert!(!GeographicPoint::new(-90.5, 0.0).is_canonical());
    }

    #[test]
    fn new_accepts_anything() {
        let point = GeographicPoint::new(100.0, 400.0);

        assert_eq!(point.latitude, 100.0);
        assert!(!point.is_canonical());
    }

    #[test]
    fn from_tuple() {
        let point: GeographicPoint = (23.205402, 120.335066).into();

        assert_eq!(point, GeographicPoint::new(23.205402, 120.335066));
    }

    #[test]
    fn to_radians() {
        let (lat, lon) = GeographicPoint::new(90.0, -180.0).to_radians();

        assert!((lat - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((lon + std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn display_and_parse() {
        let point = GeographicPoint::new(48.8566, 2.3522);

        assert_eq!(point.to_string(), "48.8566º, 2.3522º");
        assert_eq!("48.8566, 2.3522".parse::<GeographicPoint>().unwrap(), point);
        assert_eq!(
            "48.8566º, 2.3522º".parse::<GeographicPoint>().unwrap(),
            point
        );
        assert_eq!(
            " 48.8566\u{00B0} ,2.3522\u{00B0} "
                .parse::<GeographicPoint>()
                .unwrap(),
            point
        );
    }

    #[test]
    fn display_roundtrip() {
        let point = GeographicPoint::new(-49.35231574277824, 70.2150600748867);

        assert_eq!(
            point.to_string().parse::<GeographicPoint>().unwrap(),
            point
        );
    }

    #[test]
    fn parse_rejects_invalid_values() {
        let missing_separator = "48.8566".parse::<GeographicPoint>().unwrap_err().to_string();
        assert!(missing_separator.contains("expected format"));

        let extra_separator = "48.8566, 2.3522, 1"
            .parse::<GeographicPoint>()
            .unwrap_err()
            .to_string();
        assert!(extra_separator.contains("single comma"));

        let invalid_longitude = "48.8566, 181"
            .parse::<GeographicPoint>()
            .unwrap_err()
            .to_string();
        assert!(invalid_longitude.contains("longitude out of range"));

        let invalid_latitude = "abc, 2.3522"
            .parse::<GeographicPoint>()
            .unwrap_err()
            .to_string();
        assert!(invalid_latitude.contains("Failed to parse latitude"));

        assert!(", 2.3522".parse::<GeographicPoint>().is_err());
    }

    #[test]
    fn method_display_and_parse() {
        assert_eq!(DistanceMethod::Haversine.to_string(), "haversine");
        assert_eq!(DistanceMethod::VincentyInverse.to_string(), "vincenty");
        assert_eq!(
            " Vincenty ".parse::<DistanceMethod>().unwrap(),
            DistanceMethod::VincentyInverse
        );
        assert_eq!(
            "haversine".parse::<DistanceMethod>().unwrap(),
            DistanceMethod::Haversine
        );
        assert!("karney".parse::<DistanceMethod>().is_err());
        assert_eq!(DistanceMethod::default(), DistanceMethod::VincentyInverse);
    }

    #[test]
    fn methods_are_close_on_regular_case() {
        let p1 = GeographicPoint::new(48.8534, 2.3487);
        let p2 = GeographicPoint::new(-49.3523, 70.2150);

        let vincenty = DistanceMethod::VincentyInverse.distance(p1, p2).unwrap();
        let haversine = DistanceMethod::Haversine.distance(p1, p2).unwrap();

        assert!((vincenty - haversine).abs() / vincenty < 0.005);
    }

    #[test]
    fn method_reports_non_convergence() {
        let p1 = GeographicPoint::new(0.0, 0.0);
        let p2 = GeographicPoint::new(0.0, 180.0);

        assert!(matches!(
            DistanceMethod::VincentyInverse.distance(p1, p2),
            Err(GeoError::NonConvergent { .. })
        ));
        assert!(DistanceMethod::Haversine.distance(p1, p2).is_ok());
    }
}
