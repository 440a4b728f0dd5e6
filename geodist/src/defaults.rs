/// Semi major axis of the WGS-84 reference ellipsoid, in meters.
///
/// This is also the radius of the equator.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// Inverse flattening (`1/f`) of the WGS-84 reference ellipsoid.
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Default maximum number of iterations of the Vincenty inverse solver.
///
/// See [`VincentyInverse`] for more details
///
/// ```
/// # use geodist::defaults::*;
/// # use geodist::geo::vincenty::VincentyInverse;
/// assert_eq!(
///     VincentyInverse::default().max_iterations(),
///     DEFAULT_MAX_ITERATIONS,
/// );
/// ```
///
/// [`VincentyInverse`]: crate::geo::vincenty::VincentyInverse
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default convergence tolerance on the auxiliary longitude, in radians.
///
/// `1e-12` radians corresponds to approximately 0.06mm on the
/// surface of the Earth.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Radius of the sphere used by the haversine reference formula, in meters.
///
/// The equatorial radius is used so the spherical and the ellipsoidal
/// models agree along the equator.
pub const EARTH_RADIUS: f64 = WGS84_SEMI_MAJOR_AXIS;
