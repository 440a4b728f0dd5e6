//! Geodesic distance between two points given in latitude/longitude.
//!
//! The core is [`VincentyInverse`](geo::VincentyInverse), Vincenty's
//! iterative inverse solution on a reference ellipsoid, accurate to
//! sub-millimeter. [`Haversine`](geo::Haversine) is the closed form
//! spherical approximation, used as a cross-check and as a fallback.
//!
//! ```
//! let vincenty = geodist::vincenty_distance(23.205402, 120.335066, 23.202188, 120.339733);
//! let haversine = geodist::haversine_distance(23.205402, 120.335066, 23.202188, 120.339733);
//!
//! assert!((vincenty - 595.768).abs() < 0.001);
//! assert!((haversine - 596.671).abs() < 0.001);
//! ```
//!
//! Every computation is a pure function of its inputs: nothing is shared
//! and all the types are `Copy`.

pub mod defaults;
pub mod geo;

pub use self::geo::{
    DistanceAlgorithm, DistanceMethod, Ellipsoid, GeoError, GeographicPoint, Haversine,
    InverseSolution, Vincenty, VincentyInverse,
};

/// Distance in meters using the Vincenty inverse formula on WGS-84.
///
/// Uses [`DEFAULT_TOLERANCE`] and [`DEFAULT_MAX_ITERATIONS`]. Returns `0`
/// for coincident points **and** when the formula does not converge; use
/// [`VincentyInverse::solve`] to tell both apart.
///
/// ```
/// // nearly antipodal points do not converge
/// assert_eq!(geodist::vincenty_distance(0.0, 0.0, 0.0, 179.5), 0.0);
/// ```
///
/// [`DEFAULT_TOLERANCE`]: defaults::DEFAULT_TOLERANCE
/// [`DEFAULT_MAX_ITERATIONS`]: defaults::DEFAULT_MAX_ITERATIONS
pub fn vincenty_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let solution = VincentyInverse::default().solve(
        GeographicPoint::new(lat1, lon1),
        GeographicPoint::new(lat2, lon2),
        &Ellipsoid::WGS84,
    );

    if solution.converged {
        solution.distance
    } else {
        0.0
    }
}

/// Distance in meters using the haversine formula on a sphere of radius
/// [`EARTH_RADIUS`].
///
/// [`EARTH_RADIUS`]: defaults::EARTH_RADIUS
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine::EARTH.distance(
        GeographicPoint::new(lat1, lon1),
        GeographicPoint::new(lat2, lon2),
    )
}

/// Distance in meters using the Vincenty inverse formula, falling back to
/// the haversine formula when it does not converge.
///
/// ```
/// use geodist::GeographicPoint;
///
/// let p1 = GeographicPoint::new(0.0, 0.0);
/// let p2 = GeographicPoint::new(0.0, 179.5);
///
/// let meters = geodist::distance_with_fallback(p1, p2);
/// assert!(meters > 19_000_000.0);
/// ```
pub fn distance_with_fallback(point1: GeographicPoint, point2: GeographicPoint) -> f64 {
    let solution = Vincenty::default().solve(point1, point2);
    if solution.converged {
        return solution.distance;
    }

    log::debug!(
        "falling back to haversine for ({point1}) -> ({point2}) after {} iterations",
        solution.iterations
    );
    Haversine::EARTH.distance(point1, point2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convenience_fixture() {
        let vincenty = vincenty_distance(23.205402, 120.335066, 23.202188, 120.339733);
        let haversine = haversine_distance(23.205402, 120.335066, 23.202188, 120.339733);

        assert!((vincenty - 595.768).abs() < 0.001);
        assert!((haversine - 596.671).abs() < 0.001);
        assert_ne!(vincenty, haversine);
    }

    #[test]
    fn convenience_coincident_points() {
        assert_eq!(vincenty_distance(23.205402, 120.335066, 23.205402, 120.335066), 0.0);
        assert_eq!(haversine_distance(23.205402, 120.335066, 23.205402, 120.335066), 0.0);
    }

    #[test]
    fn convenience_non_convergence_is_zero() {
        assert_eq!(vincenty_distance(0.0, 0.0, 0.0, 180.0), 0.0);
    }

    #[test]
    fn fallback_uses_vincenty_when_it_converges() {
        let p1 = GeographicPoint::new(23.205402, 120.335066);
        let p2 = GeographicPoint::new(23.202188, 120.339733);

        assert_eq!(
            distance_with_fallback(p1, p2),
            vincenty_distance(p1.latitude, p1.longitude, p2.latitude, p2.longitude)
        );
    }

    #[test]
    fn fallback_uses_haversine_when_vincenty_fails() {
        let p1 = GeographicPoint::new(0.0, 0.0);
        let p2 = GeographicPoint::new(0.0, 179.5);

        assert_eq!(
            distance_with_fallback(p1, p2),
            haversine_distance(0.0, 0.0, 0.0, 179.5)
        );
    }

    #[test]
    fn distances_are_send_and_sync() {
        fn is_send_sync<T: Send + Sync + Copy>() {}

        is_send_sync::<GeographicPoint>();
        is_send_sync::<Ellipsoid>();
        is_send_sync::<VincentyInverse>();
        is_send_sync::<Haversine>();
        is_send_sync::<InverseSolution>();
        is_send_sync::<DistanceMethod>();
    }

    #[test]
    fn concurrent_calls_agree() {
        let expected = vincenty_distance(48.8566, 2.3522, 51.5074, -0.1278);

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| vincenty_distance(48.8566, 2.3522, 51.5074, -0.1278)))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
