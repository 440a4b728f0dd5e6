use super::{DistanceAlgorithm, Ellipsoid, GeoError, GeographicPoint, angle};
use crate::defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Vincenty inverse formula, parametrized with the maximum number of
/// iterations and the convergence tolerance (in radians) on the auxiliary
/// longitude `λ`.
///
/// Known limitation:
/// this iterative method can fail to converge for nearly antipodal point pairs
/// (including exact antipodes). This is reported with
/// [`InverseSolution::converged`] set to `false`, never as a zero distance.
///
/// [Wikipedia Vincenty formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)
///
/// # Example
///
/// ```
/// use geodist::geo::{Ellipsoid, GeographicPoint, vincenty::VincentyInverse};
///
/// let p1 = GeographicPoint::new(23.205402, 120.335066);
/// let p2 = GeographicPoint::new(23.202188, 120.339733);
///
/// let solution = VincentyInverse::default().solve(p1, p2, &Ellipsoid::WGS84);
/// assert!(solution.converged);
/// assert!((solution.distance - 595.768).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VincentyInverse {
    max_iterations: usize,
    tolerance: f64,
}

/// Outcome of one [`VincentyInverse::solve`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Geodesic distance in meters.
    ///
    /// When the solver did not converge this is the estimate computed from
    /// the last iterate and should not be trusted.
    pub distance: f64,
    /// Forward azimuth at the first point, radians clockwise from north in
    /// `[-π, π]`. `None` for coincident points or without convergence.
    pub initial_bearing: Option<f64>,
    /// Azimuth of the geodesic at the second point, same convention as
    /// `initial_bearing`.
    pub final_bearing: Option<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    pub converged: bool,
}

impl VincentyInverse {
    /// Creates a solver, `max_iterations` must be at least `1` and
    /// `tolerance` a finite, strictly positive number of radians.
    pub fn new(max_iterations: usize, tolerance: f64) -> Result<Self, GeoError> {
        if max_iterations == 0 {
            return Err(GeoError::InvalidIterationLimit);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(GeoError::InvalidTolerance { value: tolerance });
        }

        Ok(Self {
            max_iterations,
            tolerance,
        })
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Result<Self, GeoError> {
        Self::new(max_iterations, self.tolerance)
    }

    pub fn with_tolerance(self, tolerance: f64) -> Result<Self, GeoError> {
        Self::new(self.max_iterations, tolerance)
    }

    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the inverse geodesic problem between `point1` and `point2` on
    /// the given ellipsoid.
    ///
    /// Coordinates are used as given: points outside the canonical
    /// latitude/longitude ranges are still computed (and a warning is
    /// logged). The longitude difference is reduced to `(-180, 180]`
    /// degrees so lines crossing the antimeridian take the short way.
    pub fn solve(
        &self,
        point1: GeographicPoint,
        point2: GeographicPoint,
        ellipsoid: &Ellipsoid,
    ) -> InverseSolution {
        if !point1.is_canonical() || !point2.is_canonical() {
            log::warn!(
                "coordinates outside of the canonical ranges: ({point1}) -> ({point2}), \
                 the distance may be geographically meaningless"
            );
        }

        let a = ellipsoid.semi_major_axis();
        let b = ellipsoid.semi_minor_axis();
        let f = ellipsoid.flattening();

        let (lat1, _) = point1.to_radians();
        let (lat2, _) = point2.to_radians();
        let difference_longitudes =
            angle::normalize_degrees(point2.longitude - point1.longitude).to_radians();

        // u = 'reduced latitude', on the auxiliary sphere
        let u1 = ((1.0 - f) * lat1.tan()).atan();
        let u2 = ((1.0 - f) * lat2.tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = difference_longitudes;
        let mut iterations = 0;
        let mut converged = false;

        let mut sin_lambda = 0.0;
        let mut cos_lambda = 0.0;
        let mut cos_sq_alpha = 0.0;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut cos2_sigma_m = 0.0;
        let mut sigma = 0.0;

        while iterations < self.max_iterations {
            iterations += 1;

            (sin_lambda, cos_lambda) = lambda.sin_cos();
            let cross = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            sin_sigma = ((cos_u2 * sin_lambda) * (cos_u2 * sin_lambda) + cross * cross).sqrt();

            // Points coincide
            if sin_sigma == 0.0 {
                log::trace!("vincenty inverse: coincident points after {iterations} iterations");
                return InverseSolution::coincident(iterations);
            }

            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // equatorial line
            cos2_sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let lambda_prime = lambda;
            lambda = difference_longitudes
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos2_sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)));

            // leave the loop if it has converged
            if (lambda - lambda_prime).abs() <= self.tolerance {
                converged = true;
                break;
            }
        }

        let u_sq = cos_sq_alpha * ellipsoid.second_eccentricity_squared();
        let cap_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let cap_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let delta_sigma = cap_b
            * sin_sigma
            * (cos2_sigma_m
                + cap_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)
                        - cap_b / 6.0
                            * cos2_sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos2_sigma_m * cos2_sigma_m)));
        let distance = b * cap_a * (sigma - delta_sigma);

        if !converged {
            log::debug!(
                "vincenty inverse did not converge after {iterations} iterations \
                 ({point1}) -> ({point2}) on a={a}, b={b}, last estimate {distance}m"
            );

            return InverseSolution {
                distance,
                initial_bearing: None,
                final_bearing: None,
                iterations,
                converged,
            };
        }

        log::trace!("vincenty inverse converged after {iterations} iterations");

        let initial_bearing =
            (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
        let final_bearing =
            (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

        InverseSolution {
            distance,
            initial_bearing: Some(initial_bearing),
            final_bearing: Some(final_bearing),
            iterations,
            converged,
        }
    }
}

impl Default for VincentyInverse {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl InverseSolution {
    fn coincident(iterations: usize) -> Self {
        Self {
            distance: 0.0,
            initial_bearing: None,
            final_bearing: None,
            iterations,
            converged: true,
        }
    }

    /// The distance in meters, or [`GeoError::NonConvergent`] if the solver
    /// exhausted its iterations.
    pub fn into_result(self) -> Result<f64, GeoError> {
        if !self.converged {
            return Err(GeoError::NonConvergent {
                iterations: self.iterations,
            });
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(GeoError::NonFiniteComputation);
        }

        Ok(self.distance)
    }

    /// Initial bearing as a compass direction in `[0, 360)` degrees.
    pub fn initial_bearing_degrees(&self) -> Option<f64> {
        self.initial_bearing.map(angle::compass_degrees)
    }

    /// Final bearing as a compass direction in `[0, 360)` degrees.
    pub fn final_bearing_degrees(&self) -> Option<f64> {
        self.final_bearing.map(angle::compass_degrees)
    }
}

/// Solve the inverse problem with explicit solver parameters.
///
/// Returns an error only for invalid parameters, non convergence is
/// reported in the returned [`InverseSolution`].
///
/// ```
/// use geodist::geo::{Ellipsoid, GeographicPoint, vincenty};
///
/// let p1 = GeographicPoint::new(0.0, 0.0);
/// let p2 = GeographicPoint::new(0.0, 179.5);
///
/// let solution = vincenty::solve(p1, p2, &Ellipsoid::WGS84, 100, 1e-12).unwrap();
/// assert!(!solution.converged);
/// ```
pub fn solve(
    point1: GeographicPoint,
    point2: GeographicPoint,
    ellipsoid: &Ellipsoid,
    max_iterations: usize,
    tolerance: f64,
) -> Result<InverseSolution, GeoError> {
    let solver = VincentyInverse::new(max_iterations, tolerance)?;
    Ok(solver.solve(point1, point2, ellipsoid))
}

/// [`VincentyInverse`] bound to an [`Ellipsoid`], usable as a
/// [`DistanceAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vincenty {
    pub solver: VincentyInverse,
    pub ellipsoid: Ellipsoid,
}

impl Vincenty {
    pub const fn new(solver: VincentyInverse, ellipsoid: Ellipsoid) -> Self {
        Self { solver, ellipsoid }
    }

    pub fn solve(&self, point1: GeographicPoint, point2: GeographicPoint) -> InverseSolution {
        self.solver.solve(point1, point2, &self.ellipsoid)
    }
}

impl DistanceAlgorithm for Vincenty {
    fn distance(&self, point1: GeographicPoint, point2: GeographicPoint) -> Result<f64, GeoError> {
        self.solve(point1, point2).into_result()
    }
}
