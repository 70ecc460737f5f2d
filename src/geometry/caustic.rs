use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;

/// Semi-axes of a caustic ellipse, `semi_major >= semi_minor > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CausticAxes {
    semi_major: f64,
    semi_minor: f64,
}

impl CausticAxes {
    /// Creates a caustic from its semi-axes.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis is non-finite or non-positive, or if
    /// the minor axis exceeds the major axis.
    pub fn new(semi_major: f64, semi_minor: f64) -> Result<Self> {
        if !semi_minor.is_finite() || semi_minor <= 0.0 {
            return Err(
                GeometryError::Degenerate("caustic semi-minor axis must be positive".into()).into(),
            );
        }
        if !semi_major.is_finite() || semi_major < semi_minor {
            return Err(GeometryError::Degenerate(
                "caustic semi-major axis must not be shorter than the semi-minor axis".into(),
            )
            .into());
        }
        Ok(Self {
            semi_major,
            semi_minor,
        })
    }

    /// Returns the semi-major axis `cA`.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Returns the semi-minor axis `cB`.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Center-to-focus distance `sqrt(cA^2 - cB^2)`.
    #[must_use]
    pub fn linear_eccentricity(&self) -> f64 {
        (self.semi_major * self.semi_major - self.semi_minor * self.semi_minor)
            .max(0.0)
            .sqrt()
    }

    /// Eccentricity `d / cA`, in `[0, 1]`; very flat caustics round to 1.
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.linear_eccentricity() / self.semi_major
    }
}

/// Maps an ellipse to the caustic of the polygon family inscribed in it.
pub trait CausticModel {
    /// Returns the caustic of the ellipse with semi-axes `a >= b > 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ellipse axes are invalid.
    fn caustic_axes(&self, a: f64, b: f64) -> Result<CausticAxes>;
}

/// Confocal caustic of the 3-periodic billiard trajectories in an ellipse.
///
/// With `delta = sqrt(a^4 - a^2 b^2 + b^4)` the caustic semi-axes are
/// `cA = a(delta - b^2)/(a^2 - b^2)` and `cB = b(a^2 - delta)/(a^2 - b^2)`,
/// evaluated in the equivalent form `cA = a^3/(delta + b^2)`,
/// `cB = b^3/(a^2 + delta)`, which stays finite for the circle (`cA = cB = a/2`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BilliardCaustic;

impl CausticModel for BilliardCaustic {
    fn caustic_axes(&self, a: f64, b: f64) -> Result<CausticAxes> {
        if !b.is_finite() || b < TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "b",
                value: b,
                min: TOLERANCE,
                max: f64::INFINITY,
            }
            .into());
        }
        if !a.is_finite() || a < b {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "a",
                value: a,
                min: b,
                max: f64::INFINITY,
            }
            .into());
        }

        let a2 = a * a;
        let b2 = b * b;
        let delta = (a2 * a2 - a2 * b2 + b2 * b2).sqrt();
        CausticAxes::new(a2 * a / (delta + b2), b2 * b / (a2 + delta))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn circle_has_half_radius_caustic() {
        let c = BilliardCaustic.caustic_axes(2.0, 2.0).unwrap();
        assert_abs_diff_eq!(c.semi_major(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c.semi_minor(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c.eccentricity(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn matches_difference_form() {
        for &(a, b) in &[(1.2_f64, 1.0), (1.5, 1.0), (3.0, 1.0), (5.0, 2.0)] {
            let c = BilliardCaustic.caustic_axes(a, b).unwrap();
            let delta = f64::sqrt(a.powi(4) - a * a * b * b + b.powi(4));
            let ca = a * (delta - b * b) / (a * a - b * b);
            let cb = b * (a * a - delta) / (a * a - b * b);
            assert_relative_eq!(c.semi_major(), ca, max_relative = 1e-12);
            assert_relative_eq!(c.semi_minor(), cb, max_relative = 1e-12);
        }
    }

    #[test]
    fn caustic_is_nested_and_ordered() {
        for &a in &[1.0_f64, 1.0 + 1e-12, 1.1, 2.0, 10.0] {
            let c = BilliardCaustic.caustic_axes(a, 1.0).unwrap();
            assert!(c.semi_major() >= c.semi_minor());
            assert!(c.semi_major() < a);
            assert!(c.semi_minor() < 1.0);
        }
    }

    #[test]
    fn known_caustic() {
        let c = BilliardCaustic.caustic_axes(1.5, 1.0).unwrap();
        assert_relative_eq!(c.semi_major(), 1.143_074_902_771_996_2, max_relative = 1e-12);
        assert_relative_eq!(c.semi_minor(), 0.237_950_064_818_669_2, max_relative = 1e-12);
    }

    #[test]
    fn eccentricity_from_axes() {
        let c = CausticAxes::new(5.0, 3.0).unwrap();
        assert_abs_diff_eq!(c.linear_eccentricity(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.eccentricity(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn invalid_ellipse() {
        assert!(BilliardCaustic.caustic_axes(0.5, 1.0).is_err());
        assert!(BilliardCaustic.caustic_axes(1.0, 0.0).is_err());
        assert!(BilliardCaustic.caustic_axes(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn invalid_caustic() {
        assert!(CausticAxes::new(1.0, 2.0).is_err());
        assert!(CausticAxes::new(1.0, 0.0).is_err());
        assert!(CausticAxes::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn thin_caustic_of_elongated_ellipse() {
        let c = BilliardCaustic.caustic_axes(1e5, 1.0).unwrap();
        assert_relative_eq!(c.semi_minor(), 5e-11, max_relative = 1e-9);
        assert!(CausticAxes::new(1.0, 1e-12).is_ok());
    }
}
