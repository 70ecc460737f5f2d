use std::f64::consts::PI;

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::{complete_k, sn_cn_dn, JacobiTriple};

use super::{BilliardCaustic, CausticAxes, CausticModel, Vertex};

/// Semi-minor axis of the outer ellipse; lengths are measured in its units.
const SEMI_MINOR: f64 = 1.0;

/// Evaluates the Jacobi functions at the two phases bounding the side
/// that starts at `vertex`.
fn side_phases(
    u: f64,
    k: f64,
    quarter_period: f64,
    vertex: Vertex,
) -> Result<(JacobiTriple, JacobiTriple)> {
    #[allow(clippy::cast_precision_loss)]
    let i = vertex.index() as f64;
    let step = 4.0 * quarter_period / 3.0;
    let m = k * k;
    Ok((
        sn_cn_dn(u + (1.0 + i) * step, m)?,
        sn_cn_dn(u + (2.0 + i) * step, m)?,
    ))
}

/// Gaussian curvature at side fraction `v` and sweep argument `u`.
///
/// Closed form in the Jacobi functions of the two vertex phases
/// `u + (1 + i) 4K/3` and `u + (2 + i) 4K/3`, where `i` is the vertex index.
///
/// # Arguments
///
/// * `v` - Side fraction, the point `(1 - v) * P1 + v * P2` between two consecutive vertices
/// * `u` - Elliptic sweep argument, one revolution per `4K`
/// * `ae`, `be` - Semi-axes of the outer ellipse
/// * `k` - Caustic eccentricity, used as elliptic modulus
/// * `quarter_period` - `K(k^2)`
/// * `vertex` - Vertex at which the side starts
///
/// The result is `-f^2` for a rational `f`, so it is never positive; it is
/// not finite where the denominator of `f` vanishes.
///
/// # Errors
///
/// Propagates argument-reduction failures from [`sn_cn_dn`].
pub fn gaussian_curvature(
    v: f64,
    u: f64,
    ae: f64,
    be: f64,
    k: f64,
    quarter_period: f64,
    vertex: Vertex,
) -> Result<f64> {
    let (p, q) = side_phases(u, k, quarter_period, vertex)?;
    Ok(gaussian_from_phases(v, ae, be, k, p, q))
}

#[allow(clippy::similar_names)]
fn gaussian_from_phases(
    v: f64,
    ae: f64,
    be: f64,
    k: f64,
    p: JacobiTriple,
    q: JacobiTriple,
) -> f64 {
    let (sa, ca, da) = (p.sn, p.cn, p.dn);
    let (sb, cb, db) = (q.sn, q.cn, q.dn);

    let sa2 = sa * sa;
    let sa3 = sa * sa2;
    let sa4 = sa2 * sa2;
    let sb2 = sb * sb;
    let sb4 = sb2 * sb2;
    let k2 = k * k;
    let ae2 = ae * ae;
    let be2 = be * be;
    let v2 = v * v;
    let vm2 = (v - 1.0) * (v - 1.0);
    let cc = cb * ca;
    let dd = db * da;
    let vv = v * (v - 1.0);
    let spread = v2 - v + 0.5;

    let t1 = -2.0 * k2 * ae2 * vm2 * (sb2 - 0.5) * be2 * sa4;
    let t2 = -2.0 * sb * k2 * ae2 * be2 * vm2 * (cc - 1.0) * sa3;
    let t3 = (-2.0 * sb4 * ae2 * be2 * k2 * v2
        + 4.0 * ae2 * (dd * vv + ((k2 + 2.0) * spread) / 2.0) * be2 * sb2
        + 2.0 * k2 * ae2 * be2 * cc * vm2
        - 2.0 * dd * vv * ae2 * be2
        + (-1.0 + (-2.0 * k2 * v2 + 4.0 * k2 * v - 2.0 * k2 - 2.0 * v2 + 2.0 * v - 1.0) * ae2)
            * be2
        + ae2)
        * sa2;
    let t4 = 4.0
        * ae2
        * (-k2 * v2 * be2 * (cc - 1.0) * sb2 / 2.0 + (dd * vv + spread) * cc * be2
            - dd * vv * be2
            - 0.5
            - spread * be2)
        * sb
        * sa;
    let t5 = sb4 * ae2 * be2 * k2 * v2;
    let t6 = (2.0 * k2 * v2 * ae2 * be2 * cc - 2.0 * dd * vv * ae2 * be2
        + (-1.0 + (-1.0 + (-2.0 * k2 - 2.0) * v2 + 2.0 * v) * ae2) * be2
        + ae2)
        * sb2;
    let t7 = 4.0 * (dd * vv * ae2 + 0.5 + spread * ae2) * be2 * (cc - 1.0);
    let delta = t1 + t2 + t3 + t4 + t5 + t6 - t7;

    let f = ae * be * (da + db) * (sa * sb + cc - 1.0) / delta;
    -f * f
}

/// Mean curvature at side fraction `v` and sweep argument `u`.
///
/// Arguments as for [`gaussian_curvature`]. The result is
/// `numerator / sqrt(delta^3)`: configurations with `delta < 0` have no
/// real mean curvature and yield NaN.
///
/// # Errors
///
/// Propagates argument-reduction failures from [`sn_cn_dn`].
pub fn mean_curvature(
    v: f64,
    u: f64,
    ae: f64,
    be: f64,
    k: f64,
    quarter_period: f64,
    vertex: Vertex,
) -> Result<f64> {
    let (p, q) = side_phases(u, k, quarter_period, vertex)?;
    Ok(mean_from_phases(v, ae, be, k, p, q))
}

#[allow(clippy::similar_names)]
fn mean_from_phases(
    v: f64,
    ae: f64,
    be: f64,
    k: f64,
    p: JacobiTriple,
    q: JacobiTriple,
) -> f64 {
    let (sa, ca, da) = (p.sn, p.cn, p.dn);
    let (sb, cb, db) = (q.sn, q.cn, q.dn);

    let sa2 = sa * sa;
    let sa3 = sa * sa2;
    let sb2 = sb * sb;
    let k2 = k * k;
    let ae2 = ae * ae;
    let be2 = be * be;
    let v2 = v * v;
    let cc = ca * cb;
    let dd = da * db;

    let phase = (sb2 - 0.5) * sa2 + sb * (cc - 1.0) * sa - sb2 / 2.0 - cc + 1.0;
    let sweep = (k2 * sa2 + k2 * sb2 - 2.0 * dd - 2.0) * v2
        + (-2.0 * k2 * sa2 + 2.0 * dd + 2.0) * v
        + k2 * sa2
        - 1.0;
    let delta = (-2.0 * phase * sweep * ae2 - sb2 - 2.0 * cc - sa2 + 2.0) * be2
        + ae2 * (sb - sa) * (sb - sa);

    let chord = (ae2 - be2) * sa2 - 2.0 * ae2 * sb * sa + (ae2 - be2) * sb2
        - 2.0 * be2 * (cc - 1.0);
    let normal = 2.0 * ae * be * (da + db) * (cc + sa * sb - 1.0);
    let linear = normal
        * ((((ae2 - be2) * sa - sb * ae2) * ca + sa * be2 * cb) * da
            - (-sb * be2 * ca + (sa * ae2 + (-ae2 + be2) * sb) * cb) * db)
        - 2.0
            * ae
            * (cb * k2 * sa3 - sb * ca * k2 * sa2
                + (k2 * ca / 2.0 - (k2 * sb2 + 0.5 * k2) * cb) * sa
                + ((k2 * sb2 - 0.5 * k2) * ca + cb * k2 / 2.0) * sb)
            * be
            * chord;
    let constant = normal * (-((ae2 - be2) * sa - sb * ae2) * ca - sa * be2 * cb) * da
        - 2.0
            * ae
            * (-cb * k2 * sa3 + sb * ca * k2 * sa2
                + (-k2 * ca / 2.0 - (-0.5 - k2 / 2.0) * cb) * sa
                - sb * ca / 2.0)
            * be
            * chord;
    let numerator = linear * v + constant;

    numerator / (delta * delta * delta).sqrt()
}

/// Curvature of the side surface of the 3-periodic billiard family in an
/// ellipse with semi-axes `a` and `1`.
///
/// The caustic, its eccentricity `k` and the quarter period `K(k^2)` are
/// computed once at construction; queries are read-only, so one field can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct CurvatureField {
    semi_major: f64,
    caustic: CausticAxes,
    modulus: f64,
    quarter_period: f64,
}

impl CurvatureField {
    /// Creates the field for the ellipse with semi-axes `semi_major` and 1,
    /// using the billiard caustic.
    ///
    /// # Errors
    ///
    /// Returns an error if `semi_major` is not finite or is less than 1, or
    /// if the ellipse is so elongated that `K(k^2)` overflows.
    pub fn new(semi_major: f64) -> Result<Self> {
        Self::with_caustic(semi_major, &BilliardCaustic)
    }

    /// Creates the field, obtaining the caustic from `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if `semi_major` is invalid or `model` rejects the ellipse.
    pub fn with_caustic(semi_major: f64, model: &impl CausticModel) -> Result<Self> {
        check_semi_major(semi_major)?;
        let caustic = model.caustic_axes(semi_major, SEMI_MINOR)?;
        Self::from_caustic_axes(semi_major, caustic)
    }

    /// Creates the field from explicitly supplied caustic axes.
    ///
    /// # Errors
    ///
    /// Returns an error if `semi_major` is not finite or is less than 1, or
    /// if the caustic is so flat that `K(k^2)` overflows.
    pub fn from_caustic_axes(semi_major: f64, caustic: CausticAxes) -> Result<Self> {
        check_semi_major(semi_major)?;
        let modulus = caustic.eccentricity();
        let quarter_period = complete_k(modulus * modulus);
        if !quarter_period.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "caustic eccentricity {modulus} leaves no finite quarter period"
            ))
            .into());
        }
        debug!(
            semi_major,
            caustic_major = caustic.semi_major(),
            caustic_minor = caustic.semi_minor(),
            modulus,
            quarter_period,
            "curvature field ready"
        );
        Ok(Self {
            semi_major,
            caustic,
            modulus,
            quarter_period,
        })
    }

    /// Returns the outer semi-major axis.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Returns the outer semi-minor axis (always 1).
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        SEMI_MINOR
    }

    /// Returns the caustic axes.
    #[must_use]
    pub fn caustic(&self) -> &CausticAxes {
        &self.caustic
    }

    /// Returns the elliptic modulus `k` (caustic eccentricity).
    #[must_use]
    pub fn modulus(&self) -> f64 {
        self.modulus
    }

    /// Returns the elliptic parameter `m = k^2`.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.modulus * self.modulus
    }

    /// Returns the quarter period `K(m)`.
    #[must_use]
    pub fn quarter_period(&self) -> f64 {
        self.quarter_period
    }

    /// Converts the sweep angle `t` (period `2*pi`) to the elliptic argument `2Kt/pi`.
    #[must_use]
    pub fn argument(&self, t: f64) -> f64 {
        2.0 * self.quarter_period * t / PI
    }

    /// Gaussian curvature on the side starting at `vertex`, at fraction
    /// `v12` and sweep angle `t`.
    ///
    /// # Errors
    ///
    /// Propagates argument-reduction failures.
    pub fn gaussian(&self, v12: f64, t: f64, vertex: Vertex) -> Result<f64> {
        gaussian_curvature(
            v12,
            self.argument(t),
            self.semi_major,
            SEMI_MINOR,
            self.modulus,
            self.quarter_period,
            vertex,
        )
    }

    /// Mean curvature on the side starting at `vertex`, at fraction `v12`
    /// and sweep angle `t`.
    ///
    /// # Errors
    ///
    /// Propagates argument-reduction failures.
    pub fn mean(&self, v12: f64, t: f64, vertex: Vertex) -> Result<f64> {
        mean_curvature(
            v12,
            self.argument(t),
            self.semi_major,
            SEMI_MINOR,
            self.modulus,
            self.quarter_period,
            vertex,
        )
    }

    /// Gaussian curvature on all three sides, in vertex order.
    ///
    /// # Errors
    ///
    /// Propagates argument-reduction failures.
    pub fn gaussian3(&self, v12: f64, t: f64) -> Result<[f64; 3]> {
        per_vertex(|vertex| self.gaussian(v12, t, vertex))
    }

    /// Mean curvature on all three sides, in vertex order.
    ///
    /// # Errors
    ///
    /// Propagates argument-reduction failures.
    pub fn mean3(&self, v12: f64, t: f64) -> Result<[f64; 3]> {
        per_vertex(|vertex| self.mean(v12, t, vertex))
    }
}

fn per_vertex(eval: impl Fn(Vertex) -> Result<f64>) -> Result<[f64; 3]> {
    let mut out = [0.0; 3];
    for (slot, vertex) in out.iter_mut().zip(Vertex::ALL) {
        *slot = eval(vertex)?;
    }
    Ok(out)
}

fn check_semi_major(semi_major: f64) -> Result<()> {
    if !semi_major.is_finite() || semi_major < SEMI_MINOR {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "semi_major",
            value: semi_major,
            min: SEMI_MINOR,
            max: f64::INFINITY,
        }
        .into());
    }
    Ok(())
}
