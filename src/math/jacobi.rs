use tracing::{trace, warn};

use crate::error::{EllipticError, Result};

use super::elliptic::complete_k;

/// Maximum number of argument halvings before the reduction gives up.
pub const MAX_HALVINGS: u32 = 20;

/// The three Jacobian elliptic functions evaluated at one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiTriple {
    pub sn: f64,
    pub cn: f64,
    pub dn: f64,
}

impl JacobiTriple {
    /// Value at `u = 0` for every parameter.
    pub const ORIGIN: Self = Self {
        sn: 0.0,
        cn: 1.0,
        dn: 1.0,
    };

    /// Returns `(sn^2 + cn^2 - 1, dn^2 + m*sn^2 - 1)`.
    ///
    /// Both residuals vanish for an exact evaluation with parameter `m`.
    #[must_use]
    pub fn identity_residuals(&self, m: f64) -> (f64, f64) {
        let sn2 = self.sn * self.sn;
        (
            sn2 + self.cn * self.cn - 1.0,
            self.dn * self.dn + m * sn2 - 1.0,
        )
    }
}

/// Recursion used for the final duplication steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    /// Every step used the `(a, b)` recursion on `1 - cn`.
    Fast,
    /// The `(a, b)` recursion was abandoned at step `from`; steps
    /// `from..=n` run the `(a, c)` recursion on `cn` itself.
    Stable { from: u32 },
}

/// Argument below which the truncated series seeds the doubling, `uT`.
fn series_threshold(m: f64) -> f64 {
    9.207e-4 - m * 4.604e-4
}

/// Argument from which the fast recursion may hand over to the stable one, `uA`.
fn switch_threshold(m: f64) -> f64 {
    1.762_69 + (1.0 - m) * 1.163_57
}

/// Halves `u` until it drops below `threshold`, returning the reduced
/// argument and the number of halvings.
fn reduce(u: f64, threshold: f64) -> Result<(f64, u32)> {
    let mut u0 = u;
    let mut halvings = 0;
    while u0 >= threshold || u0.is_nan() {
        if halvings == MAX_HALVINGS {
            warn!(u, halvings, "elliptic argument too large for duplication");
            return Err(EllipticError::ArgumentTooLarge { u, halvings }.into());
        }
        u0 *= 0.5;
        halvings += 1;
    }
    Ok((u0, halvings))
}

/// One doubling step of the homogeneous pair `(a, b)` with `b/a = 1 - cn`.
///
/// Returns the next pair, or `None` when `z < 2my`: past that point the
/// pair is about to lose precision and the `(a, c)` recursion must take over.
fn fast_step(a: f64, b: f64, m: f64, guarded: bool) -> Option<(f64, f64)> {
    let y = b * (a * 2.0 - b);
    let z = a * a;
    let my = m * y;
    if guarded && z < my * 2.0 {
        return None;
    }
    Some((z * z - my * y, (y * 2.0) * (z - my)))
}

/// Runs up to `n` fast doublings from the series seed at `u0`, stopping
/// early when a guarded step refuses.
fn fast_phase(u0: f64, n: u32, m: f64, guarded: bool) -> (f64, f64, Tail) {
    let mut a = 1.0;
    let mut b = u0 * u0 * 0.5;
    for j in 1..=n {
        match fast_step(a, b, m, guarded) {
            Some((next_a, next_b)) => {
                a = next_a;
                b = next_b;
            }
            None => return (a, b, Tail::Stable { from: j }),
        }
    }
    (a, b, Tail::Fast)
}

/// One doubling step of the homogeneous pair `(a, c)` with `c/a = cn`.
#[allow(clippy::many_single_char_names)]
fn stable_step(a: f64, c: f64, m: f64, mc: f64) -> (f64, f64) {
    let x = c * c;
    let z = a * a;
    let w = m * x * x - mc * z * z;
    let xz = x * z;
    ((m * 2.0) * xz - w, (mc * 2.0) * xz + w)
}

/// Evaluates `(sn, cn, dn)` for a non-negative argument in the low range
/// `0 <= u < K/2`.
///
/// Conditional duplication after T. Fukushima, "Precise and fast computation
/// of Jacobian elliptic functions by conditional duplication", Numer. Math.
/// (2012), DOI 10.1007/s00211-012-0498-0. The thresholds are fitted for
/// single precision, so results carry roughly `1e-7` absolute error.
///
/// Larger arguments are accepted as long as they reduce below the series
/// threshold within [`MAX_HALVINGS`] halvings; `cn` and `dn` stay correct
/// over a full period but `sn` is always returned non-negative.
///
/// The argument is halved `n` times to `u0`, seeded with the Maclaurin
/// approximation `1 - cn(u0) ~ u0^2 / 2`, and doubled back `n` times:
///
/// - fast recursion on `b/a = 1 - cn`:
///   `y = b(2a - b)`, `z = a^2`, `b' = 2y(z - my)`, `a' = z^2 - my^2`,
///   finished by `sn = sqrt(y)`, `cn = 1 - b`, `dn = sqrt(1 - m*y)` with `b = b/a`;
/// - stable recursion on `c/a = cn`, entered when `u >= uA` and `z < 2my`:
///   `x = c^2`, `w = m x^2 - mc z^2`, `c' = 2mc xz + w`, `a' = 2m xz - w`,
///   finished by `sn = sqrt(1 - cn^2)`, `dn = sqrt(mc + m cn^2)` with `cn = c/a`.
///
/// # Errors
///
/// Returns [`EllipticError::ArgumentTooLarge`] when `u` does not reduce
/// within [`MAX_HALVINGS`] halvings (including non-finite `u`).
pub fn sn_cn_dn_principal(u: f64, m: f64) -> Result<JacobiTriple> {
    let mc = 1.0 - m;
    let (u0, n) = reduce(u, series_threshold(m))?;
    let (mut a, b, tail) = fast_phase(u0, n, m, u >= switch_threshold(m));
    trace!(u, m, halvings = n, ?tail, "duplication finished");

    match tail {
        Tail::Fast => {
            let b = b / a;
            let y = (b * (2.0 - b)).max(0.0);
            Ok(JacobiTriple {
                sn: y.sqrt(),
                cn: 1.0 - b,
                dn: (1.0 - m * y).sqrt(),
            })
        }
        Tail::Stable { from } => {
            let mut c = a - b;
            for _ in from..=n {
                (a, c) = stable_step(a, c, m, mc);
            }
            let cn = c / a;
            let x = cn * cn;
            Ok(JacobiTriple {
                sn: (1.0 - x).max(0.0).sqrt(),
                cn,
                dn: (mc + m * x).sqrt(),
            })
        }
    }
}

/// Folds `v` onto `[0, d)`; negative values wrap from the top of the period.
///
/// A negative exact multiple of `d` maps to `d` rather than `0`.
#[must_use]
pub fn fold_period(v: f64, d: f64) -> f64 {
    if v >= 0.0 {
        v % d
    } else {
        d - (-v % d)
    }
}

/// Evaluates `(sn, cn, dn)` over the full period `0 <= u < 4K(m)`.
///
/// The argument is folded onto `[0, 4K)` and handed to
/// [`sn_cn_dn_principal`], then `sn` is negated on the second half period
/// (`u/K` in `[2, 4)`). Only the sign of `sn` is corrected: callers are
/// expected to pass a non-negative argument, and negative arguments are not
/// supported yet.
///
/// # Errors
///
/// Returns [`EllipticError::ArgumentTooLarge`] when the folded argument does
/// not reduce within [`MAX_HALVINGS`] halvings.
pub fn sn_cn_dn(u: f64, m: f64) -> Result<JacobiTriple> {
    let quarter = complete_k(m);
    let reduced = fold_period(u, 4.0 * quarter);
    let mut triple = sn_cn_dn_principal(reduced, m)?;
    if (2.0..4.0).contains(&(reduced / quarter)) {
        triple.sn = -triple.sn;
    }
    Ok(triple)
}
