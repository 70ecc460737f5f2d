use thiserror::Error;

/// Top-level error type for the caustic curvature crate.
#[derive(Debug, Error)]
pub enum CurvatureError {
    #[error(transparent)]
    Elliptic(#[from] EllipticError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while evaluating Jacobian elliptic functions.
#[derive(Debug, Error)]
pub enum EllipticError {
    #[error("argument u = {u} did not reduce below the series threshold after {halvings} halvings")]
    ArgumentTooLarge { u: f64, halvings: u32 },
}

/// Errors related to the ellipse/caustic configuration.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("vertex index {0} is out of range, expected 0, 1 or 2")]
    InvalidVertex(usize),
}

/// Convenience type alias for results using [`CurvatureError`].
pub type Result<T> = std::result::Result<T, CurvatureError>;
