//! Error reporting of the elliptic evaluator, with a tracing subscriber
//! installed so the diagnostic events are exercised.

#![allow(clippy::unwrap_used)]

use caustic_curvature::error::{EllipticError, GeometryError};
use caustic_curvature::math::{sn_cn_dn_principal, MAX_HALVINGS};
use caustic_curvature::{CurvatureError, CurvatureField, Vertex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("caustic_curvature=trace".parse().unwrap_or_default());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

#[test]
fn reduction_failure_names_the_argument() {
    init_tracing();
    let err = sn_cn_dn_principal(1.0e6, 0.5).unwrap_err();
    assert!(matches!(
        err,
        CurvatureError::Elliptic(EllipticError::ArgumentTooLarge { halvings: MAX_HALVINGS, .. })
    ));
    let message = err.to_string();
    assert!(message.contains("1000000"), "{message}");
    assert!(message.contains("20 halvings"), "{message}");
}

#[test]
fn curvature_queries_propagate_reduction_failure() {
    init_tracing();
    let field = CurvatureField::new(1.3).unwrap();
    assert!(field.gaussian3(0.5, f64::NAN).is_err());
    assert!(field.mean(0.5, f64::INFINITY, Vertex::Third).is_err());
    assert!(field.gaussian(0.5, 1.0, Vertex::First).unwrap() <= 0.0);
}

#[test]
fn invalid_vertex_index_is_reported() {
    let err = Vertex::try_from(7).unwrap_err();
    assert!(matches!(err, CurvatureError::Geometry(GeometryError::InvalidVertex(7))));
    assert_eq!(err.to_string(), "vertex index 7 is out of range, expected 0, 1 or 2");
}

#[test]
fn invalid_ellipse_is_reported() {
    let err = CurvatureField::new(0.25).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter semi_major = 0.25 is out of range [1, inf]"
    );
}
