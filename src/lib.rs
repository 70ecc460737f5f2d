pub mod error;
pub mod geometry;
pub mod math;

pub use error::{CurvatureError, Result};
pub use geometry::{CurvatureField, Vertex};
