pub mod caustic;
pub mod curvature;
pub mod vertex;

pub use caustic::{BilliardCaustic, CausticAxes, CausticModel};
pub use curvature::{gaussian_curvature, mean_curvature, CurvatureField};
pub use vertex::Vertex;
