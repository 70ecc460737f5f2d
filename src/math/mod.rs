pub mod elliptic;
pub mod jacobi;

pub use elliptic::complete_k;
pub use jacobi::{sn_cn_dn, sn_cn_dn_principal, JacobiTriple, MAX_HALVINGS};

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
