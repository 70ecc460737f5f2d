use crate::error::{GeometryError, Result};

/// One of the three vertices of a 3-periodic orbit.
///
/// Vertex `i` sits at the phase offset `(1 + i) * 4K/3` along the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    First,
    Second,
    Third,
}

impl Vertex {
    /// All vertices in index order.
    pub const ALL: [Vertex; 3] = [Vertex::First, Vertex::Second, Vertex::Third];

    /// Returns the vertex index in `0..=2`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Vertex::First => 0,
            Vertex::Second => 1,
            Vertex::Third => 2,
        }
    }
}

impl TryFrom<usize> for Vertex {
    type Error = crate::error::CurvatureError;

    fn try_from(index: usize) -> Result<Self> {
        Vertex::ALL
            .get(index)
            .copied()
            .ok_or_else(|| GeometryError::InvalidVertex(index).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for (i, v) in Vertex::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
            assert_eq!(Vertex::try_from(i).unwrap(), *v);
        }
    }

    #[test]
    fn out_of_range_index() {
        assert!(Vertex::try_from(3).is_err());
    }
}
