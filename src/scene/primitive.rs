use crate::math::Vector3;

/// Geometric shape of a mesh node, centered on the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// A box with extents along X, Y and Z.
    Cuboid { width: f64, height: f64, depth: f64 },
    /// A horizontal rectangle in the XZ plane facing +Y.
    Plane { width: f64, depth: f64 },
}

impl Primitive {
    /// Returns the full extents along X, Y and Z.
    #[must_use]
    pub fn extents(&self) -> Vector3 {
        match *self {
            Self::Cuboid {
                width,
                height,
                depth,
            } => Vector3::new(width, height, depth),
            Self::Plane { width, depth } => Vector3::new(width, 0.0, depth),
        }
    }
}
