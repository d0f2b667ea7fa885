use crate::error::{Result, SceneError};
use crate::math::{Point2, Point3, Vector3};
use crate::scene::Primitive;

use super::TriangleMesh;

/// Outward normal plus in-face axes with `u × v = normal`, so quads wind
/// counter-clockwise when seen from outside.
const CUBOID_FACES: [([f64; 3], [f64; 3], [f64; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Tessellates a primitive into a triangle mesh in its local frame.
pub struct TessellatePrimitive {
    primitive: Primitive,
}

impl TessellatePrimitive {
    /// Creates a new `TessellatePrimitive` operation.
    #[must_use]
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Degenerate` if an extent is negative, non-finite,
    /// or (for the extents that span a face) zero.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let extents = self.primitive.extents();
        if extents.iter().any(|e| !e.is_finite() || *e < 0.0) {
            return Err(SceneError::Degenerate(format!(
                "primitive extents {:?} must be finite and non-negative",
                extents.as_slice()
            ))
            .into());
        }
        let half = extents * 0.5;

        let mut mesh = TriangleMesh::default();
        match self.primitive {
            Primitive::Cuboid { .. } => {
                if extents.iter().any(|e| *e <= 0.0) {
                    return Err(
                        SceneError::Degenerate("cuboid has a zero extent".into()).into(),
                    );
                }
                for (n, u, v) in CUBOID_FACES {
                    push_quad(&mut mesh, &half, n.into(), u.into(), v.into());
                }
            }
            Primitive::Plane { .. } => {
                if extents.x <= 0.0 || extents.z <= 0.0 {
                    return Err(SceneError::Degenerate("plane has zero area".into()).into());
                }
                let (n, u, v) = CUBOID_FACES[2];
                // A plane is the top face of a zero-height box.
                push_quad(&mut mesh, &half, n.into(), u.into(), v.into());
            }
        }
        Ok(mesh)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn push_quad(mesh: &mut TriangleMesh, half: &Vector3, n: Vector3, u: Vector3, v: Vector3) {
    let along = |axis: &Vector3| axis.abs().dot(half);
    let center = Point3::origin() + n * along(&n);
    let du = u * along(&u);
    let dv = v * along(&v);

    let base = mesh.vertices.len() as u32;
    for (su, sv, uv) in [
        (-1.0, -1.0, Point2::new(0.0, 0.0)),
        (1.0, -1.0, Point2::new(1.0, 0.0)),
        (1.0, 1.0, Point2::new(1.0, 1.0)),
        (-1.0, 1.0, Point2::new(0.0, 1.0)),
    ] {
        mesh.vertices.push(center + du * su + dv * sv);
        mesh.normals.push(n);
        mesh.uvs.push(uv);
    }
    mesh.indices.push([base, base + 1, base + 2]);
    mesh.indices.push([base, base + 2, base + 3]);
}
