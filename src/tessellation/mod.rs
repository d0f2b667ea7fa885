mod tessellate_primitive;
mod tessellate_scene;

pub use tessellate_primitive::TessellatePrimitive;
pub use tessellate_scene::{SceneMesh, TessellateScene};

use crate::math::{Aabb, Matrix4, Point2, Point3, Vector3};

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns a copy with positions and normals mapped through `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> TriangleMesh {
        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map_or(linear, |inverse| inverse.transpose());
        TriangleMesh {
            vertices: self
                .vertices
                .iter()
                .map(|p| matrix.transform_point(p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| {
                    let m = normal_matrix * n;
                    m.try_normalize(crate::math::TOLERANCE).unwrap_or(m)
                })
                .collect(),
            uvs: self.uvs.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Returns the bounds of all vertices, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        let first = self.vertices.first()?;
        let mut bounds = Aabb::new(*first, *first);
        for p in &self.vertices[1..] {
            bounds.expand_to(p);
        }
        Some(bounds)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            uvs: vec![Point2::origin(); 3],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn transformed_moves_vertices_and_keeps_unit_normals() {
        let m = Matrix4::new_translation(&Vector3::new(2.0, 0.0, 0.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, 3.0));
        let mesh = triangle().transformed(&m);
        assert_relative_eq!(mesh.vertices[1].x, 3.0);
        assert_relative_eq!(mesh.normals[0].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bounds_of_empty_mesh() {
        assert!(TriangleMesh::default().bounds().is_none());
        let b = triangle().bounds().unwrap();
        assert_relative_eq!(b.max.y, 1.0);
    }
}
