use crate::error::Result;
use crate::scene::{Material, NodeId, NodeKind, NodeRole, SceneGraph};

use super::{TessellatePrimitive, TriangleMesh};

/// A visible mesh node baked into world space.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub node: NodeId,
    pub name: String,
    pub role: NodeRole,
    pub mesh: TriangleMesh,
    pub material: Material,
}

/// Tessellates every shown mesh node of a scene into world-space meshes.
pub struct TessellateScene<'a> {
    scene: &'a SceneGraph,
}

impl<'a> TessellateScene<'a> {
    /// Creates a new `TessellateScene` operation.
    #[must_use]
    pub fn new(scene: &'a SceneGraph) -> Self {
        Self { scene }
    }

    /// Executes the tessellation in depth-first node order.
    ///
    /// Hidden nodes, and nodes under a hidden ancestor, are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a primitive is degenerate.
    pub fn execute(&self) -> Result<Vec<SceneMesh>> {
        let mut out = Vec::new();
        for id in self.scene.depth_first() {
            if !self.scene.is_shown(id) {
                continue;
            }
            let node = self.scene.node(id)?;
            let NodeKind::Mesh {
                primitive,
                material,
            } = &node.kind
            else {
                continue;
            };
            let local = TessellatePrimitive::new(*primitive).execute()?;
            let world = self.scene.world_matrix(id)?;
            out.push(SceneMesh {
                node: id,
                name: node.name.clone(),
                role: node.role,
                mesh: local.transformed(&world),
                material: material.clone(),
            });
        }
        Ok(out)
    }
}
