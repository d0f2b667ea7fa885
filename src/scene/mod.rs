//! Renderer-independent scene description.
//!
//! The graph is an arena of [`Node`]s addressed by [`NodeId`]. Builders in
//! [`crate::operations`] populate it; hosts render it and
//! [`crate::export`] serializes it.

mod color;
mod material;
mod node;
mod primitive;

pub use color::Color;
pub use material::Material;
pub use node::{Label, Light, Node, NodeId, NodeKind, NodeRole, Transform, WallSide};
pub use primitive::Primitive;

use slotmap::SlotMap;

use crate::error::SceneError;
use crate::layout::RoomId;
use crate::math::Matrix4;

/// Arena that owns every node of a floorplan scene.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates a graph holding only a root group.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("floorplan", NodeRole::Root));
        Self { nodes, root }
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if only the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Inserts `node` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not in the graph.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound("parent".into()));
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Returns a reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::NodeNotFound("node".into()))
    }

    /// Returns a mutable reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::NodeNotFound("node".into()))
    }

    /// Returns all node ids in depth-first pre-order, root first.
    #[must_use]
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                order.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// Returns the ids of nodes with the given role, in depth-first order.
    #[must_use]
    pub fn with_role(&self, role: NodeRole) -> Vec<NodeId> {
        self.depth_first()
            .into_iter()
            .filter(|id| self.nodes[*id].role == role)
            .collect()
    }

    /// Returns the ids of nodes built for `room`, in depth-first order.
    #[must_use]
    pub fn for_room(&self, room: &RoomId) -> Vec<NodeId> {
        self.depth_first()
            .into_iter()
            .filter(|id| self.nodes[*id].room.as_ref() == Some(room))
            .collect()
    }

    /// Finds the first node with `name` in depth-first order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.depth_first()
            .into_iter()
            .find(|id| self.nodes[*id].name == name)
    }

    /// Returns the node-to-world matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or one of its ancestors is missing.
    pub fn world_matrix(&self, id: NodeId) -> Result<Matrix4, SceneError> {
        let mut matrix = Matrix4::identity();
        let mut current = Some(id);
        while let Some(cid) = current {
            let node = self.node(cid)?;
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }
        Ok(matrix)
    }

    /// Returns `true` if the node and all of its ancestors are visible.
    #[must_use]
    pub fn is_shown(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            match self.nodes.get(cid) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    fn cube() -> Node {
        Node::mesh(
            "cube",
            NodeRole::Floor,
            Primitive::Cuboid {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::solid(Color::rgb(1, 2, 3)),
        )
    }

    #[test]
    fn add_links_parent_and_child() {
        let mut scene = SceneGraph::new();
        let group = scene.add(scene.root(), Node::group("g", NodeRole::Room)).unwrap();
        let child = scene.add(group, cube()).unwrap();
        assert_eq!(scene.node(child).unwrap().parent(), Some(group));
        assert_eq!(scene.node(group).unwrap().children(), &[child]);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.depth_first(), vec![scene.root(), group, child]);
    }

    #[test]
    fn world_matrix_composes_ancestors() {
        let mut scene = SceneGraph::new();
        let group = scene
            .add(
                scene.root(),
                Node::group("g", NodeRole::Room).at(Transform::from_translation(10.0, 0.0, 0.0)),
            )
            .unwrap();
        let child = scene
            .add(group, cube().at(Transform::from_translation(0.0, 2.0, 0.0)))
            .unwrap();
        let p = scene
            .world_matrix(child)
            .unwrap()
            .transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let mut scene = SceneGraph::new();
        let group = scene.add(scene.root(), Node::group("g", NodeRole::Room)).unwrap();
        let child = scene.add(group, cube()).unwrap();
        assert!(scene.is_shown(child));
        scene.node_mut(group).unwrap().visible = false;
        assert!(!scene.is_shown(child));
    }

    #[test]
    fn missing_parent_is_an_error() {
        let mut scene = SceneGraph::new();
        assert!(scene.add(NodeId::default(), cube()).is_err());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn lookup_by_role_and_name() {
        let mut scene = SceneGraph::new();
        scene.add(scene.root(), cube()).unwrap();
        assert_eq!(scene.with_role(NodeRole::Floor).len(), 1);
        assert!(scene.find("cube").is_some());
        assert!(scene.find("sphere").is_none());
    }
}
