use crate::layout::RoomId;
use crate::math::{Matrix4, UnitQuaternion, Vector3};

use super::{Material, Primitive};

slotmap::new_key_type! {
    /// Unique identifier for a node in a scene graph.
    pub struct NodeId;
}

/// Which wall of a room a segment belongs to.
///
/// Front is the z-minimum edge, back the z-maximum edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Front,
    Back,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [Self; 4] = [Self::Front, Self::Back, Self::Left, Self::Right];

    /// Returns the lower-case side name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// The semantic part of the floorplan a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Root,
    Room,
    Floor,
    Wall(WallSide),
    Ceiling,
    /// Hinge the door panel rotates around.
    DoorPivot,
    Door,
    Label,
    Light,
}

/// Local transform of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: UnitQuaternion,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// A pure translation.
    #[must_use]
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    /// Returns a copy rotated to `angle` radians about the Y axis.
    #[must_use]
    pub fn with_yaw(mut self, angle: f64) -> Self {
        self.rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle);
        self
    }

    /// Returns the rotation angle about the Y axis.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        let x = self.rotation * Vector3::x();
        (-x.z).atan2(x.x)
    }

    /// Returns the homogeneous matrix `T * R * S`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

/// A floating text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: f64,
}

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { intensity: f64 },
    Directional { intensity: f64 },
    Point { intensity: f64 },
}

/// What a node carries besides its transform.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh {
        primitive: Primitive,
        material: Material,
    },
    Label(Label),
    Light(Light),
}

/// A node in the scene graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub role: NodeRole,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
    /// Room this node was built for, if any.
    pub room: Option<RoomId>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// Creates a visible node with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>, role: NodeRole, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            role,
            kind,
            transform: Transform::default(),
            visible: true,
            room: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an empty group node.
    #[must_use]
    pub fn group(name: impl Into<String>, role: NodeRole) -> Self {
        Self::new(name, role, NodeKind::Group)
    }

    /// Creates a mesh node.
    #[must_use]
    pub fn mesh(name: impl Into<String>, role: NodeRole, primitive: Primitive, material: Material) -> Self {
        Self::new(
            name,
            role,
            NodeKind::Mesh {
                primitive,
                material,
            },
        )
    }

    /// Sets the local transform.
    #[must_use]
    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Tags the node with the room it belongs to.
    #[must_use]
    pub fn for_room(mut self, room: &RoomId) -> Self {
        self.room = Some(room.clone());
        self
    }

    /// Returns the parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child nodes in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the material if this is a mesh node.
    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn yaw_round_trips() {
        let t = Transform::default().with_yaw(FRAC_PI_2);
        assert_relative_eq!(t.yaw(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn matrix_applies_rotation_before_translation() {
        let t = Transform::from_translation(1.0, 0.0, 0.0).with_yaw(FRAC_PI_2);
        let p = t.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        // +X rotated a quarter turn about +Y lands on -Z.
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }
}
