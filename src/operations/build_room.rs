use crate::config::ViewerConfig;
use crate::error::Result;
use crate::layout::PlacedRoom;
use crate::scene::{
    Label, Light, Material, Node, NodeId, NodeKind, NodeRole, Primitive, SceneGraph, Transform,
    WallSide,
};

use super::{Appearance, ScaledRoom};

/// Node ids created for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomNodes {
    pub group: NodeId,
    pub floor: NodeId,
    /// Walls in [`WallSide::ALL`] order.
    pub walls: [NodeId; 4],
    pub ceiling: NodeId,
    /// Hinge group whose yaw swings the door.
    pub door_pivot: NodeId,
    pub door: NodeId,
    pub label: NodeId,
    pub light: NodeId,
}

/// Builds the floor, walls, ceiling, door, label and light of a room.
pub struct BuildRoom<'a> {
    room: &'a PlacedRoom,
    appearance: &'a Appearance,
    config: &'a ViewerConfig,
}

impl<'a> BuildRoom<'a> {
    /// Creates a new `BuildRoom` operation.
    #[must_use]
    pub fn new(room: &'a PlacedRoom, appearance: &'a Appearance, config: &'a ViewerConfig) -> Self {
        Self {
            room,
            appearance,
            config,
        }
    }

    /// Executes the operation, adding a room group under `parent`.
    ///
    /// Child nodes carry world-space positions; the group itself stays at the
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not in the scene.
    pub fn execute(&self, scene: &mut SceneGraph, parent: NodeId) -> Result<RoomNodes> {
        let cfg = self.config;
        let id = &self.room.id;
        let s = ScaledRoom::new(&self.room.room, cfg);
        let (cx, cz) = (s.center_x(), s.center_z());
        let wh = s.wall_height;

        let group = scene.add(parent, Node::group(format!("room:{id}"), NodeRole::Room).for_room(id))?;

        let floor = scene.add(
            group,
            Node::mesh(
                format!("floor:{id}"),
                NodeRole::Floor,
                Primitive::Plane {
                    width: s.width,
                    depth: s.depth,
                },
                Material::textured(&self.appearance.floor_texture(self.room)),
            )
            .at(Transform::from_translation(cx, cfg.floor_offset, cz))
            .for_room(id),
        )?;

        let wall_material = Material::solid(self.appearance.wall_color(id))
            .with_texture(self.appearance.wall_finish.texture());
        let t = cfg.wall_thickness;
        let mut walls = Vec::with_capacity(4);
        for side in WallSide::ALL {
            // (min x, min z, extent x, extent z) of the wall footprint.
            let (x, z, w, d) = match side {
                WallSide::Front => (s.x, s.z, s.width, t),
                WallSide::Back => (s.x, s.z + s.depth, s.width, t),
                WallSide::Left => (s.x, s.z, t, s.depth),
                WallSide::Right => (s.x + s.width, s.z, t, s.depth),
            };
            let wall = scene.add(
                group,
                Node::mesh(
                    format!("wall:{id}:{}", side.name()),
                    NodeRole::Wall(side),
                    Primitive::Cuboid {
                        width: w,
                        height: wh,
                        depth: d,
                    },
                    wall_material.clone(),
                )
                .at(Transform::from_translation(x + w / 2.0, wh / 2.0, z + d / 2.0))
                .for_room(id),
            )?;
            walls.push(wall);
        }

        let mut ceiling_node = Node::mesh(
            format!("ceiling:{id}"),
            NodeRole::Ceiling,
            Primitive::Cuboid {
                width: s.width,
                height: cfg.ceiling_thickness,
                depth: s.depth,
            },
            Material::solid(cfg.ceiling_color).with_opacity(cfg.ceiling_opacity),
        )
        .at(Transform::from_translation(cx, wh + cfg.ceiling_thickness / 2.0, cz))
        .for_room(id);
        ceiling_node.visible = self.appearance.show_ceiling;
        let ceiling = scene.add(group, ceiling_node)?;

        let door_pivot = scene.add(
            group,
            Node::group(format!("door-hinge:{id}"), NodeRole::DoorPivot)
                .at(Transform::from_translation(
                    cx - cfg.door_width / 2.0,
                    cfg.door_center_height,
                    s.z,
                ))
                .for_room(id),
        )?;
        let door = scene.add(
            door_pivot,
            Node::mesh(
                format!("door:{id}"),
                NodeRole::Door,
                Primitive::Cuboid {
                    width: cfg.door_width,
                    height: cfg.door_height,
                    depth: cfg.door_thickness,
                },
                Material::solid(self.appearance.door_color),
            )
            .at(Transform::from_translation(cfg.door_width / 2.0, 0.0, 0.0))
            .for_room(id),
        )?;

        let label = scene.add(
            group,
            Node::new(
                format!("label:{id}"),
                NodeRole::Label,
                NodeKind::Label(Label {
                    text: self.room.room.label().to_owned(),
                    font_size: cfg.label_font_size,
                }),
            )
            .at(Transform::from_translation(cx, wh + cfg.label_offset, cz))
            .for_room(id),
        )?;

        let light = scene.add(
            group,
            Node::new(
                format!("light:{id}"),
                NodeRole::Light,
                NodeKind::Light(Light::Point {
                    intensity: cfg.room_light_intensity,
                }),
            )
            .at(Transform::from_translation(cx, wh - cfg.room_light_drop, cz))
            .for_room(id),
        )?;

        tracing::debug!(room = %id, width = s.width, depth = s.depth, "built room");

        Ok(RoomNodes {
            group,
            floor,
            walls: [walls[0], walls[1], walls[2], walls[3]],
            ceiling,
            door_pivot,
            door,
            label,
            light,
        })
    }
}
