use std::collections::BTreeMap;

use crate::config::ViewerConfig;
use crate::layout::{floor_texture_for_label, FloorFinish, PlacedRoom, RoomId, WallFinish};
use crate::scene::Color;

/// Resolved look of the floorplan: global choices plus per-room overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Floor texture overrides keyed by room.
    pub floor_textures: BTreeMap<RoomId, String>,
    /// Wall color overrides keyed by room.
    pub wall_colors: BTreeMap<RoomId, Color>,
    pub wall_color: Color,
    pub wall_finish: WallFinish,
    pub floor_finish: FloorFinish,
    pub door_color: Color,
    pub show_ceiling: bool,
}

impl Appearance {
    /// The look used before any customization.
    #[must_use]
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            floor_textures: BTreeMap::new(),
            wall_colors: BTreeMap::new(),
            wall_color: config.default_wall_color,
            wall_finish: WallFinish::default(),
            floor_finish: FloorFinish::default(),
            door_color: config.default_door_color,
            show_ceiling: true,
        }
    }

    /// Floor texture: room override, then a forcing floor finish, then the
    /// label table.
    #[must_use]
    pub fn floor_texture(&self, room: &PlacedRoom) -> String {
        if let Some(path) = self.floor_textures.get(&room.id) {
            return path.clone();
        }
        self.floor_finish
            .texture()
            .unwrap_or_else(|| floor_texture_for_label(room.room.label()))
            .to_owned()
    }

    /// Wall color: room override, then the global wall color.
    #[must_use]
    pub fn wall_color(&self, room: &RoomId) -> Color {
        self.wall_colors.get(room).copied().unwrap_or(self.wall_color)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::{Layout, Room};

    fn kitchen() -> PlacedRoom {
        Layout::new(vec![Room::new("Kitchen", 0.0, 0.0, 1.0, 1.0).with_id("k")])
            .unwrap()
            .rooms()[0]
            .clone()
    }

    #[test]
    fn floor_texture_precedence() {
        let room = kitchen();
        let mut look = Appearance::from_config(&ViewerConfig::default());
        assert_eq!(look.floor_texture(&room), "/textures/7.jpg");

        look.floor_finish = FloorFinish::Marble;
        assert_eq!(look.floor_texture(&room), "/textures/floors/marble.jpg");

        look.floor_textures
            .insert(room.id.clone(), "/textures/custom.jpg".into());
        assert_eq!(look.floor_texture(&room), "/textures/custom.jpg");
    }

    #[test]
    fn wall_color_precedence() {
        let room = kitchen();
        let mut look = Appearance::from_config(&ViewerConfig::default());
        assert_eq!(look.wall_color(&room.id), Color::rgb(0x66, 0x66, 0x66));
        look.wall_colors.insert(room.id.clone(), Color::rgb(1, 2, 3));
        assert_eq!(look.wall_color(&room.id), Color::rgb(1, 2, 3));
        assert_eq!(look.wall_color(&RoomId::from("other")), Color::rgb(0x66, 0x66, 0x66));
    }
}
