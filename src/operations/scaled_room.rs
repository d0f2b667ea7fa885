use crate::config::ViewerConfig;
use crate::layout::Room;

/// A room converted to world units.
///
/// World X follows plan X and world Z follows plan Y; `(x, z)` is the
/// minimum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRoom {
    pub x: f64,
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    pub wall_height: f64,
}

impl ScaledRoom {
    /// Scales `room`, clamping width and depth to `config.min_extent` and
    /// falling back to the default wall height for missing or non-positive
    /// overrides.
    #[must_use]
    pub fn new(room: &Room, config: &ViewerConfig) -> Self {
        let scale = config.room_scale;
        Self {
            x: room.x * scale,
            z: room.y * scale,
            width: (room.width * scale).max(config.min_extent),
            depth: (room.height * scale).max(config.min_extent),
            wall_height: room
                .wall_height
                .filter(|h| *h > 0.0)
                .unwrap_or(config.default_wall_height),
        }
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_z(&self) -> f64 {
        self.z + self.depth / 2.0
    }
}
