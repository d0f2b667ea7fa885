use crate::config::ViewerConfig;
use crate::layout::{PlacedRoom, RoomId};
use crate::math::{Aabb, Point3};
use crate::scene::WallSide;

use super::ScaledRoom;

/// A solid box around one wall line.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionVolume {
    pub room: RoomId,
    pub side: WallSide,
    pub bounds: Aabb,
}

/// The collision boxes of every visible room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionVolumes {
    volumes: Vec<CollisionVolume>,
}

impl CollisionVolumes {
    /// Returns `true` if `point` lies inside or on any box.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        self.volumes.iter().any(|v| v.bounds.contains_point(point))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollisionVolume> {
        self.volumes.iter()
    }
}

/// Derives four wall boxes per room.
///
/// Each box spans the full wall line, extended by the half thickness at both
/// ends, and reaches from the floor to the room's wall height.
pub struct BuildCollisionVolumes<'a> {
    rooms: &'a [&'a PlacedRoom],
    config: &'a ViewerConfig,
}

impl<'a> BuildCollisionVolumes<'a> {
    /// Creates a new `BuildCollisionVolumes` operation.
    #[must_use]
    pub fn new(rooms: &'a [&'a PlacedRoom], config: &'a ViewerConfig) -> Self {
        Self { rooms, config }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> CollisionVolumes {
        let t = self.config.collision_half_thickness;
        let mut volumes = Vec::with_capacity(self.rooms.len() * 4);
        for placed in self.rooms {
            let s = ScaledRoom::new(&placed.room, self.config);
            let (x0, z0) = (s.x, s.z);
            let (x1, z1) = (s.x + s.width, s.z + s.depth);
            for side in WallSide::ALL {
                let (min, max) = match side {
                    WallSide::Front => ((x0 - t, z0 - t), (x1 + t, z0 + t)),
                    WallSide::Back => ((x0 - t, z1 - t), (x1 + t, z1 + t)),
                    WallSide::Left => ((x0 - t, z0 - t), (x0 + t, z1 + t)),
                    WallSide::Right => ((x1 - t, z0 - t), (x1 + t, z1 + t)),
                };
                volumes.push(CollisionVolume {
                    room: placed.id.clone(),
                    side,
                    bounds: Aabb::new(
                        Point3::new(min.0, 0.0, min.1),
                        Point3::new(max.0, s.wall_height, max.1),
                    ),
                });
            }
        }
        tracing::debug!(volumes = volumes.len(), "rebuilt collision volumes");
        CollisionVolumes { volumes }
    }
}
