mod appearance;
mod build_floorplan;
mod build_room;
mod collision;
mod scaled_room;

pub use appearance::Appearance;
pub use build_floorplan::{BuildFloorplan, FloorplanScene};
pub use build_room::{BuildRoom, RoomNodes};
pub use collision::{BuildCollisionVolumes, CollisionVolume, CollisionVolumes};
pub use scaled_room::ScaledRoom;
