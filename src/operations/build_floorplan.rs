use tracing::info;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::layout::{Layout, RoomFilter, RoomId};
use crate::scene::{Light, Node, NodeKind, NodeRole, SceneGraph, Transform};

use super::{Appearance, BuildRoom, RoomNodes};

const AMBIENT_INTENSITY: f64 = 0.4;
const SUN_INTENSITY: f64 = 1.0;
const SUN_POSITION: [f64; 3] = [5.0, 10.0, 5.0];

/// A built scene together with the nodes of each visible room.
#[derive(Debug, Clone)]
pub struct FloorplanScene {
    pub scene: SceneGraph,
    /// Visible rooms in layout order.
    pub rooms: Vec<(RoomId, RoomNodes)>,
}

impl FloorplanScene {
    /// Returns the nodes built for `room`, if it is visible.
    #[must_use]
    pub fn room(&self, room: &RoomId) -> Option<&RoomNodes> {
        self.rooms.iter().find(|(id, _)| id == room).map(|(_, n)| n)
    }
}

/// Builds the scene for every room that passes the filter.
pub struct BuildFloorplan<'a> {
    layout: &'a Layout,
    filter: RoomFilter,
    appearance: &'a Appearance,
    config: &'a ViewerConfig,
}

impl<'a> BuildFloorplan<'a> {
    /// Creates a new `BuildFloorplan` operation.
    #[must_use]
    pub fn new(
        layout: &'a Layout,
        filter: RoomFilter,
        appearance: &'a Appearance,
        config: &'a ViewerConfig,
    ) -> Self {
        Self {
            layout,
            filter,
            appearance,
            config,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a node cannot be inserted into the scene.
    pub fn execute(&self) -> Result<FloorplanScene> {
        let mut scene = SceneGraph::new();
        let root = scene.root();

        scene.add(
            root,
            Node::new(
                "ambient",
                NodeRole::Light,
                NodeKind::Light(Light::Ambient {
                    intensity: AMBIENT_INTENSITY,
                }),
            ),
        )?;
        let [x, y, z] = SUN_POSITION;
        scene.add(
            root,
            Node::new(
                "sun",
                NodeRole::Light,
                NodeKind::Light(Light::Directional {
                    intensity: SUN_INTENSITY,
                }),
            )
            .at(Transform::from_translation(x, y, z)),
        )?;

        let mut rooms = Vec::new();
        for placed in self.layout.visible(self.filter) {
            let nodes = BuildRoom::new(placed, self.appearance, self.config).execute(&mut scene, root)?;
            rooms.push((placed.id.clone(), nodes));
        }

        info!(
            rooms = rooms.len(),
            hidden = self.layout.len() - rooms.len(),
            nodes = scene.len(),
            "built floorplan scene"
        );
        Ok(FloorplanScene { scene, rooms })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::Room;

    fn layout() -> Layout {
        Layout::new(vec![
            Room::new("Bedroom", 0.0, 0.0, 4.0, 3.0).with_id("r1"),
            Room::new("Lawn", 4.0, 0.0, 2.0, 3.0).with_id("r2"),
            Room::new("Garage", 6.0, 0.0, 2.0, 3.0).with_id("r3"),
        ])
        .unwrap()
    }

    fn build(filter: RoomFilter) -> FloorplanScene {
        let config = ViewerConfig::default();
        let look = Appearance::from_config(&config);
        let layout = layout();
        BuildFloorplan::new(&layout, filter, &look, &config)
            .execute()
            .unwrap()
    }

    #[test]
    fn lawn_is_never_built() {
        let built = build(RoomFilter::default());
        let ids: Vec<_> = built.rooms.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["r1", "r3"]);
        assert!(built.scene.for_room(&"r2".into()).is_empty());
    }

    #[test]
    fn garage_follows_filter() {
        let built = build(RoomFilter { show_garage: false });
        assert_eq!(built.rooms.len(), 1);
        assert!(built.room(&"r3".into()).is_none());
        assert!(built.room(&"r1".into()).is_some());
    }

    #[test]
    fn scene_carries_global_lights() {
        let built = build(RoomFilter::default());
        let lights = built.scene.with_role(NodeRole::Light);
        // Two global lights plus one per visible room.
        assert_eq!(lights.len(), 4);
        assert!(built.scene.find("ambient").is_some());
        assert!(built.scene.find("sun").is_some());
    }

    #[test]
    fn empty_layout_builds_lights_only() {
        let config = ViewerConfig::default();
        let look = Appearance::from_config(&config);
        let layout = Layout::default();
        let built = BuildFloorplan::new(&layout, RoomFilter::default(), &look, &config)
            .execute()
            .unwrap();
        assert!(built.rooms.is_empty());
        assert_eq!(built.scene.len(), 3);
    }
}
