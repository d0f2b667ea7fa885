//! The interactive floorplan viewer.
//!
//! [`FloorplanViewer`] owns a layout, the view state, the built scene and the
//! walkthrough state. A host forwards input events to it, calls
//! [`FloorplanViewer::frame`] once per displayed frame and renders
//! [`FloorplanViewer::scene`].

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::error::{ExportError, Result};
use crate::export::{ExportGlb, GlbArtifact};
use crate::interaction::{
    CameraPreset, CustomizationModal, CustomizationPreview, DoorState, InputState,
    MovementController, MovementParams, ViewController,
};
use crate::layout::{Layout, PlacedRoom, RoomId};
use crate::math::Point3;
use crate::operations::{
    Appearance, BuildCollisionVolumes, BuildFloorplan, CollisionVolumes, FloorplanScene,
};
use crate::scene::SceneGraph;

/// Inputs the current scene was built from.
#[derive(Debug, Clone, PartialEq)]
struct BuiltFrom {
    appearance: Appearance,
    visible: Vec<RoomId>,
}

pub struct FloorplanViewer {
    config: ViewerConfig,
    layout: Layout,
    view: ViewController,
    modal: CustomizationModal,
    built: Option<(FloorplanScene, BuiltFrom)>,
    volumes: CollisionVolumes,
    doors: BTreeMap<RoomId, DoorState>,
    input: InputState,
    movement: MovementController,
    camera: Point3,
    /// `top_view` of the preset `camera` was last placed on.
    camera_top_view: bool,
}

impl FloorplanViewer {
    /// Creates a viewer and builds the initial scene.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is out of range or the scene cannot be
    /// built.
    pub fn new(layout: Layout, config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let view = ViewController::new(&config);
        let camera = view.state().camera().position;
        let camera_top_view = view.state().top_view;
        let mut viewer = Self {
            movement: MovementController::new(MovementParams::from_config(&config)),
            config,
            layout,
            view,
            modal: CustomizationModal::default(),
            built: None,
            volumes: CollisionVolumes::default(),
            doors: BTreeMap::new(),
            input: InputState::default(),
            camera,
            camera_top_view,
        };
        viewer.refresh()?;
        Ok(viewer)
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Replaces the layout. Door states of rooms that still exist are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rebuilt.
    pub fn set_layout(&mut self, layout: Layout) -> Result<()> {
        self.layout = layout;
        let layout = &self.layout;
        self.doors.retain(|id, _| layout.get(id).is_some());
        self.built = None;
        self.refresh()?;
        Ok(())
    }

    #[must_use]
    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Mutable access to the view. Changes, including a switched camera
    /// preset, take effect on the next [`FloorplanViewer::refresh`] or
    /// [`FloorplanViewer::frame`].
    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    /// Returns the built scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.built.as_ref().map(|(built, _)| &built.scene)
    }

    #[must_use]
    pub fn floorplan(&self) -> Option<&FloorplanScene> {
        self.built.as_ref().map(|(built, _)| built)
    }

    #[must_use]
    pub fn collision_volumes(&self) -> &CollisionVolumes {
        &self.volumes
    }

    #[must_use]
    pub fn camera_position(&self) -> Point3 {
        self.camera
    }

    /// Returns the current camera: its live position, aimed at the center of
    /// the layout.
    #[must_use]
    pub fn camera(&self) -> CameraPreset {
        CameraPreset {
            position: self.camera,
            ..self
                .view
                .state()
                .camera()
                .aimed_at(&self.layout, self.config.room_scale)
        }
    }

    /// Rebuilds the scene if the look or the visible room set changed, and
    /// the collision volumes if the visible room set changed.
    ///
    /// Returns `true` if the scene was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be built.
    pub fn refresh(&mut self) -> Result<bool> {
        self.sync_camera();
        let state = self.view.state();
        let filter = state.filter();
        let visible: Vec<&PlacedRoom> = self.layout.visible(filter);
        let wanted = BuiltFrom {
            appearance: state.appearance(),
            visible: visible.iter().map(|r| r.id.clone()).collect(),
        };
        if let Some((_, from)) = &self.built {
            if *from == wanted {
                return Ok(false);
            }
        }

        let visible_changed = self
            .built
            .as_ref()
            .map_or(true, |(_, from)| from.visible != wanted.visible);
        if visible_changed {
            self.volumes = BuildCollisionVolumes::new(&visible, &self.config).execute();
        }

        let mut floorplan =
            BuildFloorplan::new(&self.layout, filter, &wanted.appearance, &self.config).execute()?;
        for (id, door) in &self.doors {
            if let Some(nodes) = floorplan.room(id) {
                let pivot = nodes.door_pivot;
                let node = floorplan.scene.node_mut(pivot)?;
                node.transform = node.transform.with_yaw(door.angle());
            }
        }
        debug!(
            rooms = wanted.visible.len(),
            collisions_rebuilt = visible_changed,
            "viewer scene refreshed"
        );
        self.built = Some((floorplan, wanted));
        Ok(true)
    }

    /// Advances doors and, in walk mode, the camera by one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if a pending rebuild fails.
    pub fn frame(&mut self, delta: f64) -> Result<()> {
        if self.modal.is_open() {
            self.modal.sync(self.view.state());
        }
        self.refresh()?;

        let damping = self.config.door_damping;
        for (id, door) in &mut self.doors {
            let angle = door.tick(damping);
            if let Some((built, _)) = &mut self.built {
                if let Some(nodes) = built.room(id).copied() {
                    let node = built.scene.node_mut(nodes.door_pivot)?;
                    node.transform = node.transform.with_yaw(angle);
                }
            }
        }

        if self.view.state().walk_mode {
            self.camera = self
                .movement
                .tick(&self.input, delta, self.camera, &self.volumes);
        }
        Ok(())
    }

    /// Toggles the door of `room`. Returns `false` if the room is not shown.
    pub fn click_door(&mut self, room: &RoomId) -> bool {
        let shown = self
            .floorplan()
            .is_some_and(|built| built.room(room).is_some());
        if shown {
            let door = self.doors.entry(room.clone()).or_default();
            door.toggle();
            debug!(room = %room, open = door.is_open(), "door toggled");
        }
        shown
    }

    #[must_use]
    pub fn door(&self, room: &RoomId) -> DoorState {
        self.doors.get(room).copied().unwrap_or_default()
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    /// Enters or leaves the walkthrough. Leaving stops all motion and puts
    /// the camera back on its orbit preset.
    pub fn toggle_walk_mode(&mut self) {
        self.view.toggle_walk_mode();
        if !self.view.state().walk_mode {
            self.input.clear();
            self.movement.reset();
            self.place_camera_on_preset();
        }
    }

    /// Switches between the top and perspective presets.
    pub fn toggle_top_view(&mut self) {
        self.view.toggle_top_view();
        self.sync_camera();
    }

    /// Moves the camera onto its preset if `top_view` changed since it was
    /// last placed. The walkthrough camera is left alone.
    fn sync_camera(&mut self) {
        let state = self.view.state();
        if state.top_view != self.camera_top_view && !state.walk_mode {
            self.place_camera_on_preset();
        }
    }

    fn place_camera_on_preset(&mut self) {
        let state = self.view.state();
        self.camera = state.camera().position;
        self.camera_top_view = state.top_view;
    }

    pub fn open_customization(&mut self) {
        self.modal.open(self.view.state());
        self.view.set_customize_open(true);
    }

    pub fn customization(&mut self) -> &mut CustomizationModal {
        &mut self.modal
    }

    /// Builds the modal's preview scene and camera from the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview scene cannot be built.
    pub fn customization_preview(&self) -> Result<Option<CustomizationPreview>> {
        self.modal
            .preview(&self.layout, self.view.state(), &self.config)
    }

    /// Commits the draft and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rebuilt.
    pub fn save_customization(&mut self) -> Result<bool> {
        let saved = self.modal.save(self.view.state_mut());
        self.view.set_customize_open(false);
        if saved {
            self.refresh()?;
        }
        Ok(saved)
    }

    pub fn cancel_customization(&mut self) {
        self.modal.cancel();
        self.view.set_customize_open(false);
    }

    /// Serializes the current scene to GLB.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] whose
    /// [`alert_message`](ExportError::alert_message) is shown to the user.
    pub fn export(&self) -> std::result::Result<GlbArtifact, ExportError> {
        let artifact = ExportGlb::new(self.scene()).execute()?;
        info!(bytes = artifact.bytes.len(), "floorplan exported");
        Ok(artifact)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::interaction::DOOR_OPEN_ANGLE;
    use crate::layout::Room;
    use crate::scene::{Color, NodeRole};
    use approx::assert_relative_eq;

    const FRAME: f64 = 1.0 / 60.0;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn viewer() -> FloorplanViewer {
        init_tracing();
        let layout = Layout::new(vec![
            Room::new("Bedroom", 0.0, 0.0, 4.0, 3.0).with_id("r1"),
            Room::new("Garage", 4.0, 0.0, 2.0, 3.0).with_id("r2"),
            Room::new("Lawn", 0.0, 3.0, 6.0, 2.0).with_id("r3"),
        ])
        .unwrap();
        FloorplanViewer::new(layout, ViewerConfig::default()).unwrap()
    }

    #[test]
    fn builds_visible_rooms_and_collisions() {
        let v = viewer();
        assert_eq!(v.floorplan().unwrap().rooms.len(), 2);
        assert_eq!(v.collision_volumes().len(), 8);
        assert_relative_eq!(v.camera_position().x, 20.0);
    }

    #[test]
    fn hiding_garage_regenerates_collisions() {
        let mut v = viewer();
        v.view_mut().toggle_garage();
        assert!(v.refresh().unwrap());
        assert_eq!(v.collision_volumes().len(), 4);
        assert!(v.collision_volumes().iter().all(|c| c.room.as_str() == "r1"));
        assert!(!v.refresh().unwrap());
    }

    #[test]
    fn ceiling_toggle_rebuilds_without_touching_collisions() {
        let mut v = viewer();
        let before = v.collision_volumes().clone();
        v.view_mut().toggle_ceiling();
        assert!(v.refresh().unwrap());
        assert_eq!(v.collision_volumes(), &before);
        let scene = v.scene().unwrap();
        let ceilings = scene.with_role(NodeRole::Ceiling);
        assert!(ceilings.iter().all(|c| !scene.is_shown(*c)));
    }

    #[test]
    fn door_click_swings_pivot() {
        let mut v = viewer();
        let r1: RoomId = "r1".into();
        assert!(v.click_door(&r1));
        assert!(!v.click_door(&"r3".into()));
        for _ in 0..300 {
            v.frame(FRAME).unwrap();
        }
        assert_relative_eq!(v.door(&r1).angle(), DOOR_OPEN_ANGLE, epsilon = 1e-6);
        let built = v.floorplan().unwrap();
        let pivot = built.room(&r1).unwrap().door_pivot;
        let yaw = built.scene.node(pivot).unwrap().transform.yaw();
        assert_relative_eq!(yaw, DOOR_OPEN_ANGLE, epsilon = 1e-6);
    }

    #[test]
    fn door_angle_survives_rebuild() {
        let mut v = viewer();
        let r1: RoomId = "r1".into();
        v.click_door(&r1);
        for _ in 0..10 {
            v.frame(FRAME).unwrap();
        }
        let angle = v.door(&r1).angle();
        v.view_mut().toggle_ceiling();
        v.refresh().unwrap();
        let built = v.floorplan().unwrap();
        let pivot = built.room(&r1).unwrap().door_pivot;
        assert_relative_eq!(built.scene.node(pivot).unwrap().transform.yaw(), angle, epsilon = 1e-9);
    }

    #[test]
    fn camera_moves_only_in_walk_mode() {
        let mut v = viewer();
        let start = v.camera_position();
        v.key_down("KeyW");
        v.frame(FRAME).unwrap();
        assert_eq!(v.camera_position(), start);

        v.toggle_walk_mode();
        v.frame(FRAME).unwrap();
        let walked = v.camera_position();
        assert_relative_eq!(walked.y, 1.6);
        assert!(walked.z < start.z);

        v.toggle_walk_mode();
        assert_eq!(v.camera_position(), start);
    }

    #[test]
    fn customization_save_rebuilds_walls() {
        let mut v = viewer();
        v.open_customization();
        assert!(v.view().state().customize_open);
        v.customization().set_wall_color(Color::rgb(0x11, 0x22, 0x33));
        let preview = v.customization_preview().unwrap().unwrap();
        assert_eq!(preview.floorplan.rooms.len(), 2);
        assert!(v.save_customization().unwrap());
        assert!(!v.view().state().customize_open);

        let scene = v.scene().unwrap();
        let wall = scene.find("wall:r1:front").unwrap();
        assert_eq!(
            scene.node(wall).unwrap().material().unwrap().color,
            Color::rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn saved_top_view_moves_camera() {
        let mut v = viewer();
        v.open_customization();
        v.customization().set_top_view(true);
        let preview = v.customization_preview().unwrap().unwrap();
        assert_eq!(preview.camera.position, Point3::new(0.0, 30.0, 0.1));
        assert_relative_eq!(v.camera_position().x, 20.0);

        assert!(v.save_customization().unwrap());
        assert!(v.view().state().top_view);
        assert_eq!(v.camera_position(), Point3::new(0.0, 30.0, 0.1));
        v.frame(FRAME).unwrap();
        assert_eq!(v.camera_position(), Point3::new(0.0, 30.0, 0.1));
    }

    #[test]
    fn view_mut_top_view_applies_on_next_frame() {
        let mut v = viewer();
        v.view_mut().toggle_top_view();
        v.frame(FRAME).unwrap();
        assert_eq!(v.camera_position(), Point3::new(0.0, 30.0, 0.1));
        v.toggle_top_view();
        assert_eq!(v.camera_position(), Point3::new(20.0, 20.0, 20.0));
    }

    #[test]
    fn top_view_change_in_walk_mode_waits_for_exit() {
        let mut v = viewer();
        v.toggle_walk_mode();
        v.toggle_top_view();
        assert_eq!(v.camera_position(), Point3::new(20.0, 20.0, 20.0));
        v.toggle_walk_mode();
        assert_eq!(v.camera_position(), Point3::new(0.0, 30.0, 0.1));
    }

    #[test]
    fn camera_orbits_layout_center() {
        let v = viewer();
        let cam = v.camera();
        assert_eq!(cam.position, v.camera_position());
        assert_relative_eq!(cam.target.x, 13.5);
        assert_relative_eq!(cam.target.z, 11.25);
    }

    #[test]
    fn empty_layout_exports_without_nodes() {
        init_tracing();
        let v = FloorplanViewer::new(Layout::default(), ViewerConfig::default()).unwrap();
        let artifact = v.export().unwrap();
        assert_eq!(&artifact.bytes[0..4], b"glTF");
        let json_len = u32::from_le_bytes(artifact.bytes[12..16].try_into().unwrap()) as usize;
        let gltf: serde_json::Value = serde_json::from_slice(&artifact.bytes[20..20 + json_len]).unwrap();
        assert!(gltf["nodes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn export_produces_glb() {
        let v = viewer();
        let artifact = v.export().unwrap();
        assert_eq!(&artifact.bytes[0..4], b"glTF");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewerConfig {
            room_scale: 0.0,
            ..ViewerConfig::default()
        };
        assert!(FloorplanViewer::new(Layout::default(), config).is_err());
    }

    #[test]
    fn new_layout_drops_stale_doors() {
        let mut v = viewer();
        v.click_door(&"r2".into());
        v.set_layout(Layout::new(vec![Room::new("Bedroom", 0.0, 0.0, 1.0, 1.0).with_id("r1")]).unwrap())
            .unwrap();
        assert!(!v.door(&"r2".into()).is_open());
        assert_eq!(v.collision_volumes().len(), 4);
    }
}
