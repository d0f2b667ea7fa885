use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ViewerConfig;
use crate::layout::{FloorFinish, Layout, RoomFilter, RoomId, WallFinish};
use crate::math::Point3;
use crate::operations::Appearance;
use crate::scene::Color;

use super::Customization;

/// Camera placement for the orbit view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Point3,
    /// Point the orbit controls circle around.
    pub target: Point3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraPreset {
    /// Looking straight down from above the plan.
    #[must_use]
    pub fn top() -> Self {
        Self::at(Point3::new(0.0, 30.0, 0.1))
    }

    /// Three-quarter view from a corner.
    #[must_use]
    pub fn perspective() -> Self {
        Self::at(Point3::new(20.0, 20.0, 20.0))
    }

    /// Aims the preset at the world-space center of `layout`. An empty
    /// layout keeps the origin.
    #[must_use]
    pub fn aimed_at(mut self, layout: &Layout, room_scale: f64) -> Self {
        if let Some(center) = layout.center() {
            self.target = Point3::new(center.x * room_scale, 0.0, center.y * room_scale);
        }
        self
    }

    fn at(position: Point3) -> Self {
        Self {
            position,
            target: Point3::origin(),
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Height of the viewer panel as a share of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHeight {
    Maximized,
    Compact,
}

impl PanelHeight {
    /// Returns the CSS height.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Maximized => "70vh",
            Self::Compact => "40vh",
        }
    }
}

/// Transient UI state of one viewer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub top_view: bool,
    pub maximized: bool,
    pub show_garage: bool,
    pub show_ceiling: bool,
    pub walk_mode: bool,
    pub show_3d: bool,
    pub menu_open: bool,
    pub customize_open: bool,
    /// Walkthrough hint overlay; hidden while the pointer is locked.
    pub instructions_visible: bool,
    pub floor_textures: BTreeMap<RoomId, String>,
    pub wall_colors: BTreeMap<RoomId, Color>,
    pub wall_color: Color,
    pub wall_finish: WallFinish,
    pub floor_finish: FloorFinish,
    pub door_color: Color,
}

impl ViewState {
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            top_view: false,
            maximized: true,
            show_garage: true,
            show_ceiling: true,
            walk_mode: false,
            show_3d: true,
            menu_open: false,
            customize_open: false,
            instructions_visible: true,
            floor_textures: BTreeMap::new(),
            wall_colors: BTreeMap::new(),
            wall_color: config.default_wall_color,
            wall_finish: WallFinish::default(),
            floor_finish: FloorFinish::default(),
            door_color: config.default_door_color,
        }
    }

    #[must_use]
    pub fn filter(&self) -> RoomFilter {
        RoomFilter {
            show_garage: self.show_garage,
        }
    }

    /// Returns the look the scene should be built with.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        Appearance {
            floor_textures: self.floor_textures.clone(),
            wall_colors: self.wall_colors.clone(),
            wall_color: self.wall_color,
            wall_finish: self.wall_finish,
            floor_finish: self.floor_finish,
            door_color: self.door_color,
            show_ceiling: self.show_ceiling,
        }
    }

    #[must_use]
    pub fn camera(&self) -> CameraPreset {
        if self.top_view {
            CameraPreset::top()
        } else {
            CameraPreset::perspective()
        }
    }

    #[must_use]
    pub fn panel_height(&self) -> PanelHeight {
        if self.maximized {
            PanelHeight::Maximized
        } else {
            PanelHeight::Compact
        }
    }

    /// Returns `true` while the walkthrough hint should be drawn.
    #[must_use]
    pub fn shows_instructions(&self) -> bool {
        self.walk_mode && self.instructions_visible
    }

    /// Snapshot of the values the customization modal edits.
    #[must_use]
    pub fn customization(&self) -> Customization {
        Customization {
            wall_color: self.wall_color,
            wall_finish: self.wall_finish,
            floor_finish: self.floor_finish,
            door_color: self.door_color,
            top_view: self.top_view,
            show_garage: self.show_garage,
        }
    }

    /// Writes every customization value back.
    pub fn apply(&mut self, values: &Customization) {
        self.wall_color = values.wall_color;
        self.wall_finish = values.wall_finish;
        self.floor_finish = values.floor_finish;
        self.door_color = values.door_color;
        self.top_view = values.top_view;
        self.show_garage = values.show_garage;
    }
}

/// Applies menu and toolbar actions to a [`ViewState`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            state: ViewState::new(config),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn toggle_top_view(&mut self) {
        self.state.top_view = !self.state.top_view;
        debug!(top_view = self.state.top_view, "camera preset changed");
    }

    pub fn toggle_maximized(&mut self) {
        self.state.maximized = !self.state.maximized;
    }

    pub fn toggle_ceiling(&mut self) {
        self.state.show_ceiling = !self.state.show_ceiling;
    }

    pub fn toggle_garage(&mut self) {
        self.state.show_garage = !self.state.show_garage;
    }

    pub fn toggle_3d(&mut self) {
        self.state.show_3d = !self.state.show_3d;
    }

    /// Enters or leaves the walkthrough. Leaving restores the hint so it is
    /// shown on the next entry.
    pub fn toggle_walk_mode(&mut self) {
        self.state.walk_mode = !self.state.walk_mode;
        if !self.state.walk_mode {
            self.state.instructions_visible = true;
        }
        debug!(walk_mode = self.state.walk_mode, "walk mode changed");
    }

    pub fn open_menu(&mut self) {
        self.state.menu_open = true;
    }

    pub fn close_menu(&mut self) {
        self.state.menu_open = false;
    }

    pub fn set_customize_open(&mut self, open: bool) {
        self.state.customize_open = open;
    }

    /// Pointer lock was acquired (`true`) or released.
    pub fn pointer_lock_changed(&mut self, locked: bool) {
        self.state.instructions_visible = !locked;
    }

    pub fn set_floor_texture(&mut self, room: RoomId, path: impl Into<String>) {
        self.state.floor_textures.insert(room, path.into());
    }

    pub fn set_room_wall_color(&mut self, room: RoomId, color: Color) {
        self.state.wall_colors.insert(room, color);
    }

    pub fn set_door_color(&mut self, color: Color) {
        self.state.door_color = color;
    }
}
