use crate::config::ViewerConfig;
use crate::error::Result;
use crate::layout::{FloorFinish, Layout, WallFinish};
use crate::operations::{BuildFloorplan, FloorplanScene};
use crate::scene::Color;

use super::{CameraPreset, EditBuffer, ViewState};

/// The values the customization modal edits as one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Customization {
    pub wall_color: Color,
    pub wall_finish: WallFinish,
    pub floor_finish: FloorFinish,
    pub door_color: Color,
    pub top_view: bool,
    pub show_garage: bool,
}

/// What the modal's preview pane shows: the draft's scene seen from the
/// draft's camera preset.
#[derive(Debug, Clone)]
pub struct CustomizationPreview {
    pub floorplan: FloorplanScene,
    pub camera: CameraPreset,
}

/// Draft/commit front end for [`Customization`].
///
/// Edits only touch the draft; [`CustomizationModal::save`] writes the whole
/// draft back in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomizationModal {
    buffer: EditBuffer<Customization>,
}

impl CustomizationModal {
    /// Opens the modal on the current view values.
    pub fn open(&mut self, view: &ViewState) {
        self.buffer.open(&view.customization());
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.buffer.is_open()
    }

    /// Picks up values changed outside the modal while it is open.
    pub fn sync(&mut self, view: &ViewState) -> bool {
        self.buffer.sync(&view.customization())
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Customization> {
        self.buffer.draft()
    }

    pub fn set_wall_color(&mut self, color: Color) {
        self.edit(|d| d.wall_color = color);
    }

    pub fn set_wall_finish(&mut self, finish: WallFinish) {
        self.edit(|d| d.wall_finish = finish);
    }

    pub fn set_floor_finish(&mut self, finish: FloorFinish) {
        self.edit(|d| d.floor_finish = finish);
    }

    pub fn set_door_color(&mut self, color: Color) {
        self.edit(|d| d.door_color = color);
    }

    pub fn set_top_view(&mut self, top_view: bool) {
        self.edit(|d| d.top_view = top_view);
    }

    pub fn set_show_garage(&mut self, show_garage: bool) {
        self.edit(|d| d.show_garage = show_garage);
    }

    /// Commits the draft into `view` and closes. Returns `false` if the modal
    /// was not open.
    pub fn save(&mut self, view: &mut ViewState) -> bool {
        match self.buffer.commit() {
            Some(values) => {
                view.apply(&values);
                tracing::debug!(?values, "customization saved");
                true
            }
            None => false,
        }
    }

    /// Closes without applying anything.
    pub fn cancel(&mut self) {
        self.buffer.discard();
    }

    /// Builds a throwaway scene and camera showing the draft, leaving `view`
    /// untouched.
    ///
    /// Returns `Ok(None)` when the modal is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview scene cannot be built.
    pub fn preview(
        &self,
        layout: &Layout,
        view: &ViewState,
        config: &ViewerConfig,
    ) -> Result<Option<CustomizationPreview>> {
        let Some(draft) = self.buffer.draft() else {
            return Ok(None);
        };
        let mut state = view.clone();
        state.apply(draft);
        let floorplan =
            BuildFloorplan::new(layout, state.filter(), &state.appearance(), config).execute()?;
        let camera = state.camera().aimed_at(layout, config.room_scale);
        Ok(Some(CustomizationPreview { floorplan, camera }))
    }

    fn edit(&mut self, f: impl FnOnce(&mut Customization)) {
        if let Some(draft) = self.buffer.draft_mut() {
            f(draft);
        }
    }
}
