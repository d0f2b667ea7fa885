//! Per-frame interaction state: doors, keyboard input, walkthrough movement,
//! view toggles and the customization modal.

mod customize;
mod door;
mod edit_buffer;
mod input;
mod movement;
mod view;

pub use customize::{Customization, CustomizationModal, CustomizationPreview};
pub use door::{DoorState, DOOR_OPEN_ANGLE};
pub use edit_buffer::EditBuffer;
pub use input::{InputState, MoveKey};
pub use movement::{MovementController, MovementParams};
pub use view::{CameraPreset, PanelHeight, ViewController, ViewState};
