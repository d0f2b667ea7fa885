pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod math;
pub mod operations;
pub mod scene;
pub mod tessellation;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{FloorplanError, Result};
pub use viewer::FloorplanViewer;
