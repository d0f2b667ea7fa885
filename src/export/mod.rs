//! Scene export.

mod glb;

pub use glb::{ExportGlb, GlbArtifact, GLB_FILE_NAME, GLB_MIME_TYPE};
