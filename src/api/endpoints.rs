pub const GENERATE_DESIGN_PATH: &str = "/generate-design";
pub const RECENT_DESIGNS_PATH: &str = "/api/recent-designs";
pub const MY_DESIGNS_PATH: &str = "/my-designs";

/// Path of the layout document generated for `scene_id`.
#[must_use]
pub fn layout_path(scene_id: &str) -> String {
    format!("/static/outputs/{scene_id}/{scene_id}_layout.json")
}

/// Joins a base URL and an absolute path without doubling the slash.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
