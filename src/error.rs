use thiserror::Error;

/// Top-level error type for the floorplan crate.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while reading a room layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout payload is not a JSON array")]
    NotAnArray,

    #[error("malformed layout: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("room {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
}

/// Errors related to the scene graph.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene node not found: {0}")]
    NodeNotFound(String),

    #[error("invalid color {0:?}, expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to exporting a scene.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no scene attached to the viewer")]
    NoScene,

    #[error("failed to tessellate scene: {0}")]
    Tessellation(#[source] Box<FloorplanError>),

    #[error("glTF serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("export of {0} bytes exceeds the GLB size limit")]
    TooLarge(usize),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Returns the short alert text shown to the user when an export aborts.
    #[must_use]
    pub fn alert_message(&self) -> &'static str {
        match self {
            Self::NoScene => "Scene not found!",
            _ => "Failed to export GLB",
        }
    }
}

/// Errors related to the design API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed with status {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors related to viewer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config value {field} = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
