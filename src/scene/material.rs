use super::Color;

/// Surface appearance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Image path, tiled across the surface.
    pub texture: Option<String>,
    /// 1.0 is opaque.
    pub opacity: f64,
}

impl Material {
    /// An opaque, untextured material.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            texture: None,
            opacity: 1.0,
        }
    }

    /// A white material carrying a texture.
    #[must_use]
    pub fn textured(path: &str) -> Self {
        Self {
            color: Color::rgb(0xff, 0xff, 0xff),
            texture: Some(path.to_owned()),
            opacity: 1.0,
        }
    }

    /// Sets the texture.
    #[must_use]
    pub fn with_texture(mut self, path: Option<&str>) -> Self {
        self.texture = path.map(str::to_owned);
        self
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Returns `true` if the material needs alpha blending.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}
