use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scene::Color;

/// Tunable constants for scene building, animation and walkthrough.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Plan units to world units.
    pub room_scale: f64,
    /// Wall height used when a room has no usable override.
    pub default_wall_height: f64,
    /// Rendered wall thickness.
    pub wall_thickness: f64,
    /// Half thickness of the collision slab around each wall line.
    pub collision_half_thickness: f64,
    /// Smallest scaled room width or depth.
    pub min_extent: f64,
    /// Floor plane lift above y = 0.
    pub floor_offset: f64,
    pub ceiling_thickness: f64,
    pub ceiling_color: Color,
    pub ceiling_opacity: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub door_thickness: f64,
    /// Height of the door panel center.
    pub door_center_height: f64,
    /// Fraction of the remaining swing covered each frame.
    pub door_damping: f64,
    pub default_door_color: Color,
    pub default_wall_color: Color,
    /// Label height above the wall top.
    pub label_offset: f64,
    pub label_font_size: f64,
    /// Distance of the room light below the wall top.
    pub room_light_drop: f64,
    pub room_light_intensity: f64,
    /// Camera height during a walkthrough.
    pub eye_height: f64,
    /// Walk acceleration in world units per second.
    pub move_speed: f64,
    /// Velocity decay rate per second.
    pub velocity_damping: f64,
    /// Base URL of the design service.
    pub api_base_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            room_scale: 4.5,
            default_wall_height: 1.8,
            wall_thickness: 0.1,
            collision_half_thickness: 0.2,
            min_extent: 1.0,
            floor_offset: 0.01,
            ceiling_thickness: 0.05,
            ceiling_color: Color::rgb(0xaa, 0xaa, 0xaa),
            ceiling_opacity: 0.9,
            door_width: 1.0,
            door_height: 1.8,
            door_thickness: 0.1,
            door_center_height: 1.2,
            door_damping: 0.1,
            default_door_color: Color::rgb(0x8b, 0x45, 0x13),
            default_wall_color: Color::rgb(0x66, 0x66, 0x66),
            label_offset: 0.4,
            label_font_size: 0.5,
            room_light_drop: 0.2,
            room_light_intensity: 0.5,
            eye_height: 1.6,
            move_speed: 3.0,
            velocity_damping: 10.0,
            api_base_url: "http://localhost:8000".to_owned(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::OutOfRange` if a value fails validation.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// same errors as [`ViewerConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded viewer config");
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("room_scale", self.room_scale),
            ("default_wall_height", self.default_wall_height),
            ("wall_thickness", self.wall_thickness),
            ("min_extent", self.min_extent),
            ("ceiling_thickness", self.ceiling_thickness),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("door_thickness", self.door_thickness),
            ("eye_height", self.eye_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    reason: "must be a positive finite number",
                });
            }
        }

        let non_negative = [
            ("collision_half_thickness", self.collision_half_thickness),
            ("floor_offset", self.floor_offset),
            ("move_speed", self.move_speed),
            ("velocity_damping", self.velocity_damping),
            ("room_light_intensity", self.room_light_intensity),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    reason: "must be a non-negative finite number",
                });
            }
        }

        if !(self.door_damping > 0.0 && self.door_damping <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "door_damping",
                value: self.door_damping,
                reason: "must lie in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.ceiling_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "ceiling_opacity",
                value: self.ceiling_opacity,
                reason: "must lie in [0, 1]",
            });
        }
        Ok(())
    }
}
