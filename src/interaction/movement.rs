use crate::config::ViewerConfig;
use crate::math::damping::decay;
use crate::math::{Point3, Vector2};
use crate::operations::CollisionVolumes;

use super::InputState;

/// Tunables of the walkthrough controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    /// Acceleration along the held direction, in world units per second.
    pub move_speed: f64,
    /// Velocity decay rate per second.
    pub velocity_damping: f64,
    /// Camera height kept after every frame.
    pub eye_height: f64,
}

impl MovementParams {
    #[must_use]
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            velocity_damping: config.velocity_damping,
            eye_height: config.eye_height,
        }
    }
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

/// First-person walkthrough integrator.
///
/// Velocity lives on the ground plane (`x` is world X, `y` is world Z) and is
/// applied as a per-frame displacement. A frame whose tentative position lands
/// inside any collision volume is dropped whole, both axes together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementController {
    params: MovementParams,
    velocity: Vector2,
}

impl MovementController {
    #[must_use]
    pub fn new(params: MovementParams) -> Self {
        Self {
            params,
            velocity: Vector2::zeros(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &MovementParams {
        &self.params
    }

    /// Returns the planar velocity as `(x, z)`.
    #[must_use]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Stops any residual motion.
    pub fn reset(&mut self) {
        self.velocity = Vector2::zeros();
    }

    /// Integrates one frame and returns the new camera position.
    ///
    /// `W` decreases world Z and `D` decreases world X; the axes are fixed
    /// to the world, not the camera heading.
    pub fn tick(
        &mut self,
        input: &InputState,
        delta: f64,
        position: Point3,
        volumes: &CollisionVolumes,
    ) -> Point3 {
        let p = &self.params;
        self.velocity.x = decay(self.velocity.x, p.velocity_damping, delta);
        self.velocity.y = decay(self.velocity.y, p.velocity_damping, delta);

        let mut direction = Vector2::new(
            f64::from(u8::from(input.right)) - f64::from(u8::from(input.left)),
            f64::from(u8::from(input.forward)) - f64::from(u8::from(input.backward)),
        );
        if direction.norm_squared() > 0.0 {
            direction.normalize_mut();
        }
        if input.forward || input.backward {
            self.velocity.y -= direction.y * p.move_speed * delta;
        }
        if input.left || input.right {
            self.velocity.x -= direction.x * p.move_speed * delta;
        }

        let tentative = Point3::new(
            position.x + self.velocity.x,
            position.y,
            position.z + self.velocity.y,
        );
        let mut next = if volumes.contains(&tentative) {
            position
        } else {
            tentative
        };
        next.y = p.eye_height;
        next
    }
}
