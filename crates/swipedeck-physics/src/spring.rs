//! Damped harmonic oscillator configuration shared by snap and attachment
//! behaviors.

use swipedeck_geometry::Vector;

/// Spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold (px/s) below which a settled spring stops.
    pub velocity_threshold: f32,
    /// Position threshold (px) below which a settled spring stops.
    pub position_threshold: f32,
}

/// Stiffness used by snap behaviors; settles a 0.75-damped snap in roughly
/// 0.4 s.
pub const SNAP_STIFFNESS: f32 = 250.0;

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.5,
            position_threshold: 0.1,
        }
    }

    /// Spring driving a snap behavior with the given damping ratio.
    pub fn snap(damping: f32) -> Self {
        Self {
            damping_ratio: damping.max(0.0),
            stiffness: SNAP_STIFFNESS,
            ..Self::default_spring()
        }
    }

    /// Spring oscillating at `frequency` hertz.
    pub fn from_frequency(frequency: f32, damping: f32) -> Self {
        let omega = 2.0 * std::f32::consts::PI * frequency;
        Self {
            damping_ratio: damping.max(0.0),
            stiffness: omega * omega,
            ..Self::default_spring()
        }
    }

    /// Viscous damping coefficient `c = 2ζ√k` for unit mass.
    pub fn damping_coefficient(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }

    /// Acceleration of a unit mass displaced by `displacement` from rest and
    /// moving at `velocity`.
    pub fn acceleration(&self, displacement: Vector, velocity: Vector) -> Vector {
        let damping = self.damping_coefficient();
        Vector::new(
            -self.stiffness * displacement.dx - damping * velocity.dx,
            -self.stiffness * displacement.dy - damping * velocity.dy,
        )
    }

    /// Whether a spring with this displacement and velocity counts as settled.
    pub fn is_at_rest(&self, displacement: Vector, velocity: Vector) -> bool {
        displacement.magnitude() < self.position_threshold
            && velocity.magnitude() < self.velocity_threshold
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}
