//! Runtime-tunable deck settings.

use std::fmt;
use std::time::Duration;

use crate::direction::Direction;

/// Deck configuration. Every field is re-read by the operation that uses it,
/// so changes through [`Deck::config_mut`](crate::Deck::config_mut) apply on
/// the next gesture, refill or rewind.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckConfig {
    /// Number of cards kept in the active window.
    pub active_window: usize,
    /// Number of swiped cards remembered for rewind.
    pub history_capacity: usize,
    /// Directions a drag may be swiped away in.
    pub allowed_direction: Direction,
    /// Fraction of the container's width (or height) a drag must travel.
    pub min_translation_fraction: f32,
    /// Release speed in px/s that swipes regardless of travel. Also the
    /// minimum throw speed.
    pub min_velocity: f32,
    /// Only the top card accepts pointer input.
    pub only_top_interactive: bool,
    /// Poll interval for reclaiming cards that left the screen.
    pub reclaim_interval: Duration,
    /// Damping of the spring that returns a released card to the center.
    pub snap_damping: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            active_window: 4,
            history_capacity: 10,
            allowed_direction: Direction::HORIZONTAL,
            min_translation_fraction: 0.25,
            min_velocity: 750.0,
            only_top_interactive: false,
            reclaim_interval: Duration::from_millis(300),
            snap_damping: 0.75,
        }
    }
}

impl DeckConfig {
    pub fn with_active_window(mut self, active_window: usize) -> Self {
        self.active_window = active_window;
        self
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    pub fn with_allowed_direction(mut self, allowed_direction: Direction) -> Self {
        self.allowed_direction = allowed_direction;
        self
    }

    pub fn with_min_translation_fraction(mut self, fraction: f32) -> Self {
        self.min_translation_fraction = fraction;
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity;
        self
    }

    pub fn with_only_top_interactive(mut self, only_top_interactive: bool) -> Self {
        self.only_top_interactive = only_top_interactive;
        self
    }

    pub fn with_reclaim_interval(mut self, reclaim_interval: Duration) -> Self {
        self.reclaim_interval = reclaim_interval;
        self
    }

    pub fn with_snap_damping(mut self, snap_damping: f32) -> Self {
        self.snap_damping = snap_damping;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = self.min_translation_fraction;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(ConfigError::TranslationFraction(fraction));
        }
        if !self.min_velocity.is_finite() || self.min_velocity < 0.0 {
            return Err(ConfigError::MinVelocity(self.min_velocity));
        }
        if !self.snap_damping.is_finite() || !(0.0..=1.0).contains(&self.snap_damping) {
            return Err(ConfigError::SnapDamping(self.snap_damping));
        }
        if self.reclaim_interval.is_zero() {
            return Err(ConfigError::ZeroReclaimInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    TranslationFraction(f32),
    MinVelocity(f32),
    SnapDamping(f32),
    ZeroReclaimInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TranslationFraction(value) => write!(
                f,
                "minimum translation fraction must be finite and non-negative, got {value}"
            ),
            ConfigError::MinVelocity(value) => write!(
                f,
                "minimum velocity must be finite and non-negative, got {value}"
            ),
            ConfigError::SnapDamping(value) => {
                write!(f, "snap damping must be within 0.0..=1.0, got {value}")
            }
            ConfigError::ZeroReclaimInterval => f.write_str("reclaim interval must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DeckConfig::default();
        assert_eq!(config.active_window, 4);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.allowed_direction, Direction::HORIZONTAL);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn invalid_thresholds_are_reported() {
        let config = DeckConfig::default().with_min_translation_fraction(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TranslationFraction(_))
        ));

        let config = DeckConfig::default().with_min_velocity(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::MinVelocity(-1.0)));

        let config = DeckConfig::default().with_snap_damping(1.5);
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "snap damping must be within 0.0..=1.0, got 1.5"
        );

        let config = DeckConfig::default().with_reclaim_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroReclaimInterval));
    }
}
