//! Pointer velocity estimation for release decisions.
//!
//! Each axis runs the impulse strategy: velocity is derived from the kinetic
//! energy the recent samples would impart.

use swipedeck_geometry::{Point, Vector};

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

/// Maximum release velocity in logical pixels per second.
pub const MAX_RELEASE_VELOCITY: f32 = 8_000.0;

#[derive(Clone, Copy, Default, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Single-axis impulse velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second; 0.0 without at least two recent samples.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut cursor = self.index;
        let mut newer = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (newer.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            newer = sample;
            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
            cursor = if cursor == 0 {
                HISTORY_SIZE - 1
            } else {
                cursor - 1
            };
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions, &times, count) * 1000.0
    }

    pub fn velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Velocity per millisecond from newest-first samples.
fn impulse_velocity(
    positions: &[f32; HISTORY_SIZE],
    times: &[f32; HISTORY_SIZE],
    count: usize,
) -> f32 {
    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let v_curr = (positions[i - 1] - positions[i]) / (next_time - current_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis tracker fed with pointer locations.
#[derive(Clone, Debug, Default)]
pub struct PointerVelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl PointerVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&mut self, time_ms: i64, location: Point) {
        self.x.add_sample(time_ms, location.x);
        self.y.add_sample(time_ms, location.y);
    }

    /// Release velocity in px/s, each axis capped at [`MAX_RELEASE_VELOCITY`].
    pub fn velocity(&self) -> Vector {
        Vector::new(
            self.x.velocity_with_max(MAX_RELEASE_VELOCITY),
            self.y.velocity_with_max(MAX_RELEASE_VELOCITY),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
