//! Procedural positional paths: shake jitter and jump arcs
//!
//! Both are sampled by normalized progress and return an offset relative to
//! the position captured when the tween starts. Both return to zero offset at
//! progress 1.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Parameters for a positional shake
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeParams {
    /// Maximum displacement from the origin
    pub strength: f32,
    /// Direction changes per second
    pub vibrato: u32,
    /// Maximum deviation (degrees) from a straight back-and-forth between waypoints
    pub randomness: f32,
    /// Fixed RNG seed; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            strength: 10.0,
            vibrato: 10,
            randomness: 90.0,
            seed: None,
        }
    }
}

/// Upper bound on shake waypoints, whatever the vibrato and duration
pub const MAX_SHAKE_WAYPOINTS: usize = 1024;

/// Precomputed shake waypoints in the XY plane
///
/// The waypoints alternate direction (with up to `randomness` degrees of
/// jitter) and their amplitude decays linearly so the last leg lands back on
/// the origin.
#[derive(Clone, Debug)]
pub struct ShakePath {
    offsets: SmallVec<[Vec3; 16]>,
}

impl ShakePath {
    pub fn new(params: &ShakeParams, duration: f32) -> Self {
        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let count = (params.vibrato as f32 * duration).round() as usize;
        let count = count.clamp(2, MAX_SHAKE_WAYPOINTS);
        let randomness = params.randomness.clamp(0.0, 180.0);

        let mut offsets = SmallVec::with_capacity(count + 2);
        offsets.push(Vec3::ZERO);

        let mut angle: f32 = rng.random_range(0.0..360.0);
        for i in 0..count {
            if i > 0 {
                let jitter = if randomness > 0.0 {
                    rng.random_range(-randomness..=randomness)
                } else {
                    0.0
                };
                angle = angle + 180.0 + jitter;
            }
            let decay = 1.0 - i as f32 / count as f32;
            let radians = angle.to_radians();
            offsets.push(Vec3::new(radians.cos(), radians.sin(), 0.0) * params.strength * decay);
        }
        offsets.push(Vec3::ZERO);

        Self { offsets }
    }

    /// Offset at normalized progress `t` (piecewise linear between waypoints)
    pub fn sample(&self, t: f32) -> Vec3 {
        let last = self.offsets.len() - 1;
        if t <= 0.0 {
            return self.offsets[0];
        }
        if t >= 1.0 {
            return self.offsets[last];
        }

        let scaled = t * last as f32;
        let index = (scaled.floor() as usize).min(last - 1);
        let local = scaled - index as f32;
        self.offsets[index].lerp(self.offsets[index + 1], local)
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.offsets
    }
}

/// A series of parabolic hops that ends where it started
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpArc {
    pub height: f32,
    pub jumps: u32,
}

impl JumpArc {
    pub fn new(height: f32, jumps: u32) -> Self {
        Self {
            height,
            jumps: jumps.max(1),
        }
    }

    /// Vertical offset at normalized progress `t`
    pub fn sample(&self, t: f32) -> Vec3 {
        if t <= 0.0 || t >= 1.0 {
            return Vec3::ZERO;
        }
        let hop = t * self.jumps as f32;
        let local = hop - hop.floor();
        Vec3::Y * (4.0 * self.height * local * (1.0 - local))
    }
}
