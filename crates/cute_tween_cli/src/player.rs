//! Headless playback of presets on a simulated transform

use crate::config::PlayerConfig;
use anyhow::{Context, Result};
use cute_tween::{TargetRef, Transform, TweenScheduler};
use cute_tween_presets::Preset;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Outcome of one playback
#[derive(Debug, Clone)]
pub struct Report {
    pub name: String,
    pub frames: u32,
    pub seconds: f32,
    /// Whether `on_complete` fired
    pub completed: bool,
    pub transform: Transform,
}

/// Give seedless randomized presets the player's seed
pub fn apply_seed(preset: &mut Preset, seed: Option<u64>) {
    if let (Preset::Shake(shake), Some(seed)) = (preset, seed) {
        shake.seed.get_or_insert(seed);
    }
}

/// Play `preset` on a fresh transform at a fixed frame rate
///
/// Stops when nothing is left running or after `player.seconds`.
pub fn play(
    name: &str,
    preset: &mut Preset,
    player: &PlayerConfig,
    opacity: bool,
) -> Result<Report> {
    let fps = player.fps.max(1);
    let dt = 1.0 / fps as f32;
    let max_frames = (player.seconds.max(0.0) * fps as f32).ceil() as u32;

    let transform = Transform::new().with_opacity(opacity.then_some(1.0));
    let concrete = transform.shared();
    let target: TargetRef = concrete.clone();
    let scheduler = TweenScheduler::new();

    apply_seed(preset, player.seed);

    let completed = Rc::new(Cell::new(false));
    let flag = completed.clone();
    let tween = preset
        .play(&scheduler, &target, Some(Rc::new(move || flag.set(true))))
        .with_context(|| format!("Failed to play {name}"))?;
    debug!(animation = name, ?tween, duration = preset.duration(), "started");

    let mut frames = 0;
    while scheduler.has_active_animations() && frames < max_frames {
        scheduler.tick_all(dt)?;
        frames += 1;

        if player.log_every > 0 && frames % player.log_every == 0 {
            let t = *concrete.borrow();
            info!(
                animation = name,
                frame = frames,
                position = %t.position,
                rotation = %t.rotation,
                scale = %t.scale,
                opacity = ?t.opacity,
                "frame"
            );
        }
    }

    if scheduler.has_active_animations() {
        warn!(animation = name, seconds = player.seconds, "still running when playback stopped");
        scheduler.kill_all(false);
    }

    let report = Report {
        name: name.to_string(),
        frames,
        seconds: frames as f32 * dt,
        completed: completed.get(),
        transform: *concrete.borrow(),
    };
    info!(
        animation = name,
        frames = report.frames,
        completed = report.completed,
        scale = %report.transform.scale,
        "playback finished"
    );
    Ok(report)
}
