//! First-person view math: fixed-step ray marching against the tile grid,
//! fisheye correction, wall-slice sizing and sprite projection.
//!
//! Nothing here touches pixels; `renderer` turns the results into a frame.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::config::Config;
use crate::entities::{Player, wrap_angle};
use crate::map::Map;

/// Guards the 1/d projection against a zero distance.
const MIN_DIST: f32 = 1e-3;

/// Result of marching one ray. Lives for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub angle: f32,
    /// Distance travelled along the ray, before fisheye correction.
    pub distance: f32,
    pub hit: [f32; 2],
    /// `false` when the march ran out at max depth.
    pub wall: bool,
}

/// One screen column of the wall sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub ray: RayHit,
    pub corrected: f32,
    pub height: f32,
    pub shade: f32,
}

/// Screen-space placement of the monster sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub distance: f32,
}

/// March from `origin` along `angle` until the first closed cell or `max_depth`.
pub fn cast_ray(map: &Map, origin: [f32; 2], angle: f32, step: f32, max_depth: f32) -> RayHit {
    let (s, c) = angle.sin_cos();
    let point = |d: f32| [origin[0] + c * d, origin[1] + s * d];

    let max_depth = max_depth.max(0.0);
    let step = if step > 0.0 { step } else { max_depth.max(MIN_DIST) };
    let steps = (max_depth / step).ceil() as u32;

    // Distances come from the step index, not a running sum, so they never drift.
    for n in 0..=steps {
        let d = (n as f32 * step).min(max_depth);
        let p = point(d);
        if !map.is_open_at(p[0], p[1]) {
            return RayHit {
                angle,
                distance: d,
                hit: p,
                wall: true,
            };
        }
    }

    RayHit {
        angle,
        distance: max_depth,
        hit: point(max_depth),
        wall: false,
    }
}

/// Angle of ray `i` out of `n` spread over `fov` around `heading`.
#[inline]
pub fn ray_angle(heading: f32, i: usize, n: usize, fov: f32) -> f32 {
    let offset = i as f32 / n as f32 - 0.5;
    heading + offset * fov
}

/// Project a raw ray length onto the view direction.
#[inline]
pub fn correct_fisheye(raw: f32, ray_angle: f32, heading: f32) -> f32 {
    raw * (ray_angle - heading).cos()
}

/// On-screen wall height, inversely proportional to distance and capped at
/// the screen height.
#[inline]
pub fn slice_height(corrected: f32, screen_h: f32) -> f32 {
    (screen_h / corrected.max(MIN_DIST)).min(screen_h)
}

/// Brightness in [0, 1]; farther walls are darker.
#[inline]
pub fn shade(corrected: f32, max_depth: f32) -> f32 {
    if max_depth <= 0.0 {
        return 0.0;
    }
    (1.0 - corrected / max_depth).clamp(0.0, 1.0)
}

/// Sweep `cfg.ray_count` rays across the field of view, left to right.
pub fn cast_view(map: &Map, player: &Player, cfg: &Config) -> Vec<Column> {
    let n = cfg.ray_count;
    let fov = cfg.fov();
    let screen_h = cfg.screen_h as f32;

    (0..n)
        .into_par_iter()
        .map(|i| {
            let angle = ray_angle(player.angle, i, n, fov);
            let ray = cast_ray(map, player.pos, angle, cfg.ray_step, cfg.max_depth);
            let corrected = correct_fisheye(ray.distance, angle, player.angle);
            Column {
                ray,
                corrected,
                height: slice_height(corrected, screen_h),
                shade: shade(corrected, cfg.max_depth),
            }
        })
        .collect()
}

/// Place a sprite at `target` on screen, or `None` if it is outside the
/// field of view or closer than `cfg.billboard_min_dist`.
pub fn project_billboard(player: &Player, target: [f32; 2], cfg: &Config) -> Option<Billboard> {
    let dx = target[0] - player.pos[0];
    let dy = target[1] - player.pos[1];
    let distance = dx.hypot(dy);
    if distance <= cfg.billboard_min_dist {
        return None;
    }

    let rel = wrap_angle(dy.atan2(dx) - player.angle);
    if rel.abs() > cfg.half_fov() {
        return None;
    }

    let w = cfg.screen_w as f32;
    let h = cfg.screen_h as f32;
    let size = (0.5 * h / distance).min(h);
    Some(Billboard {
        center_x: (rel / cfg.fov() + 0.5) * w,
        // Sits on the floor a little below the horizon.
        center_y: 0.5 * h + 0.25 * size,
        radius: 0.5 * size,
        distance,
    })
}
