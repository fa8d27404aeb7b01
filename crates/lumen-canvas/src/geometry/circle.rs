use std::f64::consts::PI;

use crate::coords::PointF;

/// Default angular-step multiplier for per-vertex-colored circles.
///
/// The step between perimeter samples is `2π × multiplier / color_count`, so
/// the fan resolution is tied to how many colors the caller supplies.
pub const CIRCLE_STEP_MULTIPLIER: f64 = 4.0;

/// Upper bound on perimeter samples in one fan.
pub const MAX_FAN_SAMPLES: usize = 1 << 16;

/// Sample angles (radians) around the perimeter, starting at 0 and stepping
/// by `2π × multiplier / color_count` while below `2π`.
///
/// The angle is accumulated, not computed as `i × step`, so rounding can
/// leave one extra sample just below `2π`.
///
/// Empty when there are no colors, the step is not a positive finite value,
/// or the step would need more than [`MAX_FAN_SAMPLES`] samples.
pub fn circle_fan_angles(color_count: usize, multiplier: f64) -> Vec<f64> {
    if color_count == 0 {
        return Vec::new();
    }
    let step = (PI * 2.0 * multiplier) / color_count as f64;
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    if (PI * 2.0 / step).ceil() > MAX_FAN_SAMPLES as f64 {
        log::warn!("circle fan step {step} needs more than {MAX_FAN_SAMPLES} samples, nothing generated");
        return Vec::new();
    }

    let mut angles = Vec::new();
    let mut angle = 0.0f64;
    while angle < PI * 2.0 {
        angles.push(angle);
        angle += step;
    }
    angles
}

/// Triangle fan approximating a circle of `radius` around the local origin:
/// the centroid, one vertex per sample angle, then the first perimeter vertex
/// again to close the fan.
pub fn circle_fan(radius: f32, color_count: usize, multiplier: f64) -> Vec<PointF> {
    let angles = circle_fan_angles(color_count, multiplier);
    if angles.is_empty() {
        return Vec::new();
    }

    let r = radius as f64;
    let mut fan = Vec::with_capacity(angles.len() + 2);
    fan.push(PointF::zero());
    fan.extend(angles.iter().map(|a| PointF::new((r * a.cos()) as f32, (r * a.sin()) as f32)));
    fan.push(fan[1]);
    fan
}
