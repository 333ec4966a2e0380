use crate::foundation::core::FrameIndex;

/// Clamped linear fade: `0` before frame 0, `1` at and after `ramp_frames`.
///
/// A non-positive `ramp_frames` degenerates to a step at frame 0.
pub fn linear_ramp(frame: FrameIndex, ramp_frames: i64) -> f64 {
    if ramp_frames <= 0 {
        return if frame.0 < 0 { 0.0 } else { 1.0 };
    }
    interpolate(frame, [0.0, ramp_frames as f64], [0.0, 1.0])
}

/// Map `frame` from the `input` window onto the `output` window, clamping at both ends.
///
/// A zero-width `input` window yields `output[0]` before it and `output[1]` from it on.
pub fn interpolate(frame: FrameIndex, input: [f64; 2], output: [f64; 2]) -> f64 {
    let [i0, i1] = input;
    let [o0, o1] = output;
    let x = frame.as_f64();
    let span = i1 - i0;
    if span == 0.0 {
        return if x < i0 { o0 } else { o1 };
    }
    let t = ((x - i0) / span).clamp(0.0, 1.0);
    if t == 1.0 {
        return o1;
    }
    o0 + (o1 - o0) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
