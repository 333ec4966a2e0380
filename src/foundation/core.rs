use anyhow::anyhow;

use crate::foundation::error::{FramelineError, FramelineResult};

pub use kurbo::Vec2;

/// A frame number on a timeline.
///
/// Global frames index the composition timeline; local frames index a sequence's own
/// sub-timeline and are zero at the sequence start. Negative values are legal queries
/// (seeking before the start) and simply resolve to nothing.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub i64);

impl FrameIndex {
    /// Frame number as a float, for interpolation math.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Half-open frame window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramelineResult<Self> {
        if start.0 > end.0 {
            return Err(FramelineError::Other(anyhow!(
                "frame range start {} must be <= end {}",
                start.0,
                end.0
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0).max(0) as u64
    }

    pub fn is_empty(self) -> bool {
        self.start.0 >= self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Frame relative to `start`, if `f` lies inside the window.
    pub fn local(self, f: FrameIndex) -> Option<FrameIndex> {
        self.contains(f).then(|| FrameIndex(f.0 - self.start.0))
    }

    /// Overlap with another window, `None` when disjoint.
    pub fn intersect(self, other: FrameRange) -> Option<FrameRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(FrameRange { start, end })
    }
}

/// Integer frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Fps(pub u32);

impl Fps {
    pub fn new(fps: u32) -> FramelineResult<Self> {
        if fps == 0 {
            return Err(FramelineError::invalid_composition("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    pub fn frames_to_secs(self, frames: FrameIndex) -> f64 {
        frames.as_f64() / self.as_f64()
    }

    /// Nearest whole frame for a time in seconds (`0.3 s @ 30 fps` is frame 9).
    pub fn secs_to_frames(self, secs: f64) -> FrameIndex {
        FrameIndex((secs * self.as_f64()).round() as i64)
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FramelineResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramelineError::invalid_composition(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
