use crate::{
    foundation::core::FrameIndex,
    foundation::error::{FramelineError, FramelineResult},
};

/// Upper bound on frames scanned by [`Spring::settle_frame`].
const MAX_SETTLE_FRAMES: i64 = 1_000_000;

/// Oscillator parameters shared by every spring-driven property.
///
/// Defaults (`damping_ratio = 0.7`, `stiffness = 100`, `mass = 1`) give a lightly
/// damped settle: about 4.6% overshoot, within 1% of the target after ~0.75 s.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// `c / (2 * sqrt(k * m))`; `< 1` overshoots, `>= 1` approaches monotonically.
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Clamp the output so it never passes `to`.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping_ratio() -> f64 {
    0.7
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping_ratio: default_damping_ratio(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            overshoot_clamping: false,
        }
    }
}

impl SpringParams {
    pub fn validate(&self) -> FramelineResult<()> {
        for (name, v) in [("mass", self.mass), ("stiffness", self.stiffness)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FramelineError::invalid_spring(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        let omega0 = (self.stiffness / self.mass).sqrt();
        if !omega0.is_finite() || omega0 <= 0.0 {
            return Err(FramelineError::invalid_spring(
                "stiffness/mass ratio must be finite and > 0",
            ));
        }
        if !self.damping_ratio.is_finite() || self.damping_ratio <= 0.0 {
            return Err(FramelineError::invalid_spring(
                "damping_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Full spring declaration: where it starts, where it settles, and how fast.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub fps: u32,
    pub to: f64,
    #[serde(default)]
    pub from: f64,
    #[serde(flatten)]
    pub params: SpringParams,
}

impl SpringConfig {
    /// Spring from `0` to `to` with default oscillator parameters.
    pub fn new(fps: u32, to: f64) -> Self {
        Self {
            fps,
            to,
            from: 0.0,
            params: SpringParams::default(),
        }
    }

    pub fn with_from(mut self, from: f64) -> Self {
        self.from = from;
        self
    }

    pub fn with_params(mut self, params: SpringParams) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> FramelineResult<Spring> {
        Spring::new(self)
    }
}

/// A validated damped harmonic oscillator, sampled in closed form.
///
/// Each sample depends only on the frame passed in, so frames can be evaluated in any
/// order and on any thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    omega0: f64,
}

impl Spring {
    pub fn new(config: SpringConfig) -> FramelineResult<Self> {
        if config.fps == 0 {
            return Err(FramelineError::invalid_spring("fps must be > 0"));
        }
        config.params.validate()?;
        if !config.from.is_finite() || !config.to.is_finite() {
            return Err(FramelineError::invalid_spring(
                "from/to must be finite numbers",
            ));
        }
        Ok(Self::from_validated(config))
    }

    /// Skip validation for configs already checked at declaration time.
    pub(crate) fn from_validated(config: SpringConfig) -> Self {
        let omega0 = (config.params.stiffness / config.params.mass).sqrt();
        Self { config, omega0 }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Normalized response `s(t)`, `0` at frame 0 and converging to `1`.
    pub fn progress(&self, frame: FrameIndex) -> f64 {
        if frame.0 <= 0 {
            return 0.0;
        }
        let t = frame.as_f64() / f64::from(self.config.fps);
        step_response(t, self.omega0, self.config.params.damping_ratio)
    }

    /// `from + (to - from) * s(t)`.
    pub fn value(&self, frame: FrameIndex) -> f64 {
        let SpringConfig { from, to, .. } = self.config;
        let v = from + (to - from) * self.progress(frame);
        if !self.config.params.overshoot_clamping {
            return v;
        }
        if to >= from { v.min(to) } else { v.max(to) }
    }

    /// Peak overshoot past the target as a fraction of `|to - from|`.
    pub fn max_overshoot(&self) -> f64 {
        let zeta = self.config.params.damping_ratio;
        if self.config.params.overshoot_clamping || zeta >= 1.0 {
            return 0.0;
        }
        (-std::f64::consts::PI * zeta / (1.0 - zeta * zeta).sqrt()).exp()
    }

    /// First frame from which `|1 - s|` stays `<= threshold` for good.
    ///
    /// `None` when `threshold` is not positive or the spring takes longer than the
    /// scan bound to settle.
    pub fn settle_frame(&self, threshold: f64) -> Option<FrameIndex> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return None;
        }
        let zeta = self.config.params.damping_ratio;
        let fps = f64::from(self.config.fps);
        let deviation = |f: i64| (1.0 - self.progress(FrameIndex(f))).abs();

        if zeta >= 1.0 {
            // Monotone approach: the first frame inside the band is the answer.
            return (0..=MAX_SETTLE_FRAMES)
                .find(|&f| deviation(f) <= threshold)
                .map(FrameIndex);
        }

        // The decay envelope bounds the oscillation; past it every frame is inside.
        let envelope_scale = 1.0 / (1.0 - zeta * zeta).sqrt();
        let t_env = (envelope_scale / threshold).ln().max(0.0) / (zeta * self.omega0);
        let bound = (t_env * fps).ceil();
        if !bound.is_finite() || bound > MAX_SETTLE_FRAMES as f64 {
            return None;
        }
        let bound = bound as i64;
        let last_outside = (0..=bound).rev().find(|&f| deviation(f) > threshold);
        Some(FrameIndex(last_outside.map_or(0, |f| f + 1)))
    }
}

fn step_response(t: f64, omega0: f64, zeta: f64) -> f64 {
    // x(0) = 0, x'(0) = 0, target 1.
    if (zeta - 1.0).abs() < 1e-6 {
        let e = (-omega0 * t).exp();
        1.0 - e * (1.0 + omega0 * t)
    } else if zeta < 1.0 {
        let root = (1.0 - zeta * zeta).sqrt();
        let wd = omega0 * root;
        let e = (-zeta * omega0 * t).exp();
        1.0 - e * ((wd * t).cos() + (zeta / root) * (wd * t).sin())
    } else {
        // q = sqrt(1 - 1/zeta^2) without squaring zeta.
        let inv = 1.0 / zeta;
        let q = ((1.0 - inv) * (1.0 + inv)).sqrt();
        let z2 = zeta * q;
        // (zeta - z2) * (zeta + z2) = 1, so the slow root is -omega0 / (zeta + z2).
        let sum = zeta + z2;
        let r_slow = -omega0 / sum;
        let r_fast = -omega0 * sum;
        let c_slow = 0.5 * (1.0 + 1.0 / q);
        let c_fast = 0.5 / (z2 * sum);
        1.0 - (c_slow * (r_slow * t).exp() - c_fast * (r_fast * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
