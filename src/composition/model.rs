use std::io::Read;

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{FramelineError, FramelineResult},
    render::frame::{LayerRender, RenderedFrame},
    sequence::resolver::{ActiveSequence, Sequence, resolve_active},
};

/// Timeline-wide constants of a composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionConfig {
    /// Identifier used to select the composition from a [`crate::Project`].
    pub id: String,
    /// Frame dimensions (`width`, `height` in the JSON form).
    #[serde(flatten)]
    pub canvas: Canvas,
    pub fps: Fps,
    /// Total frames; the composition is visible on `[0, duration_in_frames)`.
    pub duration_in_frames: i64,
}

impl CompositionConfig {
    pub fn new(
        id: impl Into<String>,
        canvas: Canvas,
        fps: Fps,
        duration_in_frames: i64,
    ) -> FramelineResult<Self> {
        let config = Self {
            id: id.into(),
            canvas,
            fps,
            duration_in_frames,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FramelineResult<()> {
        if self.id.trim().is_empty() {
            return Err(FramelineError::invalid_composition(
                "composition id must be non-empty",
            ));
        }
        if self.fps.0 == 0 {
            return Err(FramelineError::invalid_composition("fps must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FramelineError::invalid_composition(
                "canvas width/height must be > 0",
            ));
        }
        if self.duration_in_frames <= 0 {
            return Err(FramelineError::invalid_composition(
                "duration_in_frames must be > 0",
            ));
        }
        Ok(())
    }

    /// `[0, duration_in_frames)`.
    pub fn timeline(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration_in_frames),
        }
    }
}

/// An immutable timeline: constants plus an ordered list of sequences.
///
/// Sequence order is paint order. Once built, [`Composition::render_frame`] is a pure
/// function of the frame number and can be called from any number of threads.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Composition {
    #[serde(flatten)]
    config: CompositionConfig,
    sequences: Vec<Sequence>,
}

/// Wire form of a declaration. Numeric constants are read as signed integers so that
/// negative values surface as [`FramelineError::InvalidComposition`], not parse errors.
#[derive(serde::Deserialize)]
struct CompositionDoc {
    id: String,
    width: i64,
    height: i64,
    fps: i64,
    duration_in_frames: i64,
    #[serde(default)]
    sequences: Vec<Sequence>,
}

impl CompositionDoc {
    fn into_composition(self) -> FramelineResult<Composition> {
        let canvas = Canvas::new(
            positive_u32("canvas width", self.width)?,
            positive_u32("canvas height", self.height)?,
        )?;
        let fps = Fps::new(positive_u32("fps", self.fps)?)?;
        let config = CompositionConfig::new(self.id, canvas, fps, self.duration_in_frames)?;
        Composition::new(config, self.sequences)
    }
}

fn positive_u32(name: &str, v: i64) -> FramelineResult<u32> {
    match u32::try_from(v) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FramelineError::invalid_composition(format!(
            "{name} must be a positive 32-bit integer, got {v}"
        ))),
    }
}

impl Composition {
    /// Validate and freeze a composition.
    pub fn new(config: CompositionConfig, sequences: Vec<Sequence>) -> FramelineResult<Self> {
        config.validate()?;
        for seq in &sequences {
            seq.validate()?;
            if seq.start_frame.0 >= config.duration_in_frames {
                tracing::warn!(
                    composition = %config.id,
                    sequence = seq.label(),
                    start = seq.start_frame.0,
                    "sequence starts after the composition ends and is never visible"
                );
            }
        }
        tracing::debug!(
            composition = %config.id,
            sequences = sequences.len(),
            duration = config.duration_in_frames,
            "composition built"
        );
        Ok(Self { config, sequences })
    }

    /// Parse and validate a JSON declaration.
    pub fn from_json_str(s: &str) -> FramelineResult<Self> {
        let doc: CompositionDoc = serde_json::from_str(s)?;
        doc.into_composition()
    }

    pub fn from_json_reader(reader: impl Read) -> FramelineResult<Self> {
        let doc: CompositionDoc = serde_json::from_reader(reader)?;
        doc.into_composition()
    }

    pub fn to_json_string(&self) -> FramelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn fps(&self) -> Fps {
        self.config.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    pub fn duration_in_frames(&self) -> i64 {
        self.config.duration_in_frames
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Sequences active at `frame`; empty outside the composition's lifetime.
    pub fn active_at(&self, frame: FrameIndex) -> Vec<ActiveSequence<'_>> {
        if !self.config.timeline().contains(frame) {
            return Vec::new();
        }
        resolve_active(&self.sequences, frame)
    }

    /// Resolve and evaluate every active layer at `frame`, bottom to top.
    #[tracing::instrument(skip(self), fields(composition = %self.config.id))]
    pub fn render_frame(&self, frame: FrameIndex) -> RenderedFrame {
        let layers = self
            .active_at(frame)
            .into_iter()
            .map(|active| LayerRender {
                index: active.index,
                name: active.sequence.label().to_string(),
                local_frame: active.local_frame,
                descriptor: active.sequence.layer.evaluate(active.local_frame, &self.config),
            })
            .collect();
        RenderedFrame { frame, layers }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
