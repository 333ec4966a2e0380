use crate::{
    composition::model::{Composition, CompositionConfig},
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::FramelineResult,
    layer::model::Layer,
    sequence::resolver::Sequence,
};

/// Builder for [`Composition`](crate::Composition).
///
/// Sequences are appended in paint order: each call lands on top of the previous ones.
pub struct CompositionBuilder {
    config: CompositionConfig,
    sequences: Vec<Sequence>,
}

impl CompositionBuilder {
    /// Create a builder for a new composition.
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas, duration_in_frames: i64) -> Self {
        Self {
            config: CompositionConfig {
                id: id.into(),
                canvas,
                fps,
                duration_in_frames,
            },
            sequences: Vec::new(),
        }
    }

    /// Append an already-declared sequence.
    pub fn sequence(mut self, sequence: Sequence) -> Self {
        self.sequences.push(sequence);
        self
    }

    /// Declare and append a named sequence.
    pub fn layer(
        self,
        name: impl Into<String>,
        start_frame: FrameIndex,
        duration_in_frames: i64,
        layer: Layer,
    ) -> FramelineResult<Self> {
        let seq = Sequence::new(start_frame, duration_in_frames, layer)?.named(name);
        Ok(self.sequence(seq))
    }

    /// Like [`CompositionBuilder::layer`], with the start given in seconds.
    pub fn layer_at_secs(
        self,
        name: impl Into<String>,
        start_secs: f64,
        duration_in_frames: i64,
        layer: Layer,
    ) -> FramelineResult<Self> {
        let start = self.config.fps.secs_to_frames(start_secs);
        self.layer(name, start, duration_in_frames, layer)
    }

    /// Build and validate final [`Composition`](crate::Composition).
    pub fn build(self) -> FramelineResult<Composition> {
        Composition::new(self.config, self.sequences)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
