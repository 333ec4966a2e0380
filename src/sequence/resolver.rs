use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{FramelineError, FramelineResult},
    layer::model::Layer,
};

/// Binds a layer to the window `[start_frame, start_frame + duration_in_frames)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    /// Optional label carried into render descriptors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub start_frame: FrameIndex,
    pub duration_in_frames: i64,
    pub layer: Layer,
}

impl Sequence {
    /// Declare a validated sequence.
    pub fn new(
        start_frame: FrameIndex,
        duration_in_frames: i64,
        layer: Layer,
    ) -> FramelineResult<Self> {
        let seq = Self {
            name: None,
            start_frame,
            duration_in_frames,
            layer,
        };
        seq.validate()?;
        Ok(seq)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> FramelineResult<()> {
        let label = self.label();
        if self.start_frame.0 < 0 {
            return Err(FramelineError::invalid_sequence(format!(
                "sequence '{label}' start_frame must be >= 0"
            )));
        }
        if self.duration_in_frames <= 0 {
            return Err(FramelineError::invalid_sequence(format!(
                "sequence '{label}' duration_in_frames must be > 0"
            )));
        }
        if self.start_frame.0.checked_add(self.duration_in_frames).is_none() {
            return Err(FramelineError::invalid_sequence(format!(
                "sequence '{label}' window overflows the frame range"
            )));
        }
        self.layer.validate()
    }

    /// Activation window on the global timeline.
    pub fn window(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: FrameIndex(self.start_frame.0.saturating_add(self.duration_in_frames)),
        }
    }

    pub fn is_active(&self, global: FrameIndex) -> bool {
        self.window().contains(global)
    }

    /// `global - start_frame` while active.
    pub fn local_frame(&self, global: FrameIndex) -> Option<FrameIndex> {
        self.window().local(global)
    }

    /// Name if set, otherwise the layer kind.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.layer.kind_name())
    }
}

/// A sequence active at some global frame, with its local time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveSequence<'a> {
    /// Declaration index; higher indices paint on top.
    pub index: usize,
    pub sequence: &'a Sequence,
    pub local_frame: FrameIndex,
}

/// Sequences active at `global`, in declaration order.
pub fn resolve_active(sequences: &[Sequence], global: FrameIndex) -> Vec<ActiveSequence<'_>> {
    sequences
        .iter()
        .enumerate()
        .filter_map(|(index, sequence)| {
            sequence.local_frame(global).map(|local_frame| ActiveSequence {
                index,
                sequence,
                local_frame,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/resolver.rs"]
mod tests;
