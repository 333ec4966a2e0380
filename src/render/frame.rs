use crate::{foundation::core::FrameIndex, layer::evaluate::RenderDescriptor};

/// Every active layer at one global frame, in paint order (later entries on top).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedFrame {
    /// Global frame that was evaluated.
    pub frame: FrameIndex,
    pub layers: Vec<LayerRender>,
}

/// One evaluated layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerRender {
    /// Declaration index of the owning sequence.
    pub index: usize,
    /// Sequence name, or the layer kind when unnamed.
    pub name: String,
    pub local_frame: FrameIndex,
    pub descriptor: RenderDescriptor,
}

impl RenderedFrame {
    /// `true` when nothing is active (before/after the timeline or in a gap).
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers that paint pixels, skipping audio.
    pub fn visual_layers(&self) -> impl Iterator<Item = &LayerRender> {
        self.layers
            .iter()
            .filter(|l| !matches!(l.descriptor, RenderDescriptor::Audio(_)))
    }

    /// Audio layers, in declaration order.
    pub fn audio_layers(&self) -> impl Iterator<Item = &LayerRender> {
        self.layers
            .iter()
            .filter(|l| matches!(l.descriptor, RenderDescriptor::Audio(_)))
    }

    pub fn layer_named(&self, name: &str) -> Option<&LayerRender> {
        self.layers.iter().find(|l| l.name == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
