use crate::{
    animation::ramp::linear_ramp,
    animation::spring::{Spring, SpringConfig},
    composition::model::CompositionConfig,
    foundation::core::{FrameIndex, Vec2},
    layer::model::{AssetRef, AudioLayer, ImageLayer, Layer, SubtitleLayer, TextSpan, TitleLayer},
};

/// Renderable state of one layer at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDescriptor {
    /// Visual image placement.
    Image(ImageDescriptor),
    /// Visual text block (title or subtitle).
    Text(TextDescriptor),
    /// Audio playback window; carries no visual fields.
    Audio(AudioDescriptor),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImageDescriptor {
    pub asset: AssetRef,
    /// Offset from the horizontally centered rest position, in pixels.
    pub translate: Vec2,
    pub width_px: f64,
    pub height_px: f64,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    Subtitle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextDescriptor {
    pub role: TextRole,
    pub spans: Vec<TextSpan>,
    pub font_size_rem: f64,
    /// Vertical anchor in pixels from the top edge; text spans the full width, centered.
    pub top_px: f64,
    /// In `[0, 1]`.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioDescriptor {
    pub asset: AssetRef,
    pub start_from: FrameIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<FrameIndex>,
    /// Source frame under the playhead (`start_from + local_frame`).
    pub source_frame: FrameIndex,
    /// `false` once the playhead reaches `end_at`.
    pub playing: bool,
    pub volume: f64,
}

impl Layer {
    /// Stateless evaluation at a sequence-local frame.
    pub fn evaluate(&self, local: FrameIndex, config: &CompositionConfig) -> RenderDescriptor {
        match self {
            Self::Image(l) => RenderDescriptor::Image(eval_image(l, local, config)),
            Self::Title(l) => RenderDescriptor::Text(eval_title(l, config)),
            Self::Subtitle(l) => RenderDescriptor::Text(eval_subtitle(l, local, config)),
            Self::AudioTrack(l) => RenderDescriptor::Audio(eval_audio(l, local)),
        }
    }
}

fn eval_image(
    layer: &ImageLayer,
    local: FrameIndex,
    config: &CompositionConfig,
) -> ImageDescriptor {
    let motion = layer.translate_y;
    let spring = Spring::from_validated(SpringConfig {
        fps: config.fps.0,
        to: motion.to,
        from: motion.from,
        params: motion.params,
    });
    ImageDescriptor {
        asset: layer.asset.clone(),
        translate: Vec2::new(0.0, spring.value(local)),
        width_px: f64::from(config.canvas.width) * layer.width_pct / 100.0,
        height_px: f64::from(config.canvas.height) * layer.height_pct / 100.0,
        opacity: 1.0,
    }
}

fn eval_title(layer: &TitleLayer, config: &CompositionConfig) -> TextDescriptor {
    TextDescriptor {
        role: TextRole::Title,
        spans: layer.spans.clone(),
        font_size_rem: layer.font_size_rem,
        top_px: f64::from(config.canvas.height) * layer.top_pct / 100.0,
        opacity: 1.0,
    }
}

fn eval_subtitle(
    layer: &SubtitleLayer,
    local: FrameIndex,
    config: &CompositionConfig,
) -> TextDescriptor {
    TextDescriptor {
        role: TextRole::Subtitle,
        spans: vec![TextSpan::new(layer.text.clone(), "inherit")],
        font_size_rem: layer.font_size_rem,
        top_px: f64::from(config.canvas.height) * layer.top_pct / 100.0,
        opacity: linear_ramp(local, layer.fade_frames).clamp(0.0, 1.0),
    }
}

fn eval_audio(layer: &AudioLayer, local: FrameIndex) -> AudioDescriptor {
    let source_frame = FrameIndex(layer.start_from.0.saturating_add(local.0));
    AudioDescriptor {
        asset: layer.asset.clone(),
        start_from: layer.start_from,
        end_at: layer.end_at,
        source_frame,
        playing: layer.end_at.is_none_or(|end| source_frame < end),
        volume: layer.volume,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/evaluate.rs"]
mod tests;
