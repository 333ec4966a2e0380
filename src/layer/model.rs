use crate::{
    animation::spring::SpringParams,
    foundation::core::FrameIndex,
    foundation::error::{FramelineError, FramelineResult},
};

/// Opaque handle (path or URI) to an external image or audio binary.
///
/// The engine never dereferences it; resolution belongs to the asset loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(&self, what: &str) -> FramelineResult<()> {
        if self.0.trim().is_empty() {
            return Err(FramelineError::invalid_sequence(format!(
                "{what} asset reference must be non-empty"
            )));
        }
        Ok(())
    }
}

/// What a sequence shows (or plays) while active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// Raster image sliding vertically on a spring.
    Image(ImageLayer),
    /// Static, fully opaque headline.
    Title(TitleLayer),
    /// Text fading in linearly.
    Subtitle(SubtitleLayer),
    /// Voice or music track with a source trim window.
    AudioTrack(AudioLayer),
}

impl Layer {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Title(_) => "title",
            Self::Subtitle(_) => "subtitle",
            Self::AudioTrack(_) => "audio_track",
        }
    }

    pub fn validate(&self) -> FramelineResult<()> {
        match self {
            Self::Image(l) => l.validate(),
            Self::Title(l) => l.validate(),
            Self::Subtitle(l) => l.validate(),
            Self::AudioTrack(l) => l.validate(),
        }
    }
}

/// Spring-driven motion of a single scalar property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringMotion {
    #[serde(default)]
    pub from: f64,
    #[serde(default = "default_motion_to")]
    pub to: f64,
    #[serde(flatten)]
    pub params: SpringParams,
}

fn default_motion_to() -> f64 {
    100.0
}

impl Default for SpringMotion {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: default_motion_to(),
            params: SpringParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageLayer {
    pub asset: AssetRef,
    /// Width as a percentage of the canvas width.
    #[serde(default = "default_image_width_pct")]
    pub width_pct: f64,
    /// Height as a percentage of the canvas height.
    #[serde(default = "default_image_height_pct")]
    pub height_pct: f64,
    /// Vertical translation in pixels.
    #[serde(default)]
    pub translate_y: SpringMotion,
}

fn default_image_width_pct() -> f64 {
    30.0
}

fn default_image_height_pct() -> f64 {
    50.0
}

impl ImageLayer {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: AssetRef::new(asset),
            width_pct: default_image_width_pct(),
            height_pct: default_image_height_pct(),
            translate_y: SpringMotion::default(),
        }
    }

    fn validate(&self) -> FramelineResult<()> {
        self.asset.validate("image")?;
        validate_pct(self.width_pct, "image width_pct")?;
        validate_pct(self.height_pct, "image height_pct")?;
        if !self.translate_y.from.is_finite() || !self.translate_y.to.is_finite() {
            return Err(FramelineError::invalid_spring(
                "image translate_y from/to must be finite",
            ));
        }
        self.translate_y.params.validate()
    }
}

/// A run of text in one color.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextSpan {
    pub text: String,
    /// CSS color name or hex string, passed through to the compositor.
    pub color: String,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleLayer {
    pub spans: Vec<TextSpan>,
    #[serde(default = "default_title_font_size_rem")]
    pub font_size_rem: f64,
    /// Vertical anchor as a percentage of the canvas height.
    #[serde(default = "default_title_top_pct")]
    pub top_pct: f64,
}

fn default_title_font_size_rem() -> f64 {
    5.0
}

fn default_title_top_pct() -> f64 {
    50.0
}

impl TitleLayer {
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self {
            spans,
            font_size_rem: default_title_font_size_rem(),
            top_pct: default_title_top_pct(),
        }
    }

    fn validate(&self) -> FramelineResult<()> {
        if self.spans.iter().all(|s| s.text.trim().is_empty()) {
            return Err(FramelineError::invalid_sequence(
                "title must have at least one non-empty span",
            ));
        }
        validate_font_size(self.font_size_rem, "title")?;
        validate_pct(self.top_pct, "title top_pct")
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubtitleLayer {
    pub text: String,
    /// Frames taken to fade from transparent to opaque.
    #[serde(default = "default_fade_frames")]
    pub fade_frames: i64,
    #[serde(default = "default_subtitle_font_size_rem")]
    pub font_size_rem: f64,
    #[serde(default = "default_subtitle_top_pct")]
    pub top_pct: f64,
}

fn default_fade_frames() -> i64 {
    30
}

fn default_subtitle_font_size_rem() -> f64 {
    3.0
}

fn default_subtitle_top_pct() -> f64 {
    60.0
}

impl SubtitleLayer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fade_frames: default_fade_frames(),
            font_size_rem: default_subtitle_font_size_rem(),
            top_pct: default_subtitle_top_pct(),
        }
    }

    fn validate(&self) -> FramelineResult<()> {
        if self.text.trim().is_empty() {
            return Err(FramelineError::invalid_sequence(
                "subtitle text must be non-empty",
            ));
        }
        if self.fade_frames < 0 {
            return Err(FramelineError::invalid_sequence(
                "subtitle fade_frames must be >= 0",
            ));
        }
        validate_font_size(self.font_size_rem, "subtitle")?;
        validate_pct(self.top_pct, "subtitle top_pct")
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioLayer {
    pub asset: AssetRef,
    /// First source frame played.
    #[serde(default = "default_start_from")]
    pub start_from: FrameIndex,
    /// Source frame at which playback stops (exclusive); `None` plays to the end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<FrameIndex>,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_start_from() -> FrameIndex {
    FrameIndex(0)
}

fn default_volume() -> f64 {
    1.0
}

impl AudioLayer {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: AssetRef::new(asset),
            start_from: default_start_from(),
            end_at: None,
            volume: default_volume(),
        }
    }

    pub fn trim(mut self, start_from: FrameIndex, end_at: Option<FrameIndex>) -> Self {
        self.start_from = start_from;
        self.end_at = end_at;
        self
    }

    fn validate(&self) -> FramelineResult<()> {
        self.asset.validate("audio")?;
        if self.start_from.0 < 0 {
            return Err(FramelineError::invalid_sequence(
                "audio start_from must be >= 0",
            ));
        }
        if let Some(end) = self.end_at
            && end <= self.start_from
        {
            return Err(FramelineError::invalid_sequence(
                "audio end_at must be > start_from",
            ));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(FramelineError::invalid_sequence(
                "audio volume must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

fn validate_pct(v: f64, field: &str) -> FramelineResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(FramelineError::invalid_sequence(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_font_size(v: f64, kind: &str) -> FramelineResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(FramelineError::invalid_sequence(format!(
            "{kind} font_size_rem must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layer/model.rs"]
mod tests;
