use crate::{
    composition::dsl::CompositionBuilder,
    composition::model::Composition,
    composition::registry::Project,
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::FramelineResult,
    layer::model::{AudioLayer, ImageLayer, Layer, SubtitleLayer, TextSpan, TitleLayer},
};

/// Id of the built-in demo composition.
pub const WELCOME_ID: &str = "Main";

const WELCOME_SUBTITLE: &str = "Transform images and videos to load faster with no visual \
degradation, automatically generate image and video variants, and deliver high quality \
responsive experiences to increase conversions.";

/// Fifteen-second 1080p welcome card.
///
/// The logo springs in at 0.3 s, the voice-over and title start at 1 s and the
/// subtitle fades in from 2 s. Every layer stays up until the end.
pub fn welcome_composition() -> FramelineResult<Composition> {
    let fps = Fps::new(30)?;
    let duration = 30 * 15;
    let voice = AudioLayer::new("voice.mp3").trim(FrameIndex(0), Some(FrameIndex(duration)));
    let title = TitleLayer::new(vec![
        TextSpan::new("Welcome ", "burlywood"),
        TextSpan::new("to", "darkorange"),
        TextSpan::new(" Cloudinary", "deepskyblue"),
    ]);

    CompositionBuilder::new(WELCOME_ID, fps, Canvas::new(1920, 1080)?, duration)
        .layer_at_secs(
            "logo",
            0.3,
            duration,
            Layer::Image(ImageLayer::new("cloudinary.png")),
        )?
        .layer_at_secs("voice", 1.0, duration, Layer::AudioTrack(voice))?
        .layer_at_secs("title", 1.0, duration, Layer::Title(title))?
        .layer_at_secs(
            "subtitle",
            2.0,
            duration,
            Layer::Subtitle(SubtitleLayer::new(WELCOME_SUBTITLE)),
        )?
        .build()
}

/// A project holding only [`welcome_composition`].
pub fn welcome_project() -> FramelineResult<Project> {
    let mut project = Project::new();
    project.register(welcome_composition()?)?;
    Ok(project)
}
