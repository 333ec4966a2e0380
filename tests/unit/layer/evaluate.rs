use super::*;
use crate::foundation::core::{Canvas, Fps};

fn config() -> CompositionConfig {
    CompositionConfig::new(
        "test",
        Canvas::new(1920, 1080).unwrap(),
        Fps::new(30).unwrap(),
        450,
    )
    .unwrap()
}

#[test]
fn image_springs_from_rest_toward_target() {
    let cfg = config();
    let layer = Layer::Image(ImageLayer::new("logo.png"));
    let RenderDescriptor::Image(d0) = layer.evaluate(FrameIndex(0), &cfg) else {
        panic!("expected image descriptor");
    };
    assert_eq!(d0.translate, Vec2::new(0.0, 0.0));
    assert_eq!(d0.width_px, 576.0);
    assert_eq!(d0.height_px, 540.0);
    assert_eq!(d0.opacity, 1.0);

    let RenderDescriptor::Image(d_late) = layer.evaluate(FrameIndex(300), &cfg) else {
        panic!("expected image descriptor");
    };
    assert!((d_late.translate.y - 100.0).abs() < 1e-6);
    assert_eq!(d_late.translate.x, 0.0);
}

#[test]
fn image_matches_standalone_spring() {
    let cfg = config();
    let spring = SpringConfig::new(30, 100.0).build().unwrap();
    let layer = Layer::Image(ImageLayer::new("logo.png"));
    for f in [1, 5, 13, 51] {
        let RenderDescriptor::Image(d) = layer.evaluate(FrameIndex(f), &cfg) else {
            panic!("expected image descriptor");
        };
        assert_eq!(d.translate.y, spring.value(FrameIndex(f)));
    }
}

#[test]
fn title_is_static_and_opaque() {
    let cfg = config();
    let layer = Layer::Title(TitleLayer::new(vec![
        TextSpan::new("Welcome ", "burlywood"),
        TextSpan::new("to", "darkorange"),
    ]));
    let a = layer.evaluate(FrameIndex(0), &cfg);
    let b = layer.evaluate(FrameIndex(400), &cfg);
    assert_eq!(a, b);
    let RenderDescriptor::Text(t) = a else {
        panic!("expected text descriptor");
    };
    assert_eq!(t.role, TextRole::Title);
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.top_px, 540.0);
    assert_eq!(t.spans.len(), 2);
}

#[test]
fn subtitle_fades_in_linearly() {
    let cfg = config();
    let layer = Layer::Subtitle(SubtitleLayer::new("hello"));
    let opacity = |f: i64| match layer.evaluate(FrameIndex(f), &cfg) {
        RenderDescriptor::Text(t) => t.opacity,
        other => panic!("unexpected descriptor {other:?}"),
    };
    assert_eq!(opacity(0), 0.0);
    assert_eq!(opacity(15), 0.5);
    assert_eq!(opacity(30), 1.0);
    assert_eq!(opacity(31), 1.0);
    assert_eq!(opacity(389), 1.0);
}

#[test]
fn audio_reports_trim_window_and_playhead() {
    let layer =
        Layer::AudioTrack(AudioLayer::new("voice.mp3").trim(FrameIndex(10), Some(FrameIndex(40))));
    let cfg = config();
    let RenderDescriptor::Audio(a) = layer.evaluate(FrameIndex(0), &cfg) else {
        panic!("expected audio descriptor");
    };
    assert_eq!(a.start_from, FrameIndex(10));
    assert_eq!(a.end_at, Some(FrameIndex(40)));
    assert_eq!(a.source_frame, FrameIndex(10));
    assert!(a.playing);

    let RenderDescriptor::Audio(a) = layer.evaluate(FrameIndex(29), &cfg) else {
        panic!("expected audio descriptor");
    };
    assert_eq!(a.source_frame, FrameIndex(39));
    assert!(a.playing);

    let RenderDescriptor::Audio(a) = layer.evaluate(FrameIndex(30), &cfg) else {
        panic!("expected audio descriptor");
    };
    assert!(!a.playing);
}

#[test]
fn audio_descriptor_has_no_visual_fields() {
    let layer = Layer::AudioTrack(AudioLayer::new("voice.mp3"));
    let v = serde_json::to_value(layer.evaluate(FrameIndex(3), &config())).unwrap();
    assert_eq!(v["kind"], "audio");
    assert!(v.get("opacity").is_none());
    assert!(v.get("translate").is_none());
    assert!(v.get("end_at").is_none());
}
