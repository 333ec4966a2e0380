use super::*;
use crate::composition::demo::welcome_composition;

#[test]
fn visual_and_audio_partitions_keep_order() {
    let comp = welcome_composition().unwrap();
    let frame = comp.render_frame(FrameIndex(60));
    let visual: Vec<_> = frame.visual_layers().map(|l| l.name.as_str()).collect();
    let audio: Vec<_> = frame.audio_layers().map(|l| l.name.as_str()).collect();
    assert_eq!(visual, ["logo", "title", "subtitle"]);
    assert_eq!(audio, ["voice"]);
    assert_eq!(frame.layer_named("title").unwrap().index, 2);
    assert!(frame.layer_named("nope").is_none());
}

#[test]
fn serializes_with_tagged_descriptors() {
    let comp = welcome_composition().unwrap();
    let v = serde_json::to_value(comp.render_frame(FrameIndex(30))).unwrap();
    assert_eq!(v["frame"], 30);
    let kinds: Vec<_> = v["layers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["descriptor"]["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, ["image", "audio", "text"]);
}
