//! Frameline is a deterministic, frame-driven timeline composition engine.
//!
//! A [`Composition`] is a fixed-duration timeline holding an ordered list of
//! [`Sequence`]s. Each sequence binds a [`Layer`] (image, title, subtitle, audio track)
//! to a window of frames. Given one integer frame, [`Composition::render_frame`]
//! resolves which sequences are active, computes each one's local frame and evaluates
//! the layer's interpolation functions ([`Spring`], [`linear_ramp`]) into a
//! [`RenderedFrame`].
//!
//! # Pipeline overview
//!
//! 1. **Declare**: [`CompositionBuilder`] or JSON via [`Composition::from_json_str`].
//!    All validation happens here.
//! 2. **Resolve**: [`resolve_active`] picks the active sequences in declaration order.
//! 3. **Evaluate**: [`Layer::evaluate`] maps a local frame to a [`RenderDescriptor`].
//! 4. **Drive** (optional): [`render_frames`] / [`render_range`] walk a frame range,
//!    sequentially or on a rayon pool.
//!
//! Rendering a frame is a pure function of the composition and the frame number: no
//! wall clock, no hidden state, no ordering dependence between frames. Asset bytes,
//! rasterization and encoding belong to the host driver.
#![forbid(unsafe_code)]

mod animation;
mod composition;
mod foundation;
mod layer;
mod render;
mod sequence;

pub use animation::ramp::{interpolate, linear_ramp};
pub use animation::spring::{Spring, SpringConfig, SpringParams};
pub use composition::demo::{WELCOME_ID, welcome_composition, welcome_project};
pub use composition::dsl::CompositionBuilder;
pub use composition::model::{Composition, CompositionConfig};
pub use composition::registry::Project;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{FramelineError, FramelineResult};
pub use layer::evaluate::{
    AudioDescriptor, ImageDescriptor, RenderDescriptor, TextDescriptor, TextRole,
};
pub use layer::model::{
    AssetRef, AudioLayer, ImageLayer, Layer, SpringMotion, SubtitleLayer, TextSpan, TitleLayer,
};
pub use render::frame::{LayerRender, RenderedFrame};
pub use render::pipeline::{FrameSink, RenderStats, RenderThreading, render_frames, render_range};
pub use sequence::resolver::{ActiveSequence, Sequence, resolve_active};
