use anyhow::anyhow;
use rayon::prelude::*;

use crate::{
    composition::model::Composition,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{FramelineError, FramelineResult},
    render::frame::RenderedFrame,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame driving.
pub struct RenderThreading {
    /// Evaluate each chunk on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Chunk size in frames; frames are handed to the sink one chunk at a time.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated driving counters.
pub struct RenderStats {
    /// Frames evaluated.
    pub frames_total: u64,
    /// Frames with no active layer.
    pub frames_empty: u64,
}

/// Receives frames in ascending frame order.
pub trait FrameSink {
    fn push(&mut self, frame: RenderedFrame) -> FramelineResult<()>;
}

impl FrameSink for Vec<RenderedFrame> {
    fn push(&mut self, frame: RenderedFrame) -> FramelineResult<()> {
        Vec::push(self, frame);
        Ok(())
    }
}

/// Evaluate `[range.start, range.end)` and collect the frames.
///
/// Frames outside the composition's lifetime come back empty rather than failing.
pub fn render_frames(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
) -> FramelineResult<Vec<RenderedFrame>> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    render_range(comp, range, threading, &mut out)?;
    Ok(out)
}

/// Evaluate a frame range into `sink`, sequentially or chunk-parallel.
///
/// Scheduling never changes output: the sink always sees frames in order.
#[tracing::instrument(skip(comp, sink), fields(composition = %comp.id()))]
pub fn render_range(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> FramelineResult<RenderStats> {
    let mut stats = RenderStats::default();
    if range.is_empty() {
        return Ok(stats);
    }

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            let frame = comp.render_frame(FrameIndex(f));
            record(&mut stats, &frame);
            sink.push(frame)?;
        }
        return Ok(stats);
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    tracing::debug!(
        threads = pool.current_num_threads(),
        chunk_size,
        frames = range.len_frames(),
        "parallel frame driving"
    );

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
        let frames: Vec<RenderedFrame> = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map(|f| comp.render_frame(FrameIndex(f)))
                .collect()
        });
        for frame in frames {
            record(&mut stats, &frame);
            sink.push(frame)?;
        }
        chunk_start = chunk_end;
    }

    Ok(stats)
}

fn record(stats: &mut RenderStats, frame: &RenderedFrame) {
    stats.frames_total += 1;
    if frame.is_empty() {
        stats.frames_empty += 1;
    }
}

fn normalized_chunk_size(chunk_size: usize) -> i64 {
    i64::try_from(chunk_size.max(1)).unwrap_or(i64::MAX)
}

fn build_thread_pool(threads: Option<usize>) -> FramelineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramelineError::Other(anyhow!(
            "render 'threads' must be >= 1 when set"
        )));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramelineError::Other(anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
