use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "frameline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one evaluated frame as JSON.
    Frame(FrameArgs),
    /// Print a range of evaluated frames as JSON lines.
    Frames(FramesArgs),
    /// Evaluate the built-in welcome composition.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (may lie outside the composition).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    drive: DriveArgs,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Print only this frame instead of a range.
    #[arg(long, allow_negative_numbers = true)]
    frame: Option<i64>,

    #[command(flatten)]
    drive: DriveArgs,
}

#[derive(clap::Args, Debug)]
struct DriveArgs {
    /// First frame (inclusive).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// Last frame (exclusive); defaults to the composition duration.
    #[arg(long, allow_negative_numbers = true)]
    end: Option<i64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per scheduling chunk (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn read_comp_json(path: &Path) -> anyhow::Result<frameline::Composition> {
    let f = File::open(path).with_context(|| format!("open composition '{}'", path.display()))?;
    frameline::Composition::from_json_reader(BufReader::new(f))
        .with_context(|| format!("load composition '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    print_frame(&comp, args.frame)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    drive(&comp, &args.drive)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let comp = frameline::welcome_composition()?;
    match args.frame {
        Some(frame) => print_frame(&comp, frame),
        None => drive(&comp, &args.drive),
    }
}

fn print_frame(comp: &frameline::Composition, frame: i64) -> anyhow::Result<()> {
    let rendered = comp.render_frame(frameline::FrameIndex(frame));
    let json = serde_json::to_string_pretty(&rendered).context("serialize frame")?;
    println!("{json}");
    Ok(())
}

fn drive(comp: &frameline::Composition, args: &DriveArgs) -> anyhow::Result<()> {
    let end = args.end.unwrap_or(comp.duration_in_frames());
    let range = frameline::FrameRange::new(
        frameline::FrameIndex(args.start),
        frameline::FrameIndex(end),
    )?;
    let threading = frameline::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let stdout = std::io::stdout();
    let mut sink = JsonLinesSink {
        out: BufWriter::new(stdout.lock()),
    };
    let stats = frameline::render_range(comp, range, &threading, &mut sink)?;
    sink.out.flush().context("flush stdout")?;

    eprintln!(
        "evaluated {} frames ({} empty)",
        stats.frames_total, stats.frames_empty
    );
    Ok(())
}

struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> frameline::FrameSink for JsonLinesSink<W> {
    fn push(&mut self, frame: frameline::RenderedFrame) -> frameline::FramelineResult<()> {
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out
            .write_all(b"\n")
            .context("write frame line")
            .map_err(frameline::FramelineError::Other)
    }
}
