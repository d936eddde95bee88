use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "opbloom", version)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session and write the resulting frame as a PNG.
    Frame(FrameArgs),
    /// Replay a session and export a looping GIF (PNG fallback on failure).
    Export(ExportArgs),
    /// List the built-in palettes.
    Palettes,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input session JSON.
    #[arg(long)]
    session: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render-loop frames to run after the replay.
    #[arg(long, default_value_t = 1)]
    settle: u64,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input session JSON.
    #[arg(long)]
    session: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Still image written when there is nothing to animate or encoding fails.
    /// Defaults to the GIF path with a `.png` extension.
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Render-loop frames to run after the replay.
    #[arg(long, default_value_t = 1)]
    settle: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Palettes => cmd_palettes(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "opbloom=debug" } else { "opbloom=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_canvas(session_path: &Path, settle: u64) -> anyhow::Result<opbloom::BloomCanvas> {
    let session = opbloom::Session::from_path(session_path)?;
    let mut canvas = session
        .build_canvas()
        .with_context(|| format!("build canvas for '{}'", session_path.display()))?;
    session.replay(&mut canvas)?;
    opbloom::RenderLoop::new(opbloom::FixedFrames::new(settle)).run(&mut canvas);
    Ok(canvas)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut canvas = load_canvas(&args.session, args.settle)?;
    let mut sink = opbloom::PngSink::new(&args.out);
    opbloom::export_still(&mut canvas, &mut sink)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut canvas = load_canvas(&args.session, args.settle)?;
    let fallback = args
        .fallback
        .clone()
        .unwrap_or_else(|| args.out.with_extension("png"));

    let mut anim = opbloom::GifSink::new(opbloom::GifSinkOpts::new(&args.out));
    let mut still = opbloom::PngSink::new(&fallback);
    let outcome = opbloom::export_animation(&mut canvas, &mut anim, &mut still)
        .with_context(|| format!("export '{}'", args.out.display()))?;

    match outcome {
        opbloom::ExportOutcome::Animated { frames } => {
            eprintln!("wrote {} ({frames} frames)", args.out.display());
        }
        opbloom::ExportOutcome::Still => {
            eprintln!("nothing to animate; wrote {}", fallback.display());
        }
        opbloom::ExportOutcome::StillFallback { reason } => {
            eprintln!("gif export failed ({reason}); wrote {}", fallback.display());
        }
        opbloom::ExportOutcome::Skipped => {
            anyhow::bail!("no drawing surface; nothing exported");
        }
    }
    Ok(())
}

fn cmd_palettes() -> anyhow::Result<()> {
    for key in opbloom::PaletteKey::all() {
        let palette = key.palette();
        let colors: Vec<String> = palette.colors.iter().map(|c| c.to_hex()).collect();
        println!(
            "{:<10} {:<12} tint {}  {}",
            key.as_str(),
            palette.name,
            palette.tint().to_hex(),
            colors.join(" ")
        );
    }
    Ok(())
}
