use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use morphcast::{
    CaptionTrack, Diagram, Ease, Narration, PlaybackConfig, PlaybackController, PlaybackEvent,
    SimulatedDevice, Stage, Transition,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "morphcast", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the clause timings of one stage's script.
    Captions(CaptionsArgs),
    /// Interpolate between two diagrams at a given progress.
    Frame(FrameArgs),
    /// Play a stage set against simulated audio and print the event stream.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Input stages JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stage index (as written in the stages JSON).
    #[arg(long)]
    stage: u32,

    /// Narration segment duration in seconds.
    #[arg(long)]
    duration: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source SVG diagram.
    #[arg(long)]
    from: PathBuf,

    /// Target SVG diagram.
    #[arg(long)]
    to: PathBuf,

    /// Linear progress in `[0, 1]`; eased with in-out cubic before sampling.
    #[arg(long)]
    progress: f64,

    /// Output PNG path. Prints the interpolated SVG when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rasterization scale for `--out`.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input stages JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Narration JSON (combined audio reference plus per-stage segments).
    #[arg(long)]
    narration: PathBuf,

    /// Playback configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep between timer deadlines instead of running in virtual time.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Captions(args) => cmd_captions(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "morphcast=debug",
        _ => "morphcast=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_stages(path: &Path) -> anyhow::Result<Vec<Stage>> {
    let f = File::open(path).with_context(|| format!("open stages '{}'", path.display()))?;
    let stages = morphcast::load_stages_reader(BufReader::new(f))
        .with_context(|| format!("load stages '{}'", path.display()))?;
    Ok(stages)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let stages = read_stages(&args.in_path)?;
    let stage = stages
        .iter()
        .find(|s| s.index == args.stage)
        .with_context(|| format!("no stage with index {}", args.stage))?;
    anyhow::ensure!(
        args.duration.is_finite() && args.duration >= 0.0,
        "duration must be a non-negative number of seconds"
    );

    let track = CaptionTrack::build(
        &stage.script,
        args.duration,
        morphcast::DEFAULT_CLAUSE_WEIGHT_FLOOR,
    );
    println!("stage {}: {}", stage.index, stage.title);
    for (si, sentence) in track.sentences().iter().enumerate() {
        println!("sentence {si}: {}", sentence.text);
        for ci in sentence.clauses.clone() {
            let clause = &track.clauses()[ci];
            println!("  {:>8.3}s  [{ci}] {}", clause.start, clause.text);
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.progress),
        "progress must be within [0, 1]"
    );
    let from = Diagram::parse(&read_text(&args.from)?)
        .with_context(|| format!("parse diagram '{}'", args.from.display()))?;
    let to = Diagram::parse(&read_text(&args.to)?)
        .with_context(|| format!("parse diagram '{}'", args.to.display()))?;

    let eased = Ease::InOutCubic.apply(args.progress);
    let frame = Transition::sample_at(&from, &to, eased);

    let Some(out) = args.out else {
        println!("{}", frame.to_svg());
        return Ok(());
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    morphcast::render::raster::save_png(&frame, args.scale, &out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let stages = read_stages(&args.in_path)?;
    let config = match &args.config {
        Some(path) => PlaybackConfig::from_json(&read_text(path)?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => PlaybackConfig::default(),
    };
    let narration = Narration::from_json(&read_text(&args.narration)?)
        .with_context(|| format!("parse narration '{}'", args.narration.display()));

    let mut controller = PlaybackController::new(config, SimulatedDevice::default())?;
    controller.load_stages(stages);
    controller.set_narration(narration.map_err(morphcast::MorphcastError::Other));

    let started = std::time::Instant::now();
    let mut now = Duration::ZERO;
    anyhow::ensure!(controller.play(now)?, "nothing to play");
    let events = controller_events(&mut controller);
    print_events(&controller, now, events);

    while let Some(due) = controller.next_deadline() {
        if args.realtime {
            std::thread::sleep(due.saturating_sub(started.elapsed()));
        }
        now = due;
        controller.advance_to(now)?;
        let events = controller_events(&mut controller);
        print_events(&controller, now, events);
    }
    Ok(())
}

fn controller_events(c: &mut PlaybackController<SimulatedDevice>) -> Vec<PlaybackEvent> {
    c.drain_events()
        .into_iter()
        .filter(|e| !matches!(e, PlaybackEvent::Progress { .. }))
        .collect()
}

fn print_events(
    controller: &PlaybackController<SimulatedDevice>,
    now: Duration,
    events: Vec<PlaybackEvent>,
) {
    let t = now.as_secs_f64();
    for event in events {
        match event {
            PlaybackEvent::Started => println!("{t:>8.3}s  started"),
            PlaybackEvent::StageStarted { stage, animated } => {
                let title = controller
                    .stages()
                    .get(stage)
                    .map_or("", |s| s.title.as_str());
                let how = if animated { "morph" } else { "cut" };
                println!("{t:>8.3}s  stage {stage} ({how}): {title}");
            }
            PlaybackEvent::ClauseChanged {
                stage,
                clause: Some(clause),
            } => {
                let text = controller
                    .caption_track()
                    .and_then(|track| track.clauses().get(clause))
                    .map_or("", |c| c.text.as_str());
                println!("{t:>8.3}s  stage {stage} clause {clause}: {text}");
            }
            PlaybackEvent::ClauseChanged { clause: None, .. } | PlaybackEvent::Progress { .. } => {}
            PlaybackEvent::StageFinished { stage } => println!("{t:>8.3}s  stage {stage} finished"),
            PlaybackEvent::Completed => println!("{t:>8.3}s  completed"),
            PlaybackEvent::Stopped => println!("{t:>8.3}s  stopped"),
        }
    }
}
