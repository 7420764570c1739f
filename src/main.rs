// ── Replay binary ────────────────────────────────────────────────────────────
//
// Mounts a headless view over a file, replays a recorded touch trace through
// it (one frame per event) and prints the resulting zoom state as JSON.

#![forbid(unsafe_code)]

use std::{fs, path::PathBuf, process::ExitCode};

use serde::Serialize;

use pinchpad::{
    editor::memory::MemoryFactory, EditorConfig, EditorProps, EditorView, FrameQueue,
    HeadlessSurface, Height, Point, TouchEvent,
};

const HELP: &str = "\
pinchpad - replay a touch trace against an editor view

USAGE:
  pinchpad [OPTIONS] <FILE>

OPTIONS:
  --trace <PATH>     JSON array of touch events to replay
  --config <PATH>    JSON view configuration
  --dark             Use the dark theme
  --debug            Enable debug logging
  -h, --help         Print help
";

struct Args {
    file: PathBuf,
    trace: Option<PathBuf>,
    config: Option<PathBuf>,
    dark: bool,
    debug: bool,
}

/// Final state printed on stdout.
#[derive(Serialize)]
struct Report {
    file: String,
    language: &'static str,
    scale: f64,
    font_size: u32,
    line_height: u32,
    translation: Point,
    events: usize,
    frames: usize,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let args = Args {
        trace: pargs.opt_value_from_str("--trace")?,
        config: pargs.opt_value_from_str("--config")?,
        dark: pargs.contains("--dark"),
        debug: pargs.contains("--debug"),
        file: pargs.free_from_str()?,
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        eprintln!("pinchpad: ignoring extra arguments {rest:?}");
    }
    Ok(Some(args))
}

fn init_logger(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(args: &Args) -> pinchpad::Result<Report> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    config.dark_mode |= args.dark;

    let text = fs::read_to_string(&args.file)?;
    let trace: Vec<TouchEvent> = match &args.trace {
        Some(path) => serde_json::from_slice(&fs::read(path)?)?,
        None => Vec::new(),
    };

    let props = EditorProps {
        text,
        height: Height::Fill,
        filename: args.file.to_string_lossy().into_owned(),
    };
    let mut view = EditorView::mount(
        props,
        Some(HeadlessSurface::default()),
        &mut MemoryFactory,
        FrameQueue::new(),
        config,
        Box::new(|text: &str| log::debug!("text changed ({} bytes)", text.len())),
    )?;

    let mut frames = 0;
    for event in &trace {
        view.handle_touch(event);
        frames += view.pump_frames()?;
    }

    let gesture = *view.gesture();
    let translation = view.surface().map_or(Point::ORIGIN, |s| s.translation);
    Ok(Report {
        file: view.filename().to_owned(),
        language: view.language().display_name(),
        scale: gesture.current_scale,
        font_size: gesture.current_metrics.font_size,
        line_height: gesture.current_metrics.line_height,
        translation,
        events: trace.len(),
        frames,
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("pinchpad: {e}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(args.debug);

    match run(&args).and_then(|report| serde_json::to_string_pretty(&report).map_err(Into::into)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("pinchpad: {e}");
            ExitCode::FAILURE
        }
    }
}
