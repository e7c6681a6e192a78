//! Maze generator
//!
//! Main entry point for the command line.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::info;
use thiserror::Error;

use mz_core::parse::{
    parse_blank_modifier, parse_closing_modifier, parse_frame_modifier, parse_merge_modifier,
};
use mz_core::{
    Canvas, Generator, GeneratorError, GeneratorSetup, JsonLayout, Layout, MazeRng, Parity,
    ParseError, PathEnd, RenderError, TextLayout,
};

const MIN_END_POINTS: usize = 2;
const MAX_END_POINTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Procedural maze generator
#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(author, version, about = "Generate a random maze with connected end points", long_about = None)]
struct Args {
    /// Width of the maze in rooms
    #[arg(short = 'x', long = "width", default_value_t = 21)]
    width: i32,

    /// Height of the maze in rooms
    #[arg(short = 'y', long = "height", default_value_t = 21)]
    height: i32,

    /// Parity of the width (none, odd, even)
    #[arg(long = "width-parity", default_value = "odd")]
    width_parity: Parity,

    /// Parity of the height (none, odd, even)
    #[arg(long = "height-parity", default_value = "odd")]
    height_parity: Parity,

    /// End point as <placement>[/<offset>[/x]], repeatable
    #[arg(short = 'e', long = "end-point")]
    end_points: Vec<String>,

    /// Merge rooms in <placement>[/<size>[/<offset>]], repeatable
    #[arg(short = 'm', long = "add-merge")]
    merges: Vec<String>,

    /// Blank rooms in <placement>[/<size>[/<offset>]], repeatable
    #[arg(short = 'b', long = "add-blank")]
    blanks: Vec<String>,

    /// Close walls with [^]<closing>/<placement>[/<size>[/<offset>]], repeatable
    #[arg(short = 'c', long = "add-closing")]
    closings: Vec<String>,

    /// Blank a frame of rooms with insets <top>[,<right>[,<bottom>[,<left>]]]
    #[arg(short = 'f', long = "add-frame")]
    frame: Option<String>,

    /// Seed for the random generator
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Attempts to find a solution before giving up
    #[arg(short = 'a', long = "max-attempts", default_value_t = 20)]
    max_attempts: u32,

    /// Do not fill unreachable areas with decoy paths
    #[arg(long = "no-islands")]
    no_islands: bool,

    /// Mark located errors in the output instead of failing
    #[arg(long = "ignore-errors")]
    ignore_errors: bool,

    /// Only prepare the room layout, without paths
    #[arg(long = "layout-only")]
    layout_only: bool,

    /// Only log warnings and errors
    #[arg(long = "silent")]
    silent: bool,

    /// Hide the end point numbers
    #[arg(long = "no-marks")]
    no_marks: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file, standard output when omitted
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("There was a problem with your {index}. {what}: {source}")]
    Argument {
        index: usize,
        what: &'static str,
        source: ParseError,
    },

    #[error("You must specify between 2 and 16 end points, got {0}.")]
    EndPointCount(usize),

    #[error("The generator could not produce a valid maze for your input. {0}")]
    Generator(#[from] GeneratorError),

    #[error("Could not render the maze: {0}")]
    Render(#[from] RenderError),

    #[error("Could not write the maze to '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse every value, naming the argument and its 1-based index on failure
fn parse_all<T>(
    values: &[String],
    what: &'static str,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Result<Vec<T>, CliError> {
    values
        .iter()
        .enumerate()
        .map(|(index, text)| {
            parse(text).map_err(|source| CliError::Argument {
                index: index + 1,
                what,
                source,
            })
        })
        .collect()
}

fn build_setup(args: &Args) -> Result<GeneratorSetup, CliError> {
    let mut path_ends = parse_all(&args.end_points, "end point", |text| text.parse::<PathEnd>())?;
    if path_ends.is_empty() {
        path_ends = GeneratorSetup::default().path_ends;
    }
    if !(MIN_END_POINTS..=MAX_END_POINTS).contains(&path_ends.len()) {
        return Err(CliError::EndPointCount(path_ends.len()));
    }

    let frames: Vec<String> = args.frame.iter().cloned().collect();
    let mut modifiers = parse_all(&frames, "frame modifier", parse_frame_modifier)?;
    modifiers.extend(parse_all(&args.blanks, "blank modifier", parse_blank_modifier)?);
    modifiers.extend(parse_all(&args.merges, "merge modifier", parse_merge_modifier)?);
    modifiers.extend(parse_all(&args.closings, "closing modifier", parse_closing_modifier)?);

    let mut setup = GeneratorSetup::with_path_ends(path_ends);
    setup.modifiers = modifiers;
    setup.allow_islands = !args.no_islands;
    setup.maximum_attempts = args.max_attempts;
    setup.verbose = !args.silent;
    setup.ignore_errors = args.ignore_errors;
    setup.layout_only = args.layout_only;
    Ok(setup)
}

fn build_layout(args: &Args) -> Box<dyn Layout> {
    let canvas = Canvas::new(args.width, args.height)
        .with_parity(args.width_parity, args.height_parity);
    match args.format {
        OutputFormat::Text => Box::new(TextLayout::new(canvas).with_marks(!args.no_marks)),
        OutputFormat::Json => Box::new(JsonLayout::new(canvas)),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let setup = build_setup(args)?;
    let layout = build_layout(args);
    info!("Layout: {}", layout.dimension_info());

    let rng = match args.seed {
        Some(seed) => MazeRng::new(seed),
        None => MazeRng::from_entropy(),
    };
    info!("Seed: {}", rng.seed());

    let mut generator = Generator::new(layout.room_count(), setup, rng)?;
    generator.generate()?;
    if !generator.error_marks().is_empty() {
        info!("{} errors were marked in the output.", generator.error_marks().len());
    }
    let output = layout.render(&generator.view())?;

    match &args.output {
        Some(path) => fs::write(path, output).map_err(|source| CliError::Output {
            path: path.clone(),
            source,
        })?,
        None => print!("{output}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.silent { "warn" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
