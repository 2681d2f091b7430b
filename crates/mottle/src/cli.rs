#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually to keep the binary lean. Every option can also be
//! set through a `MOTTLE_*` environment variable; explicit flags win.

use std::env;
use std::fmt;
use std::path::PathBuf;

use mottle_core::{Scale, ScaleSet};
use mottle_render::Palette;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
mottle - multi-scale Turing patterns

USAGE:
    mottle [OPTIONS]

Without --export, the pattern animates in the terminal (sized to the
window). With --export, the pattern is stepped headlessly and the final
frame is written as a PNG.

OPTIONS:
    --preset=NAME        Scale preset: 'classic' (default) or 'fine'
    --scales=LIST        Explicit scales: A:I:INC[,A:I:INC...]
                         (activator radius, inhibitor radius, increment)
    --scales-file=PATH   JSON array of {activator_radius, inhibitor_radius, increment}
    --palette=NAME       gray (default), bw, rainbow, lava
    --seed=N             Fixed seed for reproducible noise
    --fps=N              Frame cap for the terminal viewer (default: 30)
    --sequential         Run activator/inhibitor blurs on one thread
    --export=PATH        Write a PNG instead of opening the viewer
    --width=N            Export width in pixels (default: 640)
    --height=N           Export height in pixels (default: 480)
    --steps=N            Steps before export (default: 100)
    --log-file=PATH      Write logs here (viewer mode logs nowhere otherwise)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit
    r                    Re-randomize the field
    Space                Pause / resume
    p                    Next palette

ENVIRONMENT VARIABLES:
    MOTTLE_PRESET, MOTTLE_SCALES, MOTTLE_SCALES_FILE, MOTTLE_PALETTE,
    MOTTLE_SEED, MOTTLE_FPS, MOTTLE_WIDTH, MOTTLE_HEIGHT, MOTTLE_STEPS,
    MOTTLE_EXPORT, MOTTLE_LOG_FILE
                         Same as the matching flag
    MOTTLE_LOG           Log filter (tracing EnvFilter syntax, default: warn)";

/// Errors from malformed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Flag not recognised.
    UnknownFlag(String),
    /// Flag value could not be parsed.
    InvalidValue { flag: &'static str, value: String },
    /// `--scales` list is malformed.
    ScaleSpec { spec: String, reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown option: {flag} (try --help)"),
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::ScaleSpec { spec, reason } => write!(f, "invalid scale list '{spec}': {reason}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Where the scale set comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleSource {
    /// Built-in preset.
    Preset(ScaleSet),
    /// Parsed from `--scales`.
    Inline(ScaleSet),
    /// JSON file, loaded at startup.
    File(PathBuf),
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub scales: ScaleSource,
    pub palette: Palette,
    pub seed: Option<u64>,
    pub fps: u32,
    pub concurrent_blur: bool,
    /// Headless PNG output path.
    pub export: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    pub steps: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            scales: ScaleSource::Preset(ScaleSet::classic()),
            palette: Palette::Gray,
            seed: None,
            fps: 30,
            concurrent_blur: true,
            export: None,
            width: 640,
            height: 480,
            steps: 100,
            log_file: None,
        }
    }
}

/// What the process should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Value-taking options: (flag, environment variable).
const VALUE_OPTIONS: &[(&str, &str)] = &[
    ("--preset", "MOTTLE_PRESET"),
    ("--scales", "MOTTLE_SCALES"),
    ("--scales-file", "MOTTLE_SCALES_FILE"),
    ("--palette", "MOTTLE_PALETTE"),
    ("--seed", "MOTTLE_SEED"),
    ("--fps", "MOTTLE_FPS"),
    ("--export", "MOTTLE_EXPORT"),
    ("--width", "MOTTLE_WIDTH"),
    ("--height", "MOTTLE_HEIGHT"),
    ("--steps", "MOTTLE_STEPS"),
    ("--log-file", "MOTTLE_LOG_FILE"),
];

/// Parse the process arguments and environment.
pub fn parse() -> Result<Command, CliError> {
    parse_from(env::args().skip(1), |key| env::var(key).ok())
}

/// Parse `args` (without the program name), reading environment defaults
/// through `lookup`.
///
/// Malformed environment values are ignored; malformed flags are errors.
pub fn parse_from<I, S, F>(args: I, lookup: F) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    for &(flag, var) in VALUE_OPTIONS {
        if let Some(value) = lookup(var) {
            let _ = apply(&mut opts, flag, &value);
        }
    }

    // Parse command-line args (override env vars)
    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--sequential" => opts.concurrent_blur = false,
            other => {
                let Some((flag, value)) = other.split_once('=') else {
                    return Err(CliError::UnknownFlag(other.to_string()));
                };
                let Some(&(flag, _)) = VALUE_OPTIONS.iter().find(|(f, _)| *f == flag) else {
                    return Err(CliError::UnknownFlag(other.to_string()));
                };
                apply(&mut opts, flag, value)?;
            }
        }
    }

    Ok(Command::Run(opts))
}

fn apply(opts: &mut Opts, flag: &'static str, value: &str) -> Result<(), CliError> {
    let invalid = || CliError::InvalidValue {
        flag,
        value: value.to_string(),
    };
    match flag {
        "--preset" => {
            opts.scales = ScaleSource::Preset(ScaleSet::preset(value).ok_or_else(invalid)?);
        }
        "--scales" => opts.scales = ScaleSource::Inline(parse_scales(value)?),
        "--scales-file" => opts.scales = ScaleSource::File(PathBuf::from(value)),
        "--palette" => opts.palette = Palette::from_name(value).ok_or_else(invalid)?,
        "--seed" => opts.seed = Some(value.parse().map_err(|_| invalid())?),
        "--fps" => {
            opts.fps = value
                .parse()
                .ok()
                .filter(|&n: &u32| n > 0)
                .ok_or_else(invalid)?;
        }
        "--export" => opts.export = Some(PathBuf::from(value)),
        "--width" => opts.width = parse_dimension(value).ok_or_else(invalid)?,
        "--height" => opts.height = parse_dimension(value).ok_or_else(invalid)?,
        "--steps" => opts.steps = value.parse().map_err(|_| invalid())?,
        "--log-file" => opts.log_file = Some(PathBuf::from(value)),
        _ => return Err(CliError::UnknownFlag(flag.to_string())),
    }
    Ok(())
}

/// Positive pixel count. Zero and negative values are rejected here so the
/// engine never sees them.
fn parse_dimension(value: &str) -> Option<usize> {
    value.parse().ok().filter(|&n: &usize| n > 0)
}

/// Parse `A:I:INC[,A:I:INC...]`.
pub fn parse_scales(spec: &str) -> Result<ScaleSet, CliError> {
    let fail = |reason: String| CliError::ScaleSpec {
        spec: spec.to_string(),
        reason,
    };

    let mut scales = Vec::new();
    for (index, item) in spec.split(',').enumerate() {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let parts: Vec<&str> = item.split(':').collect();
        let [activator, inhibitor, increment] = parts.as_slice() else {
            return Err(fail(format!(
                "scale #{index} '{item}' needs activator:inhibitor:increment"
            )));
        };
        let radius = |text: &str| {
            text.trim()
                .parse::<usize>()
                .map_err(|_| fail(format!("scale #{index}: bad radius '{text}'")))
        };
        let increment = increment
            .trim()
            .parse::<f64>()
            .map_err(|_| fail(format!("scale #{index}: bad increment '{increment}'")))?;
        scales.push(Scale::new(radius(*activator)?, radius(*inhibitor)?, increment));
    }

    ScaleSet::new(scales).map_err(|e| fail(e.to_string()))
}
