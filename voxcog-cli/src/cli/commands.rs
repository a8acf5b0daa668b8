//! Argument parsing and command execution for `compute-cog`.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use thiserror::Error;
use tracing::{Span, error, field, info, instrument};
use voxcog_core::{
    Centroid, CommandError, ErrorKind, GeometryError, VOLUME_EXTENSION, build_command,
    center_of_geometry,
};
use voxcog_providers_npy::{NpyVolumeError, load};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "compute-cog",
    about = "Compute the centre of geometry of a labelled voxel volume."
)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "input_dir"])))]
pub struct Cli {
    /// Path to a `.npy` file holding a 3D integer label array.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory whose `.npy` files are processed one after another.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Labels to leave out of the computation.
    #[arg(
        short = 'r',
        long = "remove",
        value_name = "LABEL",
        allow_negative_numbers = true,
        num_args = 0..
    )]
    pub remove: Vec<String>,

    /// Length units per voxel; prints mesher translation arguments when set.
    #[arg(long, value_name = "SCALE", value_parser = parse_scale)]
    pub scale: Option<f64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input validation failed.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// Reading or decoding the volume failed.
    #[error(transparent)]
    Volume(#[from] NpyVolumeError),
    /// The centroid could not be computed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Neither or both of `--input` and `--input-dir` were supplied.
    #[error("exactly one of --input or --input-dir must be supplied")]
    InvalidSource,
    /// The scale was zero, negative or not finite.
    #[error("scale must be a positive finite number, got {value}")]
    InvalidScale {
        /// Rejected value.
        value: f64,
    },
    /// The batch directory could not be listed.
    #[error("failed to read directory `{}`", path.display())]
    ReadDir {
        /// Directory that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The batch directory holds no volume files.
    #[error("directory `{}` contains no .{VOLUME_EXTENSION} files", path.display())]
    NoVolumes {
        /// Directory that was searched.
        path: PathBuf,
    },
    /// At least one volume of a batch failed.
    #[error("{failed} of {total} volumes failed")]
    BatchFailed {
        /// Number of failed volumes.
        failed: usize,
        /// Number of volumes attempted.
        total: usize,
        /// Kind of the first failure.
        kind: ErrorKind,
    },
}

impl CliError {
    /// Stable machine-readable code; wrapped library errors report their own.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Command(err) => err.code().as_str(),
            Self::Volume(err) => err.code().as_str(),
            Self::Geometry(err) => err.code().as_str(),
            Self::InvalidSource => "CLI_INVALID_SOURCE",
            Self::InvalidScale { .. } => "CLI_INVALID_SCALE",
            Self::ReadDir { .. } => "CLI_READ_DIR",
            Self::NoVolumes { .. } => "CLI_NO_VOLUMES",
            Self::BatchFailed { .. } => "CLI_BATCH_FAILED",
        }
    }

    /// Classify this error within [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Command(err) => err.kind(),
            Self::Volume(err) => err.kind(),
            Self::Geometry(err) => err.kind(),
            Self::InvalidSource | Self::InvalidScale { .. } => ErrorKind::InvalidArgument,
            Self::ReadDir { .. } => ErrorKind::Io,
            Self::NoVolumes { .. } => ErrorKind::NotFound,
            Self::BatchFailed { kind, .. } => *kind,
        }
    }
}

/// Result of processing one volume file.
#[derive(Debug)]
pub struct VolumeOutcome {
    /// File that was processed.
    pub path: PathBuf,
    /// Centroid in voxel-index units, or the reason it is missing.
    pub result: Result<Centroid, CliError>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug)]
pub struct ExecutionSummary {
    /// One entry per processed file, in processing order.
    pub outcomes: Vec<VolumeOutcome>,
    /// Length units per voxel, when translation output was requested.
    pub scale: Option<f64>,
}

impl ExecutionSummary {
    /// Number of outcomes that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count()
    }

    /// Succeeds only when every volume produced a centroid.
    ///
    /// # Errors
    /// Returns [`CliError::BatchFailed`] carrying the kind of the first
    /// failure.
    pub fn ensure_success(&self) -> Result<(), CliError> {
        let Some(kind) = self
            .outcomes
            .iter()
            .find_map(|outcome| outcome.result.as_ref().err().map(CliError::kind))
        else {
            return Ok(());
        };
        Err(CliError::BatchFailed {
            failed: self.failed(),
            total: self.outcomes.len(),
            kind,
        })
    }
}

/// Executes the CLI command represented by `cli`.
///
/// With `--input` any failure is returned directly. With `--input-dir` each
/// file is processed independently and failures are recorded in the
/// returned summary; only a directory that cannot be listed or holds no
/// volumes fails the call.
///
/// # Errors
/// Returns [`CliError`] when arguments are inconsistent, single-file
/// execution fails, or the batch directory is unusable.
///
/// # Examples
/// ```no_run
/// # use std::error::Error;
/// # use voxcog_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     input: Some("segmentation.npy".into()),
///     input_dir: None,
///     remove: vec!["0".into()],
///     scale: None,
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.outcomes.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    skip(cli),
    fields(mode = field::Empty, scale = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let Cli {
        input,
        input_dir,
        remove,
        scale,
    } = cli;
    let span = Span::current();
    if let Some(value) = scale {
        validate_scale(value)?;
        span.record("scale", value);
    }

    let outcomes = match (input, input_dir) {
        (Some(path), None) => {
            span.record("mode", "file");
            let centroid = compute_centroid(&path, &remove)?;
            vec![VolumeOutcome {
                path,
                result: Ok(centroid),
            }]
        }
        (None, Some(dir)) => {
            span.record("mode", "directory");
            run_batch(&dir, &remove)?
        }
        _ => return Err(CliError::InvalidSource),
    };
    Ok(ExecutionSummary { outcomes, scale })
}

#[instrument(
    name = "cli.batch",
    err,
    skip_all,
    fields(dir = %dir.display(), volumes = field::Empty, failed = field::Empty),
)]
pub(super) fn run_batch(dir: &Path, remove: &[String]) -> Result<Vec<VolumeOutcome>, CliError> {
    let paths = list_volumes(dir)?;
    let span = Span::current();
    span.record("volumes", paths.len());

    let outcomes: Vec<VolumeOutcome> = paths
        .into_iter()
        .map(|path| {
            let result = compute_centroid(&path, remove);
            if let Err(err) = &result {
                error!(
                    path = %path.display(),
                    error = %err,
                    code = err.code(),
                    kind = %err.kind(),
                    "volume failed"
                );
            }
            VolumeOutcome { path, result }
        })
        .collect();

    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.result.is_err())
        .count();
    span.record("failed", failed);
    info!(volumes = outcomes.len(), failed, "batch completed");
    Ok(outcomes)
}

/// Validates, loads and reduces a single volume.
#[instrument(name = "cli.compute", skip_all, fields(path = %path.display()))]
pub(super) fn compute_centroid(path: &Path, remove: &[String]) -> Result<Centroid, CliError> {
    let command = build_command(path, remove)?;
    let volume = load(&command)?;
    let centroid = center_of_geometry(&volume)?;
    info!(centroid = %centroid, "center of geometry");
    Ok(centroid)
}

/// Regular files in `dir` carrying the volume extension, sorted by name.
pub(super) fn list_volumes(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let read_dir_error = |source| CliError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(VOLUME_EXTENSION)) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(CliError::NoVolumes {
            path: dir.to_path_buf(),
        });
    }
    paths.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    Ok(paths)
}

fn validate_scale(value: f64) -> Result<f64, CliError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::InvalidScale { value })
    }
}

fn parse_scale(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    validate_scale(value).map_err(|err| err.to_string())
}

/// Renders `summary` to `writer`, one line per volume plus a translation
/// line per centroid when a scale was given.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use voxcog_cli::cli::{ExecutionSummary, VolumeOutcome, render_summary};
/// # use voxcog_core::Centroid;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     outcomes: vec![VolumeOutcome {
///         path: "f.npy".into(),
///         result: Ok(Centroid { x: 1.0, y: 3.0, z: 0.5 }),
///     }],
///     scale: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "f.npy: [1.000000, 3.000000, 0.500000]\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for outcome in &summary.outcomes {
        let path = outcome.path.display();
        match &outcome.result {
            Ok(centroid) => {
                writeln!(writer, "{path}: {centroid}")?;
                if let Some(scale) = summary.scale {
                    let args = centroid.translation(scale).mesher_args().join(" ");
                    writeln!(writer, "{path}: translation: {args}")?;
                }
            }
            Err(err) => writeln!(writer, "{path}: FAILED: {err}")?,
        }
    }
    Ok(())
}
