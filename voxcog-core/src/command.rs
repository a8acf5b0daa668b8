//! Validation of caller input into an immutable [`CommandDescriptor`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{Span, field, instrument};

use crate::{error::CommandError, volume::Label};

/// Extension, without the leading dot, of the volume files the loader reads.
pub const VOLUME_EXTENSION: &str = "npy";

/// A validated request: an existing `.npy` file plus non-negative labels to
/// exclude, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    input_file: PathBuf,
    exclude_labels: Vec<Label>,
}

impl CommandDescriptor {
    /// Path of the volume file.
    #[must_use]
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    /// Labels to exclude; empty when none were supplied.
    #[must_use]
    pub fn exclude_labels(&self) -> &[Label] {
        &self.exclude_labels
    }
}

/// Validates a path and raw exclusion tokens, as received from a command line.
///
/// Checks run in order and stop at the first failure: the file must exist,
/// it must carry the `.npy` extension, every token must be an integer, and
/// every integer must be non-negative.
///
/// # Errors
/// - [`CommandError::NotFound`] when `input_file` is not an existing regular file.
/// - [`CommandError::UnsupportedExtension`] when the extension is not `npy`.
/// - [`CommandError::NonIntegerLabel`] for the first token that is not an integer.
/// - [`CommandError::NegativeLabel`] for the first negative value.
///
/// # Examples
/// ```
/// use voxcog_core::{CommandError, build_command};
///
/// let err = build_command("missing.npy", ["0"]).unwrap_err();
/// assert!(matches!(err, CommandError::NotFound { .. }));
/// ```
#[instrument(
    name = "command.build",
    err,
    skip_all,
    fields(path = %input_file.as_ref().display(), exclude = field::Empty),
)]
pub fn build_command<I>(
    input_file: impl AsRef<Path>,
    exclude_labels: I,
) -> Result<CommandDescriptor, CommandError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let input_file = validate_input_file(input_file.as_ref())?;
    let parsed = exclude_labels
        .into_iter()
        .map(|token| parse_label(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let exclude_labels = require_non_negative(parsed)?;
    Span::current().record("exclude", field::debug(&exclude_labels));
    Ok(CommandDescriptor {
        input_file,
        exclude_labels,
    })
}

/// Validates a path and already-typed exclusion labels.
///
/// `None` is equivalent to an empty list.
///
/// # Errors
/// As [`build_command`], except that [`CommandError::NonIntegerLabel`] cannot
/// occur.
pub fn build_command_from_labels(
    input_file: impl AsRef<Path>,
    exclude_labels: Option<&[Label]>,
) -> Result<CommandDescriptor, CommandError> {
    let input_file = validate_input_file(input_file.as_ref())?;
    let exclude_labels = require_non_negative(exclude_labels.unwrap_or_default().to_vec())?;
    Ok(CommandDescriptor {
        input_file,
        exclude_labels,
    })
}

fn validate_input_file(path: &Path) -> Result<PathBuf, CommandError> {
    if !path.is_file() {
        return Err(CommandError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if path.extension() != Some(OsStr::new(VOLUME_EXTENSION)) {
        return Err(CommandError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: VOLUME_EXTENSION,
        });
    }
    Ok(path.to_path_buf())
}

fn parse_label(token: &str) -> Result<Label, CommandError> {
    token
        .trim()
        .parse::<Label>()
        .map_err(|_| CommandError::NonIntegerLabel {
            token: token.to_owned(),
        })
}

fn require_non_negative(labels: Vec<Label>) -> Result<Vec<Label>, CommandError> {
    match labels.iter().find(|label| **label < 0) {
        Some(&label) => Err(CommandError::NegativeLabel { label }),
        None => Ok(labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        volume: PathBuf,
        other: PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("temp dir");
        let volume = dir.path().join("letter_f.npy");
        let other = dir.path().join("letter_f.spn");
        File::create(&volume).expect("create volume");
        File::create(&other).expect("create other");
        Workspace {
            _dir: dir,
            volume,
            other,
        }
    }

    #[rstest]
    fn keeps_path_and_labels(workspace: Workspace) {
        let command = build_command(&workspace.volume, ["0", "11"]).expect("valid command");
        assert_eq!(command.input_file(), workspace.volume.as_path());
        assert_eq!(command.exclude_labels(), &[0, 11]);
    }

    #[rstest]
    fn no_labels_yield_empty_list(workspace: Workspace) {
        let command = build_command(&workspace.volume, Vec::<String>::new()).expect("valid");
        assert!(command.exclude_labels().is_empty());
        let typed = build_command_from_labels(&workspace.volume, None).expect("valid");
        assert!(typed.exclude_labels().is_empty());
    }

    #[rstest]
    fn reports_missing_file_with_path(workspace: Workspace) {
        let missing = workspace.volume.with_file_name("no_such_file.npy");
        let err = build_command(&missing, ["0"]).expect_err("missing file");
        assert_eq!(
            err.to_string(),
            format!("File {} not found.", missing.display())
        );
        assert_eq!(err.code(), crate::CommandErrorCode::NotFound);
    }

    #[rstest]
    fn directories_are_not_files(workspace: Workspace) {
        let dir = workspace.volume.with_file_name("nested.npy");
        std::fs::create_dir(&dir).expect("create dir");
        let err = build_command_from_labels(&dir, None).expect_err("directory");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }

    #[rstest]
    fn reports_wrong_extension(workspace: Workspace) {
        let err = build_command(&workspace.other, ["0"]).expect_err("wrong extension");
        assert_eq!(
            err.to_string(),
            format!("File {} must be a .npy file.", workspace.other.display())
        );
        assert_eq!(err.kind(), crate::ErrorKind::Format);
    }

    #[rstest]
    fn missing_file_wins_over_bad_labels(workspace: Workspace) {
        let missing = workspace.other.with_file_name("absent.spn");
        let err = build_command(&missing, ["-1"]).expect_err("missing file");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }

    #[rstest]
    #[case::fraction(&["-1", "2.5"], "2.5")]
    #[case::word(&["0", "void"], "void")]
    #[case::empty(&[""], "")]
    fn non_integers_are_reported_before_negatives(
        workspace: Workspace,
        #[case] tokens: &[&str],
        #[case] offending: &str,
    ) {
        let err = build_command(&workspace.volume, tokens).expect_err("non-integer");
        assert_eq!(
            err,
            CommandError::NonIntegerLabel {
                token: offending.to_owned()
            }
        );
        assert!(err.to_string().starts_with("Remove IDs must be integers"));
    }

    #[rstest]
    fn negative_labels_are_rejected(workspace: Workspace) {
        let err = build_command(&workspace.volume, ["-1", "2"]).expect_err("negative");
        assert_eq!(err, CommandError::NegativeLabel { label: -1 });
        assert!(err.to_string().starts_with("Remove IDs must be non-negative"));
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);

        let typed = build_command_from_labels(&workspace.volume, Some(&[3, -7]))
            .expect_err("negative");
        assert_eq!(typed, CommandError::NegativeLabel { label: -7 });
    }
}
