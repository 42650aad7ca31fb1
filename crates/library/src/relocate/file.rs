use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::matching::MatchOutcome;
use crate::relocate::action::Action;
use crate::relocate::cleanup::{remove_if_vacated, same_dir};
use crate::relocate::error::{ErrorKind, Result as RelocateResult};
use crate::scan::SabunUnit;
use exn::{OptionExt, ResultExt};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Moves `chart` and its `sounds` into `target`, tidying up the directories
/// they leave behind (never `scan_root` itself).
///
/// Returns everything that was done, in order. Stops at the first failure;
/// files already moved stay moved.
///
/// # Errors
/// Returns [`Exn<LibraryErrorKind::Relocate>`](LibraryErrorKind::Relocate)
/// raised from an inner [`Exn<ErrorKind>`](ErrorKind) when `target` is absent
/// or a file operation fails. A missing target directory is not created and
/// fails the move.
pub async fn relocate(
    chart: &Path,
    sounds: &[PathBuf],
    target: Option<&Path>,
    scan_root: &Path,
) -> LibraryResult<Vec<Action>> {
    relocate_inner(chart, sounds, target, scan_root).await.or_raise(|| LibraryErrorKind::Relocate)
}

/// Relocates a unit classified as [`MatchOutcome::Ok`]; any other unit has
/// no target and fails.
pub async fn relocate_unit(unit: &SabunUnit, scan_root: &Path) -> LibraryResult<Vec<Action>> {
    let target = match &unit.outcome {
        Some(MatchOutcome::Ok { target, .. }) => Some(target.as_path()),
        _ => None,
    };
    relocate(unit.path(), &unit.sounds, target, scan_root).await
}

#[instrument(level = "debug", skip_all, fields(chart = %chart.display()))]
pub(crate) async fn relocate_inner(
    chart: &Path,
    sounds: &[PathBuf],
    target: Option<&Path>,
    scan_root: &Path,
) -> RelocateResult<Vec<Action>> {
    let target = target.ok_or_raise(|| ErrorKind::MissingTarget(chart.to_path_buf()))?;
    let mut actions = Vec::new();
    place_chart(chart, target, scan_root, &mut actions).await?;
    for sound in sounds {
        place_sound(sound, target, scan_root, &mut actions).await?;
    }
    Ok(actions)
}

async fn place_chart(source: &Path, dir: &Path, scan_root: &Path, actions: &mut Vec<Action>) -> RelocateResult<()> {
    let name = file_name(source)?;
    let mut attempt = 0;
    loop {
        let destination = numbered(dir, name, attempt);
        if !exists(&destination).await? {
            return move_out(source, destination, scan_root, actions).await;
        }
        if same_contents(source, &destination).await? {
            actions.push(Action::Skipped { source: source.to_path_buf(), existing: destination });
            return Ok(());
        }
        attempt += 1;
    }
}

async fn place_sound(source: &Path, dir: &Path, scan_root: &Path, actions: &mut Vec<Action>) -> RelocateResult<()> {
    let destination = dir.join(file_name(source)?);
    if exists(&destination).await? {
        actions.push(Action::Skipped { source: source.to_path_buf(), existing: destination });
        return Ok(());
    }
    move_out(source, destination, scan_root, actions).await
}

/// Moves `source` to `destination`, then deletes the directory it came from
/// if that left it vacated.
async fn move_out(
    source: &Path,
    destination: PathBuf,
    scan_root: &Path,
    actions: &mut Vec<Action>,
) -> RelocateResult<()> {
    move_file(source, &destination).await?;
    tracing::debug!(from = %source.display(), to = %destination.display(), "moved file");
    actions.push(Action::Moved { from: source.to_path_buf(), to: destination });
    let Some(origin) = source.parent().filter(|p| *p != Path::new("")) else {
        return Ok(());
    };
    if !same_dir(origin, scan_root).await && remove_if_vacated(origin).await? {
        actions.push(Action::RemovedDir(origin.to_path_buf()));
    }
    Ok(())
}

/// Copy-then-delete, so moves can cross filesystems.
async fn move_file(source: &Path, destination: &Path) -> RelocateResult<()> {
    let bytes = tokio::fs::read(source).await.or_raise(|| ErrorKind::Io(source.to_path_buf()))?;
    tokio::fs::write(destination, bytes).await.or_raise(|| ErrorKind::Io(destination.to_path_buf()))?;
    tokio::fs::remove_file(source).await.or_raise(|| ErrorKind::Io(source.to_path_buf()))
}

async fn same_contents(a: &Path, b: &Path) -> RelocateResult<bool> {
    let left = tokio::fs::read(a).await.or_raise(|| ErrorKind::Io(a.to_path_buf()))?;
    let right = tokio::fs::read(b).await.or_raise(|| ErrorKind::Io(b.to_path_buf()))?;
    Ok(left == right)
}

async fn exists(path: &Path) -> RelocateResult<bool> {
    tokio::fs::try_exists(path).await.or_raise(|| ErrorKind::Io(path.to_path_buf()))
}

fn file_name(path: &Path) -> RelocateResult<&OsStr> {
    path.file_name().ok_or_raise(|| ErrorKind::Io(path.to_path_buf()))
}

/// `dir/name` for the first attempt, then `dir/stem (n).ext`.
fn numbered(dir: &Path, name: &OsStr, attempt: u32) -> PathBuf {
    if attempt == 0 {
        return dir.join(name);
    }
    let name = Path::new(name);
    let mut numbered = name.file_stem().unwrap_or(name.as_os_str()).to_os_string();
    numbered.push(format!(" ({attempt})"));
    if let Some(ext) = name.extension() {
        numbered.push(".");
        numbered.push(ext);
    }
    dir.join(numbered)
}
