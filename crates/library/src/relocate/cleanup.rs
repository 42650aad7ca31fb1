use crate::relocate::error::{ErrorKind, Result as RelocateResult};
use exn::ResultExt;
use std::path::Path;

/// Whether `a` and `b` name the same directory, resolving links where both
/// can be resolved.
pub(crate) async fn same_dir(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Deletes `dir` (and whatever it holds) if it contains nothing but `.txt`
/// files. Any subdirectory keeps it.
///
/// Returns `true` if the directory was deleted.
pub(crate) async fn remove_if_vacated(dir: &Path) -> RelocateResult<bool> {
    let io = || ErrorKind::Io(dir.to_path_buf());
    let mut reader = tokio::fs::read_dir(dir).await.or_raise(io)?;
    while let Some(entry) = reader.next_entry().await.or_raise(io)? {
        if entry.file_type().await.or_raise(io)?.is_dir() || !is_text(&entry.path()) {
            return Ok(false);
        }
    }
    tokio::fs::remove_dir_all(dir).await.or_raise(io)?;
    tracing::debug!(dir = %dir.display(), "removed vacated directory");
    Ok(true)
}

fn is_text(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_only_text_files_left() {
        let dir = tempfile::tempdir().unwrap();
        let vacated = dir.path().join("pack");
        fs::create_dir(&vacated).unwrap();
        fs::write(vacated.join("readme.txt"), "hi").unwrap();
        fs::write(vacated.join("NOTES.TXT"), "hi").unwrap();
        assert!(remove_if_vacated(&vacated).await.unwrap());
        assert!(!vacated.exists());
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let vacated = dir.path().join("pack");
        fs::create_dir(&vacated).unwrap();
        assert!(remove_if_vacated(&vacated).await.unwrap());
    }

    #[tokio::test]
    async fn test_anything_else_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("pack");
        fs::create_dir(&kept).unwrap();
        fs::write(kept.join("readme.txt"), "hi").unwrap();
        fs::write(kept.join("leftover.bmson"), "{}").unwrap();
        assert!(!remove_if_vacated(&kept).await.unwrap());
        assert!(kept.exists());

        let nested = dir.path().join("nested");
        fs::create_dir_all(nested.join("inner")).unwrap();
        assert!(!remove_if_vacated(&nested).await.unwrap());
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn test_same_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        assert!(same_dir(dir.path(), &sub.join("..")).await);
        assert!(!same_dir(dir.path(), &sub).await);
        assert!(same_dir(Path::new("missing/a"), Path::new("missing/./a")).await);
    }
}
