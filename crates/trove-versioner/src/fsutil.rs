//! Filesystem helpers

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Create `dir` and its parents, treating "already exists" as success
pub(crate) fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` at the top of an absolute path stays at the top; in a relative path
/// it is kept.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Mark `path` hidden where the platform has such a flag
#[cfg(windows)]
pub(crate) fn hide(path: &Path) -> io::Result<()> {
    let status = std::process::Command::new("attrib")
        .arg("+H")
        .arg(path)
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("attrib exited with {status}")))
    }
}

/// Mark `path` hidden where the platform has such a flag
///
/// Dot-prefixed names are already hidden here.
#[cfg(not(windows))]
pub(crate) fn hide(_path: &Path) -> io::Result<()> {
    Ok(())
}
