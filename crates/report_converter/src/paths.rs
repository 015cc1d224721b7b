use std::path::{Component, Path, PathBuf};

/// Resolves a file path reported by a tool against the directory that holds
/// the raw analyzer result.
///
/// Absolute paths are returned unchanged. Relative paths are joined to the
/// result's parent directory and, when `normalize` is set, lexically cleaned.
pub fn resolve_reported_path(analyzer_result: &Path, reported: &str, normalize: bool) -> String {
    let reported_path = Path::new(reported);
    if reported_path.is_absolute() {
        return reported.to_string();
    }

    let joined = match analyzer_result.parent() {
        Some(dir) => dir.join(reported_path),
        None => reported_path.to_path_buf(),
    };
    let resolved = if normalize {
        normalize_lexically(&joined)
    } else {
        joined
    };
    resolved.to_string_lossy().into_owned()
}

/// Drops `.` components and folds `..` into its parent without touching the
/// filesystem. Leading `..` of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
