//! Path and name helpers for resource references.

use std::path::{Component, Path, PathBuf};

/// Lowercase extension of `path`, without the dot.
pub fn extension_lowercase(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Replace Windows separators with `/`.
pub fn normalize_separators(reference: &str) -> String {
    reference.replace('\\', "/")
}

/// Resolve a resource reference found inside `base_file`.
///
/// Relative references are taken from the directory of `base_file`.
/// `.` components are dropped and `..` pops the previous component.
pub fn resolve_relative(base_file: impl AsRef<Path>, reference: &str) -> PathBuf {
    let reference = PathBuf::from(normalize_separators(reference.trim()));
    let joined = if reference.is_absolute() {
        reference
    } else {
        base_file.as_ref().parent().unwrap_or_else(|| Path::new("")).join(reference)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    resolved.push("..");
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Make a node or mesh name safe to use as a file stem.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
