//! Song location helpers.

/// Checks that `uri` is a safe path relative to the music directory.
///
/// The path must be non-empty and every `/`-separated segment must be non-empty and not
/// `.` or `..`. This rules out absolute paths, trailing slashes and directory traversal.
pub fn is_safe_local(uri: &str) -> bool {
    !uri.is_empty()
        && uri
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | ".."))
}

/// Checks whether `child` is `parent` itself or lies somewhere below it.
///
/// This is a directory test, not a string test: `a/b` contains `a/b/c` but not `a/bc`.
pub fn is_child_or_same(parent: &str, child: &str) -> bool {
    match child.strip_prefix(parent) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
